//! Line breaking for shaped glyph runs.

use std::ops::Range;

use super::shaping::{BreakClass, GlyphRun, RunEntry};

/// Slack for accumulated float error when comparing against a max width.
const WIDTH_EPSILON: f32 = 1e-3;

/// Text wrapping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapStyle {
    /// Break only at whitespace. A word wider than the max width gets a
    /// line of its own and overflows.
    #[default]
    Word,
    /// Break between any two grapheme clusters.
    Character,
}

/// One line of a glyph run.
///
/// Leading whitespace at a soft break and all trailing whitespace are
/// excluded from the line.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    entries: &'a [RunEntry],
    width: f32,
}

impl<'a> Line<'a> {
    fn new(entries: &'a [RunEntry]) -> Self {
        Self {
            entries,
            width: span_width(entries, false),
        }
    }

    /// The entries drawn on this line.
    pub fn entries(&self) -> &'a [RunEntry] {
        self.entries
    }

    /// Sum of the entry advances plus kerning between entries on this line.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte range of the source text covered by this line.
    pub fn byte_range(&self) -> Range<usize> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => first.cluster.start..last.cluster.end,
            _ => 0..0,
        }
    }

    /// The slice of `text` this line shows. `text` must be the string the
    /// run was shaped from.
    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.byte_range()).unwrap_or("")
    }
}

/// Split a run into lines.
///
/// Explicit newlines always break. With `max_width` set, paragraphs are
/// additionally wrapped per `style`; with `None` only newlines break.
pub fn break_lines(run: &GlyphRun, max_width: Option<f32>, style: WrapStyle) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for paragraph in run.entries().split(|e| e.class == BreakClass::Newline) {
        match max_width {
            None => lines.push(trimmed(paragraph)),
            Some(max) => match style {
                WrapStyle::Word => wrap_words(paragraph, max, &mut lines),
                WrapStyle::Character => wrap_chars(paragraph, max, &mut lines),
            },
        }
    }
    lines
}

/// The whole run as one line. Newlines draw nothing and do not break.
pub fn single_line(run: &GlyphRun) -> Line<'_> {
    trimmed(run.entries())
}

fn is_space(entry: &RunEntry) -> bool {
    entry.class == BreakClass::Whitespace
}

/// Width of consecutive entries. With `continued` set, the span follows
/// another entry on the same line and its first entry's kerning counts.
fn span_width(entries: &[RunEntry], continued: bool) -> f32 {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            if i > 0 || continued {
                e.kerning + e.advance
            } else {
                e.advance
            }
        })
        .sum()
}

fn trimmed(entries: &[RunEntry]) -> Line<'_> {
    let end = entries
        .iter()
        .rposition(|e| e.class == BreakClass::Normal)
        .map_or(0, |i| i + 1);
    Line::new(&entries[..end])
}

/// Greedy word wrap. Leading indentation of the paragraph is kept.
fn wrap_words<'a>(paragraph: &'a [RunEntry], max: f32, lines: &mut Vec<Line<'a>>) {
    // (start, end, width) of the line being built; `end` is the end of its
    // last word.
    let mut current: Option<(usize, usize, f32)> = None;
    let mut pos = 0;

    while pos < paragraph.len() {
        let word_start = pos + paragraph[pos..]
            .iter()
            .position(|e| !is_space(e))
            .unwrap_or(paragraph.len() - pos);
        let word_end = word_start + paragraph[word_start..]
            .iter()
            .position(is_space)
            .unwrap_or(paragraph.len() - word_start);
        if word_start == word_end {
            break;
        }

        current = Some(match current {
            None => (pos, word_end, span_width(&paragraph[pos..word_end], false)),
            Some((start, end, width)) => {
                let joined = width + span_width(&paragraph[end..word_end], true);
                if joined <= max + WIDTH_EPSILON {
                    (start, word_end, joined)
                } else {
                    lines.push(Line::new(&paragraph[start..end]));
                    let word = &paragraph[word_start..word_end];
                    (word_start, word_end, span_width(word, false))
                }
            }
        });
        pos = word_end;
    }

    match current {
        Some((start, end, _)) => lines.push(Line::new(&paragraph[start..end])),
        None => lines.push(Line::new(&paragraph[..0])),
    }
}

/// Break before the first grapheme that would overflow. Whitespace never
/// starts a break; it hangs past the edge and is trimmed.
fn wrap_chars<'a>(paragraph: &'a [RunEntry], max: f32, lines: &mut Vec<Line<'a>>) {
    let mut start = 0;
    let mut width = 0.0;

    for (i, entry) in paragraph.iter().enumerate() {
        let breakable = i > start && entry.grapheme_start && !is_space(entry);
        let step = if i > start {
            entry.kerning + entry.advance
        } else {
            entry.advance
        };
        if breakable && width + step > max + WIDTH_EPSILON {
            lines.push(trimmed(&paragraph[start..i]));
            start = i;
            width = entry.advance;
            continue;
        }
        width += step;
    }
    lines.push(trimmed(&paragraph[start..]));
}
