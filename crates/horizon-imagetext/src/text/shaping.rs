//! Text shaping: converting text into a run of glyph and emoji entries.
//!
//! Shaping is per character. Each character resolves to a glyph through the
//! font's fallback chain; characters no face maps become the missing-glyph
//! marker of the primary face. When emoji drawing is enabled, resolved emoji
//! spans replace their characters with a single emoji entry.
//!
//! # Example
//!
//! ```no_run
//! use horizon_imagetext::text::{Font, Shaper};
//!
//! let font = Font::from_files("fonts/DejaVuSans.ttf", &[] as &[&str])?;
//! let run = Shaper::new(&font, 24.0).shape("Hello")?;
//! assert_eq!(run.len(), 5);
//! println!("width: {}", run.width());
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```

use std::ops::Range;

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use super::emoji::{EmojiImage, EmojiOptions, EmojiRegistry, scan_emojis};
use super::font::{Font, ParsedFont};
use crate::error::{TextResult, ensure_positive};

/// How an entry participates in line breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakClass {
    /// Part of a word.
    Normal,
    /// A soft break opportunity; dropped at line ends.
    Whitespace,
    /// An explicit line break.
    Newline,
}

/// What an entry draws.
#[derive(Debug, Clone)]
pub enum EntryKind {
    /// A glyph from one face of the font.
    Glyph {
        /// Index of the face in the font's chain (0 = primary).
        face: usize,
        glyph_id: u16,
        /// False for the missing-glyph marker.
        found: bool,
    },
    /// An emoji image drawn as a `size_px` square.
    Emoji { image: EmojiImage, size_px: u32 },
    /// An explicit line break; draws nothing.
    LineBreak,
}

/// One entry of a [`GlyphRun`].
#[derive(Debug, Clone)]
pub struct RunEntry {
    pub kind: EntryKind,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Pair kerning against the previous entry, in pixels. Applied before
    /// this entry only when the previous entry is on the same line.
    pub kerning: f32,
    /// Byte range of the source text this entry covers.
    pub cluster: Range<usize>,
    pub class: BreakClass,
    /// True if this entry starts a grapheme cluster. Character wrapping only
    /// breaks before such entries.
    pub grapheme_start: bool,
}

impl RunEntry {
    /// Check if this is an emoji entry.
    pub fn is_emoji(&self) -> bool {
        matches!(self.kind, EntryKind::Emoji { .. })
    }
}

/// The shaped form of a string.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    entries: Vec<RunEntry>,
    size: f32,
}

impl GlyphRun {
    /// The entries, in text order.
    pub fn entries(&self) -> &[RunEntry] {
        &self.entries
    }

    /// The font size the run was shaped at.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Total advance of all entries, kerning included.
    pub fn width(&self) -> f32 {
        self.entries.iter().map(|e| e.kerning + e.advance).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of emoji entries.
    pub fn emoji_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_emoji()).count()
    }
}

/// Shapes text with a font at a fixed size, optionally resolving emoji.
#[derive(Debug, Clone)]
pub struct Shaper<'a> {
    font: &'a Font,
    size: f32,
    emoji: Option<(&'a EmojiRegistry, EmojiOptions)>,
}

impl<'a> Shaper<'a> {
    /// Create a shaper that draws every character as a glyph.
    pub fn new(font: &'a Font, size: f32) -> Self {
        Self {
            font,
            size,
            emoji: None,
        }
    }

    /// Resolve emoji spans against `registry`.
    pub fn with_emojis(mut self, registry: &'a EmojiRegistry, options: EmojiOptions) -> Self {
        self.emoji = Some((registry, options));
        self
    }

    /// Shape `text` into a glyph run.
    ///
    /// Fails only for an invalid size or emoji scale, or a font whose bytes
    /// no longer parse. Unmapped characters and unresolved emoji never fail.
    pub fn shape(&self, text: &str) -> TextResult<GlyphRun> {
        let size = ensure_positive("font size", self.size)?;
        let parsed = ParsedFont::parse(self.font)?;

        let spans = match &self.emoji {
            Some((registry, options)) => {
                options.validate()?;
                scan_emojis(text, options, registry)
            }
            None => Vec::new(),
        };
        let emoji_scale = self.emoji.map_or(1.0, |(_, options)| options.scale);

        let mut entries: Vec<RunEntry> = Vec::with_capacity(text.len());
        let mut spans = spans.into_iter().peekable();
        let mut graphemes = text.grapheme_indices(true).map(|(i, _)| i).peekable();
        let mut prev_glyph: Option<(usize, u16)> = None;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            while graphemes.next_if(|&start| start < pos).is_some() {}
            let grapheme_start = graphemes.peek() == Some(&pos);

            if let Some(span) = spans.next_if(|span| span.range.start == pos) {
                let advance = size * emoji_scale;
                entries.push(RunEntry {
                    kind: EntryKind::Emoji {
                        image: span.image.clone(),
                        size_px: advance.round() as u32,
                    },
                    advance,
                    kerning: 0.0,
                    cluster: span.range.clone(),
                    class: BreakClass::Normal,
                    grapheme_start: true,
                });
                prev_glyph = None;
                pos = span.range.end;
                continue;
            }

            if ch == '\n' || ch == '\r' {
                let mut end = pos + 1;
                if ch == '\r' && text[end..].starts_with('\n') {
                    end += 1;
                }
                entries.push(RunEntry {
                    kind: EntryKind::LineBreak,
                    advance: 0.0,
                    kerning: 0.0,
                    cluster: pos..end,
                    class: BreakClass::Newline,
                    grapheme_start: true,
                });
                prev_glyph = None;
                pos = end;
                continue;
            }

            let whitespace = ch.is_whitespace();
            let mut lookup = parsed.lookup(ch);
            if whitespace && !lookup.found {
                lookup = parsed.lookup(' ');
            }
            let advance = parsed.advance(lookup.face, lookup.glyph, size);

            let kerning = match prev_glyph {
                Some((face, left)) if face == lookup.face => {
                    parsed.kerning(face, left, lookup.glyph, size)
                }
                _ => 0.0,
            };

            let end = pos + ch.len_utf8();
            entries.push(RunEntry {
                kind: EntryKind::Glyph {
                    face: lookup.face,
                    glyph_id: lookup.glyph,
                    found: lookup.found,
                },
                advance,
                kerning,
                cluster: pos..end,
                class: if whitespace {
                    BreakClass::Whitespace
                } else {
                    BreakClass::Normal
                },
                grapheme_start,
            });
            prev_glyph = Some((lookup.face, lookup.glyph));
            pos = end;
        }

        let run = GlyphRun { entries, size };
        trace!(
            bytes = text.len(),
            entries = run.len(),
            emojis = run.emoji_count(),
            width = run.width(),
            "shaped text"
        );
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::emoji::EmojiSource;
    use crate::text::font::FontFace;
    use image::{Rgba, RgbaImage};

    const SANS: &[u8] = include_bytes!("../../tests/fonts/DejaVuSans.ttf");
    const MONO: &[u8] = include_bytes!("../../tests/fonts/DejaVuSansMono.ttf");

    fn sans() -> Font {
        Font::new(FontFace::from_data(SANS.to_vec(), 0).unwrap())
    }

    fn emojis() -> EmojiRegistry {
        let mut registry = EmojiRegistry::new();
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 200, 0, 255]));
        registry.insert(EmojiSource::Twitter, "\u{1F604}", image);
        registry
    }

    #[test]
    fn test_shape_plain_text() {
        let font = sans();
        let run = Shaper::new(&font, 20.0).shape("Hi you").unwrap();
        assert_eq!(run.len(), 6);
        assert_eq!(run.emoji_count(), 0);
        assert_eq!(run.entries()[2].class, BreakClass::Whitespace);
        assert_eq!(run.entries()[3].cluster, 3..4);
        assert!(run.width() > 0.0);
    }

    #[test]
    fn test_shape_rejects_bad_size() {
        let font = sans();
        for size in [0.0, -3.0, f32::NAN] {
            let err = Shaper::new(&font, size).shape("x").unwrap_err();
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn test_shape_newlines() {
        let font = sans();
        let run = Shaper::new(&font, 12.0).shape("a\r\nb\nc").unwrap();
        let classes: Vec<BreakClass> = run.entries().iter().map(|e| e.class).collect();
        assert_eq!(
            classes,
            vec![
                BreakClass::Normal,
                BreakClass::Newline,
                BreakClass::Normal,
                BreakClass::Newline,
                BreakClass::Normal,
            ]
        );
        assert_eq!(run.entries()[1].cluster, 1..3);
        assert_eq!(run.entries()[1].advance, 0.0);
    }

    #[test]
    fn test_shape_applies_kerning() {
        let font = sans();
        let shaper = Shaper::new(&font, 100.0);
        let a = shaper.shape("A").unwrap().width();
        let v = shaper.shape("V").unwrap().width();
        let av = shaper.shape("AV").unwrap();
        assert!(av.width() < a + v);
        assert_eq!(av.entries()[0].kerning, 0.0);
        assert!(av.entries()[1].kerning < 0.0);
        assert_eq!(av.entries()[0].advance, a);
    }

    #[test]
    fn test_shape_missing_glyph_never_fails() {
        let font = Font::with_fallbacks(
            FontFace::from_data(MONO.to_vec(), 0).unwrap(),
            [FontFace::from_data(SANS.to_vec(), 0).unwrap()],
        );
        let run = Shaper::new(&font, 16.0).shape("\u{E000}\u{01C4}").unwrap();
        match run.entries()[0].kind {
            EntryKind::Glyph { face, glyph_id, found } => {
                assert_eq!((face, glyph_id, found), (0, 0, false));
            }
            ref other => panic!("unexpected entry {other:?}"),
        }
        assert!(matches!(
            run.entries()[1].kind,
            EntryKind::Glyph { face: 1, found: true, .. }
        ));
        assert!(run.entries()[0].advance > 0.0);
    }

    #[test]
    fn test_grapheme_starts() {
        let font = sans();
        let run = Shaper::new(&font, 12.0).shape("e\u{301}x").unwrap();
        let starts: Vec<bool> = run.entries().iter().map(|e| e.grapheme_start).collect();
        assert_eq!(starts, vec![true, false, true]);
    }

    #[test]
    fn test_unmapped_whitespace_uses_space() {
        let font = sans();
        let shaper = Shaper::new(&font, 20.0);
        let tab = shaper.shape("\t").unwrap();
        let space = shaper.shape(" ").unwrap();
        assert!(matches!(
            tab.entries()[0].kind,
            EntryKind::Glyph { found: true, .. }
        ));
        assert_eq!(tab.width(), space.width());
    }

    #[test]
    fn test_shape_shortcode_emoji() {
        let font = sans();
        let registry = emojis();
        let shaper = Shaper::new(&font, 20.0).with_emojis(&registry, EmojiOptions::default());

        let run = shaper.shape("Hi :smile:").unwrap();
        assert_eq!(run.len(), 4);
        assert_eq!(run.emoji_count(), 1);
        let emoji = &run.entries()[3];
        assert_eq!(emoji.cluster, 3..10);
        assert_eq!(emoji.advance, 20.0);
        assert!(matches!(emoji.kind, EntryKind::Emoji { size_px: 20, .. }));

        let literal = shaper.shape("Hi :nope_not_real:").unwrap();
        assert_eq!(literal.len(), "Hi :nope_not_real:".len());
        assert_eq!(literal.emoji_count(), 0);
    }

    #[test]
    fn test_emoji_scale() {
        let font = sans();
        let registry = emojis();
        let options = EmojiOptions::default().scale(1.5);
        let run = Shaper::new(&font, 20.0)
            .with_emojis(&registry, options)
            .shape("\u{1F604}")
            .unwrap();
        assert_eq!(run.width(), 30.0);

        let err = Shaper::new(&font, 20.0)
            .with_emojis(&registry, options.scale(-1.0))
            .shape("x")
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unresolved_native_emoji_is_literal() {
        let font = sans();
        let registry = EmojiRegistry::new();
        let run = Shaper::new(&font, 20.0)
            .with_emojis(&registry, EmojiOptions::default())
            .shape("\u{1F680}")
            .unwrap();
        assert_eq!(run.len(), 1);
        assert!(!run.entries()[0].is_emoji());
    }
}
