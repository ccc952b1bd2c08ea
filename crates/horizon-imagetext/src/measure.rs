//! Text measurement helpers.
//!
//! Sizes are measured with the same shaping and layout as the draw calls, so
//! `text_size` of a string equals the size of the block `draw_text` paints.

use crate::draw::{TextStyle, ensure_wrap_width};
use crate::error::TextResult;
use crate::text::wrap::{Line, break_lines, single_line};

/// Size of a single line of text in whole pixels, rounded up.
pub fn text_size(text: &str, style: &TextStyle<'_>) -> TextResult<(u32, u32)> {
    let run = style.shape(text)?;
    block_size(&[single_line(&run)], style)
}

/// Size of text broken at explicit newlines, in whole pixels, rounded up.
pub fn text_size_multiline(text: &str, style: &TextStyle<'_>) -> TextResult<(u32, u32)> {
    let run = style.shape(text)?;
    let lines = break_lines(&run, None, style.wrap_style);
    block_size(&lines, style)
}

/// Wrap text to `width` pixels and return the lines.
///
/// Whitespace at soft breaks is dropped; explicit newlines always break.
pub fn text_wrap(text: &str, width: f32, style: &TextStyle<'_>) -> TextResult<Vec<String>> {
    let width = ensure_wrap_width(width)?;
    let run = style.shape(text)?;
    Ok(break_lines(&run, Some(width), style.wrap_style)
        .iter()
        .map(|line| line.text(text).to_string())
        .collect())
}

/// Split text after each run of whitespace, keeping the whitespace attached
/// to the preceding word.
///
/// ```
/// use horizon_imagetext::split_on_space;
///
/// assert_eq!(split_on_space("a bb  c"), vec!["a ", "bb  ", "c"]);
/// ```
pub fn split_on_space(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_space = false;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space && !space {
            parts.push(&text[start..i]);
            start = i;
        }
        in_space = space;
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

fn block_size(lines: &[Line<'_>], style: &TextStyle<'_>) -> TextResult<(u32, u32)> {
    let block = style.layout(lines, 0.0, 0.0, (0.0, 0.0))?;
    Ok((block.width().ceil() as u32, block.height().ceil() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::{Font, FontFace};

    const MONO: &[u8] = include_bytes!("../tests/fonts/DejaVuSansMono.ttf");

    fn mono() -> Font {
        Font::new(FontFace::from_data(MONO.to_vec(), 0).unwrap())
    }

    #[test]
    fn test_split_on_space() {
        assert_eq!(split_on_space("hello world"), vec!["hello ", "world"]);
        assert_eq!(split_on_space("  lead"), vec!["  ", "lead"]);
        assert_eq!(split_on_space("tail  "), vec!["tail  "]);
        assert_eq!(split_on_space("a\tb\nc"), vec!["a\t", "b\n", "c"]);
        assert!(split_on_space("").is_empty());
    }

    #[test]
    fn test_text_size() {
        let font = mono();
        let style = TextStyle::new(&font, 20.0);
        let (w1, h1) = text_size("ab", &style).unwrap();
        let (w2, h2) = text_size("abab", &style).unwrap();
        assert_eq!(h1, 20);
        assert_eq!(h2, 20);
        assert!(w2 > w1);
        assert!(w2 <= 2 * w1);
    }

    #[test]
    fn test_text_size_multiline() {
        let font = mono();
        let style = TextStyle::new(&font, 10.0).line_spacing(1.5);
        let (single_w, _) = text_size("longest", &style).unwrap();
        let (w, h) = text_size_multiline("a\nlongest\nmid", &style).unwrap();
        assert_eq!(w, single_w);
        assert_eq!(h, 45);
    }

    #[test]
    fn test_text_wrap() {
        let font = mono();
        let style = TextStyle::new(&font, 10.0);
        let (cell, _) = text_size("x", &style).unwrap();
        let width = 9.0 * cell as f32;
        let lines = text_wrap("the quick brown fox", width, &style).unwrap();
        assert_eq!(lines, vec!["the quick", "brown fox"]);

        let short = text_wrap("fox", 1000.0, &style).unwrap();
        assert_eq!(short, vec!["fox"]);
        assert!(text_wrap("fox", f32::NAN, &style).is_err());
    }
}
