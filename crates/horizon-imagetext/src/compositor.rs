//! Rasterization of laid-out text onto a canvas.
//!
//! Entries are painted in text order. A glyph with a stroke is painted in
//! two layers: its outline dilated by the stroke width in the stroke paint,
//! then the glyph itself in the fill paint. Emoji images are composited as
//! they are. Everything blends source-over and is clipped to the canvas.

use tiny_skia::{FillRule, LineJoin, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};
use tracing::trace;

use crate::error::{TextError, TextResult};
use crate::paint::Paint;
use crate::text::emoji::{EmojiOptions, EmojiRegistry};
use crate::text::font::{Font, ParsedFont};
use crate::text::layout::{PositionedLine, TextBlock};
use crate::text::shaping::EntryKind;

/// Adapts glyph outlines to a tiny-skia path.
struct PathSink(PathBuilder);

impl ttf_parser::OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

/// Paints and font state for one draw call.
pub(crate) struct Compositor<'a> {
    font: ParsedFont<'a>,
    size: f32,
    fill: tiny_skia::Paint<'static>,
    stroke: Option<(Stroke, tiny_skia::Paint<'static>)>,
    emojis: Option<&'a EmojiRegistry>,
    emoji_shift: (i32, i32),
}

impl<'a> Compositor<'a> {
    /// A stroke is used only when both a positive width and a paint are set.
    pub fn new(
        font: &'a Font,
        size: f32,
        fill: &Paint,
        stroke: Option<(f32, &Paint)>,
        anti_alias: bool,
    ) -> TextResult<Self> {
        let stroke = match stroke {
            Some((width, _)) if !width.is_finite() || width < 0.0 => {
                return Err(TextError::InvalidParameter {
                    name: "stroke width",
                    value: width,
                });
            }
            Some((width, paint)) if width > 0.0 => {
                let stroke = Stroke {
                    width: width * 2.0,
                    line_join: LineJoin::Round,
                    ..Stroke::default()
                };
                Some((stroke, paint.to_skia(anti_alias)))
            }
            _ => None,
        };

        Ok(Self {
            font: ParsedFont::parse(font)?,
            size,
            fill: fill.to_skia(anti_alias),
            stroke,
            emojis: None,
            emoji_shift: (0, 0),
        })
    }

    /// Draw emoji entries from `registry`.
    pub fn with_emojis(mut self, registry: &'a EmojiRegistry, options: &EmojiOptions) -> Self {
        self.emojis = Some(registry);
        self.emoji_shift = options.shift;
        self
    }

    pub fn draw_block(&self, pixmap: &mut Pixmap, block: &TextBlock<'_>) {
        for line in &block.lines {
            self.draw_line(pixmap, line);
        }
        trace!(lines = block.lines.len(), bounds = ?block.bounds, "composited text block");
    }

    fn draw_line(&self, pixmap: &mut Pixmap, line: &PositionedLine<'_>) {
        let mut pen_x = line.origin.x;
        for (i, entry) in line.line.entries().iter().enumerate() {
            if i > 0 {
                pen_x += entry.kerning;
            }
            match &entry.kind {
                EntryKind::Glyph { face, glyph_id, .. } => {
                    if let Some(path) = self.glyph_path(*face, *glyph_id, pen_x, line.baseline) {
                        self.paint_glyph(pixmap, &path);
                    }
                }
                EntryKind::Emoji { image, size_px } => {
                    let raster = self.emojis.and_then(|emojis| emojis.raster(image, *size_px));
                    if let Some(raster) = raster {
                        let inset = (self.size - *size_px as f32) / 2.0;
                        let x = pen_x.round() as i32 + self.emoji_shift.0;
                        let y = (line.origin.y + inset).round() as i32 + self.emoji_shift.1;
                        pixmap.draw_pixmap(
                            x,
                            y,
                            (*raster).as_ref(),
                            &PixmapPaint::default(),
                            Transform::identity(),
                            None,
                        );
                    }
                }
                EntryKind::LineBreak => {}
            }
            pen_x += entry.advance;
        }
    }

    /// The glyph outline in canvas space, with its origin at
    /// `(pen_x, baseline)`. `None` for glyphs without an outline.
    fn glyph_path(&self, face: usize, glyph: u16, pen_x: f32, baseline: f32) -> Option<Path> {
        let mut sink = PathSink(PathBuilder::new());
        if !self.font.outline(face, glyph, &mut sink) {
            return None;
        }
        let scale = self.font.scale(face, self.size);
        sink.0
            .finish()?
            .transform(Transform::from_row(scale, 0.0, 0.0, -scale, pen_x, baseline))
    }

    fn paint_glyph(&self, pixmap: &mut Pixmap, path: &Path) {
        let identity = Transform::identity();
        if let Some((stroke, paint)) = &self.stroke {
            pixmap.stroke_path(path, paint, stroke, identity, None);
            pixmap.fill_path(path, paint, FillRule::Winding, identity, None);
        }
        pixmap.fill_path(path, &self.fill, FillRule::Winding, identity, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::FontFace;
    use crate::text::layout::{LayoutParams, layout_lines};
    use crate::text::shaping::Shaper;
    use crate::text::wrap::{WrapStyle, break_lines};
    use crate::types::Color;

    const SANS: &[u8] = include_bytes!("../tests/fonts/DejaVuSans.ttf");

    fn render(text: &str, stroke: Option<(f32, &Paint)>) -> Pixmap {
        let font = Font::new(FontFace::from_data(SANS.to_vec(), 0).unwrap());
        let run = Shaper::new(&font, 32.0).shape(text).unwrap();
        let lines = break_lines(&run, None, WrapStyle::Word);
        let block = layout_lines(&lines, &font, &LayoutParams::new(32.0).origin(4.0, 4.0));

        let mut pixmap = Pixmap::new(96, 48).unwrap();
        Compositor::new(&font, 32.0, &Paint::from(Color::BLACK), stroke, true)
            .unwrap()
            .draw_block(&mut pixmap, &block);
        pixmap
    }

    fn opaque(pixmap: &Pixmap) -> Vec<bool> {
        pixmap.pixels().iter().map(|p| p.alpha() > 0).collect()
    }

    #[test]
    fn test_glyphs_are_painted() {
        let pixmap = render("Hi", None);
        assert!(opaque(&pixmap).iter().any(|&o| o));
    }

    #[test]
    fn test_whitespace_paints_nothing() {
        let pixmap = render("   ", None);
        assert!(opaque(&pixmap).iter().all(|&o| !o));
    }

    #[test]
    fn test_stroke_covers_fill() {
        let fill_only = opaque(&render("Hi", None));
        let red = Paint::from(Color::RED);
        let stroked = opaque(&render("Hi", Some((2.0, &red))));
        assert!(fill_only.iter().zip(&stroked).all(|(&f, &s)| !f || s));
        assert!(stroked.iter().filter(|&&s| s).count() > fill_only.iter().filter(|&&f| f).count());
    }

    #[test]
    fn test_zero_stroke_is_ignored() {
        let red = Paint::from(Color::RED);
        assert_eq!(opaque(&render("Hi", Some((0.0, &red)))), opaque(&render("Hi", None)));
    }

    #[test]
    fn test_negative_stroke_is_rejected() {
        let font = Font::new(FontFace::from_data(SANS.to_vec(), 0).unwrap());
        let red = Paint::from(Color::RED);
        let err = Compositor::new(&font, 12.0, &Paint::default(), Some((-1.0, &red)), true)
            .err()
            .unwrap();
        assert!(err.is_configuration());
    }
}
