//! Text drawing entry points.
//!
//! Every draw call shapes the text, breaks it into lines, lays the lines out
//! as a block, and composites the block onto a [`Canvas`]. The calls differ
//! only in how lines are broken and where the block is anchored:
//!
//! | call | line breaks | anchor |
//! |---|---|---|
//! | [`draw_text`] | none | top-left |
//! | [`draw_text_anchored`] | none | explicit |
//! | [`draw_text_multiline`] | explicit newlines | explicit |
//! | [`draw_text_wrapped`] | newlines and wrapping | explicit |
//!
//! Each call returns the block rectangle in canvas coordinates. A failed
//! call may leave the canvas partially drawn.

use crate::canvas::Canvas;
use crate::compositor::Compositor;
use crate::error::{TextError, TextResult, ensure_positive};
use crate::paint::Paint;
use crate::text::emoji::{EmojiOptions, EmojiRegistry};
use crate::text::font::Font;
use crate::text::layout::{LayoutParams, TextAlign, TextBlock, layout_lines};
use crate::text::shaping::{GlyphRun, Shaper};
use crate::text::wrap::{Line, WrapStyle, break_lines, single_line};
use crate::types::Rect;

/// Style and options for a draw call.
///
/// # Example
///
/// ```no_run
/// use horizon_imagetext::{Color, Paint, TextAlign, TextStyle};
/// use horizon_imagetext::text::{EmojiOptions, EmojiRegistry, Font};
///
/// let font = Font::from_files("fonts/DejaVuSans.ttf", &[] as &[&str])?;
/// let emojis = EmojiRegistry::new();
///
/// let style = TextStyle::new(&font, 28.0)
///     .fill(Color::WHITE)
///     .stroke(2.0, Color::BLACK)
///     .align(TextAlign::Center)
///     .emojis(&emojis)
///     .emoji_options(EmojiOptions::default().scale(1.2));
/// # Ok::<(), horizon_imagetext::TextError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextStyle<'a> {
    pub font: &'a Font,
    /// Font size in pixels.
    pub size: f32,
    pub fill: Paint,
    /// Outline width in pixels. Stroking needs both a width and a paint.
    pub stroke_width: Option<f32>,
    pub stroke_paint: Option<Paint>,
    pub align: TextAlign,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    pub wrap_style: WrapStyle,
    /// Replace emoji spans with images from `emoji_registry`.
    pub draw_emojis: bool,
    pub emoji: EmojiOptions,
    pub emoji_registry: Option<&'a EmojiRegistry>,
    pub anti_alias: bool,
}

impl<'a> TextStyle<'a> {
    /// Black, unstroked, left-aligned text without emoji.
    pub fn new(font: &'a Font, size: f32) -> Self {
        Self {
            font,
            size,
            fill: Paint::default(),
            stroke_width: None,
            stroke_paint: None,
            align: TextAlign::default(),
            line_spacing: 1.0,
            wrap_style: WrapStyle::default(),
            draw_emojis: false,
            emoji: EmojiOptions::default(),
            emoji_registry: None,
            anti_alias: true,
        }
    }

    pub fn fill(mut self, paint: impl Into<Paint>) -> Self {
        self.fill = paint.into();
        self
    }

    /// Outline every glyph with `width` pixels of `paint`.
    pub fn stroke(mut self, width: f32, paint: impl Into<Paint>) -> Self {
        self.stroke_width = Some(width);
        self.stroke_paint = Some(paint.into());
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn wrap_style(mut self, wrap_style: WrapStyle) -> Self {
        self.wrap_style = wrap_style;
        self
    }

    /// Enable emoji drawing with images from `registry`.
    pub fn emojis(mut self, registry: &'a EmojiRegistry) -> Self {
        self.draw_emojis = true;
        self.emoji_registry = Some(registry);
        self
    }

    pub fn draw_emojis(mut self, enabled: bool) -> Self {
        self.draw_emojis = enabled;
        self
    }

    pub fn emoji_options(mut self, options: EmojiOptions) -> Self {
        self.emoji = options;
        self
    }

    pub fn anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// The emoji registry, if emoji drawing is on.
    fn active_emojis(&self) -> Option<&'a EmojiRegistry> {
        self.emoji_registry.filter(|_| self.draw_emojis)
    }

    /// Shape `text` with this style.
    pub fn shape(&self, text: &str) -> TextResult<GlyphRun> {
        let shaper = Shaper::new(self.font, self.size);
        match self.active_emojis() {
            Some(registry) => shaper.with_emojis(registry, self.emoji).shape(text),
            None => shaper.shape(text),
        }
    }

    /// Lay out lines of a run shaped with this style.
    pub(crate) fn layout<'r>(
        &self,
        lines: &[Line<'r>],
        x: f32,
        y: f32,
        anchor: (f32, f32),
    ) -> TextResult<TextBlock<'r>> {
        let line_spacing = ensure_positive("line spacing", self.line_spacing)?;
        let params = LayoutParams::new(self.size)
            .origin(x, y)
            .anchor(anchor.0, anchor.1)
            .line_spacing(line_spacing)
            .align(self.align);
        Ok(layout_lines(lines, self.font, &params))
    }

    fn compositor(&self) -> TextResult<Compositor<'a>> {
        let stroke = match (self.stroke_width, &self.stroke_paint) {
            (Some(width), Some(paint)) => Some((width, paint)),
            _ => None,
        };
        let compositor =
            Compositor::new(self.font, self.size, &self.fill, stroke, self.anti_alias)?;
        Ok(match self.active_emojis() {
            Some(registry) => compositor.with_emojis(registry, &self.emoji),
            None => compositor,
        })
    }
}

/// Draw a single line of text with its top-left corner at `(x, y)`.
pub fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle<'_>,
) -> TextResult<Rect> {
    draw_text_anchored(canvas, text, x, y, (0.0, 0.0), style)
}

/// Draw a single line of text so that the normalized point `anchor` of its
/// box lands on `(x, y)`.
pub fn draw_text_anchored(
    canvas: &mut Canvas,
    text: &str,
    x: f32,
    y: f32,
    anchor: (f32, f32),
    style: &TextStyle<'_>,
) -> TextResult<Rect> {
    let run = style.shape(text)?;
    render(canvas, &[single_line(&run)], x, y, anchor, style)
}

/// Draw text broken only at explicit newlines.
///
/// Lines are aligned within the widest line, which is also the block width
/// that `anchor` refers to. There is no separate alignment width parameter:
/// to align inside a wider box, anchor the block against that box instead,
/// e.g. `x = box_left + box_width / 2` with anchor `(0.5, _)` for centered
/// text.
pub fn draw_text_multiline(
    canvas: &mut Canvas,
    text: &str,
    x: f32,
    y: f32,
    anchor: (f32, f32),
    style: &TextStyle<'_>,
) -> TextResult<Rect> {
    let run = style.shape(text)?;
    let lines = break_lines(&run, None, style.wrap_style);
    render(canvas, &lines, x, y, anchor, style)
}

/// Draw text wrapped to `width` pixels with the style's wrap policy.
pub fn draw_text_wrapped(
    canvas: &mut Canvas,
    text: &str,
    x: f32,
    y: f32,
    anchor: (f32, f32),
    width: f32,
    style: &TextStyle<'_>,
) -> TextResult<Rect> {
    let width = ensure_wrap_width(width)?;
    let run = style.shape(text)?;
    let lines = break_lines(&run, Some(width), style.wrap_style);
    render(canvas, &lines, x, y, anchor, style)
}

pub(crate) fn ensure_wrap_width(width: f32) -> TextResult<f32> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(TextError::InvalidParameter {
            name: "wrap width",
            value: width,
        })
    }
}

fn render(
    canvas: &mut Canvas,
    lines: &[Line<'_>],
    x: f32,
    y: f32,
    anchor: (f32, f32),
    style: &TextStyle<'_>,
) -> TextResult<Rect> {
    let block = style.layout(lines, x, y, anchor)?;
    style.compositor()?.draw_block(canvas.pixmap_mut(), &block);
    Ok(block.bounds)
}
