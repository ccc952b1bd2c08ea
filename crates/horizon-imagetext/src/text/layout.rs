//! Block layout: placing lines relative to an anchored origin.
//!
//! A block of `n` lines is `n * size * line_spacing` tall and as wide as its
//! widest line. The anchor `(ax, ay)` picks the point of the block that lands
//! on the draw origin: `(0, 0)` is the top-left corner, `(0.5, 0.5)` the
//! center, `(1, 1)` the bottom-right corner. Within the block each line is
//! aligned left, centered, or aligned right.

use crate::types::{Point, Rect};

use super::font::Font;
use super::wrap::Line;

/// Horizontal alignment of lines within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Fraction of the free space placed to the left of a line.
    pub fn factor(self) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => 0.5,
            TextAlign::Right => 1.0,
        }
    }
}

/// Parameters for [`layout_lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Font size in pixels.
    pub size: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// The draw coordinate.
    pub origin: Point,
    /// Normalized anchor within the block.
    pub anchor: Point,
    pub align: TextAlign,
}

impl LayoutParams {
    /// Top-left anchored, left-aligned, single-spaced layout at the origin.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            line_spacing: 1.0,
            origin: Point::ZERO,
            anchor: Point::ZERO,
            align: TextAlign::Left,
        }
    }

    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Point::new(x, y);
        self
    }

    pub fn anchor(mut self, ax: f32, ay: f32) -> Self {
        self.anchor = Point::new(ax, ay);
        self
    }

    pub fn line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Height of one line.
    pub fn line_height(&self) -> f32 {
        self.size * self.line_spacing
    }
}

/// A line with its position on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PositionedLine<'a> {
    pub line: Line<'a>,
    /// Top-left corner of the line box.
    pub origin: Point,
    /// Baseline y coordinate.
    pub baseline: f32,
}

/// Lines laid out as a block.
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    pub lines: Vec<PositionedLine<'a>>,
    /// The block rectangle: widest line by total line height.
    pub bounds: Rect,
}

impl TextBlock<'_> {
    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }
}

/// Position `lines` as a block.
pub fn layout_lines<'a>(lines: &[Line<'a>], font: &Font, params: &LayoutParams) -> TextBlock<'a> {
    let line_height = params.line_height();
    let block_width = lines.iter().map(Line::width).fold(0.0, f32::max);
    let block_height = line_height * lines.len() as f32;

    let left = params.origin.x - params.anchor.x * block_width;
    let top = params.origin.y - params.anchor.y * block_height;
    let ascent = font.baseline_offset(params.size);
    let factor = params.align.factor();

    let lines = lines
        .iter()
        .enumerate()
        .map(|(i, &line)| {
            let y = top + line_height * i as f32;
            PositionedLine {
                line,
                origin: Point::new(left + (block_width - line.width()) * factor, y),
                baseline: y + ascent,
            }
        })
        .collect();

    TextBlock {
        lines,
        bounds: Rect::new(left, top, block_width, block_height),
    }
}
