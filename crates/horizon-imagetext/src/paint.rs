//! Paint styles for filling and stroking glyphs.
//!
//! This module provides paint types for defining how text is rendered.

use tracing::warn;

use crate::types::{Color, Point};

/// A paint source for filling or stroking glyphs.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Solid color fill.
    Solid(Color),
    /// Linear gradient fill.
    LinearGradient(LinearGradient),
}

impl Paint {
    /// Create a solid color paint.
    #[inline]
    pub const fn solid(color: Color) -> Self {
        Self::Solid(color)
    }

    /// Create a linear gradient paint.
    ///
    /// Gradient points are in canvas pixel coordinates.
    #[inline]
    pub fn linear_gradient(start: Point, end: Point, stops: Vec<GradientStop>) -> Self {
        Self::LinearGradient(LinearGradient { start, end, stops })
    }

    /// Create a linear gradient with colors spaced evenly from `start` to `end`.
    pub fn gradient(start: Point, end: Point, colors: &[Color]) -> Self {
        let stops = match colors {
            [] => Vec::new(),
            [only] => vec![GradientStop::new(0.0, *only)],
            _ => {
                let last = (colors.len() - 1) as f32;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, &color)| GradientStop::new(i as f32 / last, color))
                    .collect()
            }
        };
        Self::linear_gradient(start, end, stops)
    }

    /// Create a rainbow gradient from `start` to `end`.
    pub fn rainbow(start: Point, end: Point) -> Self {
        Self::gradient(start, end, &RAINBOW)
    }

    /// Check if this is a solid color paint.
    #[inline]
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid(_))
    }

    /// Get the solid color, if this is a solid paint.
    #[inline]
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Self::Solid(c) => Some(*c),
            _ => None,
        }
    }

    /// Build a tiny-skia paint for rasterization.
    pub(crate) fn to_skia(&self, anti_alias: bool) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            anti_alias,
            ..Default::default()
        };

        match self {
            Paint::Solid(color) => paint.set_color(color.to_skia()),
            Paint::LinearGradient(gradient) => match gradient.to_shader() {
                Some(shader) => paint.shader = shader,
                None => {
                    let color = gradient
                        .stops
                        .first()
                        .map(|stop| stop.color)
                        .unwrap_or(Color::TRANSPARENT);
                    warn!(?gradient, "degenerate gradient, painting first stop color");
                    paint.set_color(color.to_skia());
                }
            },
        }

        paint
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Color::BLACK)
    }
}

const RAINBOW: [Color; 7] = [
    Color::from_rgb8(255, 0, 0),
    Color::from_rgb8(255, 127, 0),
    Color::from_rgb8(255, 255, 0),
    Color::from_rgb8(0, 255, 0),
    Color::from_rgb8(0, 0, 255),
    Color::from_rgb8(75, 0, 130),
    Color::from_rgb8(148, 0, 211),
];

/// A linear gradient definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Start point of the gradient.
    pub start: Point,
    /// End point of the gradient.
    pub end: Point,
    /// Color stops.
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// A gradient needs distinct endpoints and at least two stops.
    fn to_shader(&self) -> Option<tiny_skia::Shader<'static>> {
        if self.stops.len() < 2 || self.start == self.end {
            return None;
        }
        let stops = self
            .stops
            .iter()
            .map(|stop| tiny_skia::GradientStop::new(stop.offset, stop.color.to_skia()))
            .collect();
        tiny_skia::LinearGradient::new(
            self.start.to_skia(),
            self.end.to_skia(),
            stops,
            tiny_skia::SpreadMode::Pad,
            tiny_skia::Transform::identity(),
        )
    }
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0).
    pub offset: f32,
    /// Color at this stop.
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop.
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_paint() {
        let paint = Paint::from(Color::RED);
        assert!(paint.is_solid());
        assert_eq!(paint.as_solid(), Some(Color::RED));
        assert_eq!(Paint::default(), Paint::Solid(Color::BLACK));
    }

    #[test]
    fn gradient_spaces_stops_evenly() {
        let paint = Paint::gradient(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &[Color::RED, Color::GREEN, Color::BLUE],
        );
        let Paint::LinearGradient(gradient) = paint else {
            panic!("expected a linear gradient");
        };
        let offsets: Vec<f32> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn rainbow_has_seven_stops() {
        let Paint::LinearGradient(gradient) =
            Paint::rainbow(Point::new(0.0, 0.0), Point::new(0.0, 50.0))
        else {
            panic!("expected a linear gradient");
        };
        assert_eq!(gradient.stops.len(), 7);
        assert_eq!(gradient.stops[0].color, Color::RED);
        assert_eq!(gradient.stops[6].offset, 1.0);
    }

    #[test]
    fn skia_paint_carries_anti_alias() {
        assert!(Paint::default().to_skia(true).anti_alias);
        assert!(!Paint::default().to_skia(false).anti_alias);
    }

    #[test]
    fn degenerate_gradient_falls_back_to_solid() {
        let paint = Paint::gradient(Point::ZERO, Point::ZERO, &[Color::BLUE, Color::RED]);
        let skia = paint.to_skia(true);
        assert!(matches!(skia.shader, tiny_skia::Shader::SolidColor(_)));
    }

    #[test]
    fn valid_gradient_builds_shader() {
        let paint = Paint::gradient(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            &[Color::BLUE, Color::RED],
        );
        let skia = paint.to_skia(true);
        assert!(matches!(skia.shader, tiny_skia::Shader::LinearGradient(_)));
    }
}
