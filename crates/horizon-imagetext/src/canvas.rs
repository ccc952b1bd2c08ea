//! Raster drawing targets.
//!
//! [`Canvas`] is an owned RGBA8 pixel buffer backed by a `tiny_skia::Pixmap`.
//! All drawing alpha-blends source-over and is clipped to the buffer.
//!
//! [`DrawSession`] binds a canvas to an existing `image::DynamicImage` and
//! writes the pixels back exactly once, when the session is closed or
//! dropped.
//!
//! # Example
//!
//! ```no_run
//! use horizon_imagetext::{Color, DrawSession, TextStyle};
//! use horizon_imagetext::text::Font;
//!
//! let font = Font::from_files("fonts/DejaVuSans.ttf", &[] as &[&str])?;
//! let mut image = image::DynamicImage::new_rgba8(320, 80);
//!
//! let mut session = DrawSession::open(&mut image)?;
//! session.draw_text("Hello!", 10.0, 10.0, &TextStyle::new(&font, 32.0).fill(Color::WHITE))?;
//! session.close();
//!
//! image.save("hello.png").expect("write png");
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```

use std::fmt;
use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};
use tracing::debug;

use crate::draw::{self, TextStyle};
use crate::error::{TextError, TextResult};
use crate::types::{Color, Rect};

/// An RGBA8 pixel buffer to draw text on.
///
/// Drawing happens on premultiplied pixels. Pixels that drawing never
/// changed read back exactly as they were given, so translucent pixels
/// survive the premultiplied round trip untouched.
#[derive(Clone, PartialEq)]
pub struct Canvas {
    pixmap: Pixmap,
    /// Straight-alpha pixels the canvas was created from.
    original: RgbaImage,
    /// `pixmap` as it was created.
    untouched: Vec<PremultipliedColorU8>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> TextResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextError::EmptyCanvas { width, height });
        }
        Self::from_rgba_image(&RgbaImage::from_pixel(width, height, background.into()))
    }

    /// Copy an RGBA image into a new canvas.
    pub fn from_rgba_image(image: &RgbaImage) -> TextResult<Self> {
        let pixmap = pixmap_from_rgba(image).ok_or(TextError::EmptyCanvas {
            width: image.width(),
            height: image.height(),
        })?;
        Ok(Self {
            untouched: pixmap.pixels().to_vec(),
            original: image.clone(),
            pixmap,
        })
    }

    /// Copy an image into a new canvas. The image must be 8-bit RGBA.
    pub fn from_image(image: &DynamicImage) -> TextResult<Self> {
        match image {
            DynamicImage::ImageRgba8(rgba) => Self::from_rgba_image(rgba),
            other => Err(TextError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            ))),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The full canvas rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Get the color of a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.straight((y * self.width() + x) as usize).into())
    }

    /// Copy the canvas into an RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.width();
        RgbaImage::from_fn(width, self.height(), |x, y| {
            self.straight((y * width + x) as usize)
        })
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        (0..self.untouched.len())
            .flat_map(|i| self.straight(i).0)
            .collect()
    }

    /// Save to a file; the format is determined by the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> TextResult<()> {
        self.to_rgba_image().save(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "saved canvas");
        Ok(())
    }

    /// Count pixels with non-zero alpha.
    pub fn count_opaque(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle<'_>) -> TextResult<Rect> {
        draw::draw_text(self, text, x, y, style)
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight-alpha value of the pixel at row-major `index`.
    fn straight(&self, index: usize) -> Rgba<u8> {
        let current = self.pixmap.pixels()[index];
        if current == self.untouched[index] {
            let px = &self.original.as_raw()[index * 4..index * 4 + 4];
            Rgba([px[0], px[1], px[2], px[3]])
        } else {
            demultiplied(current)
        }
    }

    /// Write drawn pixels to `target`, leaving all others as they are.
    fn write_to(&self, target: &mut RgbaImage) {
        let pixels = self.pixmap.pixels().iter().zip(&self.untouched);
        for (dst, (&current, &before)) in target.pixels_mut().zip(pixels) {
            if current != before {
                *dst = demultiplied(current);
            }
        }
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn demultiplied(p: PremultipliedColorU8) -> Rgba<u8> {
    let c = p.demultiply();
    Rgba([c.red(), c.green(), c.blue(), c.alpha()])
}

/// Premultiplied copy of an RGBA image. `None` for an empty image.
pub(crate) fn pixmap_from_rgba(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// A canvas bound to an image for the duration of a drawing session.
///
/// The image must be 8-bit RGBA. Pixels are flushed back to the image once,
/// by [`close`](Self::close) or on drop, including when a draw call failed.
pub struct DrawSession<'a> {
    image: &'a mut DynamicImage,
    canvas: Canvas,
    flushed: bool,
}

impl<'a> DrawSession<'a> {
    /// Bind a canvas to `image`.
    pub fn open(image: &'a mut DynamicImage) -> TextResult<Self> {
        let canvas = Canvas::from_image(image)?;
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            "opened drawing session"
        );
        Ok(Self {
            image,
            canvas,
            flushed: false,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// See [`draw::draw_text`].
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle<'_>) -> TextResult<Rect> {
        draw::draw_text(&mut self.canvas, text, x, y, style)
    }

    /// See [`draw::draw_text_anchored`].
    pub fn draw_text_anchored(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        anchor: (f32, f32),
        style: &TextStyle<'_>,
    ) -> TextResult<Rect> {
        draw::draw_text_anchored(&mut self.canvas, text, x, y, anchor, style)
    }

    /// See [`draw::draw_text_multiline`].
    pub fn draw_text_multiline(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        anchor: (f32, f32),
        style: &TextStyle<'_>,
    ) -> TextResult<Rect> {
        draw::draw_text_multiline(&mut self.canvas, text, x, y, anchor, style)
    }

    /// See [`draw::draw_text_wrapped`].
    pub fn draw_text_wrapped(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        anchor: (f32, f32),
        width: f32,
        style: &TextStyle<'_>,
    ) -> TextResult<Rect> {
        draw::draw_text_wrapped(&mut self.canvas, text, x, y, anchor, width, style)
    }

    /// Flush the pixels to the image and end the session.
    pub fn close(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;
        if let DynamicImage::ImageRgba8(target) = &mut *self.image {
            self.canvas.write_to(target);
        }
        debug!("flushed drawing session");
    }
}

impl Drop for DrawSession<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl fmt::Debug for DrawSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSession")
            .field("canvas", &self.canvas)
            .field("flushed", &self.flushed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new(4, 3, Color::RED).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
        assert_eq!(canvas.pixel(3, 2), Some(Color::RED));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.to_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_empty_canvas_is_an_error() {
        let err = Canvas::new(0, 10, Color::WHITE).unwrap_err();
        assert!(matches!(err, TextError::EmptyCanvas { width: 0, height: 10 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rgba_image_roundtrip() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
        let canvas = Canvas::from_rgba_image(&image).unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLUE));
        assert_eq!(canvas.to_rgba_image(), image);
    }

    #[test]
    fn test_translucent_pixels_roundtrip_exactly() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([10, 250, 130, 40]));
        image.put_pixel(1, 0, Rgba([200, 100, 50, 3]));
        image.put_pixel(2, 1, Rgba([77, 0, 255, 254]));
        let canvas = Canvas::from_rgba_image(&image).unwrap();
        assert_eq!(canvas.to_rgba_image(), image);
        assert_eq!(canvas.to_bytes(), image.as_raw().clone());
        assert_eq!(canvas.pixel(1, 0), Some(Color::new(200, 100, 50, 3)));

        let translucent = Color::new(12, 34, 56, 7);
        let canvas = Canvas::new(2, 2, translucent).unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(translucent));
    }

    #[test]
    fn test_from_image_requires_rgba8() {
        let err = Canvas::from_image(&DynamicImage::new_rgb8(2, 2)).unwrap_err();
        assert!(matches!(err, TextError::UnsupportedPixelFormat(_)));
        assert!(Canvas::from_image(&DynamicImage::new_rgba8(2, 2)).is_ok());
    }

    #[test]
    fn test_session_flushes_on_close() {
        let mut image = DynamicImage::new_rgba8(3, 3);
        let mut session = DrawSession::open(&mut image).unwrap();
        session
            .canvas_mut()
            .pixmap_mut()
            .fill(Color::GREEN.to_skia());
        session.close();
        assert_eq!(image.to_rgba8().get_pixel(2, 2), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_session_flushes_on_drop() {
        let mut image = DynamicImage::new_rgba8(3, 3);
        {
            let mut session = DrawSession::open(&mut image).unwrap();
            session.canvas_mut().pixmap_mut().fill(Color::RED.to_skia());
            assert!(!session.flushed);
        }
        assert_eq!(image.to_rgba8().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_session_only_writes_changed_pixels() {
        let before = Rgba([200, 100, 50, 3]);
        let mut image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, before));
        {
            let mut session = DrawSession::open(&mut image).unwrap();
            let red = tiny_skia::Paint {
                shader: tiny_skia::Shader::SolidColor(Color::RED.to_skia()),
                ..Default::default()
            };
            let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, 1.0, 1.0).unwrap();
            session
                .canvas_mut()
                .pixmap_mut()
                .fill_rect(rect, &red, tiny_skia::Transform::identity(), None);
        }
        let rgba = image.as_rgba8().unwrap();
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert!(
            rgba.enumerate_pixels()
                .filter(|(x, y, _)| (*x, *y) != (0, 0))
                .all(|(_, _, p)| *p == before)
        );
    }

    #[test]
    fn test_session_rejects_wrong_format() {
        let mut image = DynamicImage::new_luma8(3, 3);
        let err = DrawSession::open(&mut image).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        Canvas::new(2, 2, Color::BLUE).unwrap().save(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(1, 1), &Rgba([0, 0, 255, 255]));

        let err = Canvas::new(2, 2, Color::BLUE)
            .unwrap()
            .save(dir.path().join("canvas.unknown-ext"))
            .unwrap_err();
        assert!(err.is_resource());
    }
}
