//! Styled text and inline emoji rendering onto RGBA raster images.
//!
//! This crate draws text with font fallback, fill and stroke paints,
//! alignment, anchoring, wrapping, and inline emoji images onto 8-bit RGBA
//! pixel buffers.
//!
//! # Getting Started
//!
//! Load a font, describe the style, and draw onto a [`Canvas`]:
//!
//! ```no_run
//! use horizon_imagetext::{Canvas, Color, TextStyle, draw_text};
//! use horizon_imagetext::text::Font;
//!
//! let font = Font::from_files("fonts/DejaVuSans.ttf", &["fonts/NotoSansCJK.ttc"])?;
//! let mut canvas = Canvas::new(400, 100, Color::WHITE)?;
//!
//! let style = TextStyle::new(&font, 32.0).fill(Color::BLACK);
//! draw_text(&mut canvas, "Hello, World!", 10.0, 10.0, &style)?;
//! canvas.save("hello.png")?;
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```
//!
//! # Drawing on Existing Images
//!
//! A [`DrawSession`] binds a canvas to an `image::DynamicImage` and writes
//! the pixels back when it is closed or dropped:
//!
//! ```no_run
//! use horizon_imagetext::{Color, DrawSession, Paint, Point, TextAlign, TextStyle};
//! use horizon_imagetext::text::Font;
//!
//! let font = Font::from_files("fonts/DejaVuSans.ttf", &[] as &[&str])?;
//! let mut image = image::DynamicImage::from(image::open("photo.png").expect("readable image").to_rgba8());
//!
//! let style = TextStyle::new(&font, 48.0)
//!     .fill(Paint::rainbow(Point::new(0.0, 0.0), Point::new(500.0, 0.0)))
//!     .stroke(2.0, Color::BLACK)
//!     .align(TextAlign::Center);
//!
//! let mut session = DrawSession::open(&mut image)?;
//! session.draw_text_wrapped("A caption that wraps", 250.0, 20.0, (0.5, 0.0), 480.0, &style)?;
//! session.close();
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```
//!
//! # Emoji
//!
//! Emoji are drawn from images in an [`text::EmojiRegistry`]. Native emoji
//! sequences, `:shortcodes:`, and Discord custom emoji are recognized; spans
//! without an image are drawn as plain text. See [`text::EmojiOptions`].

mod canvas;
mod compositor;
mod draw;
mod error;
mod measure;
mod paint;
pub mod text;
mod types;

// Drawing
pub use canvas::{Canvas, DrawSession};
pub use draw::{TextStyle, draw_text, draw_text_anchored, draw_text_multiline, draw_text_wrapped};
pub use measure::{split_on_space, text_size, text_size_multiline, text_wrap};

// Values
pub use error::{ErrorKind, TextError, TextResult};
pub use paint::{GradientStop, LinearGradient, Paint};
pub use text::{TextAlign, WrapStyle};
pub use types::{Color, Point, Rect, Size};

// Re-export image for callers handing in buffers
pub use image;
