//! Error types for the imagetext crate.

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a [`TextError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied an invalid value (bad hex color, wrong pixel
    /// format, out-of-range parameter).
    Configuration,
    /// A font or image asset could not be loaded, parsed, or written.
    Resource,
}

/// Errors that can occur while preparing or drawing text.
#[derive(Error, Debug)]
pub enum TextError {
    /// A hex color string was not 6 or 8 hexadecimal digits.
    #[error("invalid hex color {0:?}: expected 6 or 8 hexadecimal digits")]
    InvalidHexColor(String),

    /// An image bound to a drawing session was not 8-bit RGBA.
    #[error("unsupported pixel format {0}: expected 8-bit RGBA")]
    UnsupportedPixelFormat(String),

    /// A canvas was requested with a zero dimension.
    #[error("invalid canvas dimensions: {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    /// A drawing or layout parameter was out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// Failed to read a font file.
    #[error("failed to load font from {path}: {source}")]
    FontIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font data could not be parsed as an OpenType face.
    #[error("invalid font data: {0}")]
    InvalidFontData(String),

    /// A font face id does not refer to a loaded face.
    #[error("font face {0:?} is not loaded")]
    UnknownFace(fontdb::ID),

    /// An emoji image could not be read or decoded.
    #[error("failed to load emoji image {name}: {source}")]
    EmojiImage {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// A canvas could not be encoded or written.
    #[error("failed to save image: {0}")]
    ImageSave(#[from] image::ImageError),
}

impl TextError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TextError::InvalidHexColor(_)
            | TextError::UnsupportedPixelFormat(_)
            | TextError::EmptyCanvas { .. }
            | TextError::InvalidParameter { .. } => ErrorKind::Configuration,
            TextError::FontIo { .. }
            | TextError::InvalidFontData(_)
            | TextError::UnknownFace(_)
            | TextError::EmojiImage { .. }
            | TextError::ImageSave(_) => ErrorKind::Resource,
        }
    }

    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Check if this is a resource error.
    pub fn is_resource(&self) -> bool {
        self.kind() == ErrorKind::Resource
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;

/// Reject non-finite or non-positive values for a named parameter.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> TextResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TextError::InvalidParameter { name, value })
    }
}
