//! Text processing: fonts, emoji, shaping, line breaking, and layout.
//!
//! The drawing pipeline runs these stages in order:
//!
//! 1. [`Shaper`] turns a string into a [`GlyphRun`] of glyph and emoji
//!    entries, using a [`Font`] and optionally an [`EmojiRegistry`].
//! 2. [`break_lines`] splits the run into [`Line`]s at newlines and, with a
//!    max width, per a [`WrapStyle`].
//! 3. [`layout_lines`] positions the lines as an anchored, aligned
//!    [`TextBlock`].
//!
//! The top-level draw functions run the whole pipeline; these types are
//! exposed for measuring and for custom rendering.
//!
//! # Fonts
//!
//! ```no_run
//! use horizon_imagetext::text::{FontRegistry, Shaper};
//!
//! let mut registry = FontRegistry::new();
//! let ids = registry.load_font_file("fonts/DejaVuSans.ttf")?;
//! let font = registry.font(ids[0], &[])?;
//!
//! let run = Shaper::new(&font, 16.0).shape("Hello, World!")?;
//! println!("Text width: {} pixels", run.width());
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```
//!
//! # Emoji
//!
//! ```no_run
//! use horizon_imagetext::text::{EmojiOptions, EmojiRegistry, EmojiSource, Font, Shaper};
//!
//! let font = Font::from_files("fonts/DejaVuSans.ttf", &[] as &[&str])?;
//! let mut emojis = EmojiRegistry::new();
//! emojis.load_dir(EmojiSource::Twitter, "twemoji/72x72")?;
//!
//! let options = EmojiOptions::default().parse_discord_emojis(true);
//! let run = Shaper::new(&font, 16.0)
//!     .with_emojis(&emojis, options)
//!     .shape("Hi :wave: <:blob:396521773144866826>")?;
//! println!("{} emoji", run.emoji_count());
//! # Ok::<(), horizon_imagetext::TextError>(())
//! ```

pub(crate) mod emoji;
pub(crate) mod font;
pub(crate) mod layout;
pub(crate) mod shaping;
pub mod shortcodes;
pub(crate) mod wrap;

pub use emoji::{
    EmojiImage, EmojiKey, EmojiMatch, EmojiOptions, EmojiRegistry, EmojiSource, EmojiSpan,
    is_emoji, is_emoji_modifier, is_emoji_modifier_base, is_emoji_presentation,
    is_keycap_base, is_regional_indicator, is_tag_character, is_variation_selector, is_zwj,
    native_emoji_len, scan_emojis,
};
pub use font::{FaceMetrics, Font, FontData, FontFace, FontFaceId, FontRegistry, FontRegistryConfig};
pub use layout::{LayoutParams, PositionedLine, TextAlign, TextBlock, layout_lines};
pub use shaping::{BreakClass, EntryKind, GlyphRun, RunEntry, Shaper};
pub use wrap::{Line, WrapStyle, break_lines, single_line};
