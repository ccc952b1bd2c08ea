//! Emoji detection and resolution.
//!
//! Three span syntaxes are recognized inside drawn text:
//!
//! - native Unicode emoji sequences, including ZWJ joins, skin tone
//!   modifiers, keycaps, regional indicator flags, and tag sequences
//! - `:shortcode:` aliases from [`crate::text::shortcodes`]
//! - Discord custom emoji, `<:name:id>` and `<a:name:id>`
//!
//! Matched spans are resolved to images through an [`EmojiRegistry`]. Spans
//! that don't resolve stay in the text and are drawn as ordinary glyphs.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::canvas::pixmap_from_rgba;
use crate::error::{TextError, TextResult, ensure_positive};
use crate::text::shortcodes;

const ZWJ: char = '\u{200D}';
const VS15: char = '\u{FE0E}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';
const CANCEL_TAG: char = '\u{E007F}';
const BLACK_FLAG: char = '\u{1F3F4}';

// Sorted, non-overlapping inclusive ranges.
static EMOJI_PRESENTATION: &[(u32, u32)] = &[
    (0x231A, 0x231B),
    (0x23E9, 0x23EC),
    (0x23F0, 0x23F0),
    (0x23F3, 0x23F3),
    (0x25FD, 0x25FE),
    (0x2614, 0x2615),
    (0x2648, 0x2653),
    (0x267F, 0x267F),
    (0x2693, 0x2693),
    (0x26A1, 0x26A1),
    (0x26AA, 0x26AB),
    (0x26BD, 0x26BE),
    (0x26C4, 0x26C5),
    (0x26CE, 0x26CE),
    (0x26D4, 0x26D4),
    (0x26EA, 0x26EA),
    (0x26F2, 0x26F3),
    (0x26F5, 0x26F5),
    (0x26FA, 0x26FA),
    (0x26FD, 0x26FD),
    (0x2705, 0x2705),
    (0x270A, 0x270B),
    (0x2728, 0x2728),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2795, 0x2797),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F201, 0x1F201),
    (0x1F21A, 0x1F21A),
    (0x1F22F, 0x1F22F),
    (0x1F232, 0x1F236),
    (0x1F238, 0x1F23A),
    (0x1F250, 0x1F251),
    (0x1F300, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F7E0, 0x1F7EB),
    (0x1F90C, 0x1F9FF),
    (0x1FA70, 0x1FAFF),
];

// Emoji that render as text unless followed by U+FE0F.
static EMOJI_TEXT_DEFAULT: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x2328, 0x2328),
    (0x23CF, 0x23CF),
    (0x23ED, 0x23EF),
    (0x23F1, 0x23F2),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FC),
    (0x2600, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F170, 0x1F171),
    (0x1F17E, 0x1F17F),
    (0x1F202, 0x1F202),
    (0x1F237, 0x1F237),
];

static EMOJI_MODIFIER_BASE: &[(u32, u32)] = &[
    (0x261D, 0x261D),
    (0x26F9, 0x26F9),
    (0x270A, 0x270D),
    (0x1F385, 0x1F385),
    (0x1F3C2, 0x1F3C4),
    (0x1F3C7, 0x1F3C7),
    (0x1F3CA, 0x1F3CC),
    (0x1F442, 0x1F443),
    (0x1F446, 0x1F450),
    (0x1F466, 0x1F478),
    (0x1F47C, 0x1F47C),
    (0x1F481, 0x1F483),
    (0x1F485, 0x1F487),
    (0x1F4AA, 0x1F4AA),
    (0x1F574, 0x1F575),
    (0x1F57A, 0x1F57A),
    (0x1F590, 0x1F590),
    (0x1F595, 0x1F596),
    (0x1F645, 0x1F647),
    (0x1F64B, 0x1F64F),
    (0x1F6A3, 0x1F6A3),
    (0x1F6B4, 0x1F6B6),
    (0x1F6C0, 0x1F6C0),
    (0x1F6CC, 0x1F6CC),
    (0x1F90C, 0x1F90C),
    (0x1F90F, 0x1F90F),
    (0x1F918, 0x1F91F),
    (0x1F926, 0x1F926),
    (0x1F930, 0x1F939),
    (0x1F93C, 0x1F93E),
    (0x1F977, 0x1F977),
    (0x1F9B5, 0x1F9B6),
    (0x1F9B8, 0x1F9B9),
    (0x1F9BB, 0x1F9BB),
    (0x1F9CD, 0x1F9CF),
    (0x1F9D1, 0x1F9DD),
    (0x1FAC3, 0x1FAC5),
    (0x1FAF0, 0x1FAF8),
];

fn in_ranges(table: &[(u32, u32)], c: char) -> bool {
    let cp = c as u32;
    table
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                Ordering::Less
            } else if lo > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

/// Check if a character has the Unicode `Emoji` property.
///
/// Keycap bases (`0-9`, `#`, `*`) are excluded; they only become emoji as
/// part of a keycap sequence.
pub fn is_emoji(c: char) -> bool {
    is_emoji_presentation(c) || in_ranges(EMOJI_TEXT_DEFAULT, c) || is_regional_indicator(c)
}

/// Check if a character renders as emoji by default.
pub fn is_emoji_presentation(c: char) -> bool {
    in_ranges(EMOJI_PRESENTATION, c)
}

/// Skin tone modifiers, U+1F3FB..=U+1F3FF.
pub fn is_emoji_modifier(c: char) -> bool {
    matches!(c as u32, 0x1F3FB..=0x1F3FF)
}

/// Check if a character accepts a skin tone modifier.
pub fn is_emoji_modifier_base(c: char) -> bool {
    in_ranges(EMOJI_MODIFIER_BASE, c)
}

/// Regional indicator symbols, used in pairs for country flags.
pub fn is_regional_indicator(c: char) -> bool {
    matches!(c as u32, 0x1F1E6..=0x1F1FF)
}

pub fn is_zwj(c: char) -> bool {
    c == ZWJ
}

/// VS15 (text presentation) or VS16 (emoji presentation).
pub fn is_variation_selector(c: char) -> bool {
    c == VS15 || c == VS16
}

pub fn is_keycap_base(c: char) -> bool {
    c.is_ascii_digit() || c == '#' || c == '*'
}

/// Tag characters, U+E0020..=U+E007F.
pub fn is_tag_character(c: char) -> bool {
    matches!(c as u32, 0xE0020..=0xE007F)
}

/// Length in bytes of the native emoji sequence at the start of `text`.
///
/// Returns `None` when `text` does not begin with an emoji. A lone regional
/// indicator, a keycap base without U+20E3, and a text-default emoji without
/// U+FE0F are not emoji.
///
/// ```
/// use horizon_imagetext::text::native_emoji_len;
///
/// assert_eq!(native_emoji_len("\u{1F604} hi"), Some(4));
/// assert_eq!(native_emoji_len("\u{2764}"), None);
/// assert_eq!(native_emoji_len("\u{2764}\u{FE0F}"), Some(6));
/// ```
pub fn native_emoji_len(text: &str) -> Option<usize> {
    let mut len = element_len(text, false)?;
    loop {
        let rest = &text[len..];
        let Some(joined) = rest.strip_prefix(ZWJ) else {
            break;
        };
        match element_len(joined, true) {
            Some(next) => len += ZWJ.len_utf8() + next,
            None => break,
        }
    }
    Some(len)
}

/// One emoji element: a keycap, a flag, or a base character with its
/// presentation selector, modifier, and tags.
fn element_len(text: &str, joined: bool) -> Option<usize> {
    let mut chars = text.chars();
    let base = chars.next()?;
    let mut len = base.len_utf8();

    if is_keycap_base(base) {
        let mut next = chars.next()?;
        if next == VS16 {
            len += next.len_utf8();
            next = chars.next()?;
        }
        return (next == KEYCAP).then_some(len + next.len_utf8());
    }

    if is_regional_indicator(base) {
        let second = chars.next().filter(|&c| is_regional_indicator(c))?;
        return Some(len + second.len_utf8());
    }

    if !is_emoji(base) {
        return None;
    }

    let mut qualified = joined || is_emoji_presentation(base);
    match chars.next() {
        Some(VS15) => return None,
        Some(VS16) => {
            len += VS16.len_utf8();
            qualified = true;
        }
        Some(m) if is_emoji_modifier(m) && is_emoji_modifier_base(base) => {
            len += m.len_utf8();
            qualified = true;
        }
        _ => {}
    }
    if !qualified {
        return None;
    }

    if base == BLACK_FLAG {
        len += tag_sequence_len(&text[len..]);
    }
    Some(len)
}

/// Tags following a black flag, through the cancel tag. Zero if unterminated.
fn tag_sequence_len(text: &str) -> usize {
    let mut len = 0;
    for c in text.chars() {
        if !is_tag_character(c) {
            return 0;
        }
        len += c.len_utf8();
        if c == CANCEL_TAG {
            return len;
        }
    }
    0
}

/// The image set backing emoji lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmojiSource {
    #[default]
    Twitter,
    Apple,
    Google,
    Microsoft,
    Samsung,
    WhatsApp,
    Facebook,
    Messenger,
    JoyPixels,
    OpenMoji,
    Emojidex,
    LG,
    HTC,
    Mozilla,
}

impl EmojiSource {
    /// Lowercase name of the image set.
    pub fn name(self) -> &'static str {
        match self {
            EmojiSource::Twitter => "twitter",
            EmojiSource::Apple => "apple",
            EmojiSource::Google => "google",
            EmojiSource::Microsoft => "microsoft",
            EmojiSource::Samsung => "samsung",
            EmojiSource::WhatsApp => "whatsapp",
            EmojiSource::Facebook => "facebook",
            EmojiSource::Messenger => "messenger",
            EmojiSource::JoyPixels => "joypixels",
            EmojiSource::OpenMoji => "openmoji",
            EmojiSource::Emojidex => "emojidex",
            EmojiSource::LG => "lg",
            EmojiSource::HTC => "htc",
            EmojiSource::Mozilla => "mozilla",
        }
    }
}

impl fmt::Display for EmojiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emoji options for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmojiOptions {
    /// Emoji size relative to the font size. Must be positive.
    pub scale: f32,
    /// Pixel offset applied to every emoji image.
    pub shift: (i32, i32),
    /// Replace `:shortcode:` spans.
    pub parse_shortcodes: bool,
    /// Replace `<:name:id>` and `<a:name:id>` spans.
    pub parse_discord_emojis: bool,
    /// Image set used for every lookup.
    pub source: EmojiSource,
}

impl Default for EmojiOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shift: (0, 0),
            parse_shortcodes: true,
            parse_discord_emojis: false,
            source: EmojiSource::default(),
        }
    }
}

impl EmojiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn shift(mut self, dx: i32, dy: i32) -> Self {
        self.shift = (dx, dy);
        self
    }

    pub fn parse_shortcodes(mut self, enabled: bool) -> Self {
        self.parse_shortcodes = enabled;
        self
    }

    pub fn parse_discord_emojis(mut self, enabled: bool) -> Self {
        self.parse_discord_emojis = enabled;
        self
    }

    pub fn source(mut self, source: EmojiSource) -> Self {
        self.source = source;
        self
    }

    pub(crate) fn validate(&self) -> TextResult<()> {
        ensure_positive("emoji scale", self.scale).map(|_| ())
    }
}

/// Registry key of an emoji image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmojiKey {
    /// Lowercase hex codepoints joined by `-`, e.g. `1f44b-1f3fd`.
    Unicode(String),
    /// Discord custom emoji id.
    Discord(u64),
}

impl EmojiKey {
    /// Build the key of a Unicode emoji string.
    pub fn unicode(emoji: &str) -> Self {
        let key: Vec<String> = emoji.chars().map(|c| format!("{:x}", c as u32)).collect();
        Self::Unicode(key.join("-"))
    }
}

/// A decoded emoji image stored in an [`EmojiRegistry`].
#[derive(Clone)]
pub struct EmojiImage {
    id: u64,
    image: Arc<RgbaImage>,
}

impl EmojiImage {
    /// Registry-unique id of this image.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The full-resolution image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl fmt::Debug for EmojiImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmojiImage")
            .field("id", &self.id)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

/// Emoji images keyed by source and emoji.
///
/// The registry performs no network access; images are inserted from memory
/// or loaded from disk up front. Resized copies are cached per pixel size and
/// shared across draw calls.
///
/// # Example
///
/// ```no_run
/// use horizon_imagetext::text::{EmojiRegistry, EmojiSource};
///
/// let mut emojis = EmojiRegistry::new();
/// // twemoji/72x72/1f604.png, twemoji/72x72/discord-123.png, ...
/// let loaded = emojis.load_dir(EmojiSource::Twitter, "twemoji/72x72")?;
/// assert!(loaded > 0);
/// # Ok::<(), horizon_imagetext::TextError>(())
/// ```
pub struct EmojiRegistry {
    images: HashMap<(EmojiSource, EmojiKey), EmojiImage>,
    next_id: u64,
    rasters: Mutex<HashMap<(u64, u32), Arc<tiny_skia::Pixmap>>>,
}

impl EmojiRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            next_id: 0,
            rasters: Mutex::new(HashMap::new()),
        }
    }

    /// Register the image of a Unicode emoji, e.g. `"👋🏽"`.
    pub fn insert(&mut self, source: EmojiSource, emoji: &str, image: RgbaImage) {
        self.insert_key(source, EmojiKey::unicode(emoji), image);
    }

    /// Register the image of a Discord custom emoji.
    pub fn insert_discord(&mut self, source: EmojiSource, id: u64, image: RgbaImage) {
        self.insert_key(source, EmojiKey::Discord(id), image);
    }

    /// Register an image under an explicit key, replacing any previous one.
    pub fn insert_key(&mut self, source: EmojiSource, key: EmojiKey, image: RgbaImage) {
        let id = self.next_id;
        self.next_id += 1;
        self.images.insert(
            (source, key),
            EmojiImage {
                id,
                image: Arc::new(image),
            },
        );
    }

    /// Decode an image file and register it under `key`.
    pub fn load_file(
        &mut self,
        source: EmojiSource,
        key: EmojiKey,
        path: impl AsRef<Path>,
    ) -> TextResult<()> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|err| TextError::EmojiImage {
                name: path.display().to_string(),
                source: err,
            })?
            .to_rgba8();
        debug!(path = %path.display(), ?key, "loaded emoji image");
        self.insert_key(source, key, image);
        Ok(())
    }

    /// Load every `.png` in a directory.
    ///
    /// `<hex>-<hex>.png` files register Unicode emoji; `discord-<id>.png`
    /// files register Discord custom emoji. Other names are skipped.
    /// Returns the number of images loaded.
    pub fn load_dir(&mut self, source: EmojiSource, dir: impl AsRef<Path>) -> TextResult<usize> {
        let dir = dir.as_ref();
        let io_error = |e: std::io::Error| TextError::EmojiImage {
            name: dir.display().to_string(),
            source: image::ImageError::IoError(e),
        };

        let mut loaded = 0;
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(key) = key_from_file_stem(stem) else {
                debug!(path = %path.display(), "skipping unrecognized emoji file name");
                continue;
            };
            self.load_file(source, key, &path)?;
            loaded += 1;
        }

        info!(dir = %dir.display(), %source, images = loaded, "loaded emoji directory");
        Ok(loaded)
    }

    /// Get the image registered under an exact key.
    pub fn get(&self, source: EmojiSource, key: &EmojiKey) -> Option<&EmojiImage> {
        self.images.get(&(source, key.clone()))
    }

    /// Find the image of a Unicode emoji.
    ///
    /// Falls back to the key without U+FE0F, matching image sets that drop
    /// presentation selectors from file names.
    pub fn lookup_emoji(&self, source: EmojiSource, emoji: &str) -> Option<&EmojiImage> {
        self.get(source, &EmojiKey::unicode(emoji)).or_else(|| {
            if !emoji.contains(VS16) {
                return None;
            }
            let stripped: String = emoji.chars().filter(|&c| c != VS16).collect();
            self.get(source, &EmojiKey::unicode(&stripped))
        })
    }

    /// Find the image of a Discord custom emoji.
    pub fn lookup_discord(&self, source: EmojiSource, id: u64) -> Option<&EmojiImage> {
        self.get(source, &EmojiKey::Discord(id))
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The image resized to a `px`-by-`px` square, cached.
    pub(crate) fn raster(&self, image: &EmojiImage, px: u32) -> Option<Arc<tiny_skia::Pixmap>> {
        if px == 0 {
            return None;
        }
        let mut rasters = self.rasters.lock();
        if let Some(pixmap) = rasters.get(&(image.id, px)) {
            return Some(Arc::clone(pixmap));
        }
        let resized = imageops::resize(image.image(), px, px, FilterType::Triangle);
        let pixmap = Arc::new(pixmap_from_rgba(&resized)?);
        rasters.insert((image.id, px), Arc::clone(&pixmap));
        trace!(id = image.id, px, "rasterized emoji");
        Some(pixmap)
    }
}

impl Default for EmojiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmojiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmojiRegistry")
            .field("images", &self.images.len())
            .field("cached_rasters", &self.rasters.lock().len())
            .finish()
    }
}

fn key_from_file_stem(stem: &str) -> Option<EmojiKey> {
    if let Some(id) = stem.strip_prefix("discord-") {
        return id.parse().ok().map(EmojiKey::Discord);
    }
    let valid = !stem.is_empty()
        && stem
            .split('-')
            .all(|cp| !cp.is_empty() && cp.bytes().all(|b| b.is_ascii_hexdigit()));
    valid.then(|| EmojiKey::Unicode(stem.to_ascii_lowercase()))
}

/// How an emoji span was written in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMatch {
    Native,
    Shortcode,
    Discord { animated: bool },
}

/// A resolved emoji span.
#[derive(Debug, Clone)]
pub struct EmojiSpan<'r> {
    /// Byte range in the scanned text.
    pub range: Range<usize>,
    pub kind: EmojiMatch,
    pub image: &'r EmojiImage,
}

/// Find every resolvable emoji span in `text`, in order.
///
/// At each position a native sequence is tried first, then a shortcode, then
/// a Discord emoji. An unresolved native sequence is skipped whole; an
/// unresolved shortcode or Discord span only skips its first character, so a
/// valid span may start inside it.
pub fn scan_emojis<'r>(
    text: &str,
    options: &EmojiOptions,
    registry: &'r EmojiRegistry,
) -> Vec<EmojiSpan<'r>> {
    let source = options.source;
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(next) = text[pos..].chars().next() {
        let rest = &text[pos..];

        if let Some(len) = native_emoji_len(rest) {
            match registry.lookup_emoji(source, &rest[..len]) {
                Some(image) => spans.push(EmojiSpan {
                    range: pos..pos + len,
                    kind: EmojiMatch::Native,
                    image,
                }),
                None => trace!(emoji = &rest[..len], %source, "no image for emoji"),
            }
            pos += len;
            continue;
        }

        if options.parse_shortcodes
            && next == ':'
            && let Some((len, name)) = shortcode_at(rest)
        {
            let image =
                shortcodes::lookup(name).and_then(|emoji| registry.lookup_emoji(source, emoji));
            if let Some(image) = image {
                spans.push(EmojiSpan {
                    range: pos..pos + len,
                    kind: EmojiMatch::Shortcode,
                    image,
                });
                pos += len;
                continue;
            }
            trace!(shortcode = name, "unresolved shortcode");
        }

        if options.parse_discord_emojis
            && next == '<'
            && let Some((len, id, animated)) = discord_emoji_at(rest)
        {
            if let Some(image) = registry.lookup_discord(source, id) {
                spans.push(EmojiSpan {
                    range: pos..pos + len,
                    kind: EmojiMatch::Discord { animated },
                    image,
                });
                pos += len;
                continue;
            }
            trace!(id, "unresolved discord emoji");
        }

        pos += next.len_utf8();
    }

    spans
}

/// `:name:` at the start of `text`; returns the span length and the name.
fn shortcode_at(text: &str) -> Option<(usize, &str)> {
    let body = text.strip_prefix(':')?;
    let end = body.find(':')?;
    let name = &body[..end];
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((end + 2, name))
}

/// `<:name:id>` or `<a:name:id>` at the start of `text`; returns the span
/// length, the id, and the animation flag.
fn discord_emoji_at(text: &str) -> Option<(usize, u64, bool)> {
    let body = text.strip_prefix('<')?;
    let (animated, body) = match body.strip_prefix("a:") {
        Some(rest) => (true, rest),
        None => (false, body.strip_prefix(':')?),
    };

    let name_len = body
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if name_len == 0 {
        return None;
    }
    let body = body[name_len..].strip_prefix(':')?;

    let id_len = body.bytes().take_while(u8::is_ascii_digit).count();
    if id_len == 0 || !body[id_len..].starts_with('>') {
        return None;
    }
    let id = body[..id_len].parse().ok()?;

    let prefix = if animated { 3 } else { 2 };
    Some((prefix + name_len + 1 + id_len + 1, id, animated))
}
