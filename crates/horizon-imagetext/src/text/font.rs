//! Font faces, fallback chains, and the font database.
//!
//! A [`Font`] is an immutable, cheaply clonable handle to a primary
//! [`FontFace`] plus an ordered list of fallback faces. Glyph lookup walks
//! the chain in declared order; see [`crate::text::Shaper`].
//!
//! Faces can be built directly from bytes or files, or resolved through a
//! [`FontRegistry`], which wraps a `fontdb` database for family queries.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use ttf_parser::{GlyphId, OutlineBuilder};

use crate::error::{TextError, TextResult};

/// Identifier of a face stored in a [`FontRegistry`].
pub type FontFaceId = fontdb::ID;

/// Shared, immutable font file bytes.
pub type FontData = Arc<dyn AsRef<[u8]> + Send + Sync>;

/// Vertical metrics of a face, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceMetrics {
    /// Font units per em square.
    pub units_per_em: u16,
    /// Distance from baseline to top of the face (positive).
    pub ascender: i16,
    /// Distance from baseline to bottom of the face (typically negative).
    pub descender: i16,
    /// Recommended gap between lines.
    pub line_gap: i16,
}

impl FaceMetrics {
    /// Fraction of the em box that lies above the baseline.
    pub fn baseline_ratio(&self) -> f32 {
        let ascender = f32::from(self.ascender);
        let extent = ascender - f32::from(self.descender);
        if extent > 0.0 {
            (ascender / extent).clamp(0.0, 1.0)
        } else {
            0.8
        }
    }
}

/// A single parsed-and-validated font face.
#[derive(Clone)]
pub struct FontFace {
    id: Option<FontFaceId>,
    data: FontData,
    index: u32,
    metrics: FaceMetrics,
}

impl FontFace {
    /// Create a face from raw TTF/OTF/TTC bytes.
    ///
    /// `index` selects a face within a collection; use 0 for single-face files.
    pub fn from_data(data: Vec<u8>, index: u32) -> TextResult<Self> {
        Self::from_shared(Arc::new(data), index)
    }

    /// Create a face from shared font bytes.
    pub fn from_shared(data: FontData, index: u32) -> TextResult<Self> {
        let face = ttf_parser::Face::parse((*data).as_ref(), index)
            .map_err(|e| TextError::InvalidFontData(e.to_string()))?;
        let metrics = FaceMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        };

        Ok(Self {
            id: None,
            data,
            index,
            metrics,
        })
    }

    /// Load the first face of a font file.
    pub fn from_file(path: impl AsRef<Path>) -> TextResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| TextError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = data.len(), "read font file");
        Self::from_data(data, 0)
    }

    /// The registry id of this face, if it was resolved through a [`FontRegistry`].
    pub fn id(&self) -> Option<FontFaceId> {
        self.id
    }

    /// The face index within its font file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Vertical metrics in font units.
    pub fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    /// The raw font file bytes.
    pub fn data(&self) -> &[u8] {
        (*self.data).as_ref()
    }

    /// Check if the face maps a character to a real glyph.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.parse()
            .map(|face| lookup_glyph(&face, ch).is_some())
            .unwrap_or(false)
    }

    pub(crate) fn parse(&self) -> TextResult<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(self.data(), self.index)
            .map_err(|e| TextError::InvalidFontData(e.to_string()))
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("bytes", &self.data().len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// A typeface plus its ordered fallback chain.
///
/// Cloning a `Font` is cheap; faces are shared.
///
/// # Example
///
/// ```no_run
/// use horizon_imagetext::text::Font;
///
/// let font = Font::from_files("fonts/Inter.ttf", &["fonts/NotoSansCJK.ttc"])?;
/// assert_eq!(font.fallbacks().len(), 1);
/// # Ok::<(), horizon_imagetext::TextError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Font {
    faces: Arc<[FontFace]>,
}

impl Font {
    /// Create a font with no fallbacks.
    pub fn new(primary: FontFace) -> Self {
        Self {
            faces: Arc::from(vec![primary]),
        }
    }

    /// Create a font with an ordered fallback chain.
    pub fn with_fallbacks(primary: FontFace, fallbacks: impl IntoIterator<Item = FontFace>) -> Self {
        let faces: Vec<FontFace> = std::iter::once(primary).chain(fallbacks).collect();
        Self {
            faces: Arc::from(faces),
        }
    }

    /// Load a primary font file and fallback font files.
    pub fn from_files<P: AsRef<Path>>(path: impl AsRef<Path>, fallbacks: &[P]) -> TextResult<Self> {
        let primary = FontFace::from_file(path)?;
        let fallbacks = fallbacks
            .iter()
            .map(FontFace::from_file)
            .collect::<TextResult<Vec<_>>>()?;
        Ok(Self::with_fallbacks(primary, fallbacks))
    }

    /// The primary face.
    pub fn primary(&self) -> &FontFace {
        &self.faces[0]
    }

    /// The fallback faces, in lookup order.
    pub fn fallbacks(&self) -> &[FontFace] {
        &self.faces[1..]
    }

    /// All faces: the primary followed by the fallbacks.
    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    /// Distance from a line's top to its baseline, for a given font size.
    pub fn baseline_offset(&self, size: f32) -> f32 {
        size * self.primary().metrics().baseline_ratio()
    }
}

/// Result of looking a character up along a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlyphLookup {
    /// Index of the face in the chain.
    pub face: usize,
    /// Glyph id within that face.
    pub glyph: u16,
    /// False when no face had the character and the missing-glyph marker
    /// was substituted.
    pub found: bool,
}

/// The faces of a [`Font`], parsed once for the duration of a draw call.
pub(crate) struct ParsedFont<'a> {
    faces: Vec<ttf_parser::Face<'a>>,
}

impl<'a> ParsedFont<'a> {
    pub fn parse(font: &'a Font) -> TextResult<Self> {
        let faces = font
            .faces()
            .iter()
            .map(FontFace::parse)
            .collect::<TextResult<Vec<_>>>()?;
        Ok(Self { faces })
    }

    /// Find the glyph for `ch`, walking the fallback chain in order.
    ///
    /// Never fails: a character no face maps becomes glyph 0 of the primary
    /// face.
    pub fn lookup(&self, ch: char) -> GlyphLookup {
        self.faces
            .iter()
            .enumerate()
            .find_map(|(face, parsed)| {
                lookup_glyph(parsed, ch).map(|glyph| GlyphLookup {
                    face,
                    glyph,
                    found: true,
                })
            })
            .unwrap_or(GlyphLookup {
                face: 0,
                glyph: 0,
                found: false,
            })
    }

    /// Pixels per font unit for a face at `size`.
    pub fn scale(&self, face: usize, size: f32) -> f32 {
        let units_per_em = self.faces[face].units_per_em().max(1);
        size / f32::from(units_per_em)
    }

    /// Horizontal advance of a glyph in pixels.
    pub fn advance(&self, face: usize, glyph: u16, size: f32) -> f32 {
        let units = self.faces[face]
            .glyph_hor_advance(GlyphId(glyph))
            .unwrap_or(0);
        f32::from(units) * self.scale(face, size)
    }

    /// Pair kerning adjustment in pixels from the legacy `kern` table.
    pub fn kerning(&self, face: usize, left: u16, right: u16, size: f32) -> f32 {
        let Some(kern) = self.faces[face].tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| subtable.glyphs_kerning(GlyphId(left), GlyphId(right)))
            .map(|units| f32::from(units) * self.scale(face, size))
            .unwrap_or(0.0)
    }

    /// Emit a glyph outline in font units. Returns false for empty glyphs.
    pub fn outline(&self, face: usize, glyph: u16, builder: &mut dyn OutlineBuilder) -> bool {
        self.faces[face]
            .outline_glyph(GlyphId(glyph), builder)
            .is_some()
    }
}

fn lookup_glyph(face: &ttf_parser::Face<'_>, ch: char) -> Option<u16> {
    face.glyph_index(ch)
        .map(|id| id.0)
        .filter(|&id| id != 0)
}

/// Configuration for initializing a [`FontRegistry`].
#[derive(Debug, Clone, Default)]
pub struct FontRegistryConfig {
    /// Whether to load system fonts on initialization.
    pub load_system_fonts: bool,
    /// Directories scanned for font files on initialization.
    pub font_dirs: Vec<PathBuf>,
}

impl FontRegistryConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to load system fonts on initialization.
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Add a directory to scan for fonts.
    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }
}

/// A database of loaded font faces.
///
/// The registry owns font bytes and hands out [`Font`] handles that share
/// them. It is an explicit object: create one, load fonts into it, and pass
/// the resulting fonts to drawing calls.
///
/// # Example
///
/// ```no_run
/// use horizon_imagetext::text::{FontRegistry, FontRegistryConfig};
///
/// let mut registry = FontRegistry::with_config(FontRegistryConfig::new().load_system_fonts(true));
/// let primary = registry.query_family("DejaVu Sans").expect("font installed");
/// let emoji = registry.query_family("Noto Emoji");
/// let font = registry.font(primary, emoji.as_slice())?;
/// # Ok::<(), horizon_imagetext::TextError>(())
/// ```
pub struct FontRegistry {
    db: fontdb::Database,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::with_config(FontRegistryConfig::default())
    }

    /// Create a registry with custom configuration.
    pub fn with_config(config: FontRegistryConfig) -> Self {
        let mut registry = Self {
            db: fontdb::Database::new(),
        };
        if config.load_system_fonts {
            registry.load_system_fonts();
        }
        for dir in &config.font_dirs {
            registry.load_fonts_dir(dir);
        }
        registry
    }

    /// Get a reference to the underlying font database.
    pub fn database(&self) -> &fontdb::Database {
        &self.db
    }

    /// Load system fonts into the database.
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
        info!(faces = self.face_count(), "loaded system fonts");
    }

    /// Load all fonts from a directory.
    pub fn load_fonts_dir(&mut self, path: impl AsRef<Path>) {
        let before = self.face_count();
        self.db.load_fonts_dir(path.as_ref());
        info!(
            dir = %path.as_ref().display(),
            faces = self.face_count() - before,
            "loaded font directory"
        );
    }

    /// Load a font file from disk.
    ///
    /// Returns the ids of the faces it contains.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> TextResult<Vec<FontFaceId>> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| TextError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font_data(data)
    }

    /// Load font data from memory.
    ///
    /// The data should be the raw contents of a TTF, OTF, TTC, or OTC file.
    pub fn load_font_data(&mut self, data: Vec<u8>) -> TextResult<Vec<FontFaceId>> {
        let ids: Vec<FontFaceId> = self
            .db
            .load_font_source(fontdb::Source::Binary(Arc::new(data)))
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Err(TextError::InvalidFontData(
                "no font faces found in data".to_string(),
            ));
        }
        info!(faces = ids.len(), "loaded font data");
        Ok(ids)
    }

    /// Find the best regular face of a family.
    pub fn query_family(&self, family: &str) -> Option<FontFaceId> {
        let families = [fontdb::Family::Name(family)];
        self.db.query(&fontdb::Query {
            families: &families,
            ..Default::default()
        })
    }

    /// Resolve a loaded face.
    pub fn face(&self, id: FontFaceId) -> TextResult<FontFace> {
        let (source, index) = self.db.face_source(id).ok_or(TextError::UnknownFace(id))?;
        let mut face = match source {
            fontdb::Source::Binary(data) => FontFace::from_shared(data, index)?,
            _ => {
                let (data, index) = self
                    .db
                    .with_face_data(id, |data, index| (data.to_vec(), index))
                    .ok_or(TextError::UnknownFace(id))?;
                FontFace::from_data(data, index)?
            }
        };
        face.id = Some(id);
        Ok(face)
    }

    /// Build a [`Font`] from a primary face and ordered fallbacks.
    pub fn font(&self, primary: FontFaceId, fallbacks: &[FontFaceId]) -> TextResult<Font> {
        let primary = self.face(primary)?;
        let fallbacks = fallbacks
            .iter()
            .map(|&id| self.face(id))
            .collect::<TextResult<Vec<_>>>()?;
        Ok(Font::with_fallbacks(primary, fallbacks))
    }

    /// Get the number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Check if a font family exists in the database.
    pub fn has_family(&self, family: &str) -> bool {
        self.db
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name == family))
    }

    /// Get all unique font family names in the database.
    pub fn family_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("face_count", &self.face_count())
            .finish()
    }
}
