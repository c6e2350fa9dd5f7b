//! Per-font memoization of glyph paths.

use std::collections::HashMap;

use crate::{
    charmap::CharMap,
    error::DrawError,
    path::build_path,
    pen::Path,
    source::{GlyphOutline, GlyphSource},
    transform::Transform,
    GlyphId,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum CacheState {
    Active,
    Disposed,
}

/// Lazily built glyph paths for a single font.
///
/// The first request for a glyph loads its outline from the source, builds
/// the path, applies the cache transform and stores the result. Later
/// requests return copies of the stored path.
///
/// The cache takes `&mut self` for lookups and does no locking. Keep one
/// instance per font per rendering session.
pub struct GlyphOutlineCache<S> {
    source: S,
    transform: Transform,
    paths: HashMap<GlyphId, Path>,
    state: CacheState,
}

impl<S: GlyphSource> GlyphOutlineCache<S> {
    /// Creates a cache producing paths in ems with the y axis pointing down.
    pub fn new(source: S) -> Self {
        let transform = Transform::em_normalize(source.units_per_em());
        Self::with_transform(source, transform)
    }

    /// Creates a cache that applies the given transform to every path.
    pub fn with_transform(source: S, transform: Transform) -> Self {
        Self {
            source,
            transform,
            paths: HashMap::new(),
            state: CacheState::Active,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Returns the number of glyphs in the underlying font.
    pub fn num_glyphs(&self) -> u32 {
        self.source.num_glyphs()
    }

    /// Returns the path for the given glyph.
    ///
    /// Glyphs without outline data, such as a space, produce an empty path.
    pub fn path_for_glyph_id(&mut self, glyph_id: GlyphId) -> Result<Path, DrawError> {
        if self.state == CacheState::Disposed {
            return Err(DrawError::Disposed);
        }
        if let Some(path) = self.paths.get(&glyph_id) {
            return Ok(path.clone());
        }
        if glyph_id.to_u32() >= self.source.num_glyphs() {
            log::debug!(
                "{glyph_id} is out of range for a font with {} glyphs",
                self.source.num_glyphs()
            );
            return Err(DrawError::GlyphNotFound(glyph_id));
        }
        let outline = self.source.outline(glyph_id).inspect_err(|e| {
            log::debug!("failed to load outline for {glyph_id}: {e}");
        })?;
        let mut path = match outline {
            GlyphOutline::Contours(points) => build_path(&points),
            GlyphOutline::Path(path) => path,
        };
        path.apply_transform(&self.transform);
        self.paths.insert(glyph_id, path.clone());
        Ok(path)
    }

    /// Returns the path for the glyph that `charmap` assigns to `code`.
    pub fn path_for_code(&mut self, code: u32, charmap: &impl CharMap) -> Result<Path, DrawError> {
        let Some(glyph_id) = charmap.map(code) else {
            log::debug!("no glyph for character code {code:#x}");
            return Err(DrawError::UnmappedCode(code));
        };
        self.path_for_glyph_id(glyph_id)
    }

    /// Returns true if a path for the glyph has already been built.
    pub fn contains(&self, glyph_id: GlyphId) -> bool {
        self.paths.contains_key(&glyph_id)
    }

    /// Returns the number of cached paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.state == CacheState::Disposed
    }

    /// Releases all cached paths.
    ///
    /// The cache answers every later query with [`DrawError::Disposed`].
    pub fn dispose(&mut self) {
        self.paths = HashMap::new();
        self.state = CacheState::Disposed;
    }
}

impl<S: GlyphSource + CharMap> GlyphOutlineCache<S> {
    /// Returns the path for a character code using the font's own
    /// character map.
    pub fn path_for_char(&mut self, code: u32) -> Result<Path, DrawError> {
        let Some(glyph_id) = self.source.map(code) else {
            log::debug!("no glyph for character code {code:#x}");
            return Err(DrawError::UnmappedCode(code));
        };
        self.path_for_glyph_id(glyph_id)
    }
}
