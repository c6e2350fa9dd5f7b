//! Providers of raw glyph outline data.

use crate::{error::DrawError, pen::Path, point::ContourPoint, GlyphId};

/// Outline data for a single glyph, in font design units.
#[derive(Clone, PartialEq, Debug)]
pub enum GlyphOutline {
    /// Quadratic contours that still need to be walked into a path.
    Contours(Vec<ContourPoint>),
    /// A path already built by a charstring interpreter (CFF, Type1).
    Path(Path),
}

impl GlyphOutline {
    /// Returns true if the glyph draws nothing, as for a space.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Contours(points) => points.is_empty(),
            Self::Path(path) => path.is_empty(),
        }
    }
}

impl Default for GlyphOutline {
    fn default() -> Self {
        Self::Contours(Vec::new())
    }
}

/// Supplies outline data from a font's glyph table.
///
/// Implementations wrap a font parser. Glyph ids are dense: every id below
/// [`num_glyphs`](Self::num_glyphs) is valid, although it may have an
/// empty outline.
pub trait GlyphSource {
    /// Returns the number of glyphs in the font.
    fn num_glyphs(&self) -> u32;

    /// Returns the scale denominator of outline coordinates.
    fn units_per_em(&self) -> u16;

    /// Returns the outline for the given glyph.
    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, DrawError>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn num_glyphs(&self) -> u32 {
        (**self).num_glyphs()
    }

    fn units_per_em(&self) -> u16 {
        (**self).units_per_em()
    }

    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, DrawError> {
        (**self).outline(glyph_id)
    }
}

/// Glyph source backed by outlines held in memory.
///
/// Useful for fonts whose outlines come out of a separate interpreter, such
/// as bare CFF or Type1 programs embedded in a PDF, and for synthetic fonts.
#[derive(Clone, Default, Debug)]
pub struct MemorySource {
    units_per_em: u16,
    glyphs: Vec<GlyphOutline>,
}

impl MemorySource {
    pub fn new(units_per_em: u16, glyphs: Vec<GlyphOutline>) -> Self {
        Self {
            units_per_em,
            glyphs,
        }
    }

    /// Appends a glyph and returns its identifier.
    pub fn push(&mut self, outline: GlyphOutline) -> GlyphId {
        self.glyphs.push(outline);
        GlyphId::new(self.glyphs.len() as u32 - 1)
    }
}

impl GlyphSource for MemorySource {
    fn num_glyphs(&self) -> u32 {
        self.glyphs.len() as u32
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, DrawError> {
        self.glyphs
            .get(glyph_id.to_u32() as usize)
            .cloned()
            .ok_or(DrawError::GlyphNotFound(glyph_id))
    }
}
