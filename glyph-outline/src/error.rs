//! Error types associated with glyph outlines.

use thiserror::Error;

use read_fonts::ReadError;

use crate::{path::ToPathError, GlyphId, GLYF_COMPOSITE_RECURSION_LIMIT};

/// Errors that may occur when loading glyph outlines.
///
/// None of these are fatal for a page: callers are expected to skip the
/// glyph and continue drawing.
#[derive(Clone, Debug, Error)]
pub enum DrawError {
    /// The requested glyph was not present in the font.
    #[error("Glyph {0} was not found in the given font")]
    GlyphNotFound(GlyphId),
    /// No glyph is mapped to the character code.
    #[error("No glyph is mapped to character code {0:#x}")]
    UnmappedCode(u32),
    /// The cache was disposed together with its font.
    #[error("The outline cache has been disposed")]
    Disposed,
    /// Exceeded a recursion limit when loading a composite glyph.
    #[error(
        "Recursion limit ({limit}) exceeded when loading composite component {0}",
        limit = GLYF_COMPOSITE_RECURSION_LIMIT
    )]
    RecursionLimitExceeded(GlyphId),
    /// Conversion from contour points to path failed.
    #[error(transparent)]
    ToPath(#[from] ToPathError),
    /// Error occurred when reading font data.
    #[error("Error reading font data: {0}")]
    Read(#[from] ReadError),
}
