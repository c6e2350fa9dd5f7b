//! Glyph outline reconstruction for PDF text rendering.
//!
//! Fonts embedded in PDF documents describe glyph shapes as contours of
//! quadratic splines: a circular sequence of points per contour where each
//! point is either on the curve or an off-curve control point. This crate
//! turns that point stream into a closed vector [`Path`] and memoizes the
//! result per glyph so that text painting only pays for reconstruction once
//! per unique glyph.
//!
//! The pieces are:
//!
//! * [`build_path`] and friends: the contour walk. A pure function of the
//!   input points.
//! * [`GlyphOutlineCache`]: per-font memoization of built paths, with the
//!   design unit to em transform applied.
//! * [`GlyphSource`] and [`CharMap`]: the seams where font parsers and
//!   character code mappings plug in. [`TrueTypeSource`] adapts a TrueType
//!   font parsed by [`read-fonts`](https://crates.io/crates/read-fonts).
//!
//! ## Example
//!
//! ```
//! use glyph_outline::{ContourPoint, GlyphOutline, GlyphOutlineCache, GlyphId, MemorySource};
//!
//! let square = vec![
//!     ContourPoint::on_curve(0, 0),
//!     ContourPoint::on_curve(1000, 0),
//!     ContourPoint::on_curve(1000, 1000),
//!     ContourPoint::on_curve(0, 1000).end_contour(),
//! ];
//! let source = MemorySource::new(1000, vec![GlyphOutline::Contours(square)]);
//! let mut cache = GlyphOutlineCache::new(source);
//! let path = cache.path_for_glyph_id(GlyphId::new(0)).unwrap();
//! assert_eq!(path.to_svg(), "M0,0 L1,0 L1,-1 L0,-1 Z");
//! ```

#![forbid(unsafe_code)]

/// Expose our "raw" underlying parser crate.
pub extern crate read_fonts as raw;

mod cache;
mod charmap;
mod error;
mod glyf;
mod path;
mod pen;
mod point;
mod source;
mod transform;

pub use cache::GlyphOutlineCache;
pub use charmap::{CharMap, CodeMap};
pub use error::DrawError;
pub use glyf::TrueTypeSource;
pub use path::{build_path, to_path, try_build_path, ToPathError};
pub use pen::{NullPen, OutlinePen, Path, PathElement, SvgPen};
pub use point::{midpoint, ContourPoint};
pub use source::{GlyphOutline, GlyphSource, MemorySource};
pub use transform::Transform;

/// Type for a glyph identifier.
pub type GlyphId = read_fonts::types::GlyphId;

/// Limit for recursion when loading TrueType composite glyphs.
const GLYF_COMPOSITE_RECURSION_LIMIT: usize = 32;
