//! Mapping of character codes to glyph identifiers.
//!
//! The glyph outline machinery only deals in glyph ids. How a code from a
//! PDF text string becomes a glyph id depends on the kind of font, so the
//! lookup is a separate strategy supplied by whoever loaded the font.

use std::collections::BTreeMap;

use crate::GlyphId;

/// Resolves character codes to glyph identifiers.
pub trait CharMap {
    /// Maps a character code to a glyph identifier.
    ///
    /// Returns `None` if a mapping does not exist.
    fn map(&self, code: u32) -> Option<GlyphId>;
}

impl<T: CharMap + ?Sized> CharMap for &T {
    fn map(&self, code: u32) -> Option<GlyphId> {
        (**self).map(code)
    }
}

/// Code to glyph mappings that are built when a PDF font is loaded.
#[derive(Clone, Debug)]
pub enum CodeMap {
    /// The code is the glyph id, as for CID fonts with an `Identity`
    /// CIDToGIDMap.
    Identity,
    /// CID to glyph id table read from a CIDToGIDMap stream. Glyph id zero
    /// marks an unmapped CID.
    CidToGid(Vec<u16>),
    /// Explicit mapping for simple fonts, resolved from the font's encoding.
    Table(BTreeMap<u32, GlyphId>),
}

impl CodeMap {
    /// Parses the big-endian u16 pairs of a CIDToGIDMap stream.
    ///
    /// A trailing odd byte is ignored.
    pub fn from_cid_to_gid_stream(data: &[u8]) -> Self {
        Self::CidToGid(
            data.chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }
}

impl CharMap for CodeMap {
    fn map(&self, code: u32) -> Option<GlyphId> {
        match self {
            Self::Identity => Some(GlyphId::new(code)),
            Self::CidToGid(table) => table
                .get(code as usize)
                .copied()
                .filter(|gid| *gid != 0)
                .map(|gid| GlyphId::new(gid as u32)),
            Self::Table(table) => table.get(&code).copied(),
        }
    }
}

impl FromIterator<(u32, GlyphId)> for CodeMap {
    fn from_iter<I: IntoIterator<Item = (u32, GlyphId)>>(iter: I) -> Self {
        Self::Table(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        assert_eq!(CodeMap::Identity.map(0x1234), Some(GlyphId::new(0x1234)));
    }

    #[test]
    fn cid_to_gid_stream() {
        let map = CodeMap::from_cid_to_gid_stream(&[0, 0, 0, 7, 1, 2, 9]);
        assert_eq!(map.map(0), None);
        assert_eq!(map.map(1), Some(GlyphId::new(7)));
        assert_eq!(map.map(2), Some(GlyphId::new(0x102)));
        assert_eq!(map.map(3), None);
    }

    #[test]
    fn table() {
        let map: CodeMap = [(65, GlyphId::new(36)), (66, GlyphId::new(37))]
            .into_iter()
            .collect();
        assert_eq!(map.map(66), Some(GlyphId::new(37)));
        assert_eq!(map.map(67), None);
    }
}
