//! Contour points from TrueType `glyf` outlines.

use read_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{Anchor, CompositeGlyph, Glyf, Glyph, SimpleGlyph},
        loca::Loca,
    },
    TableProvider,
};

use crate::{
    charmap::CharMap,
    error::DrawError,
    point::ContourPoint,
    source::{GlyphOutline, GlyphSource},
    transform::Transform,
    GlyphId, GLYF_COMPOSITE_RECURSION_LIMIT,
};

/// Glyph source for fonts with TrueType outlines.
///
/// Simple glyphs yield their points unchanged. Composite glyphs are
/// flattened into a single point list by placing each component with its
/// offset and 2x2 matrix, rounded back to design units.
#[derive(Clone)]
pub struct TrueTypeSource<'a> {
    glyf: Glyf<'a>,
    loca: Loca<'a>,
    cmap: Option<Cmap<'a>>,
    units_per_em: u16,
    glyph_count: u32,
}

impl<'a> TrueTypeSource<'a> {
    /// Creates a new glyph source for the given font.
    ///
    /// Fails if any of the `head`, `maxp`, `loca` or `glyf` tables are
    /// missing or malformed. A missing `cmap` only disables character
    /// mapping.
    pub fn new(font: &impl TableProvider<'a>) -> Result<Self, DrawError> {
        let units_per_em = font.head()?.units_per_em();
        let glyph_count = font.maxp()?.num_glyphs() as u32;
        let loca = font.loca(None)?;
        let glyf = font.glyf()?;
        let cmap = font.cmap().ok();
        if cmap.is_none() {
            log::debug!("font has no usable cmap table");
        }
        Ok(Self {
            glyph_count: glyph_count.min(loca.len() as u32),
            glyf,
            loca,
            cmap,
            units_per_em,
        })
    }

    fn load(
        &self,
        glyph_id: GlyphId,
        depth: usize,
        points: &mut Vec<ContourPoint>,
    ) -> Result<(), DrawError> {
        if depth > GLYF_COMPOSITE_RECURSION_LIMIT {
            return Err(DrawError::RecursionLimitExceeded(glyph_id));
        }
        match self.loca.get_glyf(glyph_id, &self.glyf)? {
            None => {}
            Some(Glyph::Simple(simple)) => push_simple_points(&simple, points),
            Some(Glyph::Composite(composite)) => {
                self.load_composite(&composite, depth, points)?
            }
        }
        Ok(())
    }

    fn load_composite(
        &self,
        composite: &CompositeGlyph,
        depth: usize,
        points: &mut Vec<ContourPoint>,
    ) -> Result<(), DrawError> {
        let mut component_points = Vec::new();
        for component in composite.components() {
            let component_id = GlyphId::from(component.glyph);
            let (dx, dy) = match component.anchor {
                Anchor::Offset { x, y } => (x as f32, y as f32),
                Anchor::Point { .. } => {
                    log::warn!("skipping point anchored component {component_id}");
                    continue;
                }
            };
            component_points.clear();
            match self.load(component_id, depth + 1, &mut component_points) {
                Ok(()) => {}
                Err(e @ DrawError::RecursionLimitExceeded(_)) => return Err(e),
                Err(e) => {
                    log::warn!("skipping component {component_id}: {e}");
                    continue;
                }
            }
            let matrix = &component.transform;
            let placement = Transform {
                xx: matrix.xx.to_f32(),
                yx: matrix.yx.to_f32(),
                xy: matrix.xy.to_f32(),
                yy: matrix.yy.to_f32(),
                dx,
                dy,
            };
            place_component(&component_points, &placement, points);
        }
        Ok(())
    }
}

fn push_simple_points(glyph: &SimpleGlyph, points: &mut Vec<ContourPoint>) {
    let mut end_points = glyph
        .end_pts_of_contours()
        .iter()
        .map(|end| end.get() as usize)
        .peekable();
    for (ix, point) in glyph.points().enumerate() {
        // skip end points that are out of order
        while end_points.next_if(|end| *end < ix).is_some() {}
        let end_of_contour = end_points.next_if_eq(&ix).is_some();
        points.push(ContourPoint::new(
            point.x as i32,
            point.y as i32,
            point.on_curve,
            end_of_contour,
        ));
    }
}

fn place_component(
    component: &[ContourPoint],
    placement: &Transform,
    points: &mut Vec<ContourPoint>,
) {
    points.extend(component.iter().map(|point| {
        let (x, y) = placement.map_point(point.x as f32, point.y as f32);
        ContourPoint {
            x: x.round() as i32,
            y: y.round() as i32,
            ..*point
        }
    }));
}

impl GlyphSource for TrueTypeSource<'_> {
    fn num_glyphs(&self) -> u32 {
        self.glyph_count
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, DrawError> {
        if glyph_id.to_u32() >= self.glyph_count {
            return Err(DrawError::GlyphNotFound(glyph_id));
        }
        let mut points = Vec::new();
        self.load(glyph_id, 0, &mut points)?;
        Ok(GlyphOutline::Contours(points))
    }
}

impl CharMap for TrueTypeSource<'_> {
    fn map(&self, code: u32) -> Option<GlyphId> {
        let cmap = self.cmap.as_ref()?;
        let lookup = |code: u32| cmap.map_codepoint(code).filter(|gid| gid.to_u32() != 0);
        // Symbolic fonts put single byte codes in the 0xF000 private use page
        lookup(code).or_else(|| (code <= 0xFF).then(|| lookup(0xF000 | code)).flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path::try_build_path, pen::SvgPen, GlyphOutlineCache};
    use pretty_assertions::assert_eq;
    use read_fonts::FontRef;

    fn be16(data: &mut Vec<u8>, value: u16) {
        data.extend_from_slice(&value.to_be_bytes());
    }

    fn glyph_header(data: &mut Vec<u8>, contours: i16, bbox: [i16; 4]) {
        be16(data, contours as u16);
        for v in bbox {
            be16(data, v as u16);
        }
    }

    /// Assembles an sfnt from tables that are already sorted by tag.
    fn sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0x00010000u32.to_be_bytes());
        be16(&mut data, tables.len() as u16);
        // search range, entry selector, range shift
        data.extend_from_slice(&[0; 6]);
        let mut offset = 12 + 16 * tables.len();
        for (tag, table) in tables {
            data.extend_from_slice(&tag[..]);
            data.extend_from_slice(&0u32.to_be_bytes());
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(table.len() as u32).to_be_bytes());
            offset += table.len().next_multiple_of(4);
        }
        for (_, table) in tables {
            data.extend_from_slice(table);
            data.resize(data.len().next_multiple_of(4), 0);
        }
        data
    }

    fn square_glyph(glyf: &mut Vec<u8>) {
        glyph_header(glyf, 1, [0, 0, 100, 100]);
        be16(glyf, 3);
        be16(glyf, 0);
        glyf.extend_from_slice(&[0x01; 4]);
        for dx in [0i16, 100, 0, -100] {
            be16(glyf, dx as u16);
        }
        for dy in [0i16, 0, 100, 0] {
            be16(glyf, dy as u16);
        }
    }

    /// Appends one composite component with word sized xy offsets.
    fn component(glyf: &mut Vec<u8>, gid: u16, offset: (i16, i16), more: bool) {
        // ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES, plus MORE_COMPONENTS
        be16(glyf, if more { 0x0023 } else { 0x0003 });
        be16(glyf, gid);
        be16(glyf, offset.0 as u16);
        be16(glyf, offset.1 as u16);
    }

    /// Builds a font with a 1000 unit em from glyph data. Glyph 0 is an
    /// empty .notdef; every glyph must have an even length.
    fn font_with_glyphs(glyphs: &[Vec<u8>]) -> Vec<u8> {
        let mut glyf = Vec::new();
        let mut loca = Vec::new();
        be16(&mut loca, 0);
        be16(&mut loca, 0);
        for glyph in glyphs {
            glyf.extend_from_slice(glyph);
            be16(&mut loca, (glyf.len() / 2) as u16);
        }

        let mut head = vec![0u8; 54];
        head[0..2].copy_from_slice(&1u16.to_be_bytes());
        head[12..16].copy_from_slice(&0x5F0F3CF5u32.to_be_bytes());
        head[18..20].copy_from_slice(&1000u16.to_be_bytes());

        let mut maxp = Vec::new();
        maxp.extend_from_slice(&0x00005000u32.to_be_bytes());
        be16(&mut maxp, glyphs.len() as u16 + 1);

        sfnt(&[
            (b"glyf", glyf),
            (b"head", head),
            (b"loca", loca),
            (b"maxp", maxp),
        ])
    }

    /// Font with four glyphs: an empty .notdef, a square, a curved
    /// triangle and a composite that shifts the square by (10, 20).
    fn test_font() -> Vec<u8> {
        let mut square = Vec::new();
        square_glyph(&mut square);

        let mut triangle = Vec::new();
        glyph_header(&mut triangle, 1, [0, 0, 100, 100]);
        be16(&mut triangle, 2);
        be16(&mut triangle, 0);
        triangle.extend_from_slice(&[0x01, 0x00, 0x01]);
        for dx in [0i16, 50, 50] {
            be16(&mut triangle, dx as u16);
        }
        for dy in [0i16, 100, -100] {
            be16(&mut triangle, dy as u16);
        }
        triangle.push(0);

        let mut composite = Vec::new();
        glyph_header(&mut composite, -1, [10, 20, 110, 120]);
        component(&mut composite, 1, (10, 20), false);

        font_with_glyphs(&[square, triangle, composite])
    }

    fn contours(source: &TrueTypeSource, gid: u32) -> Vec<ContourPoint> {
        match source.outline(GlyphId::new(gid)).unwrap() {
            GlyphOutline::Contours(points) => points,
            GlyphOutline::Path(_) => panic!("expected contour points"),
        }
    }

    #[test]
    fn simple_glyph_points() {
        let data = test_font();
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        assert_eq!(source.num_glyphs(), 4);
        assert_eq!(source.units_per_em(), 1000);
        assert!(contours(&source, 0).is_empty());
        assert_eq!(
            contours(&source, 1),
            [
                ContourPoint::on_curve(0, 0),
                ContourPoint::on_curve(100, 0),
                ContourPoint::on_curve(100, 100),
                ContourPoint::on_curve(0, 100).end_contour(),
            ]
        );
        let triangle = try_build_path(&contours(&source, 2)).unwrap();
        assert_eq!(triangle.to_svg(), "M0,0 Q50,100 100,0 Z");
    }

    #[test]
    fn composite_glyph_is_flattened() {
        let data = test_font();
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        assert_eq!(
            contours(&source, 3),
            [
                ContourPoint::on_curve(10, 20),
                ContourPoint::on_curve(110, 20),
                ContourPoint::on_curve(110, 120),
                ContourPoint::on_curve(10, 120).end_contour(),
            ]
        );
    }

    #[test]
    fn out_of_range_glyph() {
        let data = test_font();
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        assert!(matches!(
            source.outline(GlyphId::new(4)),
            Err(DrawError::GlyphNotFound(gid)) if gid == GlyphId::new(4)
        ));
    }

    #[test]
    fn missing_cmap_maps_nothing() {
        let data = test_font();
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        assert_eq!(source.map(b'A' as u32), None);
    }

    #[test]
    fn cached_paths_from_font() {
        let data = test_font();
        let font = FontRef::new(&data).unwrap();
        let mut cache = GlyphOutlineCache::new(TrueTypeSource::new(&font).unwrap());
        let path = cache.path_for_glyph_id(GlyphId::new(2)).unwrap();
        let mut pen = SvgPen::with_precision(2);
        path.draw(&mut pen);
        assert_eq!(pen.to_string(), "M0.00,0.00 Q0.05,-0.10 0.10,0.00 Z");
    }

    #[test]
    fn missing_tables() {
        let data = sfnt(&[]);
        let font = FontRef::new(&data).unwrap();
        assert!(matches!(
            TrueTypeSource::new(&font),
            Err(DrawError::Read(_))
        ));
    }

    #[test]
    fn component_placement_rounds() {
        let component = [
            ContourPoint::on_curve(10, 10),
            ContourPoint::off_curve(-3, 5).end_contour(),
        ];
        let placement = Transform {
            xx: 0.5,
            yx: 0.0,
            xy: 0.0,
            yy: -1.5,
            dx: 100.0,
            dy: 0.0,
        };
        let mut points = vec![ContourPoint::on_curve(0, 0).end_contour()];
        place_component(&component, &placement, &mut points);
        assert_eq!(
            points,
            [
                ContourPoint::on_curve(0, 0).end_contour(),
                ContourPoint::on_curve(105, -15),
                ContourPoint::off_curve(99, -8).end_contour(),
            ]
        );
    }

    #[test]
    fn self_referencing_composite_hits_recursion_limit() {
        let mut square = Vec::new();
        square_glyph(&mut square);
        let mut cycle = Vec::new();
        glyph_header(&mut cycle, -1, [0, 0, 100, 100]);
        component(&mut cycle, 2, (0, 0), false);
        let data = font_with_glyphs(&[square, cycle]);
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        let err = source.outline(GlyphId::new(2)).unwrap_err();
        assert!(matches!(err, DrawError::RecursionLimitExceeded(gid) if gid == GlyphId::new(2)));
        assert!(err.to_string().contains("Recursion limit (32)"), "{err}");
    }

    #[test]
    fn unreadable_component_is_skipped() {
        let mut square = Vec::new();
        square_glyph(&mut square);
        let mut composite = Vec::new();
        glyph_header(&mut composite, -1, [5, 5, 105, 105]);
        // glyph 9 is past the end of loca
        component(&mut composite, 9, (0, 0), true);
        component(&mut composite, 1, (5, 5), false);
        let data = font_with_glyphs(&[square, composite]);
        let font = FontRef::new(&data).unwrap();
        let source = TrueTypeSource::new(&font).unwrap();
        assert_eq!(
            contours(&source, 2),
            [
                ContourPoint::on_curve(5, 5),
                ContourPoint::on_curve(105, 5),
                ContourPoint::on_curve(105, 105),
                ContourPoint::on_curve(5, 105).end_contour(),
            ]
        );
    }
}
