//! Types for collecting the output when drawing a glyph outline.

use core::fmt::{self, Write};

use crate::transform::Transform;

/// Interface for accepting a sequence of path commands.
pub trait OutlinePen {
    /// Emit a command to begin a new subpath at (x, y).
    fn move_to(&mut self, x: f32, y: f32);

    /// Emit a line segment from the current point to (x, y).
    fn line_to(&mut self, x: f32, y: f32);

    /// Emit a quadratic bezier segment from the current point with a control
    /// point at (cx0, cy0) and ending at (x, y).
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32);

    /// Emit a cubic bezier segment from the current point with control
    /// points at (cx0, cy0) and (cx1, cy1) and ending at (x, y).
    ///
    /// Contour points never produce cubics; this exists for ready-made
    /// paths coming from PostScript charstrings.
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);

    /// Emit a command to close the current subpath.
    fn close(&mut self);
}

/// Single element of a path.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathElement {
    /// Begin a new subpath at (x, y).
    MoveTo { x: f32, y: f32 },
    /// Draw a line from the current point to (x, y).
    LineTo { x: f32, y: f32 },
    /// Draw a quadratic bezier from the current point with a control point at
    /// (cx0, cy0) and ending at (x, y).
    QuadTo { cx0: f32, cy0: f32, x: f32, y: f32 },
    /// Draw a cubic bezier from the current point with control points at
    /// (cx0, cy0) and (cx1, cy1) and ending at (x, y).
    CurveTo {
        cx0: f32,
        cy0: f32,
        cx1: f32,
        cy1: f32,
        x: f32,
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

impl PathElement {
    /// Returns the end point of the segment, if it has one.
    pub fn end_point(&self) -> Option<(f32, f32)> {
        match *self {
            Self::MoveTo { x, y }
            | Self::LineTo { x, y }
            | Self::QuadTo { x, y, .. }
            | Self::CurveTo { x, y, .. } => Some((x, y)),
            Self::Close => None,
        }
    }

    fn transformed(self, t: &Transform) -> Self {
        match self {
            Self::MoveTo { x, y } => {
                let (x, y) = t.map_point(x, y);
                Self::MoveTo { x, y }
            }
            Self::LineTo { x, y } => {
                let (x, y) = t.map_point(x, y);
                Self::LineTo { x, y }
            }
            Self::QuadTo { cx0, cy0, x, y } => {
                let (cx0, cy0) = t.map_point(cx0, cy0);
                let (x, y) = t.map_point(x, y);
                Self::QuadTo { cx0, cy0, x, y }
            }
            Self::CurveTo {
                cx0,
                cy0,
                cx1,
                cy1,
                x,
                y,
            } => {
                let (cx0, cy0) = t.map_point(cx0, cy0);
                let (cx1, cy1) = t.map_point(cx1, cy1);
                let (x, y) = t.map_point(x, y);
                Self::CurveTo {
                    cx0,
                    cy0,
                    cx1,
                    cy1,
                    x,
                    y,
                }
            }
            Self::Close => Self::Close,
        }
    }
}

/// A reconstructed glyph outline.
///
/// Paths handed out by [`GlyphOutlineCache`](crate::GlyphOutlineCache) are
/// copies; transforming one never touches the cached original.
#[derive(Clone, Default, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of subpaths.
    pub fn contour_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|el| matches!(el, PathElement::MoveTo { .. }))
            .count()
    }

    /// Applies the transform to every point of the path in place.
    pub fn apply_transform(&mut self, transform: &Transform) {
        if transform.is_identity() {
            return;
        }
        for el in &mut self.elements {
            *el = el.transformed(transform);
        }
    }

    /// Returns a transformed copy of the path.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let mut path = self.clone();
        path.apply_transform(transform);
        path
    }

    /// Replays the path into the given pen.
    pub fn draw(&self, pen: &mut impl OutlinePen) {
        for el in &self.elements {
            match *el {
                PathElement::MoveTo { x, y } => pen.move_to(x, y),
                PathElement::LineTo { x, y } => pen.line_to(x, y),
                PathElement::QuadTo { cx0, cy0, x, y } => pen.quad_to(cx0, cy0, x, y),
                PathElement::CurveTo {
                    cx0,
                    cy0,
                    cx1,
                    cy1,
                    x,
                    y,
                } => pen.curve_to(cx0, cy0, cx1, cy1, x, y),
                PathElement::Close => pen.close(),
            }
        }
    }

    /// Returns SVG path data for the path.
    pub fn to_svg(&self) -> String {
        let mut pen = SvgPen::new();
        self.draw(&mut pen);
        pen.into()
    }

    /// Converts the path to a [`kurbo::BezPath`].
    #[cfg(feature = "kurbo")]
    pub fn to_bez_path(&self) -> kurbo::BezPath {
        let mut bez = kurbo::BezPath::new();
        self.draw(&mut bez);
        bez
    }
}

impl OutlinePen for Path {
    fn move_to(&mut self, x: f32, y: f32) {
        self.elements.push(PathElement::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.elements.push(PathElement::LineTo { x, y })
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.elements.push(PathElement::QuadTo { cx0, cy0, x, y })
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.elements.push(PathElement::CurveTo {
            cx0,
            cy0,
            cx1,
            cy1,
            x,
            y,
        })
    }

    fn close(&mut self) {
        self.elements.push(PathElement::Close)
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = core::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(feature = "kurbo")]
impl OutlinePen for kurbo::BezPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.move_to((x as f64, y as f64))
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.line_to((x as f64, y as f64))
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64))
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        )
    }

    fn close(&mut self) {
        self.close_path()
    }
}

/// Pen that drops all drawing output into the ether.
pub struct NullPen;

impl OutlinePen for NullPen {
    fn move_to(&mut self, _x: f32, _y: f32) {}
    fn line_to(&mut self, _x: f32, _y: f32) {}
    fn quad_to(&mut self, _cx0: f32, _cy0: f32, _x: f32, _y: f32) {}
    fn curve_to(&mut self, _cx0: f32, _cy0: f32, _cx1: f32, _cy1: f32, _x: f32, _y: f32) {}
    fn close(&mut self) {}
}

/// Pen that generates SVG style path data.
#[derive(Clone, Default, Debug)]
pub struct SvgPen {
    data: String,
    precision: Option<usize>,
}

impl SvgPen {
    /// Creates a new SVG pen that formats floating point values with the
    /// standard behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new SVG pen with the given precision (the number of digits
    /// that will be printed after the decimal).
    pub fn with_precision(precision: usize) -> Self {
        Self {
            data: String::new(),
            precision: Some(precision),
        }
    }

    /// Clears the content of the internal string.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn command(&mut self, cmd: char, coords: &[f32]) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(cmd);
        for (i, pair) in coords.chunks(2).enumerate() {
            if i > 0 {
                self.data.push(' ');
            }
            let (x, y) = (pair[0], pair[1]);
            let _ = match self.precision {
                Some(prec) => write!(self.data, "{x:.prec$},{y:.prec$}"),
                None => write!(self.data, "{x},{y}"),
            };
        }
    }
}

impl OutlinePen for SvgPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.command('M', &[x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.command('L', &[x, y]);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.command('Q', &[cx0, cy0, x, y]);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.command('C', &[cx0, cy0, cx1, cy1, x, y]);
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }
}

impl AsRef<str> for SvgPen {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

impl From<SvgPen> for String {
    fn from(value: SvgPen) -> Self {
        value.data
    }
}

impl fmt::Display for SvgPen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
