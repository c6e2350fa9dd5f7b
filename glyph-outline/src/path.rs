//! Quadratic contour to path conversion.

use core::fmt;

use crate::{
    pen::{OutlinePen, Path},
    point::ContourPoint,
};

/// Errors that can occur when converting contour points to a path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ToPathError {
    /// The points starting at this index were never terminated by an end of
    /// contour flag.
    UnterminatedContour(usize),
}

impl fmt::Display for ToPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnterminatedContour(ix) => write!(
                f,
                "Contour starting at point index {ix} has no end of contour point"
            ),
        }
    }
}

impl std::error::Error for ToPathError {}

/// Converts a glyph described by a sequence of contour points to path
/// commands and invokes the appropriate callback on the given pen for each.
///
/// Every complete contour is emitted as a `move_to`, a run of `line_to` and
/// `quad_to` commands, and a final `close`. Points following the last end
/// of contour flag are malformed; they are dropped after all complete
/// contours have been emitted and reported as an error.
pub fn to_path(points: &[ContourPoint], pen: &mut impl OutlinePen) -> Result<(), ToPathError> {
    let mut start_ix = 0;
    for (ix, point) in points.iter().enumerate() {
        if point.end_of_contour {
            contour_to_path(&points[start_ix..=ix], pen);
            start_ix = ix + 1;
        }
    }
    if start_ix < points.len() {
        return Err(ToPathError::UnterminatedContour(start_ix));
    }
    Ok(())
}

/// Builds a path from contour points, keeping whatever could be built when
/// the input is malformed.
///
/// A single broken glyph should not stop a page from rendering, so errors
/// are logged rather than returned. Use [`try_build_path`] to observe them.
pub fn build_path(points: &[ContourPoint]) -> Path {
    let mut path = Path::new();
    if let Err(e) = to_path(points, &mut path) {
        log::warn!("{e}; keeping {} contours", path.contour_count());
    }
    path
}

/// Builds a path from contour points, failing on malformed input.
pub fn try_build_path(points: &[ContourPoint]) -> Result<Path, ToPathError> {
    let mut path = Path::new();
    to_path(points, &mut path)?;
    Ok(path)
}

fn contour_to_path(contour: &[ContourPoint], pen: &mut impl OutlinePen) {
    match contour {
        [] => {}
        [point] => {
            let (x, y) = point.to_f32();
            pen.move_to(x, y);
            pen.close();
        }
        _ => ContourWalk::new(contour).run(pen),
    }
}

/// State for walking a single contour of at least two points.
///
/// The walk visits a logical ring of points: the starting point, the
/// remaining contour points from `first_ix` onward, then the off-curve
/// start point if the contour began off the curve. Indices at or past the
/// end of the ring wrap to the starting point, which is always on-curve.
struct ContourWalk<'a> {
    contour: &'a [ContourPoint],
    first_ix: usize,
    starting_point: ContourPoint,
    off_curve_start: Option<ContourPoint>,
}

impl<'a> ContourWalk<'a> {
    fn new(contour: &'a [ContourPoint]) -> Self {
        let (first, second) = (contour[0], contour[1]);
        let (first_ix, starting_point, off_curve_start) = match (first.on_curve, second.on_curve) {
            (true, _) => (1, first, None),
            // Two leading control points imply an anchor between them
            (false, false) => (1, first.midpoint(second), Some(first)),
            // Start at the first anchor and come back around through the
            // leading control point
            (false, true) => (2, second, Some(first)),
        };
        Self {
            contour,
            first_ix,
            starting_point: ContourPoint {
                on_curve: true,
                ..starting_point
            },
            off_curve_start,
        }
    }

    fn len(&self) -> usize {
        1 + (self.contour.len() - self.first_ix) + self.off_curve_start.is_some() as usize
    }

    fn point(&self, ix: usize) -> ContourPoint {
        if ix == 0 || ix >= self.len() {
            return self.starting_point;
        }
        self.contour
            .get(self.first_ix + ix - 1)
            .copied()
            .or(self.off_curve_start)
            .unwrap_or(self.starting_point)
    }

    fn run(self, pen: &mut impl OutlinePen) {
        let len = self.len();
        let (x, y) = self.starting_point.to_f32();
        pen.move_to(x, y);
        let mut ix = 0;
        while ix < len {
            let current = self.point(ix);
            let next1 = self.point(ix + 1);
            match (current.on_curve, next1.on_curve) {
                (true, true) => {
                    // Close draws the final edge back to the start
                    if ix + 1 < len {
                        let (x, y) = next1.to_f32();
                        pen.line_to(x, y);
                    }
                    ix += 1;
                }
                (true, false) => {
                    let next2 = self.point(ix + 2);
                    let end = if next2.on_curve {
                        next2
                    } else {
                        // next2 becomes the next control point
                        next1.midpoint(next2)
                    };
                    quad_to(pen, next1, end);
                    ix += 2;
                }
                (false, false) => {
                    quad_to(pen, current, current.midpoint(next1));
                    ix += 1;
                }
                (false, true) => {
                    quad_to(pen, current, next1);
                    ix += 1;
                }
            }
        }
        pen.close();
    }
}

fn quad_to(pen: &mut impl OutlinePen, control: ContourPoint, end: ContourPoint) {
    let (cx0, cy0) = control.to_f32();
    let (x, y) = end.to_f32();
    pen.quad_to(cx0, cy0, x, y);
}
