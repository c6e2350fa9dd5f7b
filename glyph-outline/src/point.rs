//! Points of a quadratic glyph contour.

/// One sample on a glyph contour, in font design units.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct ContourPoint {
    pub x: i32,
    pub y: i32,
    /// True if the point lies on the outline, false for a quadratic
    /// control point.
    pub on_curve: bool,
    /// True if this is the last point of its contour.
    pub end_of_contour: bool,
}

impl ContourPoint {
    pub const fn new(x: i32, y: i32, on_curve: bool, end_of_contour: bool) -> Self {
        Self {
            x,
            y,
            on_curve,
            end_of_contour,
        }
    }

    /// Convenience method to construct an on-curve point.
    pub const fn on_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, true, false)
    }

    /// Convenience method to construct an off-curve point.
    pub const fn off_curve(x: i32, y: i32) -> Self {
        Self::new(x, y, false, false)
    }

    /// Returns a copy of this point marked as the last point of its contour.
    pub const fn end_contour(self) -> Self {
        Self {
            end_of_contour: true,
            ..self
        }
    }

    /// Returns the implied on-curve point halfway between `self` and
    /// `other`.
    ///
    /// Coordinates are computed with [`midpoint`] so the result truncates
    /// toward `self`.
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(
            midpoint(self.x, other.x),
            midpoint(self.y, other.y),
            true,
            false,
        )
    }

    pub(crate) fn to_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

/// Integer midpoint of two coordinates: `a + (b - a) / 2` with truncating
/// division.
///
/// This is not the rounded average, so `midpoint(3, 10) == 6` while
/// `midpoint(10, 3) == 7`. Glyph shapes reproduce bit-exactly only with this
/// rule.
pub fn midpoint(a: i32, b: i32) -> i32 {
    let (a, b) = (a as i64, b as i64);
    // always lies between a and b so the narrowing is lossless
    (a + (b - a) / 2) as i32
}
