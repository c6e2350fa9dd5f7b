//! Contains a [`Transform`] object holding values of an affine transformation matrix.

/// A transformation applied to a finished glyph path.
///
/// Factors are specified in column-order, meaning that
/// for a vector `(x,y)` the transformed position `x'` of the vector
/// is calculated by
/// `x' = xx * x + xy * y + dx`,
/// and the transformed position y' is calculated by
/// `y' = yx * x + yy * y + dy`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub xx: f32,
    pub yx: f32,
    pub xy: f32,
    pub yy: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            xx: sx,
            yx: 0.0,
            xy: 0.0,
            yy: sy,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    /// Maps font design units to ems with the y axis pointing down.
    ///
    /// A zero `units_per_em` is treated as 1000, the PostScript default.
    pub fn em_normalize(units_per_em: u16) -> Self {
        let upem = if units_per_em == 0 {
            1000.0
        } else {
            units_per_em as f32
        };
        Self::scale(1.0 / upem, -1.0 / upem)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns the transform that applies `self` first and then `next`.
    pub fn then(&self, next: &Transform) -> Self {
        Self {
            xx: next.xx * self.xx + next.xy * self.yx,
            yx: next.yx * self.xx + next.yy * self.yx,
            xy: next.xx * self.xy + next.xy * self.yy,
            yy: next.yx * self.xy + next.yy * self.yy,
            dx: next.xx * self.dx + next.xy * self.dy + next.dx,
            dy: next.yx * self.dx + next.yy * self.dy + next.dy,
        }
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        // translation last so that a flipped zero comes out as +0.0
        (
            self.xx * x + self.xy * y + self.dx,
            self.yx * x + self.yy * y + self.dy,
        )
    }
}
