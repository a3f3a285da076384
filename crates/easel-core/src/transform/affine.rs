//! 2D affine transforms in the canvas convention.
//!
//! A transform maps `(x, y)` to:
//!
//! ```text
//! x' = a * x + c * y + e
//! y' = b * x + d * y + f
//! ```
//!
//! The builder methods post-multiply, like the calls on a 2D drawing
//! context: `Affine::IDENTITY.translate(..).rotate(..)` rotates first and
//! translates second when applied to a point.

use super::geometry::sin_cos_degrees;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Rotation by `degrees`, clockwise on screen (y axis pointing down).
    pub fn rotation_degrees(degrees: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// `self * other`: applies `other` first, then `self`.
    pub fn multiply(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(self, tx: f64, ty: f64) -> Affine {
        self.multiply(&Affine::translation(tx, ty))
    }

    pub fn rotate(self, degrees: f64) -> Affine {
        self.multiply(&Affine::rotation_degrees(degrees))
    }

    pub fn scale(self, sx: f64, sy: f64) -> Affine {
        self.multiply(&Affine::scaling(sx, sy))
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity() {
        assert_eq!(Affine::default().apply(3.0, -4.0), (3.0, -4.0));
    }

    #[test]
    fn test_translate() {
        assert_eq!(Affine::IDENTITY.translate(2.0, 5.0).apply(1.0, 1.0), (3.0, 6.0));
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        // +x axis points right, +y points down; a clockwise turn takes
        // "right" to "down".
        assert_eq!(Affine::rotation_degrees(90.0).apply(1.0, 0.0), (0.0, 1.0));
        assert_eq!(Affine::rotation_degrees(90.0).apply(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn test_builder_applies_last_call_first() {
        // translate then scale: the point is scaled, then translated
        let m = Affine::IDENTITY.translate(10.0, 0.0).scale(2.0, 2.0);
        assert_eq!(m.apply(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn test_mirror() {
        assert_eq!(Affine::scaling(-1.0, 1.0).apply(3.0, 4.0), (-3.0, 4.0));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Affine::IDENTITY
            .translate(75.0, 100.0)
            .rotate(33.0)
            .scale(-1.0, 1.0)
            .translate(-100.0, -75.0);
        let inv = m.invert().unwrap();
        let (x, y) = m.apply(12.5, 40.25);
        assert_point(inv.apply(x, y), (12.5, 40.25));
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Affine::scaling(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn test_rotation_preserves_area() {
        let m = Affine::rotation_degrees(17.0).scale(-1.0, -1.0);
        assert!((m.determinant() - 1.0).abs() < 1e-12);
    }
}
