use crate::float_types::Real;
use nalgebra::UnitQuaternion;

/// Scalar-first quaternion `a + bi + cj + dk`.
///
/// Only used as an orientation when building transforms. Nothing here
/// normalises; callers pass unit quaternions.
#[derive(Debug, Clone, Copy)]
pub struct Quaternion {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    pub d: Real,
}

impl Quaternion {
    pub const fn new(a: Real, b: Real, c: Real, d: Real) -> Self {
        Self { a, b, c, d }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<UnitQuaternion<Real>> for Quaternion {
    fn from(q: UnitQuaternion<Real>) -> Self {
        Quaternion::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Quaternion> for nalgebra::Quaternion<Real> {
    fn from(q: Quaternion) -> Self {
        nalgebra::Quaternion::new(q.a, q.b, q.c, q.d)
    }
}
