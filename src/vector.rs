use crate::float_types::Real;
use nalgebra::{Point3, Vector3};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// A four component vector of doubles, used as a homogeneous 3D point or direction.
///
/// Points carry `w = 1`, see [`Vector4::point`]. Equality (`==`) is exact and
/// componentwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

impl Vector4 {
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// All four components zero. Note that `w` is zero as well, so this is not a point.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// A 3D point in homogeneous form (`w = 1`).
    pub const fn point(x: Real, y: Real, z: Real) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// True only if every component is strictly greater than the matching one in `other`.
    pub fn greater_than(&self, other: &Vector4) -> bool {
        self.x > other.x && self.y > other.y && self.z > other.z && self.w > other.w
    }

    /// True only if every component is strictly less than the matching one in `other`.
    pub fn less_than(&self, other: &Vector4) -> bool {
        self.x < other.x && self.y < other.y && self.z < other.z && self.w < other.w
    }

    /// [`Vector4::greater_than`] restricted to `x`, `y` and `z`.
    pub fn xyz_greater_than(&self, other: &Vector4) -> bool {
        self.x > other.x && self.y > other.y && self.z > other.z
    }

    /// [`Vector4::less_than`] restricted to `x`, `y` and `z`.
    pub fn xyz_less_than(&self, other: &Vector4) -> bool {
        self.x < other.x && self.y < other.y && self.z < other.z
    }

    /// Exact equality of `x`, `y` and `z`, ignoring `w`.
    pub fn xyz_equals(&self, other: &Vector4) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    pub fn dot(&self, other: &Vector4) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// 3D cross product. Both `w` components are ignored and the result has `w = 1`.
    pub fn cross(&self, other: &Vector4) -> Vector4 {
        Vector4::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
            1.0,
        )
    }

    /// Drop `w`.
    pub fn truncate(&self) -> Vector3<Real> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Add for Vector4 {
    type Output = Vector4;

    fn add(self, rhs: Vector4) -> Vector4 {
        Vector4::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vector4 {
    type Output = Vector4;

    fn sub(self, rhs: Vector4) -> Vector4 {
        Vector4::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<Real> for Vector4 {
    type Output = Vector4;

    fn mul(self, rhs: Real) -> Vector4 {
        Vector4::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Div<Real> for Vector4 {
    type Output = Vector4;

    fn div(self, rhs: Real) -> Vector4 {
        Vector4::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Vector4) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector4 {
    fn sub_assign(&mut self, rhs: Vector4) {
        *self = *self - rhs;
    }
}

impl MulAssign<Real> for Vector4 {
    fn mul_assign(&mut self, rhs: Real) {
        *self = *self * rhs;
    }
}

impl DivAssign<Real> for Vector4 {
    fn div_assign(&mut self, rhs: Real) {
        *self = *self / rhs;
    }
}

impl From<Point3<Real>> for Vector4 {
    fn from(p: Point3<Real>) -> Self {
        Vector4::point(p.x, p.y, p.z)
    }
}

/// Directions map to `w = 0`.
impl From<Vector3<Real>> for Vector4 {
    fn from(v: Vector3<Real>) -> Self {
        Vector4::new(v.x, v.y, v.z, 0.0)
    }
}

impl From<Vector4> for Point3<Real> {
    fn from(v: Vector4) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}
