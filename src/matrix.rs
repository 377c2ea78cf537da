use crate::errors::{CsgError, CsgResult};
use crate::float_types::Real;
use crate::quaternion::Quaternion;
use crate::vector::Vector4;
use nalgebra::{Isometry3, Matrix4};
use std::ops::{Index, IndexMut, Mul};

/// A 4x4 transform stored column major: `data[column][row]`.
///
/// Indexing with `m[j]` yields storage column `j`, so `m[3]` is the
/// translation column and `m[j][3]` is the homogeneous row. Products treat
/// vectors as columns (`M * v`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Matrix4x4 {
    data: [[Real; 4]; 4],
}

impl Matrix4x4 {
    pub const fn zero() -> Self {
        Self { data: [[0.0; 4]; 4] }
    }

    pub const fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rigid transform from a position and a unit orientation.
    ///
    /// The rotation block comes from the usual quaternion to matrix
    /// expansion; `position` is copied verbatim (including `w`) into the
    /// translation column, so pass a point with `w = 1`.
    pub fn from_pose(position: Vector4, orientation: Quaternion) -> Self {
        let Quaternion { a, b, c, d } = orientation;

        Self {
            data: [
                [
                    1.0 - 2.0 * c * c - 2.0 * d * d,
                    2.0 * b * c + 2.0 * d * a,
                    2.0 * b * d - 2.0 * c * a,
                    0.0,
                ],
                [
                    2.0 * b * c - 2.0 * d * a,
                    1.0 - 2.0 * b * b - 2.0 * d * d,
                    2.0 * c * d + 2.0 * b * a,
                    0.0,
                ],
                [
                    2.0 * b * d + 2.0 * c * a,
                    2.0 * c * d - 2.0 * b * a,
                    1.0 - 2.0 * b * b - 2.0 * c * c,
                    0.0,
                ],
                [position.x, position.y, position.z, position.w],
            ],
        }
    }

    pub fn translation(&self) -> Vector4 {
        self.column(3)
    }

    pub fn set_translation(&mut self, position: Vector4) {
        self.data[3] = [position.x, position.y, position.z, position.w];
    }

    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::new(self.data[0][i], self.data[1][i], self.data[2][i], self.data[3][i])
    }

    pub fn column(&self, j: usize) -> Vector4 {
        let [x, y, z, w] = self.data[j];
        Vector4::new(x, y, z, w)
    }

    /// Whether the homogeneous row is exactly `(0, 0, 0, 1)`.
    pub fn is_transform(&self) -> bool {
        self.data[0][3] == 0.0
            && self.data[1][3] == 0.0
            && self.data[2][3] == 0.0
            && self.data[3][3] == 1.0
    }

    /// General inverse. Not supported: always returns the zero matrix.
    ///
    /// Use [`Matrix4x4::calc_inverse_transform`] for rigid transforms.
    pub fn calc_inverse(&self) -> Matrix4x4 {
        log::debug!("general 4x4 inverse is not supported, returning the zero matrix");
        Matrix4x4::zero()
    }

    /// Fast inverse of a rotation plus translation.
    ///
    /// The rotation block is transposed and the translation becomes the
    /// original translation projected onto each row of that transpose,
    /// negated. Only valid when the 3x3 block is orthonormal; the
    /// homogeneous row is checked, orthonormality is not.
    pub fn calc_inverse_transform(&self) -> CsgResult<Matrix4x4> {
        if !self.is_transform() {
            let row = self.row(3);
            return Err(CsgError::NotRigidTransform {
                homogeneous_row: [row.x, row.y, row.z, row.w],
            });
        }

        let mut out = Matrix4x4::zero();
        for column in 0..3 {
            for row in 0..3 {
                out.data[column][row] = self.data[row][column];
            }
        }

        let t = self.data[3];
        for (k, axis) in self.data[..3].iter().enumerate() {
            out.data[3][k] = -(axis[0] * t[0] + axis[1] * t[1] + axis[2] * t[2]);
        }
        out.data[3][3] = 1.0;

        Ok(out)
    }

    pub fn to_homogeneous(&self) -> Matrix4<Real> {
        Matrix4::from_fn(|row, column| self.data[column][row])
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [Real; 4];

    fn index(&self, column: usize) -> &[Real; 4] {
        &self.data[column]
    }
}

impl IndexMut<usize> for Matrix4x4 {
    fn index_mut(&mut self, column: usize) -> &mut [Real; 4] {
        &mut self.data[column]
    }
}

impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        let mut out = Matrix4x4::zero();
        for column in 0..4 {
            for row in 0..4 {
                out.data[column][row] = (0..4)
                    .map(|k| self.data[k][row] * rhs.data[column][k])
                    .sum::<Real>();
            }
        }
        out
    }
}

impl Mul<Vector4> for Matrix4x4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.row(0).dot(&rhs),
            self.row(1).dot(&rhs),
            self.row(2).dot(&rhs),
            self.row(3).dot(&rhs),
        )
    }
}

impl From<Matrix4<Real>> for Matrix4x4 {
    fn from(m: Matrix4<Real>) -> Self {
        let mut out = Matrix4x4::zero();
        for column in 0..4 {
            for row in 0..4 {
                out.data[column][row] = m[(row, column)];
            }
        }
        out
    }
}

impl From<Isometry3<Real>> for Matrix4x4 {
    fn from(iso: Isometry3<Real>) -> Self {
        Matrix4x4::from(iso.to_homogeneous())
    }
}
