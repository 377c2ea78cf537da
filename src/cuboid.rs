use crate::errors::CsgResult;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::matrix::Matrix4x4;
use crate::quaternion::Quaternion;
use crate::vector::Vector4;
use nalgebra::Point3;

/// A box primitive.
///
/// The local-to-composite transform places one vertex of the box, the
/// anchor, in composite space with a given orientation. `dimensions` is the
/// position of the opposite vertex relative to the anchor, measured along the
/// box's own axes. Only `x`, `y` and `z` of `dimensions` are meaningful.
#[derive(Debug, Clone, Default)]
pub struct Cuboid {
    local_to_composite: Matrix4x4,
    dimensions: Vector4,
}

impl Cuboid {
    pub fn new(position: Vector4, dimensions: Vector4, orientation: Quaternion) -> Self {
        Cuboid {
            local_to_composite: Matrix4x4::from_pose(position, orientation),
            dimensions,
        }
    }

    /// Position of the anchor vertex in composite space.
    pub fn position(&self) -> Vector4 {
        self.local_to_composite.translation()
    }

    pub fn dimensions(&self) -> Vector4 {
        self.dimensions
    }

    pub fn local_to_composite(&self) -> &Matrix4x4 {
        &self.local_to_composite
    }

    /// Move the anchor. Orientation is left untouched.
    pub fn set_position(&mut self, position: Vector4) {
        self.local_to_composite.set_translation(position);
    }

    pub fn set_dimensions(&mut self, dimensions: Vector4) {
        self.dimensions = dimensions;
    }

    /// Whether `point` lies inside the box, boundary rules included.
    ///
    /// The point is taken to local space with the fast inverse of the
    /// anchor transform. It is inside when it is strictly greater than the
    /// origin on every axis or exactly at the origin, and strictly less than
    /// `dimensions` on every axis or exactly at `dimensions`. A point lying on
    /// one face but inside on the other axes therefore counts as outside.
    ///
    /// Fails when the anchor transform is not a rigid transform, e.g. when the
    /// position was given with `w != 1`.
    pub fn contains(&self, point: &Vector4) -> CsgResult<bool> {
        let local = self.local_to_composite.calc_inverse_transform()? * *point;
        let origin = Vector4::zero();

        // x, y and z only: the local point has w = 1 against the origin's
        // w = 0, so a four-component test would reject the anchor itself.
        // Here the anchor counts as inside.
        let above_origin = local.xyz_greater_than(&origin) || local.xyz_equals(&origin);
        let below_extent =
            local.xyz_less_than(&self.dimensions) || local.xyz_equals(&self.dimensions);

        Ok(above_origin && below_extent)
    }

    pub fn calc_volume(&self) -> Real {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Loose equality: both cuboids map the probe `(1, 1, 1, 1)` through their
    /// transform, add their dimensions, and the two results must match exactly.
    ///
    /// Different cuboids can compare equal under this test.
    pub fn equals(&self, other: &Cuboid) -> bool {
        let probe = Vector4::new(1.0, 1.0, 1.0, 1.0);

        let mine = self.local_to_composite * probe + self.dimensions;
        let theirs = other.local_to_composite * probe + other.dimensions;

        mine == theirs
    }

    /// The eight vertices in composite space, anchor first.
    pub fn corners(&self) -> [Vector4; 8] {
        let Vector4 { x, y, z, .. } = self.dimensions;
        let m = self.local_to_composite;

        [
            m * Vector4::point(0.0, 0.0, 0.0),
            m * Vector4::point(x, 0.0, 0.0),
            m * Vector4::point(0.0, y, 0.0),
            m * Vector4::point(x, y, 0.0),
            m * Vector4::point(0.0, 0.0, z),
            m * Vector4::point(x, 0.0, z),
            m * Vector4::point(0.0, y, z),
            m * Vector4::point(x, y, z),
        ]
    }

    /// Axis-aligned bounds of the eight corners in composite space.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);

        for corner in self.corners() {
            mins.x = mins.x.min(corner.x);
            mins.y = mins.y.min(corner.y);
            mins.z = mins.z.min(corner.z);
            maxs.x = maxs.x.max(corner.x);
            maxs.y = maxs.y.max(corner.y);
            maxs.z = maxs.z.max(corner.z);
        }

        Aabb::new(mins, maxs)
    }
}
