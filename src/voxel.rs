//! Regular-grid sampling of a composite shape.

use crate::composite::CompositeShape;
use crate::errors::{CsgError, CsgResult};
use crate::float_types::Real;
use crate::vector::Vector4;

/// Upper bound on the number of samples in one grid.
pub const MAX_SAMPLES: usize = 1 << 24;

/// Occupancy of a composite shape sampled on a regular grid.
///
/// Sample `(i, j, k)` sits at `origin + (i, j, k) * voxel_size`. Samples are
/// stored with `i` varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    origin: Vector4,
    voxel_size: Real,
    counts: [usize; 3],
    occupied: Vec<bool>,
}

impl VoxelGrid {
    /// Sample `counts[0] * counts[1] * counts[2]` points starting at `origin`.
    pub fn sample(
        shape: &CompositeShape,
        origin: Vector4,
        voxel_size: Real,
        counts: [usize; 3],
    ) -> CsgResult<VoxelGrid> {
        if !voxel_size.is_finite() || voxel_size <= 0.0 {
            return Err(CsgError::InvalidVoxelSize { size: voxel_size });
        }

        let origin = Vector4::point(origin.x, origin.y, origin.z);
        let [nx, ny, nz] = counts;

        let total = nx
            .checked_mul(ny)
            .and_then(|plane| plane.checked_mul(nz))
            .filter(|&total| total <= MAX_SAMPLES)
            .ok_or(CsgError::GridTooLarge {
                counts: [nx as Real, ny as Real, nz as Real],
            })?;

        let mut points = Vec::with_capacity(total);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    points.push(Vector4::point(
                        origin.x + i as Real * voxel_size,
                        origin.y + j as Real * voxel_size,
                        origin.z + k as Real * voxel_size,
                    ));
                }
            }
        }

        let occupied = shape.contains_many(&points)?;
        log::debug!(
            "sampled {nx}x{ny}x{nz} grid, {} occupied",
            occupied.iter().filter(|&&inside| inside).count()
        );

        Ok(VoxelGrid {
            origin,
            voxel_size,
            counts,
            occupied,
        })
    }

    /// Sample the shape's bounding box. An empty shape gives an empty grid.
    pub fn sample_bounds(shape: &CompositeShape, voxel_size: Real) -> CsgResult<VoxelGrid> {
        if !voxel_size.is_finite() || voxel_size <= 0.0 {
            return Err(CsgError::InvalidVoxelSize { size: voxel_size });
        }

        let Some(aabb) = shape.bounding_box() else {
            return Ok(VoxelGrid {
                origin: Vector4::point(0.0, 0.0, 0.0),
                voxel_size,
                counts: [0, 0, 0],
                occupied: Vec::new(),
            });
        };

        let extents = aabb.extents();
        let steps = [extents.x, extents.y, extents.z].map(|extent| (extent / voxel_size).ceil() + 1.0);
        let too_large = || CsgError::GridTooLarge { counts: steps };

        let mut counts = [0usize; 3];
        for (count, step) in counts.iter_mut().zip(steps) {
            if !step.is_finite() || step > MAX_SAMPLES as Real {
                return Err(too_large());
            }
            *count = step as usize;
        }

        Self::sample(shape, Vector4::from(aabb.mins), voxel_size, counts).map_err(|error| match error {
            CsgError::GridTooLarge { .. } => too_large(),
            other => other,
        })
    }

    pub fn origin(&self) -> Vector4 {
        self.origin
    }

    pub fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [nx, ny, nz] = self.counts;
        (i < nx && j < ny && k < nz).then(|| (k * ny + j) * nx + i)
    }

    /// Out-of-range indices are unoccupied.
    pub fn is_occupied(&self, i: usize, j: usize, k: usize) -> bool {
        self.index(i, j, k).is_some_and(|index| self.occupied[index])
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&inside| inside).count()
    }

    /// Sample positions that fell inside the shape.
    pub fn occupied_points(&self) -> Vec<Vector4> {
        let [nx, ny, _] = self.counts;
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, inside)| **inside)
            .map(|(index, _)| {
                let i = index % nx;
                let j = (index / nx) % ny;
                let k = index / (nx * ny);
                Vector4::point(
                    self.origin.x + i as Real * self.voxel_size,
                    self.origin.y + j as Real * self.voxel_size,
                    self.origin.z + k as Real * self.voxel_size,
                )
            })
            .collect()
    }
}
