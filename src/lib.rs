#![forbid(unsafe_code, unused)]

pub mod composite;
pub mod cuboid;
pub mod diagnostics;
pub mod errors;
pub mod float_types;
pub mod host;
pub mod matrix;
pub mod quaternion;
pub mod registry;
pub mod vector;
pub mod voxel;

pub use composite::{BooleanOp, CompositeNode, CompositeShape, Flattened, NodeId, Primitive};
pub use cuboid::Cuboid;
pub use diagnostics::{CallbackSink, DiagnosticSink, Diagnostics, LogSink, NoopSink};
pub use errors::{CsgError, CsgResult};
pub use matrix::Matrix4x4;
pub use quaternion::Quaternion;
pub use registry::{ShapeId, ShapeRegistry};
pub use vector::Vector4;
pub use voxel::VoxelGrid;
