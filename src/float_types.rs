//! Scalar configuration shared by every module.

/// All geometry is evaluated in double precision.
pub type Real = f64;

pub use parry3d_f64 as parry3d;
