//! Trajectory value objects handed to the matcher.

#[doc(hidden)]
pub mod entity;

#[doc(inline)]
pub use entity::{LengthMismatch, TemporalTrajectory, Trajectory, TrajectoryId};
