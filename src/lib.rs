#![doc = include_str!("../README.md")]

pub mod column;
pub mod config;
pub mod decode;
pub mod error;
pub mod source;
pub mod trajectory;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use config::{ColumnNames, DecodePolicy, ReadOptions, ReaderConfig, SourceKind};
#[doc(inline)]
pub use error::{ConfigError, DecodeError, ReaderError};
#[doc(inline)]
pub use source::{
    FeatureSource, PointSource, TemporalSource, TextSource, TrajectoryReader, TrajectorySource,
};
#[doc(inline)]
pub use trajectory::{TemporalTrajectory, Trajectory, TrajectoryId};
