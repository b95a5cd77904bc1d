//! Trajectory sources sharing one forward-only iteration contract.
//!
//! Each backend decides per call how many records make up one trajectory:
//! one feature for [`FeatureSource`], one row for [`TextSource`], and a run
//! of rows sharing an identifier for [`PointSource`].

#[doc(hidden)]
pub mod definition;
pub mod feature;
pub mod point;
#[doc(hidden)]
pub mod reader;
#[doc(hidden)]
pub mod rows;
#[doc(hidden)]
pub mod text;

#[doc(inline)]
pub use definition::{TemporalSource, Trajectories, TrajectorySource};
#[doc(inline)]
pub use feature::{FeatureLayer, FeatureSource, GeoJsonLayer};
#[doc(inline)]
pub use point::PointSource;
#[doc(inline)]
pub use reader::TrajectoryReader;
#[doc(inline)]
pub use text::TextSource;
