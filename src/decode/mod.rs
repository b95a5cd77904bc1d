//! Decodes raw delimited rows into typed records.
//!
//! Every field of a row is visited once, in order, and matched against the
//! positions of a resolved [`ColumnMap`](crate::column::ColumnMap). Fields
//! at unmapped positions are ignored.

#[doc(hidden)]
pub mod decoder;
#[doc(hidden)]
pub mod record;

#[doc(inline)]
pub use decoder::{Decode, parse_timestamps};
#[doc(inline)]
pub use record::{PointRecord, Row, TrajectoryRecord};
