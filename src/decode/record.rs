use crate::trajectory::TrajectoryId;

use csv::StringRecord;
use geo::{Coord, LineString};

/// A raw row, alongside the 1-based line it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub line: u64,
    pub record: StringRecord,
}

impl Row {
    pub fn new(line: u64, record: StringRecord) -> Self {
        Row { line, record }
    }
}

/// A single observed position of a moving object.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
    pub line: u64,
    pub id: TrajectoryId,
    pub position: Coord<f64>,
    /// Present if, and only if, the source has a time column.
    pub timestamp: Option<f64>,
}

/// A row which holds a whole trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryRecord {
    pub line: u64,
    pub id: TrajectoryId,
    pub path: LineString<f64>,
    /// Empty when the source has no time column, or the row gives none.
    pub timestamps: Vec<f64>,
}
