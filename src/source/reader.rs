use crate::error::ReaderError;
use crate::source::feature::{FeatureSource, GeoJsonLayer};
use crate::source::point::PointSource;
use crate::source::text::TextSource;
use crate::source::{TemporalSource, TrajectorySource};
use crate::trajectory::{TemporalTrajectory, Trajectory};

use std::fs::File;

/// Any of the file-backed trajectory sources, as opened
/// by [`ReaderConfig::open`](crate::ReaderConfig::open).
pub enum TrajectoryReader {
    Feature(FeatureSource<GeoJsonLayer>),
    Trajectory(TextSource<File>),
    Point(PointSource<File>),
}

impl TrajectorySource for TrajectoryReader {
    fn has_next(&mut self) -> bool {
        match self {
            TrajectoryReader::Feature(source) => source.has_next(),
            TrajectoryReader::Trajectory(source) => source.has_next(),
            TrajectoryReader::Point(source) => source.has_next(),
        }
    }

    fn read_next(&mut self) -> Result<Trajectory, ReaderError> {
        match self {
            TrajectoryReader::Feature(source) => source.read_next(),
            TrajectoryReader::Trajectory(source) => source.read_next(),
            TrajectoryReader::Point(source) => source.read_next(),
        }
    }

    fn reset(&mut self) -> Result<(), ReaderError> {
        match self {
            TrajectoryReader::Feature(source) => source.reset(),
            TrajectoryReader::Trajectory(source) => source.reset(),
            TrajectoryReader::Point(source) => source.reset(),
        }
    }

    fn close(self) -> Result<(), ReaderError> {
        match self {
            TrajectoryReader::Feature(source) => source.close(),
            TrajectoryReader::Trajectory(source) => source.close(),
            TrajectoryReader::Point(source) => source.close(),
        }
    }

    fn defer(&mut self, fault: ReaderError) {
        match self {
            TrajectoryReader::Feature(source) => source.defer(fault),
            TrajectoryReader::Trajectory(source) => source.defer(fault),
            TrajectoryReader::Point(source) => source.defer(fault),
        }
    }
}

/// Feature layers carry no timestamps, their temporal reads
/// give an empty timestamp sequence.
impl TemporalSource for TrajectoryReader {
    fn has_time_stamp(&self) -> bool {
        match self {
            TrajectoryReader::Feature(_) => false,
            TrajectoryReader::Trajectory(source) => source.has_time_stamp(),
            TrajectoryReader::Point(source) => source.has_time_stamp(),
        }
    }

    fn read_next_temporal(&mut self) -> Result<TemporalTrajectory, ReaderError> {
        match self {
            TrajectoryReader::Feature(source) => source
                .read_next()
                .map(|Trajectory { id, path }| TemporalTrajectory::untimed(id, path)),
            TrajectoryReader::Trajectory(source) => source.read_next_temporal(),
            TrajectoryReader::Point(source) => source.read_next_temporal(),
        }
    }
}
