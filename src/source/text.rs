//! A delimited text source where each row holds one whole trajectory,
//! its path encoded as a well-known-text `LINESTRING`.

use crate::column::{ColumnMap, GeometryColumn};
use crate::config::{ColumnNames, DecodePolicy, ReadOptions};
use crate::decode::{Decode, TrajectoryRecord};
use crate::error::{ConfigError, DecodeError, ReaderError};
use crate::source::rows::RowStream;
use crate::source::{TemporalSource, TrajectorySource};
use crate::trajectory::{LengthMismatch, TemporalTrajectory, Trajectory};

use log::info;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::Level;

pub struct TextSource<R> {
    rows: RowStream<R>,
    columns: ColumnMap<GeometryColumn>,
    policy: DecodePolicy,

    pending: Option<Result<TrajectoryRecord, ReaderError>>,
}

impl TextSource<File> {
    pub fn from_path(
        path: impl AsRef<Path>,
        names: &ColumnNames,
        options: ReadOptions,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| ConfigError::Open {
            locator: path.display().to_string(),
            reason: err.to_string(),
        })?;

        TextSource::new(file, names, options)
    }
}

impl<R> TextSource<R>
where
    R: Read,
{
    /// Reads the header and resolves the identifier, geometry
    /// and (optional) time columns.
    pub fn new(source: R, names: &ColumnNames, options: ReadOptions) -> Result<Self, ReaderError> {
        let rows = RowStream::new(source, options.delimiter)?;
        let columns = rows.header().resolve_geometry(names)?;
        info!("Reading whole-row trajectories, decode policy {}", options.policy);

        Ok(TextSource {
            rows,
            columns,
            policy: options.policy,
            pending: None,
        })
    }

    pub fn columns(&self) -> &ColumnMap<GeometryColumn> {
        &self.columns
    }

    fn fill(&mut self) {
        if self.pending.is_none() {
            let columns = &self.columns;
            self.pending = self
                .rows
                .next_decoded(self.policy, |row| Ok(columns.decode(row)?));
        }
    }

    fn next_record(&mut self) -> Result<TrajectoryRecord, ReaderError> {
        self.fill();
        self.pending.take().ok_or(ReaderError::Exhausted)?
    }
}

impl<R> TrajectorySource for TextSource<R>
where
    R: Read + Seek,
{
    fn has_next(&mut self) -> bool {
        self.fill();
        self.pending.is_some()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn read_next(&mut self) -> Result<Trajectory, ReaderError> {
        let record = self.next_record()?;
        Ok(Trajectory::new(record.id, record.path))
    }

    fn reset(&mut self) -> Result<(), ReaderError> {
        self.pending = None;
        self.rows.rewind()
    }

    fn close(self) -> Result<(), ReaderError> {
        drop(self.rows.into_inner());
        Ok(())
    }

    fn defer(&mut self, fault: ReaderError) {
        self.pending = Some(Err(fault));
    }
}

impl<R> TemporalSource for TextSource<R>
where
    R: Read + Seek,
{
    fn has_time_stamp(&self) -> bool {
        self.columns.has_time()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn read_next_temporal(&mut self) -> Result<TemporalTrajectory, ReaderError> {
        let TrajectoryRecord {
            line,
            id,
            path,
            timestamps,
        } = self.next_record()?;

        TemporalTrajectory::new(id, path, timestamps).map_err(
            |LengthMismatch { points, timestamps }| {
                ReaderError::from(DecodeError::TimestampMismatch {
                    line,
                    points,
                    timestamps,
                })
            },
        )
    }
}
