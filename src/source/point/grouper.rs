use crate::column::{ColumnMap, CoordinateColumns};
use crate::config::{ColumnNames, DecodePolicy, ReadOptions};
use crate::error::{ConfigError, DecodeError, ReaderError};
use crate::source::point::Cursor;
use crate::source::rows::RowStream;
use crate::source::{TemporalSource, TrajectorySource};
use crate::trajectory::{LengthMismatch, TemporalTrajectory, Trajectory, TrajectoryId};

use geo::LineString;
use log::{debug, info, trace};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Reads the next complete group of points from the stream.
///
/// Records are pulled until one carries a different identifier from the
/// first record of the call. That record is buffered in the cursor and
/// opens the following group, so no record is consumed twice or dropped.
///
/// A record which fails to decode under [`DecodePolicy::Abort`] ends the
/// group gathered so far, and its error is held by the cursor for the
/// following call. If nothing was gathered yet the error is returned
/// directly. The failing row is consumed either way.
///
/// Returns [`ReaderError::Exhausted`] if the stream held no further record.
pub fn read_next_group<R: Read>(
    rows: &mut RowStream<R>,
    cursor: &mut Cursor,
    columns: &ColumnMap<CoordinateColumns>,
    policy: DecodePolicy,
) -> Result<TemporalTrajectory, ReaderError> {
    let mut current: Option<(TrajectoryId, u64)> = None;
    let mut path = Vec::new();
    let mut timestamps = Vec::new();

    while let Some(record) = cursor.pull(rows, columns, policy) {
        let record = match record {
            Ok(record) => record,
            Err(err) if current.is_none() => return Err(err),
            Err(err) => {
                cursor.defer(err);
                break;
            }
        };

        match current {
            None => current = Some((record.id, record.line)),
            Some((id, _)) if id == record.id => {}
            Some((id, _)) => {
                trace!(
                    "Trajectory {id} ends before line {}, next is {}",
                    record.line, record.id
                );
                cursor.push_back(record);
                break;
            }
        }

        path.push(record.position);
        if let Some(timestamp) = record.timestamp {
            timestamps.push(timestamp);
        }
    }

    let (id, line) = current.ok_or(ReaderError::Exhausted)?;
    debug!("Read trajectory {id} of {} points from line {line}", path.len());

    TemporalTrajectory::new(id, LineString::new(path), timestamps).map_err(
        |LengthMismatch { points, timestamps }| {
            ReaderError::from(DecodeError::TimestampMismatch {
                line,
                points,
                timestamps,
            })
        },
    )
}

/// A delimited text source of one point per row, grouped into
/// trajectories by runs of equal identifiers.
pub struct PointSource<R> {
    rows: RowStream<R>,
    columns: ColumnMap<CoordinateColumns>,
    policy: DecodePolicy,
    cursor: Cursor,
}

impl PointSource<File> {
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

        PointSource::new(file, names, options)
    }
}

impl<R> PointSource<R>
where
    R: Read,
{
    /// Reads the header and resolves the identifier, coordinate
    /// and (optional) time columns.
    pub fn new(source: R, names: &ColumnNames, options: ReadOptions) -> Result<Self, ReaderError> {
        let rows = RowStream::new(source, options.delimiter)?;
        let columns = rows.header().resolve_coordinates(names)?;
        info!("Reading point trajectories, decode policy {}", options.policy);

        Ok(PointSource {
            rows,
            columns,
            policy: options.policy,
            cursor: Cursor::default(),
        })
    }

    pub fn columns(&self) -> &ColumnMap<CoordinateColumns> {
        &self.columns
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn read_group(&mut self) -> Result<TemporalTrajectory, ReaderError> {
        read_next_group(&mut self.rows, &mut self.cursor, &self.columns, self.policy)
    }
}

impl<R> TrajectorySource for PointSource<R>
where
    R: Read + Seek,
{
    fn has_next(&mut self) -> bool {
        self.cursor.peek(&mut self.rows, &self.columns, self.policy)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn read_next(&mut self) -> Result<Trajectory, ReaderError> {
        self.read_group().map(Trajectory::from)
    }

    fn reset(&mut self) -> Result<(), ReaderError> {
        self.cursor.clear();
        self.rows.rewind()
    }

    fn close(self) -> Result<(), ReaderError> {
        drop(self.rows.into_inner());
        Ok(())
    }

    fn defer(&mut self, fault: ReaderError) {
        self.cursor.defer(fault);
    }
}

impl<R> TemporalSource for PointSource<R>
where
    R: Read + Seek,
{
    fn has_time_stamp(&self) -> bool {
        self.columns.has_time()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn read_next_temporal(&mut self) -> Result<TemporalTrajectory, ReaderError> {
        self.read_group()
    }
}
