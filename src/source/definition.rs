use crate::error::ReaderError;
use crate::trajectory::{TemporalTrajectory, Trajectory};

/// The forward-only iteration contract shared by every trajectory source.
///
/// A source is read until [`has_next`](TrajectorySource::has_next) is false,
/// may be rewound with [`reset`](TrajectorySource::reset), and is released
/// by [`close`](TrajectorySource::close).
pub trait TrajectorySource {
    /// Whether another read is available.
    ///
    /// This is also true when the next read will fail, such as for a
    /// malformed record under [`DecodePolicy::Abort`](crate::DecodePolicy::Abort),
    /// so that a failure is reported rather than mistaken for the end of
    /// the source. Once that read has returned its error, reading resumes
    /// with the following record.
    fn has_next(&mut self) -> bool;

    /// Reads the next trajectory.
    ///
    /// Returns [`ReaderError::Exhausted`] if `has_next()` is false.
    fn read_next(&mut self) -> Result<Trajectory, ReaderError>;

    /// Rewinds to the first data record.
    fn reset(&mut self) -> Result<(), ReaderError>;

    /// Releases the underlying record stream.
    fn close(self) -> Result<(), ReaderError>
    where
        Self: Sized;

    /// Holds a failure returned by a read so that the following read
    /// reports it again. Used by batch reads to return the trajectories
    /// gathered before the failure.
    fn defer(&mut self, fault: ReaderError);

    /// Reads up to `n` trajectories, stopping early once exhausted.
    ///
    /// A failing read ends the batch. The trajectories read before it are
    /// returned and the failure is reported by the next read. If the first
    /// read fails, the failure is returned directly.
    fn read_next_n(&mut self, n: usize) -> Result<Vec<Trajectory>, ReaderError> {
        read_batch(self, n, |source| source.read_next())
    }

    /// Reads until exhausted, or until a read fails as for
    /// [`read_next_n`](TrajectorySource::read_next_n).
    fn read_all(&mut self) -> Result<Vec<Trajectory>, ReaderError> {
        read_batch(self, usize::MAX, |source| source.read_next())
    }

    /// Borrows the source as an iterator of read results.
    fn trajectories(&mut self) -> Trajectories<'_, Self> {
        Trajectories { source: self }
    }
}

/// A source which can carry one timestamp per point.
pub trait TemporalSource: TrajectorySource {
    /// Whether the source resolved a time column.
    fn has_time_stamp(&self) -> bool;

    /// Reads the next trajectory with its timestamps. Without a time
    /// column the timestamps are empty, the path is still populated.
    fn read_next_temporal(&mut self) -> Result<TemporalTrajectory, ReaderError>;

    /// Fails if timestamps cannot be supplied.
    fn require_timestamps(&self) -> Result<(), ReaderError> {
        if self.has_time_stamp() {
            Ok(())
        } else {
            Err(ReaderError::TimestampsUnavailable)
        }
    }

    fn read_next_n_temporal(&mut self, n: usize) -> Result<Vec<TemporalTrajectory>, ReaderError> {
        read_batch(self, n, |source| source.read_next_temporal())
    }

    fn read_all_temporal(&mut self) -> Result<Vec<TemporalTrajectory>, ReaderError> {
        read_batch(self, usize::MAX, |source| source.read_next_temporal())
    }
}

fn read_batch<S, T, F>(source: &mut S, n: usize, mut read: F) -> Result<Vec<T>, ReaderError>
where
    S: TrajectorySource + ?Sized,
    F: FnMut(&mut S) -> Result<T, ReaderError>,
{
    let mut batch = Vec::new();
    while batch.len() < n && source.has_next() {
        match read(source) {
            Ok(trajectory) => batch.push(trajectory),
            Err(fault) if batch.is_empty() => return Err(fault),
            Err(fault) => {
                source.defer(fault);
                break;
            }
        }
    }

    Ok(batch)
}

/// Iterator over the remaining trajectories of a source.
pub struct Trajectories<'a, S: ?Sized> {
    source: &'a mut S,
}

impl<S> Iterator for Trajectories<'_, S>
where
    S: TrajectorySource + ?Sized,
{
    type Item = Result<Trajectory, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.has_next() {
            Some(self.source.read_next())
        } else {
            None
        }
    }
}
