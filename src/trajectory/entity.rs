use geo::LineString;

/// Identifier assigned to a trajectory by its source.
/// No uniqueness is assumed across reads.
pub type TrajectoryId = i64;

/// An identified, ordered sequence of positions.
///
/// The path may be degenerate (zero or one point), consumers
/// are expected to handle this.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub id: TrajectoryId,
    pub path: LineString<f64>,
}

impl Trajectory {
    pub fn new(id: TrajectoryId, path: LineString<f64>) -> Self {
        Trajectory { id, path }
    }

    /// Number of points within the path.
    pub fn len(&self) -> usize {
        self.path.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.0.is_empty()
    }
}

/// A timestamp sequence whose length disagrees with its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthMismatch {
    pub points: usize,
    pub timestamps: usize,
}

/// A [`Trajectory`] with one timestamp per point.
///
/// The timestamps are either empty, meaning they are unknown,
/// or have exactly as many entries as the path has points.
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalTrajectory {
    id: TrajectoryId,
    path: LineString<f64>,
    timestamps: Vec<f64>,
}

impl TemporalTrajectory {
    pub fn new(
        id: TrajectoryId,
        path: LineString<f64>,
        timestamps: Vec<f64>,
    ) -> Result<Self, LengthMismatch> {
        if !timestamps.is_empty() && timestamps.len() != path.0.len() {
            return Err(LengthMismatch {
                points: path.0.len(),
                timestamps: timestamps.len(),
            });
        }

        Ok(TemporalTrajectory {
            id,
            path,
            timestamps,
        })
    }

    /// A trajectory whose timestamps are unknown.
    pub fn untimed(id: TrajectoryId, path: LineString<f64>) -> Self {
        TemporalTrajectory {
            id,
            path,
            timestamps: vec![],
        }
    }

    pub fn id(&self) -> TrajectoryId {
        self.id
    }

    pub fn path(&self) -> &LineString<f64> {
        &self.path
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn has_timestamps(&self) -> bool {
        !self.timestamps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.0.is_empty()
    }

    pub fn into_parts(self) -> (TrajectoryId, LineString<f64>, Vec<f64>) {
        (self.id, self.path, self.timestamps)
    }
}

impl From<TemporalTrajectory> for Trajectory {
    fn from(value: TemporalTrajectory) -> Self {
        Trajectory::new(value.id, value.path)
    }
}
