use crate::config::DecodePolicy;
use crate::error::{ConfigError, ReaderError};
use crate::source::TrajectorySource;
use crate::source::feature::{FeatureLayer, GeometryType};
use crate::trajectory::Trajectory;

use log::{error, info, warn};

#[cfg(feature = "tracing")]
use tracing::Level;

/// A source which reads each feature of a layer as one trajectory.
pub struct FeatureSource<L> {
    layer: L,
    policy: DecodePolicy,
    count: usize,
    cursor: usize,

    pending: Option<Result<Trajectory, ReaderError>>,
}

impl<L> FeatureSource<L>
where
    L: FeatureLayer,
{
    /// Validates the layer holds linestrings.
    pub fn new(layer: L, policy: DecodePolicy) -> Result<Self, ReaderError> {
        let count = layer.feature_count();

        match layer.geometry_type() {
            Some(GeometryType::LineString) => info!("Geometry type is linestring"),
            None if count == 0 => info!("Layer declares no geometry type"),
            other => {
                let found = other.map_or("none".to_string(), |kind| kind.to_string());
                error!("Geometry type is {found}, which should be linestring");
                return Err(ConfigError::GeometryType { found }.into());
            }
        }

        info!("Total number of trajectories {count}");
        Ok(FeatureSource {
            layer,
            policy,
            count,
            cursor: 0,
            pending: None,
        })
    }

    pub fn num_trajectories(&self) -> usize {
        self.count
    }

    fn fill(&mut self) {
        while self.pending.is_none() && self.cursor < self.count {
            self.cursor += 1;

            match self.layer.next_feature() {
                Some(Ok(feature)) => {
                    self.pending = Some(Ok(Trajectory::new(feature.id, feature.path)))
                }
                Some(Err(err)) if self.policy == DecodePolicy::Skip => {
                    warn!("Skipping malformed feature. {err}");
                }
                Some(Err(err)) => self.pending = Some(Err(err.into())),
                None => {
                    warn!(
                        "Layer ended after {} of {} features",
                        self.cursor - 1,
                        self.count
                    );
                    self.cursor = self.count;
                }
            }
        }
    }
}

impl<L> TrajectorySource for FeatureSource<L>
where
    L: FeatureLayer,
{
    fn has_next(&mut self) -> bool {
        self.fill();
        self.pending.is_some()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::DEBUG))]
    fn read_next(&mut self) -> Result<Trajectory, ReaderError> {
        self.fill();
        self.pending.take().ok_or(ReaderError::Exhausted)?
    }

    /// Re-opens the layer at its first feature.
    fn reset(&mut self) -> Result<(), ReaderError> {
        self.layer.rewind()?;
        self.cursor = 0;
        self.pending = None;
        Ok(())
    }

    fn close(self) -> Result<(), ReaderError> {
        self.layer.close()
    }

    fn defer(&mut self, fault: ReaderError) {
        self.pending = Some(Err(fault));
    }
}
