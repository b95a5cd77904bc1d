use crate::error::{DecodeError, ReaderError};
use crate::trajectory::TrajectoryId;

use geo::LineString;
use strum::Display;

/// The geometry type held by the features of a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    /// A feature without any geometry.
    Absent,
    /// Features of differing types.
    Mixed,
}

/// One feature read from a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerFeature {
    /// 1-based position of the feature within the layer.
    pub index: u64,
    pub id: TrajectoryId,
    pub path: LineString<f64>,
}

/// A vector layer which yields one polyline feature per call.
pub trait FeatureLayer {
    /// Total number of features, known when the layer is opened.
    fn feature_count(&self) -> usize;

    /// The geometry type of the layer, or `None` for a layer
    /// which declares no type.
    fn geometry_type(&self) -> Option<GeometryType>;

    fn next_feature(&mut self) -> Option<Result<LayerFeature, DecodeError>>;

    /// Returns to the first feature.
    fn rewind(&mut self) -> Result<(), ReaderError>;

    fn close(self) -> Result<(), ReaderError>
    where
        Self: Sized;
}
