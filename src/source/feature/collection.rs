//! A [`FeatureLayer`] over a GeoJSON `FeatureCollection`.

use crate::column::Role;
use crate::error::{ConfigError, DecodeError, ReaderError};
use crate::source::feature::{FeatureLayer, GeometryType, LayerFeature};
use crate::trajectory::TrajectoryId;

use geo::{Coord, LineString};
use geojson::{Feature, GeoJson, JsonValue, Value};
use log::info;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub struct GeoJsonLayer {
    features: Vec<Feature>,
    id_name: String,
    geometry: Option<GeometryType>,
    cursor: usize,
}

impl GeoJsonLayer {
    pub fn open(path: impl AsRef<Path>, id_name: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| ConfigError::Open {
            locator: path.display().to_string(),
            reason: err.to_string(),
        })?;

        GeoJsonLayer::from_reader(file, id_name)
    }

    /// Parses a whole `FeatureCollection`. The identifier is read from
    /// the property named `id_name` of every feature.
    pub fn from_reader<R: Read>(reader: R, id_name: &str) -> Result<Self, ConfigError> {
        let text = io::read_to_string(reader)?;
        let geojson = text
            .parse::<GeoJson>()
            .map_err(|err| ConfigError::UnsupportedFormat(err.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(ConfigError::UnsupportedFormat(
                "expected a FeatureCollection".to_string(),
            ));
        };

        if let Some(first) = collection.features.first() {
            if first.property(id_name).is_none() {
                return Err(ConfigError::MissingColumn {
                    role: Role::Id,
                    name: id_name.to_string(),
                });
            }
        }

        let geometry = collection
            .features
            .iter()
            .map(feature_geometry_type)
            .reduce(|a, b| if a == b { a } else { GeometryType::Mixed });

        info!(
            "Loaded {} features with id property {id_name}",
            collection.features.len()
        );

        Ok(GeoJsonLayer {
            features: collection.features,
            id_name: id_name.to_string(),
            geometry,
            cursor: 0,
        })
    }
}

impl FeatureLayer for GeoJsonLayer {
    fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn geometry_type(&self) -> Option<GeometryType> {
        self.geometry
    }

    fn next_feature(&mut self) -> Option<Result<LayerFeature, DecodeError>> {
        let feature = self.features.get(self.cursor)?;
        self.cursor += 1;

        Some(decode_feature(feature, &self.id_name, self.cursor as u64))
    }

    fn rewind(&mut self) -> Result<(), ReaderError> {
        self.cursor = 0;
        Ok(())
    }

    fn close(self) -> Result<(), ReaderError> {
        Ok(())
    }
}

fn feature_geometry_type(feature: &Feature) -> GeometryType {
    match feature.geometry.as_ref().map(|geometry| &geometry.value) {
        Some(Value::Point(_)) => GeometryType::Point,
        Some(Value::MultiPoint(_)) => GeometryType::MultiPoint,
        Some(Value::LineString(_)) => GeometryType::LineString,
        Some(Value::MultiLineString(_)) => GeometryType::MultiLineString,
        Some(Value::Polygon(_)) => GeometryType::Polygon,
        Some(Value::MultiPolygon(_)) => GeometryType::MultiPolygon,
        Some(Value::GeometryCollection(_)) => GeometryType::GeometryCollection,
        None => GeometryType::Absent,
    }
}

/// Ids are integers, given as JSON numbers without a fractional part
/// (`11` or `11.0`) or as numeric strings.
fn decode_id(value: &JsonValue, line: u64) -> Result<TrajectoryId, DecodeError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(whole_number))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| DecodeError::Identifier {
            line,
            value: value.to_string(),
        })
}

fn whole_number(value: f64) -> Option<TrajectoryId> {
    // i64::MAX is not representable, its f64 rounds up to 2^63.
    let in_range = value >= TrajectoryId::MIN as f64 && value < TrajectoryId::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as TrajectoryId)
}

fn decode_feature(feature: &Feature, id_name: &str, line: u64) -> Result<LayerFeature, DecodeError> {
    let id = feature
        .property(id_name)
        .ok_or(DecodeError::MissingField { line, role: Role::Id })
        .and_then(|value| decode_id(value, line))?;

    let geometry = feature.geometry.as_ref().ok_or(DecodeError::MissingField {
        line,
        role: Role::Geometry,
    })?;

    let Value::LineString(positions) = &geometry.value else {
        return Err(DecodeError::Geometry {
            line,
            reason: format!("{} is not a linestring", feature_geometry_type(feature)),
        });
    };

    let path = positions
        .iter()
        .map(|position| {
            let mut ordinates = position.iter().copied();
            match (ordinates.next(), ordinates.next()) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err(DecodeError::Geometry {
                    line,
                    reason: "position has fewer than two ordinates".to_string(),
                }),
            }
        })
        .collect::<Result<LineString<f64>, _>>()?;

    Ok(LayerFeature {
        index: line,
        id,
        path,
    })
}
