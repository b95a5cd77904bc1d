use crate::column::{ColumnMap, CoordinateColumns, GeometryColumn, Role};
use crate::decode::{PointRecord, Row, TrajectoryRecord};
use crate::error::DecodeError;
use crate::trajectory::TrajectoryId;

use geo::{Coord, LineString};
use wkt::TryFromWkt;

/// Decodes one raw row into a typed record.
pub trait Decode {
    type Record;

    fn decode(&self, row: &Row) -> Result<Self::Record, DecodeError>;
}

impl Decode for ColumnMap<CoordinateColumns> {
    type Record = PointRecord;

    fn decode(&self, row: &Row) -> Result<PointRecord, DecodeError> {
        let line = row.line;
        let (mut id, mut x, mut y, mut timestamp) = (None, None, None, None);

        for (index, field) in row.record.iter().enumerate() {
            if index == self.id {
                id = Some(parse_id(line, field)?);
            }
            if index == self.shape.x {
                x = Some(parse_coordinate(line, Role::X, field)?);
            }
            if index == self.shape.y {
                y = Some(parse_coordinate(line, Role::Y, field)?);
            }
            if Some(index) == self.time {
                timestamp = Some(parse_timestamp(line, field)?);
            }
        }

        if self.has_time() && timestamp.is_none() {
            return Err(DecodeError::MissingField {
                line,
                role: Role::Time,
            });
        }

        Ok(PointRecord {
            line,
            id: id.ok_or(DecodeError::MissingField { line, role: Role::Id })?,
            position: Coord {
                x: x.ok_or(DecodeError::MissingField { line, role: Role::X })?,
                y: y.ok_or(DecodeError::MissingField { line, role: Role::Y })?,
            },
            timestamp,
        })
    }
}

impl Decode for ColumnMap<GeometryColumn> {
    type Record = TrajectoryRecord;

    fn decode(&self, row: &Row) -> Result<TrajectoryRecord, DecodeError> {
        let line = row.line;
        let (mut id, mut path, mut timestamps) = (None, None, None);

        for (index, field) in row.record.iter().enumerate() {
            if index == self.id {
                id = Some(parse_id(line, field)?);
            }
            if index == self.shape.0 {
                path = Some(parse_linestring(line, field)?);
            }
            if Some(index) == self.time {
                timestamps = Some(parse_timestamps(field).map_err(|value| {
                    DecodeError::Timestamp { line, value }
                })?);
            }
        }

        let id = id.ok_or(DecodeError::MissingField { line, role: Role::Id })?;
        let path = path.ok_or(DecodeError::MissingField {
            line,
            role: Role::Geometry,
        })?;

        let timestamps = match (self.has_time(), timestamps) {
            (true, None) => {
                return Err(DecodeError::MissingField {
                    line,
                    role: Role::Time,
                });
            }
            (_, timestamps) => timestamps.unwrap_or_default(),
        };

        if !timestamps.is_empty() && timestamps.len() != path.0.len() {
            return Err(DecodeError::TimestampMismatch {
                line,
                points: path.0.len(),
                timestamps: timestamps.len(),
            });
        }

        Ok(TrajectoryRecord {
            line,
            id,
            path,
            timestamps,
        })
    }
}

fn parse_id(line: u64, field: &str) -> Result<TrajectoryId, DecodeError> {
    field
        .trim()
        .parse::<TrajectoryId>()
        .map_err(|_| DecodeError::Identifier {
            line,
            value: field.to_string(),
        })
}

fn parse_coordinate(line: u64, role: Role, field: &str) -> Result<f64, DecodeError> {
    finite(field.trim()).ok_or_else(|| DecodeError::Coordinate {
        line,
        role,
        value: field.to_string(),
    })
}

fn parse_timestamp(line: u64, field: &str) -> Result<f64, DecodeError> {
    finite(field.trim()).ok_or_else(|| DecodeError::Timestamp {
        line,
        value: field.to_string(),
    })
}

fn finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_linestring(line: u64, field: &str) -> Result<LineString<f64>, DecodeError> {
    LineString::<f64>::try_from_wkt_str(field.trim()).map_err(|err| DecodeError::Geometry {
        line,
        reason: err.to_string(),
    })
}

/// Parses a comma-separated list of timestamps, as embedded in one field.
///
/// An empty field gives an empty list. Entries must be finite numbers,
/// on failure the offending entry is returned.
pub fn parse_timestamps(field: &str) -> Result<Vec<f64>, String> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(vec![]);
    }

    field
        .split(',')
        .map(str::trim)
        .map(|value| finite(value).ok_or_else(|| value.to_string()))
        .collect()
}
