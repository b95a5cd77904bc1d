use crate::column::Role;
use crate::config::ColumnNames;
use crate::error::ConfigError;

use csv::StringRecord;
use itertools::Itertools;
use log::{error, info, warn};

/// Position of the column holding one whole polyline per row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeometryColumn(pub usize);

/// Positions of the two coordinate columns of a point row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub x: usize,
    pub y: usize,
}

/// The resolved positions of every role requested from a header.
///
/// The shape parameter is either a [`GeometryColumn`] or
/// [`CoordinateColumns`], depending on how the source encodes positions.
/// A `time` of `None` means the time column is absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap<S> {
    pub id: usize,
    pub shape: S,
    pub time: Option<usize>,
}

impl<S> ColumnMap<S> {
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

/// The ordered field names of a header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<String>,
}

impl From<&StringRecord> for Header {
    fn from(record: &StringRecord) -> Self {
        Header::new(record.iter())
    }
}

impl Header {
    pub fn new<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Header {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Position of the left-most field with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name)
    }

    fn require(&self, role: Role, name: &str) -> Result<usize, ConfigError> {
        self.position(name).ok_or_else(|| {
            error!(
                "{role} column {name} not found among [{}]",
                self.fields.iter().join(", ")
            );

            ConfigError::MissingColumn {
                role,
                name: name.to_string(),
            }
        })
    }

    fn optional_time(&self, name: &str) -> Option<usize> {
        let position = self.position(name);
        if position.is_none() {
            warn!("Time stamp column {name} not found, timestamps will be unavailable");
        }

        position
    }

    /// Resolves the identifier, geometry and time columns of
    /// a source which holds one whole trajectory per row.
    pub fn resolve_geometry(
        &self,
        names: &ColumnNames,
    ) -> Result<ColumnMap<GeometryColumn>, ConfigError> {
        let id = self.require(Role::Id, &names.id);
        let geometry = self.require(Role::Geometry, &names.geom);

        let map = ColumnMap {
            id: id?,
            shape: GeometryColumn(geometry?),
            time: self.optional_time(&names.timestamp),
        };

        info!(
            "Id index {} Geometry index {} Time index {:?}",
            map.id, map.shape.0, map.time
        );
        Ok(map)
    }

    /// Resolves the identifier, coordinate and time columns of
    /// a source which holds one point per row.
    pub fn resolve_coordinates(
        &self,
        names: &ColumnNames,
    ) -> Result<ColumnMap<CoordinateColumns>, ConfigError> {
        let id = self.require(Role::Id, &names.id);
        let x = self.require(Role::X, &names.x);
        let y = self.require(Role::Y, &names.y);

        let map = ColumnMap {
            id: id?,
            shape: CoordinateColumns { x: x?, y: y? },
            time: self.optional_time(&names.timestamp),
        };

        info!(
            "Id index {} x index {} y index {} Time index {:?}",
            map.id, map.shape.x, map.shape.y, map.time
        );
        Ok(map)
    }
}
