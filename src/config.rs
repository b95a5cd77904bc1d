//! Per-source configuration.
//!
//! A [`ReaderConfig`] names the file to read, how its columns are called
//! and which kind of source it is. It can be deserialized as part of a
//! host configuration, or resolved from the environment.
//!
//! ```bash
//! TRAJECTORY_FILE=trips.csv
//! TRAJECTORY_KIND=point
//! TRAJECTORY_ID=vehicle
//! TRAJECTORY_TIMESTAMP=time
//! TRAJECTORY_DECODE_POLICY=skip
//! ```

use crate::error::{ConfigError, ReaderError};
use crate::source::{
    FeatureSource, GeoJsonLayer, PointSource, TextSource, TrajectoryReader,
};

use dotenv::dotenv;
use log::info;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{Display, EnumString};

pub const DEFAULT_DELIMITER: char = ';';

const FILE_KEY: &str = "TRAJECTORY_FILE";
const KIND_KEY: &str = "TRAJECTORY_KIND";
const ID_KEY: &str = "TRAJECTORY_ID";
const GEOM_KEY: &str = "TRAJECTORY_GEOM";
const X_KEY: &str = "TRAJECTORY_X";
const Y_KEY: &str = "TRAJECTORY_Y";
const TIMESTAMP_KEY: &str = "TRAJECTORY_TIMESTAMP";
const DELIMITER_KEY: &str = "TRAJECTORY_DELIMITER";
const POLICY_KEY: &str = "TRAJECTORY_DECODE_POLICY";

/// Names of the columns each role is read from.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub geom: String,
    pub x: String,
    pub y: String,
    pub timestamp: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            id: "id".to_string(),
            geom: "geom".to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            timestamp: "timestamp".to_string(),
        }
    }
}

/// What to do with a record which fails to decode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail the read which met the record. The record is consumed.
    #[default]
    Abort,
    /// Log the record and continue with the next one.
    Skip,
}

/// How trajectory boundaries are encoded by a source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Each geometry feature is one trajectory.
    Feature,
    /// Each delimited row holds one whole trajectory.
    Trajectory,
    /// Each delimited row holds one point, grouped by identifier.
    Point,
}

impl SourceKind {
    /// Infers the kind from a file extension, GeoJSON files being
    /// feature sources and anything else whole-row text sources.
    pub fn infer(file: &std::path::Path) -> SourceKind {
        match file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("geojson" | "json") => SourceKind::Feature,
            _ => SourceKind::Trajectory,
        }
    }
}

/// Options shared by the delimited text sources.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub policy: DecodePolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: DEFAULT_DELIMITER as u8,
            policy: DecodePolicy::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReaderConfig {
    pub file: PathBuf,
    #[serde(default)]
    pub kind: Option<SourceKind>,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl ReaderConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        ReaderConfig {
            file: file.into(),
            kind: None,
            columns: ColumnNames::default(),
            delimiter: DEFAULT_DELIMITER,
            decode_policy: DecodePolicy::default(),
        }
    }

    /// Resolves the configuration from the process environment,
    /// loading a `.env` file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error, the variables may be set directly.
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration through the given variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = lookup(FILE_KEY)
            .ok_or_else(|| ConfigError::MissingEnvironment(FILE_KEY.to_string()))?;
        let mut config = ReaderConfig::new(file);

        if let Some(kind) = lookup(KIND_KEY) {
            config.kind = Some(parse_setting(KIND_KEY, &kind)?);
        }

        if let Some(policy) = lookup(POLICY_KEY) {
            config.decode_policy = parse_setting(POLICY_KEY, &policy)?;
        }

        if let Some(delimiter) = lookup(DELIMITER_KEY) {
            config.delimiter = parse_setting(DELIMITER_KEY, &delimiter)?;
        }

        let columns = &mut config.columns;
        for (key, target) in [
            (ID_KEY, &mut columns.id),
            (GEOM_KEY, &mut columns.geom),
            (X_KEY, &mut columns.x),
            (Y_KEY, &mut columns.y),
            (TIMESTAMP_KEY, &mut columns.timestamp),
        ] {
            if let Some(name) = lookup(key) {
                *target = name;
            }
        }

        Ok(config)
    }

    /// The configured kind, or the one inferred from the file extension.
    pub fn source_kind(&self) -> SourceKind {
        self.kind.unwrap_or_else(|| SourceKind::infer(&self.file))
    }

    pub fn read_options(&self) -> Result<ReadOptions, ConfigError> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::InvalidSetting {
                key: "delimiter".to_string(),
                value: self.delimiter.to_string(),
            });
        }

        Ok(ReadOptions {
            delimiter: self.delimiter as u8,
            policy: self.decode_policy,
        })
    }

    /// Opens the source described by this configuration.
    pub fn open(&self) -> Result<TrajectoryReader, ReaderError> {
        let kind = self.source_kind();
        let options = self.read_options()?;
        info!("Read {kind} trajectories from file {}", self.file.display());

        let reader = match kind {
            SourceKind::Feature => {
                let layer = GeoJsonLayer::open(&self.file, &self.columns.id)?;
                TrajectoryReader::Feature(FeatureSource::new(layer, options.policy)?)
            }
            SourceKind::Trajectory => TrajectoryReader::Trajectory(TextSource::from_path(
                &self.file,
                &self.columns,
                options,
            )?),
            SourceKind::Point => TrajectoryReader::Point(PointSource::from_path(
                &self.file,
                &self.columns,
                options,
            )?),
        };

        Ok(reader)
    }
}

fn parse_setting<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    })
}
