//! Error kinds raised while opening and reading trajectory sources.
//!
//! Construction failures are reported as [`ConfigError`], per-record
//! failures as [`DecodeError`]. Every read operation returns a
//! [`ReaderError`] which wraps both, alongside misuse of an exhausted source.

use crate::column::Role;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Raised while constructing a source. The source is unusable afterwards.
#[derive(Debug)]
pub enum ConfigError {
    /// A mandatory role could not be found among the header fields.
    MissingColumn { role: Role, name: String },
    /// The underlying resource could not be opened.
    Open { locator: String, reason: String },
    /// The layer does not hold simple open polylines.
    GeometryType { found: String },
    UnsupportedFormat(String),
    MissingEnvironment(String),
    InvalidSetting { key: String, value: String },
    Io(io::Error),
    Csv(csv::Error),
}

/// Raised when a single record cannot be decoded.
///
/// `line` is the 1-based location of the record within its source,
/// the text line for delimited sources and the feature index for layers.
#[derive(Debug)]
pub enum DecodeError {
    Identifier { line: u64, value: String },
    Coordinate { line: u64, role: Role, value: String },
    Timestamp { line: u64, value: String },
    Geometry { line: u64, reason: String },
    MissingField { line: u64, role: Role },
    TimestampMismatch { line: u64, points: usize, timestamps: usize },
    Csv(csv::Error),
}

#[derive(Debug)]
pub enum ReaderError {
    Configuration(ConfigError),
    Decode(DecodeError),
    /// A read was requested while `has_next()` is false.
    Exhausted,
    /// Timestamps were demanded from a source without a time column.
    TimestampsUnavailable,
    Io(io::Error),
}

impl DecodeError {
    pub fn line(&self) -> Option<u64> {
        match self {
            DecodeError::Identifier { line, .. }
            | DecodeError::Coordinate { line, .. }
            | DecodeError::Timestamp { line, .. }
            | DecodeError::Geometry { line, .. }
            | DecodeError::MissingField { line, .. }
            | DecodeError::TimestampMismatch { line, .. } => Some(*line),
            DecodeError::Csv(err) => err.position().map(|pos| pos.line()),
        }
    }
}

impl ReaderError {
    /// Wraps a csv failure met while reading rows, keeping I/O failures
    /// apart from malformed data.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        if err.is_io_error() {
            ReaderError::Io(io::Error::other(err))
        } else {
            ReaderError::Decode(DecodeError::Csv(err))
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ReaderError::Decode(_))
    }
}

crate::impl_err!(ConfigError, Configuration);
crate::impl_err!(DecodeError, Decode);
crate::impl_err!(io::Error, Io);
crate::impl_err!(io::Error, ConfigError, Io);
crate::impl_err!(csv::Error, ConfigError, Csv);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingColumn { role, name } => {
                write!(f, "{role} column '{name}' not found")
            }
            ConfigError::Open { locator, reason } => {
                write!(f, "could not open {locator}: {reason}")
            }
            ConfigError::GeometryType { found } => {
                write!(f, "geometry type is {found}, which should be linestring")
            }
            ConfigError::UnsupportedFormat(format) => write!(f, "unsupported format: {format}"),
            ConfigError::MissingEnvironment(key) => write!(f, "missing environment variable {key}"),
            ConfigError::InvalidSetting { key, value } => {
                write!(f, "invalid value '{value}' for {key}")
            }
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Identifier { line, value } => {
                write!(f, "line {line}: invalid identifier '{value}'")
            }
            DecodeError::Coordinate { line, role, value } => {
                write!(f, "line {line}: invalid {role} coordinate '{value}'")
            }
            DecodeError::Timestamp { line, value } => {
                write!(f, "line {line}: invalid timestamp '{value}'")
            }
            DecodeError::Geometry { line, reason } => {
                write!(f, "line {line}: invalid geometry, {reason}")
            }
            DecodeError::MissingField { line, role } => {
                write!(f, "line {line}: no {role} field")
            }
            DecodeError::TimestampMismatch {
                line,
                points,
                timestamps,
            } => write!(
                f,
                "line {line}: {timestamps} timestamps given for {points} points"
            ),
            DecodeError::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl Display for ReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::Configuration(err) => write!(f, "configuration error: {err}"),
            ReaderError::Decode(err) => write!(f, "decode error: {err}"),
            ReaderError::Exhausted => write!(f, "read requested from an exhausted source"),
            ReaderError::TimestampsUnavailable => {
                write!(f, "source has no time stamp column")
            }
            ReaderError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::Configuration(err) => Some(err),
            ReaderError::Decode(err) => Some(err),
            ReaderError::Io(err) => Some(err),
            _ => None,
        }
    }
}
