use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving a configuration object.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("boolean field '{field}' cannot be positional")]
    BooleanPositional { field: String },

    #[error("position {position} is declared by both '{first}' and '{second}'")]
    PositionCollision {
        position: usize,
        first: String,
        second: String,
    },

    #[error("missing required positional argument at position {position}")]
    MissingArgument { position: usize },

    #[error("missing value for parameter '{key}'")]
    MissingValue { key: String },

    #[error("invalid value '{value}' for field '{field}' (from {origin})")]
    Format {
        field: String,
        origin: Origin,
        value: String,
        #[source]
        source: ValueError,
    },

    #[error("field '{field}' is already set (from {origin})")]
    Conflict { field: String, origin: Origin },

    #[error("required field '{field}' is not set")]
    RequiredField { field: String },

    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The registered field set is malformed.
    Configuration,
    /// A required positional argument was not supplied.
    MissingArgument,
    /// A named flag needs a value and none was found.
    MissingValue,
    /// A raw value could not be converted to the field's type.
    Format,
    /// The same field was bound twice within one stage.
    Conflict,
    /// A required field was not set by any stage.
    RequiredField,
    /// The configuration file was missing, unreadable or malformed.
    Load,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BooleanPositional { .. } | Self::PositionCollision { .. } => {
                ErrorKind::Configuration
            }
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::Format { .. } => ErrorKind::Format,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::RequiredField { .. } => ErrorKind::RequiredField,
            Self::FileNotFound(_)
            | Self::ReadError { .. }
            | Self::ParseError { .. }
            | Self::TomlParseError { .. } => ErrorKind::Load,
        }
    }
}

/// Where a raw value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Position(usize),
    Long(String),
    Short(String),
    Env(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(f, "position {position}"),
            Self::Long(key) => write!(f, "--{key}"),
            Self::Short(key) => write!(f, "-{key}"),
            Self::Env(name) => write!(f, "environment variable {name}"),
        }
    }
}

/// Why a raw string could not be converted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    #[error("not an integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("not a number: {0}")]
    Float(#[from] ParseFloatError),

    #[error("expected 'true' or 'false'")]
    Boolean,
}
