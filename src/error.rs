use std::path::PathBuf;
use thiserror::Error;

use crate::scene::ObjectId;

/// Core library errors
#[derive(Error, Debug)]
pub enum OutlinerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project file '{path}': {source}")]
    Project {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by scene graph operations
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),

    #[error("Cannot move {object} under {parent}: it would become its own ancestor")]
    Cycle { object: ObjectId, parent: ObjectId },

    #[error("Object {target} is not a child of {parent}")]
    NotAChild { parent: ObjectId, target: ObjectId },

    #[error("Object {0} has no parent")]
    Orphan(ObjectId),

    #[error("Object id {0} appears more than once")]
    DuplicateId(ObjectId),

    #[error("The program root cannot be removed")]
    RootRemoval,

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("No scene to add objects to")]
    NoScene,

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OutlinerError>;
