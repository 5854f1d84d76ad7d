use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the catalog.
/// Any of these aborts the build; no partial model is ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column: {column}")]
    MissingColumn { column: String },
}

/// Invalid configuration values or unreadable config files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("vocabulary cap must be at least 1")]
    InvalidMaxFeatures,

    #[error("catalog record limit must be at least 1")]
    InvalidMaxItems,

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("similarity computation was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
