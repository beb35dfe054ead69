use thiserror::Error;

use crate::oracle::OracleError;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("lunisolar oracle failed: {0}")]
    OracleResolution(#[from] OracleError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AlmanacError>;
