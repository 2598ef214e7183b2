//! Typed errors surfaced by the library.
//!
//! Tool failures are deliberately absent: a missing executable or a
//! non-zero exit shows up downstream as "no findings", never as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a tool-reported message into text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown fallback encoding label '{0}'")]
    UnknownEncoding(String),
    #[error("message is neither valid UTF-8 nor valid {encoding}")]
    Malformed { encoding: &'static str },
}

/// Failure to read or parse a `phpcheck.{toml,yaml,yml}` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
