//! Error types for the analysis pipeline and its command-line front end.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::parser::Site;

/// A file that could not be turned into a usable syntax tree.
///
/// Parse errors are local to their file: the file is excluded from the report
/// and listed as an error entry, the rest of the run continues.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{}: could not read file: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: could not load grammar: {message}", path.display())]
    Language { path: PathBuf, message: String },

    #[error("{}: parser produced no tree", path.display())]
    NoTree { path: PathBuf },

    #[error(
        "{}:{site}: syntax error{}",
        path.display(),
        missing.as_ref().map(|kind| format!(" (missing {kind})")).unwrap_or_default()
    )]
    Syntax {
        path: PathBuf,
        site: Site,
        missing: Option<String>,
    },
}

impl ParseError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. }
            | Self::Language { path, .. }
            | Self::NoTree { path }
            | Self::Syntax { path, .. } => path,
        }
    }
}

/// Misuse of the two-phase scope analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("references have already been resolved for this scope tree")]
    AlreadyResolved,
}

/// Invalid user configuration, caught before any analysis runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: could not read config: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid JSON config: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: invalid YAML config: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: unsupported config format, expected .json, .yaml or .yml", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid {option} pattern: {source}")]
    InvalidPattern {
        option: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{}: not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not walk source tree: {0}")]
    Io(#[from] io::Error),
}

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
