//! Loading [`ReportOptions`] from a JSON or YAML file.

use std::{fs, path::Path};

use regex::Regex;
use tracing::debug;

use crate::{error::ConfigError, report::ReportOptions};

pub fn load_options(path: &Path) -> Result<ReportOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;

    let options = match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_owned(),
                source,
            })?
        }
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                path: path.to_owned(),
                source,
            })?
        }
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_owned(),
            })
        }
    };
    debug!(?options, path = %path.display(), "loaded options");
    Ok(options)
}

/// Compiles a pattern given on the command line.
pub fn parse_pattern(option: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { option, source })
}
