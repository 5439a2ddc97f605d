use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictConfigError {
    #[error("Failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid YAML in {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Resolved config {0} would overwrite the template; choose another output directory")]
    OverwritesTemplate(PathBuf),

    #[error("Expected '{0}' to be a mapping")]
    NotAMapping(String),
}

pub type Result<T> = std::result::Result<T, PredictConfigError>;
