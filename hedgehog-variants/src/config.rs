use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ANCHOR_BASE, DEFAULT_SEQ_LEN};

#[derive(Error, Debug)]
pub enum BatchConfigError {
    #[error("Anchor base must be a single character, got '{0}'")]
    InvalidAnchor(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn default_seq_len() -> usize {
    DEFAULT_SEQ_LEN
}

fn default_anchor() -> String {
    (DEFAULT_ANCHOR_BASE as char).to_string()
}

fn default_true() -> bool {
    true
}

/// Settings for turning a loci table into FASTA pairs.
///
/// ```toml
/// seq_len = 2048
/// anchor_base = "C"
/// skip_boundary = true
/// write_labels = true
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BatchConfig {
    #[serde(default = "default_seq_len")]
    pub seq_len: usize,
    #[serde(default = "default_anchor")]
    pub anchor_base: String,
    /// drop rows whose variant sits exactly `seq_len / 2` upstream of the locus
    #[serde(default = "default_true")]
    pub skip_boundary: bool,
    #[serde(default = "default_true")]
    pub write_labels: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            seq_len: default_seq_len(),
            anchor_base: default_anchor(),
            skip_boundary: true,
            write_labels: true,
        }
    }
}

impl BatchConfig {
    /// The anchor as an upper-cased byte.
    pub fn anchor(&self) -> Result<u8, BatchConfigError> {
        match self.anchor_base.as_bytes() {
            [b] => Ok(b.to_ascii_uppercase()),
            _ => Err(BatchConfigError::InvalidAnchor(self.anchor_base.clone())),
        }
    }
}

impl TryFrom<&Path> for BatchConfig {
    type Error = BatchConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: BatchConfig = toml::from_str(&toml_str)?;
        config.anchor()?;
        Ok(config)
    }
}
