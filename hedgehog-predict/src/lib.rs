//! # Prediction config preparation
//!
//! Predictions are run by an external model framework driven by a YAML
//! config. This crate only resolves that config for a given FASTA: the
//! `<PATH>` placeholder is pointed at the model directory and the
//! `prediction` section is aimed at the input and output locations.
//!
//! Objects in those configs are usually tagged (`!obj:module.Class {...}`);
//! tags are looked through when reading and substituting.
pub mod config;
pub mod consts;
pub mod errors;

pub use config::*;
pub use errors::*;
