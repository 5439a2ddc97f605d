//! # Core models for hedgehog
//!
//! Shared building blocks for the hedgehog variant tools: the genomic
//! [`Locus`](models::Locus) a window is centred on, the [`Variant`](models::Variant)
//! being scored, the fetched [`Window`](models::Window) itself, and the fixed
//! Watson-Crick complement table used to resolve strand ambiguity.
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use errors::*;
pub use models::{Locus, Variant, Window, complementary_base};
