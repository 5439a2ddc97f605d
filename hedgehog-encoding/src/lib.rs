//! # Sequence encoding for model input
//!
//! The model consumes sequences as `(L, 4)` one-hot matrices in A, C, G, T
//! column order, with unknown bases spread evenly (`0.25`) over all four
//! columns. Stored datasets keep those matrices bit-packed along the
//! sequence axis, eight positions per byte, which shrinks them 32-fold.
//!
//! Unpacking recovers unknown bases from rows that have all four bits set.
pub mod error;
pub mod fasta;
pub mod onehot;
pub mod packing;

pub use error::*;
pub use fasta::{encode_fasta, read_fasta_records};
pub use onehot::{BASES, one_hot};
pub use packing::{center_crop, center_crop_bounds, pack, pack_batch, unpack, unpack_batch};
