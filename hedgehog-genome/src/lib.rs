//! # Reference genome access
//!
//! Windows handed to the substitution resolver are cut out of a reference
//! genome through the [`SequenceProvider`] trait. Two providers exist:
//!
//! - [`InMemoryGenome`]: loads every contig of a (possibly gzipped) FASTA into memory.
//! - [`IndexedGenome`]: memory-maps a plain FASTA and seeks through its `.fai` index,
//!   building the index on first use.
//!
//! [`Genome::open`] picks between them based on the file.
pub mod fasta;
pub mod genome;
pub mod indexed;
pub mod memory;
pub mod provider;

pub use fasta::{FaiRecord, compute_fai, read_fai, write_fai};
pub use genome::Genome;
pub use hedgehog_core::complementary_base;
pub use indexed::IndexedGenome;
pub use memory::InMemoryGenome;
pub use provider::SequenceProvider;
