//! # Variant to sequence substitution
//!
//! The model scoring a variant is not strand specific, and variant tables do
//! not always agree with the assembled genome about which allele is the
//! reference. This crate takes a genome window centred on a CpG locus and a
//! nearby variant, works out which of four orientations the window is in,
//! and emits the (reference, alternate) sequence pair the model should see:
//!
//! - `match`: window carries the reference allele
//! - `swap`: window carries the alternate allele (ref/alt mislabeled)
//! - `complement`: window carries the complement of the reference allele
//! - `complement_swap`: window carries the complement of the alternate allele
//!
//! Anything else is `nomatch` and the variant is skipped.
//!
//! On top of the resolver sit the batch driver ([`process_variants`]), the
//! BED-like input reader ([`read_loci_table`]) and the FASTA/label writers.
pub mod batch;
pub mod bed;
pub mod config;
pub mod consts;
pub mod output;
pub mod substitution;

pub use batch::{BatchError, BatchOutput, BatchStats, VariantRecord, process_variants};
pub use bed::{LociTable, read_loci_table};
pub use config::BatchConfig;
pub use output::{FastaPair, write_fasta_pair, write_labels};
pub use substitution::{
    CaseLabel, MismatchCounter, Substitution, SubstitutionError, SubstitutionResolver, substitute,
};
