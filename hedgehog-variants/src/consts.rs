pub use hedgehog_core::consts::{DEFAULT_ANCHOR_BASE, DEFAULT_SEQ_LEN};

/// Log every n-th anchor mismatch so long runs stay readable.
pub const ANCHOR_MISMATCH_LOG_EVERY: usize = 100;

pub const LABELS_SUFFIX: &str = "labels.tsv";
pub const LABELS_HEADER: &str = "loci\tcontains_unk\tvariant\tsub_info";

// BED-like input columns (0-based)
pub const COL_CHROM: usize = 0;
pub const COL_POS: usize = 1;
pub const COL_ID: usize = 3;
pub const COL_REF: usize = 4;
pub const COL_ALT: usize = 5;
pub const COL_LOCUS: usize = 9;
