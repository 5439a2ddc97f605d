use std::path::Path;

use anyhow::Result;

use hedgehog_core::utils::is_gzipped;

use crate::indexed::IndexedGenome;
use crate::memory::InMemoryGenome;
use crate::provider::SequenceProvider;

/// A reference genome opened from disk with whichever provider suits the file.
pub enum Genome {
    InMemory(InMemoryGenome),
    Indexed(IndexedGenome),
}

impl Genome {
    ///
    /// Gzipped FASTA files are loaded into memory; plain files are
    /// memory-mapped and accessed through their `.fai` index.
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if is_gzipped(path) {
            Ok(Genome::InMemory(InMemoryGenome::from_fasta(path)?))
        } else {
            Ok(Genome::Indexed(IndexedGenome::open(path)?))
        }
    }
}

impl SequenceProvider for Genome {
    fn sequence_from_coords(&self, chrom: &str, start: i64, end: i64) -> Option<String> {
        match self {
            Genome::InMemory(g) => g.sequence_from_coords(chrom, start, end),
            Genome::Indexed(g) => g.sequence_from_coords(chrom, start, end),
        }
    }

    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        match self {
            Genome::InMemory(g) => g.chrom_len(chrom),
            Genome::Indexed(g) => g.chrom_len(chrom),
        }
    }
}
