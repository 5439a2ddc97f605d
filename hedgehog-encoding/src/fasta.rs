use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use ndarray_npy::write_npy;

use hedgehog_genome::InMemoryGenome;

use crate::packing::pack_batch;

/// Every `(name, sequence)` of a FASTA file, in file order.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Vec<u8>)>> {
    let genome = InMemoryGenome::from_fasta(path.as_ref())?;
    Ok(genome
        .names()
        .iter()
        .filter_map(|name| genome.sequence(name).map(|seq| (name.clone(), seq.to_vec())))
        .collect())
}

///
/// Pack every sequence of `fasta` into a `(n, ceil(L / 8), 4)` `u8` array and
/// save it as `.npy` at `output`. Returns the number of sequences written.
///
pub fn encode_fasta<P: AsRef<Path>, Q: AsRef<Path>>(fasta: P, output: Q) -> Result<usize> {
    let fasta = fasta.as_ref();
    let output = output.as_ref();

    let records = read_fasta_records(fasta)?;
    let packed = pack_batch(
        records
            .iter()
            .map(|(name, seq)| (name.as_str(), seq.as_slice())),
    )
    .with_context(|| format!("Failed to encode {}", fasta.display()))?;

    hedgehog_core::utils::ensure_parent_dir(output)?;
    write_npy(output, &packed)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let (n, rows, cols) = packed.dim();
    info!(
        "Wrote {} sequences as ({}, {}, {}) to {}",
        n,
        n,
        rows,
        cols,
        output.display()
    );
    Ok(n)
}
