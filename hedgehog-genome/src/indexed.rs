use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use memmap2::Mmap;

use hedgehog_core::utils::is_gzipped;

use crate::fasta::{FaiRecord, compute_fai, fai_path, read_fai, write_fai};
use crate::provider::SequenceProvider;

/// A plain-text FASTA file accessed through its `.fai` index.
///
/// The file is memory-mapped, so fetching a window touches only the pages
/// that hold it. This is the provider to use for whole human assemblies.
pub struct IndexedGenome {
    path: PathBuf,
    mmap: Mmap,
    index: HashMap<String, FaiRecord>,
}

impl IndexedGenome {
    /// Opens `path`, reading `path.fai` or computing it when absent. A
    /// freshly computed index is written next to the FASTA when possible.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if is_gzipped(path) {
            bail!(
                "Indexed access needs an uncompressed FASTA, got {}",
                path.display()
            );
        }

        let index_path = fai_path(path);
        let records = if index_path.exists() {
            read_fai(&index_path)?
        } else {
            info!("No index found, indexing {}", path.display());
            let records = compute_fai(path)?;
            if let Err(e) = write_fai(&records, &index_path) {
                warn!("Could not write index {}: {}", index_path.display(), e);
            }
            records
        };

        Self::with_index(path, records)
    }

    /// Opens `path` with an already computed index.
    pub fn with_index<P: AsRef<Path>>(path: P, records: Vec<FaiRecord>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open FASTA: {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file) }.context("Failed to memory-map FASTA file")?;

        let mut index = HashMap::with_capacity(records.len());
        for record in records {
            if record.length > 0 && (record.line_bases == 0 || record.line_bytes < record.line_bases) {
                bail!(
                    "Index entry for '{}' in {} has invalid line widths ({} bases, {} bytes)",
                    record.name,
                    path.display(),
                    record.line_bases,
                    record.line_bytes
                );
            }
            let end = record.offset + byte_span(&record, record.length);
            if end > mmap.len() as u64 {
                bail!(
                    "Index entry for '{}' runs past the end of {}; is the .fai stale?",
                    record.name,
                    path.display()
                );
            }
            index.insert(record.name.clone(), record);
        }

        Ok(IndexedGenome {
            path: path.to_path_buf(),
            mmap,
            index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

/// Bytes from the first base of a record to just past base `pos - 1`.
fn byte_span(record: &FaiRecord, pos: u64) -> u64 {
    if pos == 0 || record.line_bases == 0 {
        return 0;
    }
    let last = pos - 1;
    (last / record.line_bases) * record.line_bytes + last % record.line_bases + 1
}

impl SequenceProvider for IndexedGenome {
    fn sequence_from_coords(&self, chrom: &str, start: i64, end: i64) -> Option<String> {
        if !self.coords_in_bounds(chrom, start, end) {
            return None;
        }
        let record = self.index.get(chrom)?;
        let (start, end) = (start as u64, end as u64);
        if start == end {
            return Some(String::new());
        }

        let from = record.offset
            + (start / record.line_bases) * record.line_bytes
            + start % record.line_bases;
        let to = record.offset + byte_span(record, end);

        let bytes: Vec<u8> = self.mmap[from as usize..to as usize]
            .iter()
            .copied()
            .filter(|b| *b != b'\n' && *b != b'\r')
            .collect();

        String::from_utf8(bytes).ok()
    }

    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.index.get(chrom).map(|r| r.length)
    }
}
