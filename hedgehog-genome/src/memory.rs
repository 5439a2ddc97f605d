use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Result, bail};
use log::info;

use hedgehog_core::utils::get_dynamic_reader;

use crate::fasta::contig_name;
use crate::provider::SequenceProvider;

/// Whole-genome FASTA held in memory, one byte vector per contig.
///
/// Works for gzipped input, which [`IndexedGenome`](crate::IndexedGenome) cannot serve.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGenome {
    sequences: HashMap<String, Vec<u8>>,
    names: Vec<String>,
}

impl InMemoryGenome {
    /// Loads every sequence of a FASTA file (plain or `.gz`).
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading FASTA into memory: {}", path.display());

        let mut reader = get_dynamic_reader(path)?;
        let mut genome = InMemoryGenome::default();
        let mut line = String::new();
        let mut current: Option<(String, Vec<u8>)> = None;

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            if line.starts_with('>') {
                if let Some((name, seq)) = current.take() {
                    genome.insert(name, seq)?;
                }
                current = Some((contig_name(&line).to_string(), Vec::new()));
            } else if let Some((_, seq)) = current.as_mut() {
                seq.extend_from_slice(line.trim_end().as_bytes());
            }
        }

        if let Some((name, seq)) = current.take() {
            genome.insert(name, seq)?;
        }

        info!("Loaded {} sequences", genome.names.len());
        Ok(genome)
    }

    /// Builds a genome from `(name, sequence)` pairs.
    pub fn from_sequences<I, S, T>(sequences: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<[u8]>,
    {
        let mut genome = InMemoryGenome::default();
        for (name, seq) in sequences {
            genome.insert(name.into(), seq.as_ref().to_vec())?;
        }
        Ok(genome)
    }

    fn insert(&mut self, name: String, seq: Vec<u8>) -> Result<()> {
        if self.sequences.contains_key(&name) {
            bail!("Duplicate sequence name in FASTA: {}", name);
        }
        self.names.push(name.clone());
        self.sequences.insert(name, seq);
        Ok(())
    }

    /// Contig names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Full sequence of a contig.
    pub fn sequence(&self, name: &str) -> Option<&[u8]> {
        self.sequences.get(name).map(Vec::as_slice)
    }
}

impl SequenceProvider for InMemoryGenome {
    fn sequence_from_coords(&self, chrom: &str, start: i64, end: i64) -> Option<String> {
        if !self.coords_in_bounds(chrom, start, end) {
            return None;
        }
        let seq = self.sequences.get(chrom)?;
        let bytes = &seq[start as usize..end as usize];
        String::from_utf8(bytes.to_vec()).ok()
    }

    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.sequences.get(chrom).map(|s| s.len() as u64)
    }
}
