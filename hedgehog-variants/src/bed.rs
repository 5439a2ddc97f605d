//! Reading the table of CpG loci and the variants around them.
//!
//! One row per (variant, locus) pair, tab-separated, no header:
//!
//! ```text
//! chrom  pos  end  id  ref  alt  ...  ...  ...  locus
//! chr1   10011  10012  rs1  C  T  .  .  .  chr1_10500
//! ```
//!
//! Column 9 names the locus as `chrom_pos`. The variant is rebuilt as the
//! string `chrom_pos_id_ref_alt`, which is also its identity for
//! deduplication.
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};
use fxhash::FxHashMap;
use log::info;

use hedgehog_core::utils::get_dynamic_reader;
use hedgehog_core::{Locus, Variant};

use crate::config::BatchConfig;
use crate::consts::*;

/// Variants grouped under the locus whose window they fall in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LociTable {
    /// loci in first-seen order, each with its distinct variants (sorted)
    pub loci: Vec<(Locus, BTreeSet<Variant>)>,
    /// data rows read
    pub rows: usize,
    /// rows dropped because the variant sits exactly `seq_len / 2` upstream
    pub skipped_boundary: usize,
}

impl LociTable {
    pub fn num_loci(&self) -> usize {
        self.loci.len()
    }

    pub fn num_variants(&self) -> usize {
        self.loci.iter().map(|(_, v)| v.len()).sum()
    }

    ///
    /// Build the table from any line source.
    ///
    /// # Arguments
    /// - reader: lines of the loci table
    /// - config: supplies the window length for the boundary filter
    ///
    pub fn from_reader<R: BufRead>(reader: R, config: &BatchConfig) -> Result<Self> {
        let mut table = LociTable::default();
        let mut index: FxHashMap<Locus, usize> = FxHashMap::default();
        let half = (config.seq_len / 2) as i64;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.trim_end().split('\t').collect();
            if fields.len() <= COL_LOCUS {
                bail!(
                    "Line {}: expected at least {} columns, found {}",
                    line_no,
                    COL_LOCUS + 1,
                    fields.len()
                );
            }
            table.rows += 1;

            let variant_str = format!(
                "{}_{}_{}_{}_{}",
                fields[COL_CHROM], fields[COL_POS], fields[COL_ID], fields[COL_REF], fields[COL_ALT]
            );
            let variant: Variant = variant_str
                .parse()
                .with_context(|| format!("Line {}: malformed variant", line_no))?;
            let locus: Locus = fields[COL_LOCUS]
                .parse()
                .with_context(|| format!("Line {}: malformed locus", line_no))?;

            if config.skip_boundary && locus.pos as i64 - variant.pos as i64 == half {
                table.skipped_boundary += 1;
                continue;
            }

            let slot = *index.entry(locus.clone()).or_insert_with(|| {
                table.loci.push((locus, BTreeSet::new()));
                table.loci.len() - 1
            });
            table.loci[slot].1.insert(variant);
        }

        Ok(table)
    }
}

/// Read a (optionally gzipped) loci table from disk.
pub fn read_loci_table<P: AsRef<Path>>(path: P, config: &BatchConfig) -> Result<LociTable> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let table = LociTable::from_reader(reader, config)
        .with_context(|| format!("Failed to parse loci table {}", path.display()))?;

    info!(
        "Read {} rows: {} loci, {} distinct variants, {} skipped at the window boundary",
        table.rows,
        table.num_loci(),
        table.num_variants(),
        table.skipped_boundary
    );

    Ok(table)
}
