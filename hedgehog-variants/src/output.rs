use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;

use hedgehog_core::utils::ensure_parent_dir;

use crate::batch::VariantRecord;
use crate::consts::{LABELS_HEADER, LABELS_SUFFIX};

/// Paths of the paired reference/alternate FASTA files of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FastaPair {
    pub refs: PathBuf,
    pub alts: PathBuf,
}

/// Flank tag used in output names: `pm1kb` for 2048bp windows, `pm{n}bp`
/// when the half-width isn't a whole number of kb.
pub fn window_tag(seq_len: usize) -> String {
    let half = seq_len / 2;
    if half > 0 && half % 1024 == 0 {
        format!("pm{}kb", half / 1024)
    } else {
        format!("pm{}bp", half)
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Where [`write_fasta_pair`] puts its output for `prefix`.
pub fn fasta_pair_paths<P: AsRef<Path>>(prefix: P, seq_len: usize) -> FastaPair {
    let prefix = prefix.as_ref();
    let tag = window_tag(seq_len);
    FastaPair {
        refs: with_suffix(prefix, &format!(".refs.{}.seqlen={}.fasta", tag, seq_len)),
        alts: with_suffix(prefix, &format!(".alts.{}.seqlen={}.fasta", tag, seq_len)),
    }
}

/// Where [`write_labels`] puts its output for `prefix`.
pub fn labels_path<P: AsRef<Path>>(prefix: P) -> PathBuf {
    with_suffix(prefix.as_ref(), &format!(".{}", LABELS_SUFFIX))
}

fn write_fasta<'a, I>(path: &Path, entries: I, seq_len: usize, tag: &str) -> Result<()>
where
    I: Iterator<Item = (&'a VariantRecord, &'a str)>,
{
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for (record, seq) in entries {
        if seq.len() != seq_len {
            bail!(
                "Sequence for {}_{} has length {}, expected {}",
                record.locus,
                record.variant,
                seq.len(),
                seq_len
            );
        }
        writeln!(writer, ">{}_{}_{}", record.locus, record.variant, tag)?;
        writeln!(writer, "{}", seq)?;
    }

    writer.flush()?;
    Ok(())
}

///
/// Write the reference and alternate sequences of a batch as two FASTA
/// files, one header and one sequence line per record, in record order.
///
/// # Arguments
/// - records: resolved variants
/// - prefix: output path prefix
/// - seq_len: every sequence must have exactly this length
///
pub fn write_fasta_pair<P: AsRef<Path>>(
    records: &[VariantRecord],
    prefix: P,
    seq_len: usize,
) -> Result<FastaPair> {
    let paths = fasta_pair_paths(prefix, seq_len);

    write_fasta(
        &paths.refs,
        records.iter().map(|r| (r, r.reference.as_str())),
        seq_len,
        "ref",
    )?;
    write_fasta(
        &paths.alts,
        records.iter().map(|r| (r, r.alternate.as_str())),
        seq_len,
        "alt",
    )?;

    info!(
        "Wrote {} sequence pairs to {} and {}",
        records.len(),
        paths.refs.display(),
        paths.alts.display()
    );
    Ok(paths)
}

/// Write one TSV row per record: locus, whether the window had `N`s, the
/// variant and how it was resolved.
pub fn write_labels<P: AsRef<Path>>(records: &[VariantRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
    );

    writeln!(writer, "{}", LABELS_HEADER)?;
    for r in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            r.locus, r.contains_unk, r.variant, r.case
        )?;
    }
    writer.flush()?;
    Ok(())
}
