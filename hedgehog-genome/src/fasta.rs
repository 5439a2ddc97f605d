use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use hedgehog_core::utils::{ensure_parent_dir, is_gzipped};

/// One line of a `.fai` index: where a contig's bases start in the file and
/// how its lines are wrapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaiRecord {
    pub name: String,
    pub length: u64,
    pub offset: u64,
    pub line_bases: u64,
    pub line_bytes: u64,
}

/// Contig name from a FASTA header line: first whitespace-delimited token
/// after the `>`.
pub fn contig_name(header: &str) -> &str {
    header
        .trim_start_matches('>')
        .split_whitespace()
        .next()
        .unwrap_or("")
}

/// Conventional index path for a FASTA file (`genome.fa` -> `genome.fa.fai`).
pub fn fai_path<P: AsRef<Path>>(fasta: P) -> PathBuf {
    let mut s = fasta.as_ref().as_os_str().to_owned();
    s.push(".fai");
    PathBuf::from(s)
}

struct PendingRecord {
    name: String,
    length: u64,
    offset: u64,
    line_bases: Option<u64>,
    line_bytes: Option<u64>,
    saw_short_line: bool,
}

impl PendingRecord {
    fn finish(self) -> FaiRecord {
        FaiRecord {
            name: self.name,
            length: self.length,
            offset: self.offset,
            line_bases: self.line_bases.unwrap_or(0),
            line_bytes: self.line_bytes.unwrap_or(0),
        }
    }
}

/// Computes the FAI index of a plain-text FASTA file.
///
/// Every sequence line of a contig except the last must have the same
/// length, otherwise byte offsets cannot be derived and an error is returned.
/// Gzipped input is rejected: offsets into compressed data are meaningless.
pub fn compute_fai<T: AsRef<Path>>(file_path: T) -> Result<Vec<FaiRecord>> {
    let path = file_path.as_ref();
    if is_gzipped(path) {
        bail!("Cannot index a gzipped FASTA file: {}", path.display());
    }

    let file = File::open(path).with_context(|| format!("Failed to open FASTA: {:?}", path))?;
    let mut reader = BufReader::new(file);

    let mut results = Vec::new();
    let mut line = String::new();
    let mut byte_position: u64 = 0;
    let mut current: Option<PendingRecord> = None;
    let mut line_no = 0usize;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)? as u64;
        if bytes_read == 0 {
            break;
        }
        line_no += 1;
        byte_position += bytes_read;

        if line.starts_with('>') {
            if let Some(rec) = current.take() {
                results.push(rec.finish());
            }
            let name = contig_name(&line);
            if name.is_empty() {
                bail!(
                    "Empty sequence name at line {} of {}",
                    line_no,
                    path.display()
                );
            }
            current = Some(PendingRecord {
                name: name.to_string(),
                length: 0,
                offset: byte_position,
                line_bases: None,
                line_bytes: None,
                saw_short_line: false,
            });
            continue;
        }

        let Some(rec) = current.as_mut() else {
            continue;
        };

        let bases = line.trim_end().len() as u64;
        if bases == 0 {
            continue;
        }

        if rec.saw_short_line {
            bail!(
                "Different line length in sequence '{}' at line {} of {}",
                rec.name,
                line_no,
                path.display()
            );
        }

        match rec.line_bases {
            None => {
                rec.line_bases = Some(bases);
                rec.line_bytes = Some(bytes_read);
            }
            Some(expected) if bases > expected => bail!(
                "Different line length in sequence '{}' at line {} of {}",
                rec.name,
                line_no,
                path.display()
            ),
            Some(expected) if bases < expected => rec.saw_short_line = true,
            Some(_) => {}
        }

        rec.length += bases;
    }

    if let Some(rec) = current.take() {
        results.push(rec.finish());
    }

    Ok(results)
}

/// Writes FAI records in the standard five-column samtools layout.
pub fn write_fai<P: AsRef<Path>>(records: &[FaiRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("Failed to create index: {:?}", path))?,
    );
    for r in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            r.name, r.length, r.offset, r.line_bases, r.line_bytes
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a `.fai` index.
pub fn read_fai<P: AsRef<Path>>(path: P) -> Result<Vec<FaiRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open index: {:?}", path))?,
    );

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            bail!("Malformed .fai line {} in {}: {}", i + 1, path.display(), line);
        }
        let parse = |s: &str| -> Result<u64> {
            s.parse::<u64>()
                .with_context(|| format!("Invalid number '{}' on .fai line {}", s, i + 1))
        };
        records.push(FaiRecord {
            name: fields[0].to_string(),
            length: parse(fields[1])?,
            offset: parse(fields[2])?,
            line_bases: parse(fields[3])?,
            line_bytes: parse(fields[4])?,
        });
    }
    Ok(records)
}
