use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use thiserror::Error;

use hedgehog_core::{Locus, Variant, Window};
use hedgehog_genome::SequenceProvider;

use crate::bed::LociTable;
use crate::config::{BatchConfig, BatchConfigError};
use crate::consts::ANCHOR_MISMATCH_LOG_EVERY;
use crate::substitution::{CaseLabel, MismatchCounter, SubstitutionError, SubstitutionResolver};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Sequence length must be even and non-zero, got {0}")]
    OddSequenceLength(usize),

    #[error("Substitution check failed at locus {locus} for variant {variant}")]
    PostCondition {
        locus: String,
        variant: String,
        #[source]
        source: SubstitutionError,
    },

    #[error(transparent)]
    Config(#[from] BatchConfigError),
}

/// One resolved (locus, variant) pair, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub locus: Locus,
    pub variant: Variant,
    pub contains_unk: bool,
    pub case: CaseLabel,
    pub reference: String,
    pub alternate: String,
}

/// What happened to the loci and variants of a batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchStats {
    pub loci: usize,
    /// loci whose fetched window was missing or had the wrong length
    pub skipped_length: usize,
    /// loci whose centre base wasn't the anchor
    pub anchor_mismatches: usize,
    /// variants handed to the resolver
    pub variants: usize,
    pub out_of_window: usize,
    pub unsupported_alleles: usize,
    /// variants whose reference and alternate alleles are the same
    pub identical_alleles: usize,
    pub labels: MismatchCounter,
}

impl BatchStats {
    pub fn nomatch_proportion(&self) -> f64 {
        self.labels.nomatch_proportion()
    }

    /// Loci dropped at the anchor check per variant resolved.
    pub fn anchor_mismatch_ratio(&self) -> f64 {
        if self.variants == 0 {
            return 0.0;
        }
        self.anchor_mismatches as f64 / self.variants as f64
    }

    pub fn log_summary(&self) {
        info!(
            "Loci: {} seen, {} skipped (length), {} skipped (anchor)",
            self.loci, self.skipped_length, self.anchor_mismatches
        );
        info!(
            "Variants: {} resolved, {} outside window, {} unsupported alleles, {} with ref == alt",
            self.variants, self.out_of_window, self.unsupported_alleles, self.identical_alleles
        );
        info!("Substitution cases: {}", self.labels);
        info!(
            "Nomatch proportion: {:.4}, anchor-skipped loci per variant: {:.4}",
            self.nomatch_proportion(),
            self.anchor_mismatch_ratio()
        );
    }
}

#[derive(Debug, Default)]
pub struct BatchOutput {
    pub records: Vec<VariantRecord>,
    pub stats: BatchStats,
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message("Resolving variants");
    pb
}

///
/// Fetch one window per locus and resolve every variant grouped under it.
///
/// Loci are skipped (and counted) when the genome can't serve a window of
/// exactly `config.seq_len` bases or when the base at `seq_len / 2 - 1` is
/// not the configured anchor. Variants resolving to `nomatch`, falling
/// outside the window or carrying alleles that can't be substituted are
/// skipped and counted. A failed post-substitution check aborts the batch.
///
/// # Arguments
/// - table: loci and their variants
/// - genome: reference sequence provider
/// - config: window length and anchor base
///
pub fn process_variants<G: SequenceProvider + ?Sized>(
    table: &LociTable,
    genome: &G,
    config: &BatchConfig,
) -> Result<BatchOutput, BatchError> {
    let seq_len = config.seq_len;
    if seq_len == 0 || seq_len % 2 != 0 {
        return Err(BatchError::OddSequenceLength(seq_len));
    }
    let anchor = config.anchor()?;

    let mut records = Vec::new();
    let mut stats = BatchStats::default();
    let mut resolver = SubstitutionResolver::new();
    let pb = progress_bar(table.num_loci());

    for (locus, variants) in &table.loci {
        pb.inc(1);
        stats.loci += 1;

        let (start, end) = locus.window_bounds(seq_len);
        let sequence = match genome.sequence_from_coords(&locus.chrom, start, end) {
            Some(seq) if seq.len() == seq_len => seq,
            other => {
                warn!(
                    "Skipping: ({} {}), seq len = {}",
                    locus.chrom,
                    locus.pos,
                    other.map_or(0, |s| s.len())
                );
                stats.skipped_length += 1;
                continue;
            }
        };
        let window = Window::new(locus.clone(), sequence);

        if window.anchor_base() != Some(anchor) {
            stats.anchor_mismatches += 1;
            if stats.anchor_mismatches % ANCHOR_MISMATCH_LOG_EVERY == 0 {
                warn!(
                    "Anchor mismatches: {}, last observed {}",
                    stats.anchor_mismatches,
                    window.anchor_base().map_or('?', char::from)
                );
            }
            continue;
        }
        let contains_unk = window.contains_unknown();

        for variant in variants {
            stats.variants += 1;
            match resolver.resolve(&window, variant) {
                Ok(sub) => {
                    if let (Some(reference), Some(alternate)) = (sub.reference, sub.alternate) {
                        records.push(VariantRecord {
                            locus: locus.clone(),
                            variant: variant.clone(),
                            contains_unk,
                            case: sub.case,
                            reference,
                            alternate,
                        });
                    }
                }
                Err(e @ SubstitutionError::OutOfWindow { .. }) => {
                    debug!("{}", e);
                    stats.out_of_window += 1;
                }
                Err(e @ SubstitutionError::UnsupportedAllele { .. }) => {
                    warn!("{}", e);
                    stats.unsupported_alleles += 1;
                }
                Err(e @ SubstitutionError::IdenticalAlleles { .. }) => {
                    warn!("{}", e);
                    stats.identical_alleles += 1;
                }
                Err(e @ SubstitutionError::PostCondition { .. }) => {
                    pb.abandon();
                    return Err(BatchError::PostCondition {
                        locus: locus.to_string(),
                        variant: variant.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
    pb.finish_and_clear();

    stats.labels = resolver.into_counter();
    Ok(BatchOutput { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use hedgehog_genome::InMemoryGenome;
    use pretty_assertions::assert_eq;
    use rstest::*;

    // 1-based position p sits at index p - 1
    const CHR1: &str = "AAAAAAAAAAAAAAAAAAAAtttttttttaCGttttttttgggggggggg";

    #[fixture]
    fn genome() -> InMemoryGenome {
        InMemoryGenome::from_sequences([("chr1", CHR1), ("chr2", "ACGTACGT")]).unwrap()
    }

    #[fixture]
    fn config() -> BatchConfig {
        BatchConfig {
            seq_len: 20,
            ..BatchConfig::default()
        }
    }

    fn table(entries: Vec<(Locus, Vec<&str>)>) -> LociTable {
        let loci: Vec<(Locus, BTreeSet<Variant>)> = entries
            .into_iter()
            .map(|(l, vs)| (l, vs.into_iter().map(|v| v.parse().unwrap()).collect()))
            .collect();
        LociTable {
            rows: loci.iter().map(|(_, v)| v.len()).sum(),
            loci,
            skipped_boundary: 0,
        }
    }

    #[rstest]
    fn test_resolves_variants_around_anchor(genome: InMemoryGenome, config: BatchConfig) {
        // window [21, 41) around 31; anchor at index 30 is 'C'
        let t = table(vec![(
            Locus::new("chr1", 31),
            vec![
                "chr1_31_rs1_C_T",  // match
                "chr1_22_rs2_A_G",  // complement (observed t)
                "chr1_40_rs3_G_C",  // nomatch (observed t)
                "chr1_99_rs4_G_A",  // outside window
                "chr1_32_rs5_C_G",  // swap (observed G)
            ],
        )]);

        let out = process_variants(&t, &genome, &config).unwrap();

        let cases: Vec<(String, CaseLabel)> = out
            .records
            .iter()
            .map(|r| (r.variant.to_string(), r.case))
            .collect();
        assert_eq!(
            cases,
            vec![
                ("chr1_22_rs2_A_G".to_string(), CaseLabel::Complement),
                ("chr1_31_rs1_C_T".to_string(), CaseLabel::Match),
                ("chr1_32_rs5_C_G".to_string(), CaseLabel::Swap),
            ]
        );

        let window = &CHR1[21..41];
        for r in &out.records {
            assert_eq!(r.reference.len(), 20);
            assert_eq!(r.alternate.len(), 20);
            assert!(!r.contains_unk);
            assert!(r.reference == window || r.alternate == window);
        }

        assert_eq!(out.stats.variants, 5);
        assert_eq!(out.stats.out_of_window, 1);
        assert_eq!(out.stats.labels.total(), 4);
        assert_eq!(out.stats.labels.count(CaseLabel::NoMatch), 1);
        assert_eq!(out.stats.nomatch_proportion(), 0.25);
    }

    #[rstest]
    fn test_skips_short_windows_and_wrong_anchor(genome: InMemoryGenome, config: BatchConfig) {
        let t = table(vec![
            (Locus::new("chr1", 5), vec!["chr1_5_rs1_A_T"]),
            (Locus::new("chr2", 4), vec!["chr2_4_rs2_T_C"]),
            (Locus::new("chrX", 100), vec!["chrX_100_rs3_A_T"]),
            (Locus::new("chr1", 25), vec!["chr1_25_rs4_T_C"]),
        ]);

        let out = process_variants(&t, &genome, &config).unwrap();

        assert!(out.records.is_empty());
        assert_eq!(out.stats.loci, 4);
        assert_eq!(out.stats.skipped_length, 3);
        assert_eq!(out.stats.anchor_mismatches, 1);
        assert_eq!(out.stats.variants, 0);
        assert_eq!(out.stats.anchor_mismatch_ratio(), 0.0);
    }

    #[rstest]
    fn test_custom_anchor(genome: InMemoryGenome) {
        // window around 25 is [15, 35); index 24 is 't'
        let config = BatchConfig {
            seq_len: 20,
            anchor_base: "T".to_string(),
            ..BatchConfig::default()
        };
        let t = table(vec![(Locus::new("chr1", 25), vec!["chr1_25_rs1_T_C"])]);

        let out = process_variants(&t, &genome, &config).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].alternate.as_bytes()[9], b'C');
    }

    #[rstest]
    fn test_window_with_n_is_flagged() {
        let genome = InMemoryGenome::from_sequences([("chr1", "NNNNACGTAC")]).unwrap();
        // window [2, 8) is "NNACGT", centre base 'A'
        let config = BatchConfig {
            seq_len: 6,
            anchor_base: "A".to_string(),
            ..BatchConfig::default()
        };
        let t = table(vec![(Locus::new("chr1", 5), vec!["chr1_5_rs1_A_G"])]);

        let out = process_variants(&t, &genome, &config).unwrap();
        assert_eq!(out.records.len(), 1);
        assert!(out.records[0].contains_unk);
    }

    #[rstest]
    fn test_unsupported_allele_is_counted(genome: InMemoryGenome, config: BatchConfig) {
        let t = table(vec![(Locus::new("chr1", 31), vec!["chr1_31_rs1_C_CT"])]);

        let out = process_variants(&t, &genome, &config).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.stats.unsupported_alleles, 1);
    }

    #[rstest]
    fn test_identical_alleles_are_counted(genome: InMemoryGenome, config: BatchConfig) {
        let t = table(vec![(
            Locus::new("chr1", 31),
            vec!["chr1_31_rs1_C_C", "chr1_31_rs2_C_T"],
        )]);

        let out = process_variants(&t, &genome, &config).unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].variant.to_string(), "chr1_31_rs2_C_T");
        assert_ne!(out.records[0].reference, out.records[0].alternate);
        assert_eq!(out.stats.identical_alleles, 1);
        assert_eq!(out.stats.labels.total(), 1);
    }

    #[rstest]
    #[case(0)]
    #[case(21)]
    fn test_odd_seq_len_rejected(genome: InMemoryGenome, #[case] seq_len: usize) {
        let config = BatchConfig {
            seq_len,
            ..BatchConfig::default()
        };
        let result = process_variants(&LociTable::default(), &genome, &config);
        assert!(matches!(result, Err(BatchError::OddSequenceLength(_))));
    }
}
