use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use hedgehog_genome::Genome;
use hedgehog_variants::output::labels_path;
use hedgehog_variants::{BatchConfig, process_variants, read_loci_table, write_fasta_pair, write_labels};

/// The config file, if any, with command line overrides applied.
pub fn batch_config_from_matches(matches: &ArgMatches) -> Result<BatchConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => BatchConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => BatchConfig::default(),
    };

    if let Some(seq_len) = matches.get_one::<usize>("seq-len") {
        config.seq_len = *seq_len;
    }
    if let Some(anchor) = matches.get_one::<String>("anchor") {
        config.anchor_base = anchor.clone();
    }
    if matches.get_flag("no-boundary-filter") {
        config.skip_boundary = false;
    }
    if matches.get_flag("no-labels") {
        config.write_labels = false;
    }
    config.anchor()?;
    Ok(config)
}

pub fn run_cpg_fasta(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to the variant table is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("An output prefix is required.")?;
    let genome = matches
        .get_one::<String>("genome")
        .context("A path to the reference genome is required.")?;

    let config = batch_config_from_matches(matches)?;
    info!(
        "seq_len = {}, anchor = {}, boundary filter = {}",
        config.seq_len, config.anchor_base, config.skip_boundary
    );

    let table = read_loci_table(input, &config)?;
    let genome = Genome::open(genome)?;

    let batch = process_variants(&table, &genome, &config)?;
    batch.stats.log_summary();

    write_fasta_pair(&batch.records, output, config.seq_len)?;
    if config.write_labels {
        let labels = labels_path(output);
        write_labels(&batch.records, &labels)?;
        info!("Wrote labels to {}", labels.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    use crate::cpg_fasta::cli::create_cpg_fasta_cli;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["cpg-fasta", "-i", "in.tsv", "-o", "out", "-g", "g.fa"];
        argv.extend_from_slice(args);
        create_cpg_fasta_cli().try_get_matches_from(argv).unwrap()
    }

    #[rstest]
    fn test_defaults() {
        assert_eq!(batch_config_from_matches(&matches(&[])).unwrap(), BatchConfig::default());
    }

    #[rstest]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let toml = dir.path().join("batch.toml");
        fs::write(&toml, "seq_len = 1000\nanchor_base = \"G\"\nwrite_labels = true\n").unwrap();

        let config = batch_config_from_matches(&matches(&[
            "--config",
            toml.to_str().unwrap(),
            "--seq-len",
            "64",
            "--no-labels",
            "--no-boundary-filter",
        ]))
        .unwrap();

        assert_eq!(config.seq_len, 64);
        assert_eq!(config.anchor_base, "G");
        assert!(!config.write_labels);
        assert!(!config.skip_boundary);
    }

    #[rstest]
    fn test_bad_anchor() {
        assert!(batch_config_from_matches(&matches(&["--anchor", "CG"])).is_err());
    }
}
