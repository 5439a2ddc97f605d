use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use hedgehog_genome::fasta::fai_path;
use hedgehog_genome::{compute_fai, write_fai};

pub fn run_index(matches: &ArgMatches) -> Result<()> {
    let fasta = matches
        .get_one::<String>("fasta")
        .context("A path to a FASTA file is required.")?;

    let records = compute_fai(fasta)?;
    let fai = fai_path(fasta);
    write_fai(&records, &fai)?;

    info!("Indexed {} sequences into {}", records.len(), fai.display());
    Ok(())
}
