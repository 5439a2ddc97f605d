use anyhow::{Context, Result};
use clap::ArgMatches;

use hedgehog_encoding::encode_fasta;

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    let fasta = matches
        .get_one::<String>("fasta")
        .context("A path to a FASTA file is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("An output path is required.")?;

    encode_fasta(fasta, output)?;
    Ok(())
}
