use clap::{Arg, Command};

pub const INDEX_CMD: &str = "index";

pub fn create_index_cli() -> Command {
    Command::new(INDEX_CMD)
        .about("Write a samtools-compatible .fai index next to an uncompressed FASTA.")
        .arg(Arg::new("fasta").required(true).help("FASTA file to index"))
}
