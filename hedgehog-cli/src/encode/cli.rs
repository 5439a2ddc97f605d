use clap::{Arg, Command, arg};

pub const ENCODE_CMD: &str = "encode";

pub fn create_encode_cli() -> Command {
    Command::new(ENCODE_CMD)
        .about("Pack the sequences of a FASTA file into a one-hot .npy array of shape (n, ceil(L / 8), 4).")
        .arg(Arg::new("fasta").required(true).help("FASTA file with equal-length sequences"))
        .arg(arg!(-o --output <output> "Destination .npy file").required(true))
}
