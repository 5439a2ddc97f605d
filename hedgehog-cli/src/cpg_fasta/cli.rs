use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const CPG_FASTA_CMD: &str = "cpg-fasta";

pub fn create_cpg_fasta_cli() -> Command {
    Command::new(CPG_FASTA_CMD)
        .about("Write reference and alternate sequences for every variant around a CpG locus.")
        .arg(
            arg!(-i --input <input> "Tab-separated variant/locus table (.gz ok)")
                .required(true),
        )
        .arg(arg!(-o --output <output> "Output path prefix").required(true))
        .arg(arg!(-g --genome <genome> "Reference genome FASTA (.gz ok)").required(true))
        .arg(arg!(-c --config <config> "TOML file with batch settings"))
        .arg(
            Arg::new("seq-len")
                .long("seq-len")
                .value_parser(value_parser!(usize))
                .help("Window length around each locus (overrides config)"),
        )
        .arg(arg!(--anchor <anchor> "Base expected at seq_len / 2 - 1 (overrides config)"))
        .arg(
            arg!(--"no-boundary-filter" "Keep rows whose variant is seq_len / 2 upstream of the locus")
                .action(ArgAction::SetTrue),
        )
        .arg(arg!(--"no-labels" "Don't write the labels table").action(ArgAction::SetTrue))
}
