mod cpg_fasta;
mod encode;
mod index;
mod predict_config;

use clap::{ArgAction, ArgMatches, Command, arg};
use log::{Level, error};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "hedgehog";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Build reference/alternate sequence pairs around CpG loci and prepare them for sequence models.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Log debug messages")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(cpg_fasta::cli::create_cpg_fasta_cli())
        .subcommand(index::cli::create_index_cli())
        .subcommand(encode::cli::create_encode_cli())
        .subcommand(predict_config::cli::create_predict_config_cli())
}

fn dispatch(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        //
        // CPG FASTA PAIRS
        //
        Some((cpg_fasta::cli::CPG_FASTA_CMD, matches)) => cpg_fasta::handlers::run_cpg_fasta(matches),

        //
        // FASTA INDEX
        //
        Some((index::cli::INDEX_CMD, matches)) => index::handlers::run_index(matches),

        //
        // ONE-HOT ENCODING
        //
        Some((encode::cli::ENCODE_CMD, matches)) => encode::handlers::run_encode(matches),

        //
        // PREDICTION CONFIG
        //
        Some((predict_config::cli::PREDICT_CONFIG_CMD, matches)) => {
            predict_config::handlers::run_predict_config(matches)
        }

        _ => unreachable!("Subcommand not found"),
    }
}

fn main() {
    let matches = build_parser().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::Debug
    } else {
        Level::Info
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    if let Err(e) = dispatch(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
