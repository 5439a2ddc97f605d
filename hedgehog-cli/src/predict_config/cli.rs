use clap::{ArgAction, Command, arg};

pub const PREDICT_CONFIG_CMD: &str = "predict-config";

pub fn create_predict_config_cli() -> Command {
    Command::new(PREDICT_CONFIG_CMD)
        .about("Resolve a prediction YAML for a FASTA file and write it to the output directory.")
        .arg(arg!(--yaml <yaml> "Prediction config template").required(true))
        .arg(arg!(--fasta <fasta> "Sequences to predict on").required(true))
        .arg(arg!(--"output-dir" <dir> "Directory for the resolved config and predictions").required(true))
        .arg(arg!(--"model-dir" <dir> "Directory substituted for <PATH> (defaults to the YAML's directory)"))
        .arg(arg!(--cuda "Set analyze_sequences.use_cuda").action(ArgAction::SetTrue))
}
