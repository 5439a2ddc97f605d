use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use hedgehog_predict::{load_config, prepare, resolved_config_path, set_use_cuda, write_config};

/// `--model-dir`, or the absolute directory holding the YAML.
fn model_dir(matches: &ArgMatches, yaml: &Path) -> Result<PathBuf> {
    if let Some(dir) = matches.get_one::<String>("model-dir") {
        return Ok(PathBuf::from(dir));
    }
    let yaml = yaml
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", yaml.display()))?;
    Ok(yaml
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

pub fn run_predict_config(matches: &ArgMatches) -> Result<()> {
    let yaml = matches
        .get_one::<String>("yaml")
        .context("A path to the prediction YAML is required.")?;
    let fasta = matches
        .get_one::<String>("fasta")
        .context("A path to the FASTA file is required.")?;
    let output_dir = matches
        .get_one::<String>("output-dir")
        .context("An output directory is required.")?;

    let yaml = Path::new(yaml);
    let output_dir = Path::new(output_dir);
    let model_dir = model_dir(matches, yaml)?;
    let resolved = resolved_config_path(yaml, output_dir)?;

    let config = load_config(yaml)?;
    let mut config = prepare(config, Path::new(fasta), output_dir, &model_dir)?;
    if matches.get_flag("cuda") && !set_use_cuda(&mut config, true)? {
        warn!("--cuda given but the config has no analyze_sequences section");
    }

    write_config(&config, &resolved)?;
    info!("Wrote prediction config to {}", resolved.display());
    Ok(())
}
