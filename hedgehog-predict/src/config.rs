use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_yaml::{Mapping, Value};

use crate::consts::*;
use crate::errors::{PredictConfigError, Result};

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn untag_mut(value: &mut Value) -> &mut Value {
    match value {
        Value::Tagged(tagged) => untag_mut(&mut tagged.value),
        other => other,
    }
}

/// Mapping under `key`, created when missing.
fn child_mapping<'a>(parent: &'a mut Value, key: &str) -> Result<&'a mut Mapping> {
    let map = untag_mut(parent)
        .as_mapping_mut()
        .ok_or_else(|| PredictConfigError::NotAMapping("<root>".to_string()))?;
    let child = map
        .entry(Value::String(key.to_string()))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    untag_mut(child)
        .as_mapping_mut()
        .ok_or_else(|| PredictConfigError::NotAMapping(key.to_string()))
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| PredictConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| PredictConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_config<P: AsRef<Path>>(config: &Value, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_yaml::to_string(config).map_err(|source| PredictConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| PredictConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

///
/// Replace `placeholder` with `replacement` in every string leaf, walking
/// mappings, sequences and tagged values. Keys are left alone.
///
/// Returns the number of strings changed.
///
pub fn substitute_placeholder(value: &mut Value, placeholder: &str, replacement: &str) -> usize {
    match value {
        Value::String(s) if s.contains(placeholder) => {
            *s = s.replace(placeholder, replacement);
            1
        }
        Value::Sequence(items) => items
            .iter_mut()
            .map(|v| substitute_placeholder(v, placeholder, replacement))
            .sum(),
        Value::Mapping(map) => map
            .iter_mut()
            .map(|(_, v)| substitute_placeholder(v, placeholder, replacement))
            .sum(),
        Value::Tagged(tagged) => substitute_placeholder(&mut tagged.value, placeholder, replacement),
        _ => 0,
    }
}

/// `analyze_sequences.trained_model_path`, if the config names one.
pub fn trained_model_path(config: &Value) -> Option<&str> {
    let analyze = untag(untag(config).get(ANALYZE_KEY)?);
    untag(analyze.get(TRAINED_MODEL_KEY)?).as_str()
}

/// Set `analyze_sequences.use_cuda`. Configs without an `analyze_sequences`
/// section are left untouched; returns whether the flag was written.
pub fn set_use_cuda(config: &mut Value, use_cuda: bool) -> Result<bool> {
    let Some(analyze) = untag_mut(config)
        .as_mapping_mut()
        .and_then(|map| map.get_mut(ANALYZE_KEY))
    else {
        return Ok(false);
    };
    let analyze = untag_mut(analyze)
        .as_mapping_mut()
        .ok_or_else(|| PredictConfigError::NotAMapping(ANALYZE_KEY.to_string()))?;
    analyze.insert(Value::String(USE_CUDA_KEY.to_string()), Value::Bool(use_cuda));
    Ok(true)
}

///
/// Resolve a prediction config for one FASTA file.
///
/// `<PATH>` is replaced with `model_dir` everywhere, then
/// `prediction.input_path` and `prediction.output_dir` are set, creating the
/// `prediction` section if needed. `output_dir` is created.
///
/// # Arguments
/// - config: the loaded YAML config
/// - fasta: sequences to predict on
/// - output_dir: where the model runner writes its results
/// - model_dir: directory the `<PATH>` placeholder stands for
///
pub fn prepare(
    mut config: Value,
    fasta: &Path,
    output_dir: &Path,
    model_dir: &Path,
) -> Result<Value> {
    fs::create_dir_all(output_dir).map_err(|source| PredictConfigError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let replaced = substitute_placeholder(
        &mut config,
        PATH_PLACEHOLDER,
        &model_dir.to_string_lossy(),
    );
    debug!("Replaced {} {} placeholders", replaced, PATH_PLACEHOLDER);

    let prediction = child_mapping(&mut config, PREDICTION_KEY)?;
    prediction.insert(Value::String(INPUT_PATH_KEY.to_string()), path_value(fasta));
    prediction.insert(Value::String(OUTPUT_DIR_KEY.to_string()), path_value(output_dir));

    if let Some(model) = trained_model_path(&config) {
        info!("Trained model: {}", model);
    }
    Ok(config)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Where the resolved copy of `yaml` goes inside `output_dir`. Fails when
/// that is the template itself.
pub fn resolved_config_path(yaml: &Path, output_dir: &Path) -> Result<PathBuf> {
    let resolved = match yaml.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("config.yml"),
    };
    if same_file(yaml, &resolved) {
        return Err(PredictConfigError::OverwritesTemplate(resolved));
    }
    Ok(resolved)
}
