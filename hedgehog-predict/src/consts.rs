pub const PATH_PLACEHOLDER: &str = "<PATH>";

pub const PREDICTION_KEY: &str = "prediction";
pub const INPUT_PATH_KEY: &str = "input_path";
pub const OUTPUT_DIR_KEY: &str = "output_dir";

pub const ANALYZE_KEY: &str = "analyze_sequences";
pub const TRAINED_MODEL_KEY: &str = "trained_model_path";
pub const USE_CUDA_KEY: &str = "use_cuda";
