use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Sequence '{name}' has length {found}, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Packed data holds {rows} positions, fewer than the requested {seq_len}")]
    PackedTooShort { rows: usize, seq_len: usize },

    #[error("Cannot crop {seq_len} positions out of {data_len}")]
    CropTooLarge { data_len: usize, seq_len: usize },

    #[error("Expected 4 columns (A, C, G, T), found {0}")]
    ColumnCount(usize),

    #[error("No sequences to encode")]
    Empty,

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Npy(#[from] ndarray_npy::WriteNpyError),
}

pub type Result<T> = std::result::Result<T, EncodingError>;
