use ndarray::Array2;

/// Column order of the one-hot encoding.
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Value every column takes for a base outside A, C, G, T.
pub const UNKNOWN_VALUE: f32 = 1.0 / BASES.len() as f32;

fn column(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// One-hot encode `seq` as an `(L, 4)` matrix. Case-insensitive; `N` and any
/// other symbol become `0.25` in every column.
pub fn one_hot(seq: &[u8]) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros((seq.len(), BASES.len()));
    for (i, &base) in seq.iter().enumerate() {
        match column(base) {
            Some(c) => out[[i, c]] = 1.0,
            None => out.row_mut(i).fill(UNKNOWN_VALUE),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_one_hot() {
        let encoded = one_hot(b"AcGtN");
        assert_eq!(
            encoded,
            array![
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
                [0.25, 0.25, 0.25, 0.25],
            ]
        );
    }

    #[rstest]
    fn test_empty() {
        assert_eq!(one_hot(b"").dim(), (0, 4));
    }
}
