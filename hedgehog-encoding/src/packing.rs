use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, s, stack};

use crate::error::{EncodingError, Result};
use crate::onehot::{BASES, UNKNOWN_VALUE, one_hot};

const BITS: usize = 8;

#[inline]
fn bit_mask(row: usize) -> u8 {
    0x80 >> (row % BITS)
}

fn check_columns(cols: usize) -> Result<()> {
    if cols != BASES.len() {
        return Err(EncodingError::ColumnCount(cols));
    }
    Ok(())
}

///
/// Pack an `(L, 4)` one-hot matrix into `(ceil(L / 8), 4)` bytes.
///
/// Each column is packed independently along the sequence axis, most
/// significant bit first. Any positive value sets its bit, so unknown
/// bases (`0.25` everywhere) pack to four set bits.
///
pub fn pack(one_hot: ArrayView2<f32>) -> Result<Array2<u8>> {
    let (len, cols) = one_hot.dim();
    check_columns(cols)?;

    let mut packed = Array2::<u8>::zeros((len.div_ceil(BITS), cols));
    for ((row, col), &value) in one_hot.indexed_iter() {
        if value > 0.0 {
            packed[[row / BITS, col]] |= bit_mask(row);
        }
    }
    Ok(packed)
}

///
/// Inverse of [`pack`], truncated to the first `seq_len` positions.
///
/// Rows with all four bits set come back as `0.25` in every column.
///
pub fn unpack(packed: ArrayView2<u8>, seq_len: usize) -> Result<Array2<f32>> {
    let (rows, cols) = packed.dim();
    check_columns(cols)?;
    if rows * BITS < seq_len {
        return Err(EncodingError::PackedTooShort {
            rows: rows * BITS,
            seq_len,
        });
    }

    let mut out = Array2::<f32>::zeros((seq_len, cols));
    for row in 0..seq_len {
        let mask = bit_mask(row);
        let packed_row = packed.row(row / BITS);
        if packed_row.iter().all(|&b| b & mask != 0) {
            out.row_mut(row).fill(UNKNOWN_VALUE);
            continue;
        }
        for (col, &b) in packed_row.iter().enumerate() {
            if b & mask != 0 {
                out[[row, col]] = 1.0;
            }
        }
    }
    Ok(out)
}

/// One-hot encode and pack equal-length sequences into `(n, ceil(L / 8), 4)`.
pub fn pack_batch<'a, I>(records: I) -> Result<Array3<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut expected = None;
    let mut packed = Vec::new();
    for (name, seq) in records {
        let expected = *expected.get_or_insert(seq.len());
        if seq.len() != expected {
            return Err(EncodingError::LengthMismatch {
                name: name.to_string(),
                expected,
                found: seq.len(),
            });
        }
        packed.push(pack(one_hot(seq).view())?);
    }
    if packed.is_empty() {
        return Err(EncodingError::Empty);
    }

    let views: Vec<ArrayView2<u8>> = packed.iter().map(|p| p.view()).collect();
    Ok(stack(Axis(0), &views)?)
}

/// Unpack every sequence of a `(n, ceil(L / 8), 4)` dataset.
pub fn unpack_batch(packed: ArrayView3<u8>, seq_len: usize) -> Result<Array3<f32>> {
    if packed.len_of(Axis(0)) == 0 {
        return Err(EncodingError::Empty);
    }
    let unpacked = packed
        .outer_iter()
        .map(|p| unpack(p, seq_len))
        .collect::<Result<Vec<_>>>()?;
    let views: Vec<ArrayView2<f32>> = unpacked.iter().map(|u| u.view()).collect();
    Ok(stack(Axis(0), &views)?)
}

/// Row range `[start, end)` of the centred `seq_len` window in `data_len` rows.
pub fn center_crop_bounds(data_len: usize, seq_len: usize) -> Result<(usize, usize)> {
    if seq_len > data_len {
        return Err(EncodingError::CropTooLarge { data_len, seq_len });
    }
    let mid = data_len / 2;
    Ok((mid - seq_len / 2, mid + seq_len.div_ceil(2)))
}

/// Keep the centred `seq_len` rows of `data`.
pub fn center_crop<A: Clone>(data: ArrayView2<A>, seq_len: usize) -> Result<Array2<A>> {
    let (start, end) = center_crop_bounds(data.nrows(), seq_len)?;
    Ok(data.slice(s![start..end, ..]).to_owned())
}
