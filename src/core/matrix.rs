// src/core/matrix.rs

use crate::core::dataset::ElementValues;
use crate::core::element::Element;
use crate::core::value::ValueType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    #[error("payload holds {len} values, expected {rows}x{cols}")]
    LengthMismatch { len: usize, rows: usize, cols: usize },

    #[error("row {row} holds {len} values, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("row {row} stores {found} values, expected {expected}")]
    MixedTypes {
        row: usize,
        expected: ValueType,
        found: ValueType,
    },

    #[error("payload has no rows")]
    Empty,
}

/// Transposes a rectangular matrix so that `result[y][x] == input[x][y]`.
///
/// Always allocates a new matrix; the input is left untouched. An empty input
/// (no rows, or rows of zero width) is returned unchanged rather than treated
/// as an error. Ragged input is a contract violation on the caller's side --
/// rectangularity is guaranteed by [`from_flat`] and [`from_ragged`].
pub fn transpose<T: Copy>(matrix: &[Vec<T>]) -> Vec<Vec<T>> {
    if matrix.is_empty() || matrix[0].is_empty() {
        return matrix.to_vec();
    }

    let width = matrix.len();
    let height = matrix[0].len();

    let mut transposed = vec![Vec::with_capacity(width); height];
    for row in matrix.iter().take(width) {
        for (y, value) in row.iter().enumerate().take(height) {
            transposed[y].push(*value);
        }
    }
    transposed
}

/// Chunks a row-major flat buffer into a `rows x cols` matrix.
pub fn from_flat<T: Copy>(values: &[T], rows: usize, cols: usize) -> Result<Vec<Vec<T>>, MatrixError> {
    if values.len() != rows * cols {
        return Err(MatrixError::LengthMismatch {
            len: values.len(),
            rows,
            cols,
        });
    }

    Ok(values
        .chunks(cols.max(1))
        .map(|chunk| chunk.to_vec())
        .collect())
}

/// Matrix materializer: converts object-backed rows into a rectangular typed
/// matrix. Fails on unequal row lengths or mixed element types, so downstream
/// transposition never sees ragged input.
pub fn from_ragged<T: Element>(rows: &[ElementValues]) -> Result<Vec<Vec<T>>, MatrixError> {
    let mut matrix = Vec::with_capacity(rows.len());
    let mut expected_len: Option<usize> = None;

    for (row, values) in rows.iter().enumerate() {
        let typed = T::from_values(values).ok_or(MatrixError::MixedTypes {
            row,
            expected: T::VALUE_TYPE,
            found: values.value_type(),
        })?;

        match expected_len {
            None => expected_len = Some(typed.len()),
            Some(expected) if expected != typed.len() => {
                return Err(MatrixError::Ragged {
                    row,
                    len: typed.len(),
                    expected,
                });
            }
            _ => {}
        }

        matrix.push(typed);
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_values() {
        let m = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        let t = transpose(&m);
        assert_eq!(t, vec![vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn test_transpose_is_its_own_inverse() {
        let m = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert_eq!(transpose(&transpose(&m)), m);
    }

    #[test]
    fn test_transpose_empty_is_identity() {
        let empty: Vec<Vec<i32>> = Vec::new();
        assert_eq!(transpose(&empty), empty);

        let zero_width: Vec<Vec<i32>> = vec![Vec::new()];
        assert_eq!(transpose(&zero_width), zero_width);
    }

    #[test]
    fn test_transpose_does_not_alias_input() {
        let m = vec![vec![1, 2], vec![3, 4]];
        let t = transpose(&m);
        assert_eq!(m, vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(t, vec![vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_from_flat() {
        let m = from_flat(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(m, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

        let err = from_flat(&[1, 2, 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::LengthMismatch {
                len: 3,
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn test_from_ragged_rectangular() {
        let rows = vec![
            ElementValues::Int32(vec![1, 2]),
            ElementValues::Int32(vec![3, 4]),
        ];
        let m = from_ragged::<i32>(&rows).unwrap();
        assert_eq!(m, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_from_ragged_rejects_uneven_rows() {
        let rows = vec![
            ElementValues::Int32(vec![1, 2]),
            ElementValues::Int32(vec![3]),
        ];
        let err = from_ragged::<i32>(&rows).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_ragged_rejects_mixed_types() {
        let rows = vec![
            ElementValues::Int32(vec![1, 2]),
            ElementValues::Float32(vec![3.0, 4.0]),
        ];
        let err = from_ragged::<i32>(&rows).unwrap_err();
        assert!(matches!(err, MatrixError::MixedTypes { row: 1, .. }));
    }
}
