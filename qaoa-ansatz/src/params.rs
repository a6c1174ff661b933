//! Decoding of JSON parameter mappings into validated arrays

use crate::{AnsatzError, Result};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use serde_json::Value;

/// Look up a required key
pub(crate) fn require<'a>(params: &'a Value, key: &str) -> Result<&'a Value> {
    optional(params, key).ok_or_else(|| AnsatzError::missing_parameter(key))
}

/// Look up an optional key; `null` counts as absent
pub(crate) fn optional<'a>(params: &'a Value, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|value| !value.is_null())
}

/// Fail with the first of `keys` that is absent
pub(crate) fn require_keys(params: &Value, keys: &[&str]) -> Result<()> {
    for key in keys {
        require(params, key)?;
    }
    Ok(())
}

fn decode<T: for<'de> Deserialize<'de>>(name: &str, value: &Value, expected: &str) -> Result<T> {
    T::deserialize(value)
        .map_err(|e| AnsatzError::invalid_parameter(name, format!("expected {}: {}", expected, e)))
}

pub(crate) fn scalar(name: &str, value: &Value) -> Result<f64> {
    let v: f64 = decode(name, value, "a number")?;
    ensure_finite(name, std::iter::once(&v))?;
    Ok(v)
}

pub(crate) fn vector(name: &str, value: &Value) -> Result<Array1<f64>> {
    let v: Vec<f64> = decode(name, value, "a list of numbers")?;
    ensure_finite(name, v.iter())?;
    Ok(Array1::from(v))
}

pub(crate) fn matrix(name: &str, value: &Value) -> Result<Array2<f64>> {
    let rows: Vec<Vec<f64>> = decode(name, value, "a list of rows")?;
    let m = matrix_from_rows(name, &rows)?;
    ensure_finite(name, m.iter())?;
    Ok(m)
}

/// Stack rows into a matrix, rejecting empty and ragged input
pub(crate) fn matrix_from_rows(name: &str, rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || cols == 0 {
        return Err(AnsatzError::invalid_parameter(name, "matrix must not be empty"));
    }
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
        return Err(AnsatzError::invalid_parameter(
            name,
            format!("row {} has {} entries, expected {}", index, row.len(), cols),
        ));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), cols), flat)
        .map_err(|e| AnsatzError::invalid_parameter(name, e.to_string()))
}

pub(crate) fn ensure_finite<'a>(name: &str, values: impl Iterator<Item = &'a f64>) -> Result<()> {
    for &v in values {
        if !v.is_finite() {
            return Err(AnsatzError::invalid_parameter(
                name,
                format!("entries must be finite, found {}", v),
            ));
        }
    }
    Ok(())
}

pub(crate) fn ensure_square(name: &str, m: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(AnsatzError::NotSquare {
            name: name.to_string(),
            rows,
            cols,
        });
    }
    if rows == 0 {
        return Err(AnsatzError::invalid_parameter(name, "matrix must not be empty"));
    }
    Ok(rows)
}
