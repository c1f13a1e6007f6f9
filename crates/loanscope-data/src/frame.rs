//! Column-oriented numeric table of applicants.
//!
//! The population file is a CSV export with one row per applicant and one
//! column per raw feature. Cells that are empty or spell `NaN` are kept as
//! undefined (`None`) rather than dropped, since both the record store and
//! the histogram need to tell the officer when a value is missing.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use loanscope_common::entities::ID_COLUMN;
use loanscope_common::{LoanscopeError, Result};
use tracing::{debug, info, warn};

/// A numeric table keyed by applicant identifier.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Column names in file order (identifier column excluded)
    columns: Vec<String>,
    /// column name -> position in `columns`
    positions: HashMap<String, usize>,
    /// Column-major cell storage
    data: Vec<Vec<Option<f64>>>,
    /// Applicant identifier per row
    ids: Vec<i64>,
    /// applicant identifier -> first row carrying it
    rows_by_id: HashMap<i64, usize>,
}

impl Frame {
    /// Load a population CSV from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading population from {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let frame = Self::from_reader(content.as_bytes())?;

        info!(
            "Loaded population: {} applicants, {} columns",
            frame.len(),
            frame.columns.len()
        );
        Ok(frame)
    }

    /// Parse a population CSV. The header must contain `SK_ID_CURR`.
    /// Unnamed columns (a pandas index written by `to_csv`) are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.trim().to_string()).collect();

        let id_pos = headers
            .iter()
            .position(|h| h == ID_COLUMN)
            .ok_or_else(|| LoanscopeError::FeatureNotFound(ID_COLUMN.to_string()))?;

        let kept: Vec<usize> = (0..headers.len())
            .filter(|&i| i != id_pos && !headers[i].is_empty())
            .collect();

        let mut ids = Vec::new();
        let mut data: Vec<Vec<Option<f64>>> = vec![Vec::new(); kept.len()];
        let mut unparsable: HashMap<usize, usize> = HashMap::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;

            let raw_id = record.get(id_pos).unwrap_or("").trim();
            let id = parse_identifier(raw_id).ok_or_else(|| {
                LoanscopeError::UndefinedValue { column: ID_COLUMN.to_string(), row }
            })?;
            ids.push(id);

            for (slot, &col) in kept.iter().enumerate() {
                let raw = record.get(col).unwrap_or("");
                let cell = parse_cell(raw);
                if cell.is_none() && !is_missing_marker(raw) {
                    *unparsable.entry(col).or_default() += 1;
                }
                data[slot].push(cell);
            }
        }

        for (col, count) in unparsable {
            warn!("Column {} has {} non-numeric cells, treated as undefined", headers[col], count);
        }

        let columns = kept.iter().map(|&i| headers[i].clone()).collect();
        Self::from_columns(ids, columns, data)
    }

    /// Build a frame from already-parsed columns. Every column must have one
    /// cell per identifier.
    pub fn from_columns(
        ids: Vec<i64>,
        columns: Vec<String>,
        data: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if columns.len() != data.len() {
            return Err(LoanscopeError::Config(format!(
                "{} column names for {} columns",
                columns.len(),
                data.len()
            )));
        }
        if let Some((name, col)) = columns.iter().zip(&data).find(|(_, c)| c.len() != ids.len()) {
            return Err(LoanscopeError::Config(format!(
                "column {} has {} cells, expected {}",
                name,
                col.len(),
                ids.len()
            )));
        }

        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut rows_by_id = HashMap::with_capacity(ids.len());
        for (row, &id) in ids.iter().enumerate() {
            rows_by_id.entry(id).or_insert(row);
        }

        Ok(Self { columns, positions, data, ids, rows_by_id })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Row index of an applicant.
    pub fn row_of(&self, applicant_id: i64) -> Result<usize> {
        self.rows_by_id
            .get(&applicant_id)
            .copied()
            .ok_or(LoanscopeError::NotFound(applicant_id))
    }

    pub fn column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.positions
            .get(name)
            .map(|&i| self.data[i].as_slice())
            .ok_or_else(|| LoanscopeError::FeatureNotFound(name.to_string()))
    }

    pub fn value(&self, row: usize, name: &str) -> Result<Option<f64>> {
        Ok(self.column(name)?.get(row).copied().flatten())
    }

    /// A value that must be present.
    pub fn require(&self, row: usize, name: &str) -> Result<f64> {
        self.value(row, name)?.ok_or_else(|| LoanscopeError::UndefinedValue {
            column: name.to_string(),
            row,
        })
    }

    /// All cells of one row, in column order. Fails on the first undefined cell.
    pub fn dense_row(&self, row: usize) -> Result<Vec<f64>> {
        self.columns
            .iter()
            .zip(&self.data)
            .map(|(name, col)| {
                col.get(row).copied().flatten().ok_or_else(|| LoanscopeError::UndefinedValue {
                    column: name.clone(),
                    row,
                })
            })
            .collect()
    }

    /// Identifiers sorted descending, as listed on the home page.
    pub fn ids_descending(&self) -> Vec<i64> {
        let mut ids = self.ids.clone();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids
    }
}

fn is_missing_marker(raw: &str) -> bool {
    matches!(raw.trim(), "" | "NaN" | "nan" | "NA" | "null")
}

fn parse_cell(raw: &str) -> Option<f64> {
    if is_missing_marker(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Identifiers sometimes come out of pandas as floats ("100001.0").
fn parse_identifier(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}
