//! Data Processor Module
//! Key normalisation, left joins and column extraction for the merged table.

use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Temporary column used to restore listings order after joining.
const ROW_ORDER_COL: &str = "__row_order";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("Column '{column}' has {count} value(s) that are not integers")]
    NonIntegerKey { column: String, count: usize },
}

/// Handles joining and value extraction on the loaded tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Check whether a column exists in the DataFrame.
    pub fn has_column(df: &DataFrame, name: &str) -> bool {
        df.get_column_names().iter().any(|c| c.as_str() == name)
    }

    /// Cast the key column to Int64, failing if any value cannot be converted.
    pub fn normalize_key(df: &DataFrame, key: &str) -> Result<DataFrame, ProcessorError> {
        if !Self::has_column(df, key) {
            return Err(ProcessorError::MissingColumn(key.to_string()));
        }

        let column = df.column(key)?;

        // Float keys would be truncated by the cast, so check them first
        let invalid = if column.dtype().is_float() {
            column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_finite() || v.fract() != 0.0)
                .count()
        } else {
            0
        };

        let casted = column.cast(&DataType::Int64)?;
        let invalid = if invalid > 0 {
            invalid
        } else {
            casted.null_count().saturating_sub(column.null_count())
        };
        if invalid > 0 {
            return Err(ProcessorError::NonIntegerKey {
                column: key.to_string(),
                count: invalid,
            });
        }

        let mut df = df.clone();
        df.with_column(casted)?;
        Ok(df)
    }

    /// Keep only the first row for each key value. Rows with a null key are dropped.
    ///
    /// Returns the de-duplicated frame and the number of rows removed.
    pub fn dedup_on_key(df: &DataFrame, key: &str) -> Result<(DataFrame, usize), ProcessorError> {
        let keys = df.column(key)?.cast(&DataType::Int64)?;
        let mut seen: HashSet<i64> = HashSet::new();
        let mask: Vec<bool> = keys
            .i64()?
            .into_iter()
            .map(|k| k.map(|k| seen.insert(k)).unwrap_or(false))
            .collect();

        let removed = mask.iter().filter(|keep| !**keep).count();
        if removed == 0 {
            return Ok((df.clone(), 0));
        }

        let mask = BooleanChunked::new("keep".into(), mask);
        Ok((df.filter(&mask)?, removed))
    }

    /// Rename right-hand columns that would collide with left-hand ones.
    ///
    /// A colliding column `name` becomes `name_{suffix}`; the key column is untouched.
    pub fn disambiguate_columns(
        left: &DataFrame,
        right: &DataFrame,
        key: &str,
        suffix: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let collisions: Vec<String> = right
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .filter(|c| c != key && Self::has_column(left, c))
            .collect();

        let mut right = right.clone();
        for name in collisions {
            let renamed = format!("{name}_{suffix}");
            right.rename(&name, renamed.into())?;
        }
        Ok(right)
    }

    /// Left-join `right` onto `left` by `key`, preserving left row count and order.
    pub fn left_join(
        left: &DataFrame,
        right: &DataFrame,
        key: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let joined = left
            .clone()
            .lazy()
            .with_row_index(ROW_ORDER_COL, None)
            .join(
                right.clone().lazy(),
                [col(key)],
                [col(key)],
                JoinArgs::new(JoinType::Left),
            )
            .sort([ROW_ORDER_COL], SortMultipleOptions::default())
            .collect()?;

        Ok(joined.drop(ROW_ORDER_COL)?)
    }

    /// Extract a column as optional strings. NaN-free, nulls stay `None`.
    pub fn string_values(
        df: &DataFrame,
        name: &str,
    ) -> Result<Vec<Option<String>>, ProcessorError> {
        if !Self::has_column(df, name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }
        let casted = df.column(name)?.cast(&DataType::String)?;
        Ok(casted
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }

    /// Extract a column as optional floats. NaN is reported as `None`.
    pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        if !Self::has_column(df, name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        Ok(casted
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Replace a column with its Float64 cast. Unparseable values become null.
    pub fn cast_to_float(df: &mut DataFrame, name: &str) -> Result<(), ProcessorError> {
        if !Self::has_column(df, name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        df.with_column(casted)?;
        Ok(())
    }
}

/// Display-ready copy of a DataFrame: header plus stringified cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_frame(df: &DataFrame) -> Self {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..df.height())
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|column| match column.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        Ok(AnyValue::String(s)) => s.to_string(),
                        Ok(val) => val.to_string().trim_matches('"').to_string(),
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
