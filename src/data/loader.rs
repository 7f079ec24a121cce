//! CSV Data Loader Module
//! Reads the listings, details and ratings tables, merges them and builds
//! the immutable dataset shared by every page.

use crate::config::{AppConfig, ColumnNames};
use crate::data::filter::RatingRange;
use crate::data::processor::{DataProcessor, ProcessorError};
use crate::stats::FrequencyRanking;
use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which of the three input tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Listings,
    Details,
    Ratings,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Listings => "listings",
            SourceKind::Details => "details",
            SourceKind::Ratings => "ratings",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Missing {kind} source: {} does not exist", .path.display())]
    MissingSource { kind: SourceKind, path: PathBuf },
    #[error("Failed to read {kind} source {}: {error}", .path.display())]
    ReadFailed {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        error: PolarsError,
    },
    #[error("The {kind} source {} is empty", .path.display())]
    EmptySource { kind: SourceKind, path: PathBuf },
    #[error("The {kind} source has no '{column}' column")]
    MissingKeyColumn { kind: SourceKind, column: String },
    #[error("The {kind} source has {count} '{column}' value(s) that are not integers")]
    InvalidKey {
        kind: SourceKind,
        column: String,
        count: usize,
    },
    #[error("The merged table has no '{0}' column")]
    MissingMergedColumn(String),
    #[error("Failed to merge tables: {0}")]
    Merge(#[from] ProcessorError),
}

/// The merged movie table plus its precomputed rankings.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub merged: DataFrame,
    pub directors: FrequencyRanking,
    pub countries: FrequencyRanking,
    pub rating_bounds: RatingRange,
    pub columns: ColumnNames,
}

impl Dataset {
    /// Assemble a dataset from already-read tables.
    pub fn from_frames(
        listings: DataFrame,
        details: DataFrame,
        ratings: DataFrame,
        columns: &ColumnNames,
        top_n: usize,
    ) -> Result<Self, LoaderError> {
        let key = columns.index.as_str();

        let listings = normalize(&listings, SourceKind::Listings, key)?;
        let details = prepare_right(&listings, &details, SourceKind::Details, key)?;
        let with_details = DataProcessor::left_join(&listings, &details, key)?;
        let ratings = prepare_right(&with_details, &ratings, SourceKind::Ratings, key)?;
        let mut merged = DataProcessor::left_join(&with_details, &ratings, key)?;

        for name in [
            &columns.movie_name,
            &columns.director,
            &columns.area,
            &columns.rating,
        ] {
            if !DataProcessor::has_column(&merged, name) {
                return Err(LoaderError::MissingMergedColumn(name.clone()));
            }
        }
        DataProcessor::cast_to_float(&mut merged, &columns.rating)?;

        log::info!(
            "Merged table: {} rows, {} columns",
            merged.height(),
            merged.width()
        );

        let directors = FrequencyRanking::from_values(
            DataProcessor::string_values(&merged, &columns.director)?,
            top_n,
        );
        let countries = FrequencyRanking::from_values(
            DataProcessor::string_values(&merged, &columns.area)?,
            top_n,
        );
        let rating_bounds =
            RatingRange::observed(DataProcessor::float_values(&merged, &columns.rating)?);

        log::info!(
            "Rankings: {} directors, {} areas; ratings in [{}, {}]",
            directors.len(),
            countries.len(),
            rating_bounds.low,
            rating_bounds.high
        );

        Ok(Self {
            merged,
            directors,
            countries,
            rating_bounds,
            columns: columns.clone(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.merged.height()
    }
}

/// Reads the three CSV sources described by an [`AppConfig`].
pub struct DataLoader<'a> {
    config: &'a AppConfig,
}

impl<'a> DataLoader<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Read, validate and merge all sources.
    pub fn load(&self) -> Result<Dataset, LoaderError> {
        let listings = Self::load_csv(SourceKind::Listings, &self.config.listings_path())?;
        let details = Self::load_csv(SourceKind::Details, &self.config.details_path())?;
        let ratings = Self::load_csv(SourceKind::Ratings, &self.config.ratings_path())?;

        Dataset::from_frames(
            listings,
            details,
            ratings,
            &self.config.columns,
            self.config.top_n,
        )
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(kind: SourceKind, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::MissingSource {
                kind,
                path: path.to_path_buf(),
            });
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|error| LoaderError::ReadFailed {
                kind,
                path: path.to_path_buf(),
                error,
            })?;

        if df.height() == 0 || df.width() == 0 {
            return Err(LoaderError::EmptySource {
                kind,
                path: path.to_path_buf(),
            });
        }

        log::info!(
            "Read {} source {}: {} rows, {} columns",
            kind,
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }
}

fn normalize(df: &DataFrame, kind: SourceKind, key: &str) -> Result<DataFrame, LoaderError> {
    DataProcessor::normalize_key(df, key).map_err(|err| match err {
        ProcessorError::MissingColumn(column) => LoaderError::MissingKeyColumn { kind, column },
        ProcessorError::NonIntegerKey { column, count } => {
            LoaderError::InvalidKey { kind, column, count }
        }
        other => LoaderError::Merge(other),
    })
}

/// Normalise, de-duplicate and rename a right-hand table before joining.
fn prepare_right(
    left: &DataFrame,
    right: &DataFrame,
    kind: SourceKind,
    key: &str,
) -> Result<DataFrame, LoaderError> {
    let right = normalize(right, kind, key)?;
    let (right, removed) = DataProcessor::dedup_on_key(&right, key)?;
    if removed > 0 {
        log::warn!(
            "Dropped {} {} row(s) with a duplicate or missing '{}'",
            removed,
            kind,
            key
        );
    }
    Ok(DataProcessor::disambiguate_columns(
        left,
        &right,
        key,
        kind.as_str(),
    )?)
}
