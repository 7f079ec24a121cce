//! Filter Module
//! Movie-name, director and rating-range predicates over the merged table.

use crate::data::processor::{DataProcessor, ProcessorError};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Inclusive rating interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    pub low: f64,
    pub high: f64,
}

impl Default for RatingRange {
    fn default() -> Self {
        Self { low: 0.0, high: 0.0 }
    }
}

impl RatingRange {
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    /// Observed min/max of the given ratings; `[0, 0]` when none are present.
    pub fn observed<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        ratings
            .into_iter()
            .flatten()
            .filter(|r| !r.is_nan())
            .fold(None, |acc: Option<Self>, r| match acc {
                None => Some(Self { low: r, high: r }),
                Some(range) => Some(Self {
                    low: range.low.min(r),
                    high: range.high.max(r),
                }),
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// True when this range includes every value of `other`.
    pub fn covers(&self, other: &RatingRange) -> bool {
        self.low <= other.low && self.high >= other.high
    }
}

/// User-supplied predicates for the explorer table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub movie_name: String,
    pub director: String,
    pub rating: RatingRange,
}

impl FilterCriteria {
    /// Criteria that keep every row: empty substrings and the full observed range.
    pub fn unrestricted(bounds: RatingRange) -> Self {
        Self {
            movie_name: String::new(),
            director: String::new(),
            rating: bounds,
        }
    }

    /// Decide whether a single row passes every applied predicate.
    ///
    /// `bounds` is the observed rating range of the whole table. A missing
    /// rating only passes while the selected range still covers it.
    pub fn matches(
        &self,
        movie_name: Option<&str>,
        director: Option<&str>,
        rating: Option<f64>,
        bounds: &RatingRange,
    ) -> bool {
        if !substring_matches(&self.movie_name, movie_name) {
            return false;
        }
        if !substring_matches(&self.director, director) {
            return false;
        }

        let range = RatingRange::new(self.rating.low, self.rating.high);
        match rating {
            Some(r) if !r.is_nan() => range.contains(r),
            _ => range.covers(bounds),
        }
    }

    /// Apply the criteria to a table, returning the matching rows in order.
    pub fn apply(
        &self,
        df: &DataFrame,
        name_col: &str,
        director_col: &str,
        rating_col: &str,
        bounds: &RatingRange,
    ) -> Result<DataFrame, FilterError> {
        let names = DataProcessor::string_values(df, name_col)?;
        let directors = DataProcessor::string_values(df, director_col)?;
        let ratings = DataProcessor::float_values(df, rating_col)?;

        let mask: Vec<bool> = names
            .iter()
            .zip(directors.iter())
            .zip(ratings.iter())
            .map(|((name, director), rating)| {
                self.matches(name.as_deref(), director.as_deref(), *rating, bounds)
            })
            .collect();

        let mask = BooleanChunked::new("filter".into(), mask);
        let filtered = df.filter(&mask)?;

        log::debug!(
            "Filter name={:?} director={:?} rating=[{}, {}] kept {}/{} rows",
            self.movie_name,
            self.director,
            self.rating.low,
            self.rating.high,
            filtered.height(),
            df.height()
        );

        Ok(filtered)
    }
}

/// Case-insensitive substring test. An empty (after trim) needle always
/// matches; a missing value never matches a non-empty needle.
fn substring_matches(needle: &str, value: Option<&str>) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    match value {
        None => false,
        Some(value) => value.to_lowercase().contains(&needle.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> DataFrame {
        df!(
            "index" => [1i64, 2, 3, 4, 5],
            "Movie Name" => [
                Some("Spirited Away"),
                Some("Interstellar"),
                Some("My Neighbor Totoro"),
                None,
                Some("Inception")
            ],
            "director" => [
                Some("Hayao Miyazaki"),
                Some("Christopher Nolan"),
                Some("Hayao Miyazaki"),
                Some("Someone"),
                None
            ],
            "Movie Rate" => [Some(9.4), Some(9.3), Some(9.2), Some(8.1), None]
        )
        .unwrap()
    }

    fn bounds() -> RatingRange {
        RatingRange::new(8.1, 9.4)
    }

    fn apply(criteria: &FilterCriteria) -> DataFrame {
        criteria
            .apply(&movies(), "Movie Name", "director", "Movie Rate", &bounds())
            .unwrap()
    }

    fn indices(df: &DataFrame) -> Vec<i64> {
        df.column("index")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_observed_bounds() {
        let ratings = vec![Some(9.2), None, Some(8.1), Some(f64::NAN), Some(9.4)];
        let range = RatingRange::observed(ratings);
        assert_eq!(range, RatingRange::new(8.1, 9.4));
    }

    #[test]
    fn test_observed_bounds_empty_is_zero() {
        assert_eq!(RatingRange::observed(vec![None, None]), RatingRange::new(0.0, 0.0));
        assert_eq!(RatingRange::observed(Vec::new()), RatingRange::default());
    }

    #[test]
    fn test_unrestricted_is_identity() {
        let df = movies();
        let filtered = apply(&FilterCriteria::unrestricted(bounds()));
        assert!(filtered.equals_missing(&df));
    }

    #[test]
    fn test_name_filter_case_insensitive() {
        let criteria = FilterCriteria {
            movie_name: "  IN".to_string(),
            ..FilterCriteria::unrestricted(bounds())
        };
        // Row 4 has no name and must not match
        assert_eq!(indices(&apply(&criteria)), vec![2, 5]);
    }

    #[test]
    fn test_director_filter_skips_missing() {
        let criteria = FilterCriteria {
            director: "miyazaki".to_string(),
            ..FilterCriteria::unrestricted(bounds())
        };
        assert_eq!(indices(&apply(&criteria)), vec![1, 3]);
    }

    #[test]
    fn test_predicates_compose_with_and() {
        let criteria = FilterCriteria {
            movie_name: "totoro".to_string(),
            director: "hayao".to_string(),
            rating: RatingRange::new(9.0, 9.4),
        };
        assert_eq!(indices(&apply(&criteria)), vec![3]);
    }

    #[test]
    fn test_no_match_returns_empty_table() {
        let criteria = FilterCriteria {
            movie_name: "does not exist".to_string(),
            ..FilterCriteria::unrestricted(bounds())
        };
        let filtered = apply(&criteria);
        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.width(), movies().width());
    }

    #[test]
    fn test_range_is_inclusive_and_drops_missing_when_narrowed() {
        let criteria = FilterCriteria {
            rating: RatingRange::new(9.2, 9.3),
            ..FilterCriteria::unrestricted(bounds())
        };
        assert_eq!(indices(&apply(&criteria)), vec![2, 3]);
    }

    #[test]
    fn test_reversed_range_is_normalised() {
        let criteria = FilterCriteria {
            rating: RatingRange { low: 9.3, high: 9.2 },
            ..FilterCriteria::unrestricted(bounds())
        };
        assert_eq!(indices(&apply(&criteria)), vec![2, 3]);
    }

    #[test]
    fn test_tighter_range_never_returns_more_rows() {
        let wide = FilterCriteria {
            rating: RatingRange::new(3.0, 10.0),
            ..FilterCriteria::unrestricted(bounds())
        };
        let narrow = FilterCriteria {
            rating: RatingRange::new(9.25, 10.0),
            ..FilterCriteria::unrestricted(bounds())
        };

        let wide_rows = indices(&apply(&wide));
        let narrow_rows = indices(&apply(&narrow));
        assert!(narrow_rows.len() <= wide_rows.len());
        assert!(narrow_rows.iter().all(|i| wide_rows.contains(i)));
        assert_eq!(narrow_rows, vec![1, 2]);
    }

    #[test]
    fn test_missing_column_is_error() {
        let criteria = FilterCriteria::unrestricted(bounds());
        let result = criteria.apply(&movies(), "Title", "director", "Movie Rate", &bounds());
        assert!(matches!(
            result,
            Err(FilterError::Processor(ProcessorError::MissingColumn(_)))
        ));
    }

    #[test]
    fn test_substring_matches_missing_value() {
        assert!(substring_matches("", None));
        assert!(substring_matches("   ", None));
        assert!(!substring_matches("a", None));
        assert!(substring_matches("NOL", Some("Christopher Nolan")));
    }
}
