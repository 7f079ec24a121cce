//! Frequency Ranking Module
//! Counts category occurrences and keeps the most frequent ones.

use std::collections::HashMap;

/// Default number of entries kept in a ranking.
pub const DEFAULT_TOP_N: usize = 20;

/// A single (category, count) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub category: String,
    pub count: usize,
}

/// Categories ordered by descending count, truncated to the top N.
///
/// Ties keep the order in which categories were first encountered.
/// Missing values are never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyRanking {
    entries: Vec<RankEntry>,
}

impl FrequencyRanking {
    /// Count every non-missing value and keep the `top_n` most frequent.
    pub fn from_values<I, S>(values: I, top_n: usize) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<RankEntry> = Vec::new();

        for value in values.into_iter().flatten() {
            let value = value.as_ref();
            match positions.get(value) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    positions.insert(value.to_string(), entries.len());
                    entries.push(RankEntry {
                        category: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(top_n);

        Self { entries }
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest count in the ranking, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.entries.first().map(|e| e.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(ranking: &FrequencyRanking) -> Vec<(&str, usize)> {
        ranking
            .entries()
            .iter()
            .map(|e| (e.category.as_str(), e.count))
            .collect()
    }

    #[test]
    fn test_counts_sorted_descending() {
        let values = ["A", "A", "B", "C", "C", "C"].map(Some);
        let ranking = FrequencyRanking::from_values(values, DEFAULT_TOP_N);
        assert_eq!(pairs(&ranking), vec![("C", 3), ("A", 2), ("B", 1)]);
        assert_eq!(ranking.max_count(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let values = ["X", "Y", "Z", "Y", "X", "Z"].map(Some);
        let ranking = FrequencyRanking::from_values(values, DEFAULT_TOP_N);
        assert_eq!(pairs(&ranking), vec![("X", 2), ("Y", 2), ("Z", 2)]);
    }

    #[test]
    fn test_missing_values_excluded() {
        let values = vec![Some("A"), None, None, None, Some("A"), Some("B")];
        let ranking = FrequencyRanking::from_values(values, DEFAULT_TOP_N);
        assert_eq!(pairs(&ranking), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn test_truncated_to_top_n() {
        let values: Vec<Option<String>> = (0..30)
            .flat_map(|i| std::iter::repeat(Some(format!("d{i}"))).take(i + 1))
            .collect();
        let ranking = FrequencyRanking::from_values(values, DEFAULT_TOP_N);

        assert_eq!(ranking.len(), DEFAULT_TOP_N);
        assert_eq!(ranking.entries()[0].category, "d29");
        assert_eq!(ranking.entries()[0].count, 30);
        assert!(ranking
            .entries()
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
        assert_eq!(ranking.entries()[19].count, 11);
    }

    #[test]
    fn test_empty_input() {
        let ranking = FrequencyRanking::from_values(Vec::<Option<&str>>::new(), DEFAULT_TOP_N);
        assert!(ranking.is_empty());
        assert_eq!(ranking.max_count(), 0);
    }
}
