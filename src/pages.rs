//! Page Controller
//! Maps the selected page (and, for the explorer, the submitted filters) to
//! the content that should be shown. Knows nothing about the UI toolkit.

use crate::data::{Dataset, FilterCriteria, FilterError};
use crate::stats::FrequencyRanking;
use polars::prelude::DataFrame;

/// The four pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Introduction,
    DataExplorer,
    Conclusions,
    ResearchObjectives,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Introduction,
        Page::DataExplorer,
        Page::Conclusions,
        Page::ResearchObjectives,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::DataExplorer => "Data Explorer",
            Page::Conclusions => "Conclusions",
            Page::ResearchObjectives => "Research Objectives",
        }
    }
}

const INTRODUCTION: &str = "\
This page presents what Chinese internet users have rated as their top 250 movies in recent years: \
which films they like, which directors they follow and which regions those films come from.

The Data Explorer page joins three tables (movie names, movie details and movie ratings) on their \
shared index into a single listing. Narrow it down by movie name, by director, or by a rating range.

Below the listing, two bar charts show the directors and the areas that appear most often among \
the top-rated movies. Hayao Miyazaki leads the directors by a clear margin, and Japan and the \
United States are far ahead of every other area.";

const CONCLUSIONS: &str = "\
The goal was to find out which movies are currently most popular with internet users, where the \
top-rated films come from and who directed them.

The United States and Japan lead by a wide margin, which marks them as the strongest cultural \
exporters of the Americas and of Asia respectively.

Much of Japan's share comes from Hayao Miyazaki, with eight animated films in the list, a sign of \
how far Japanese animation reaches. American directors such as Christopher Nolan and Steven \
Spielberg are also widely represented.";

const RESEARCH_OBJECTIVES: &str = "\
The wider objective is to understand which genres and themes appeal to Chinese audiences and which \
directors they favour. Useful sources include movie rating sites, social media sentiment, box \
office figures and surveys, with IMDb data as a point of comparison with the United States.

Collecting the data raised a second question about cultural diversity: which regions the most \
popular movies in each country come from, and how many of them are originally in English.";

/// Explorer page content: the (possibly filtered) table and both rankings.
pub struct ExplorerView<'a> {
    pub heading: &'static str,
    pub table: DataFrame,
    pub directors: &'a FrequencyRanking,
    pub countries: &'a FrequencyRanking,
}

/// What a page renders.
pub enum PageContent<'a> {
    Text {
        heading: &'static str,
        body: &'static str,
    },
    Explorer(ExplorerView<'a>),
}

/// Produce the content of `page`.
///
/// `submitted` is only consulted by the explorer page: `None` shows the
/// full merged table, `Some` shows the filtered view.
pub fn render<'a>(
    page: Page,
    dataset: &'a Dataset,
    submitted: Option<&FilterCriteria>,
) -> Result<PageContent<'a>, FilterError> {
    let content = match page {
        Page::Introduction => PageContent::Text {
            heading: page.title(),
            body: INTRODUCTION,
        },
        Page::Conclusions => PageContent::Text {
            heading: page.title(),
            body: CONCLUSIONS,
        },
        Page::ResearchObjectives => PageContent::Text {
            heading: page.title(),
            body: RESEARCH_OBJECTIVES,
        },
        Page::DataExplorer => PageContent::Explorer(explore(dataset, submitted)?),
    };
    Ok(content)
}

fn explore<'a>(
    dataset: &'a Dataset,
    submitted: Option<&FilterCriteria>,
) -> Result<ExplorerView<'a>, FilterError> {
    let (heading, table) = match submitted {
        None => ("Movie Details", dataset.merged.clone()),
        Some(criteria) => {
            let columns = &dataset.columns;
            let table = criteria.apply(
                &dataset.merged,
                &columns.movie_name,
                &columns.director,
                &columns.rating,
                &dataset.rating_bounds,
            )?;
            ("Filtered Movie Details", table)
        }
    };

    Ok(ExplorerView {
        heading,
        table,
        directors: &dataset.directors,
        countries: &dataset.countries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnNames;
    use crate::data::RatingRange;
    use polars::prelude::*;

    fn dataset() -> Dataset {
        let listings = df!(
            "index" => [1i64, 2, 3],
            "Movie Name" => ["Spirited Away", "Interstellar", "Howl's Moving Castle"]
        )
        .unwrap();
        let details = df!(
            "index" => [1i64, 2, 3],
            "director" => ["Hayao Miyazaki", "Christopher Nolan", "Hayao Miyazaki"],
            "area" => ["Japan", "USA", "Japan"]
        )
        .unwrap();
        let ratings = df!("index" => [1i64, 2, 3], "Movie Rate" => [9.4, 9.3, 9.1]).unwrap();
        Dataset::from_frames(listings, details, ratings, &ColumnNames::default(), 20).unwrap()
    }

    #[test]
    fn test_every_page_has_a_title() {
        let titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Introduction",
                "Data Explorer",
                "Conclusions",
                "Research Objectives"
            ]
        );
        assert_eq!(Page::default(), Page::Introduction);
    }

    #[test]
    fn test_text_pages_are_static() {
        let dataset = dataset();
        for page in [Page::Introduction, Page::Conclusions, Page::ResearchObjectives] {
            match render(page, &dataset, None).unwrap() {
                PageContent::Text { heading, body } => {
                    assert_eq!(heading, page.title());
                    assert!(!body.is_empty());
                }
                PageContent::Explorer(_) => panic!("{} rendered as explorer", page.title()),
            }
        }
    }

    #[test]
    fn test_explorer_without_filters_shows_full_table() {
        let dataset = dataset();
        let PageContent::Explorer(view) = render(Page::DataExplorer, &dataset, None).unwrap()
        else {
            panic!("expected explorer");
        };
        assert_eq!(view.heading, "Movie Details");
        assert!(view.table.equals_missing(&dataset.merged));
        assert_eq!(view.directors.entries()[0].category, "Hayao Miyazaki");
    }

    #[test]
    fn test_explorer_filters_table_but_not_rankings() {
        let dataset = dataset();
        let criteria = FilterCriteria {
            director: "nolan".to_string(),
            ..FilterCriteria::unrestricted(dataset.rating_bounds)
        };

        let PageContent::Explorer(view) =
            render(Page::DataExplorer, &dataset, Some(&criteria)).unwrap()
        else {
            panic!("expected explorer");
        };
        assert_eq!(view.heading, "Filtered Movie Details");
        assert_eq!(view.table.height(), 1);
        assert_eq!(view.directors, &dataset.directors);
        assert_eq!(view.countries.entries()[0].count, 2);
    }

    #[test]
    fn test_explorer_empty_result_is_not_an_error() {
        let dataset = dataset();
        let criteria = FilterCriteria {
            movie_name: "zzz".to_string(),
            director: String::new(),
            rating: RatingRange::new(0.0, 10.0),
        };
        let PageContent::Explorer(view) =
            render(Page::DataExplorer, &dataset, Some(&criteria)).unwrap()
        else {
            panic!("expected explorer");
        };
        assert_eq!(view.table.height(), 0);
    }
}
