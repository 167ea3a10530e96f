//! Catalog queries over a [`SpotList`]: filtering by name, category and
//! accessibility, and the orderings offered to visitors.

use std::cmp::Ordering;

use tracing::debug;

use crate::collection::SpotList;
use crate::search::{edit_distance, kmp_search, DEFAULT_FUZZY_THRESHOLD};
use crate::sort::SortAlgorithm;
use crate::spot::{Category, Language, Spot};

/// Filter criteria for a catalog search. The default query matches everything.
#[derive(Debug, Clone, Default)]
pub struct SpotQuery {
    /// Name fragment; empty matches every spot.
    pub text: String,
    pub category: Option<Category>,
    pub accessible_only: bool,
    /// Match whole names within [`DEFAULT_FUZZY_THRESHOLD`] edits instead of
    /// by substring.
    pub fuzzy: bool,
    /// Which name field is searched.
    pub language: Language,
}

impl SpotQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        self.matches_name(spot.name(self.language))
            && self.category.map_or(true, |category| spot.category == category)
            && (!self.accessible_only || spot.accessible)
    }

    fn matches_name(&self, name: &str) -> bool {
        let text = self.text.trim();
        if text.is_empty() {
            return true;
        }
        if self.fuzzy {
            edit_distance(text, name) <= DEFAULT_FUZZY_THRESHOLD
        } else {
            kmp_search(&name.to_lowercase(), &text.to_lowercase()).is_some()
        }
    }

    /// Matching spots in catalog order.
    pub fn apply(&self, spots: &SpotList) -> SpotList {
        let found = spots.filter(|spot| self.matches(spot));
        debug!(
            text = %self.text,
            fuzzy = self.fuzzy,
            matched = found.len(),
            total = spots.len(),
            "catalog query"
        );
        found
    }
}

/// Orderings offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotOrder {
    /// Alphabetical by the name in the given language.
    Name(Language),
    /// Most popular first.
    Popularity,
    /// Shortest suggested visit first.
    VisitTime,
}

impl SpotOrder {
    pub fn compare(self, a: &Spot, b: &Spot) -> Ordering {
        match self {
            SpotOrder::Name(language) => a.name(language).cmp(b.name(language)),
            SpotOrder::Popularity => a.cmp_popularity(b),
            SpotOrder::VisitTime => a.visit_minutes.cmp(&b.visit_minutes),
        }
    }

    /// Sort `spots` in place. Merge sort keeps equal spots in their current
    /// relative order.
    pub fn sort(self, spots: &mut SpotList) {
        spots.sort_with(SortAlgorithm::Merge, |a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SpotList {
        vec![
            Spot::new(1, "祈年殿", "Hall of Prayer")
                .with_category(Category::Palace)
                .with_visit_minutes(40),
            Spot::new(2, "回音壁", "Echo Wall")
                .with_category(Category::Building)
                .with_visit_minutes(15)
                .with_accessible(false),
            Spot::new(3, "圜丘坛", "Circular Mound Altar")
                .with_category(Category::Altar)
                .with_visit_minutes(30),
        ]
        .into()
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let mut query = SpotQuery::new("HALL");
        query.language = Language::En;
        let ids: Vec<_> = query.apply(&catalog()).iter().map(Spot::id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn fuzzy_match_tolerates_typos() {
        let query = SpotQuery {
            text: "eco wal".to_string(),
            fuzzy: true,
            language: Language::En,
            ..SpotQuery::default()
        };
        let ids: Vec<_> = query.apply(&catalog()).iter().map(Spot::id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn filters_combine() {
        let query = SpotQuery {
            accessible_only: true,
            category: Some(Category::Building),
            ..SpotQuery::default()
        };
        assert!(query.apply(&catalog()).is_empty());
        assert_eq!(SpotQuery::default().apply(&catalog()).len(), 3);
    }

    #[test]
    fn orders_sort_the_list() {
        let mut spots = catalog();
        SpotOrder::VisitTime.sort(&mut spots);
        let ids: Vec<_> = spots.iter().map(Spot::id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        SpotOrder::Name(Language::En).sort(&mut spots);
        let ids: Vec<_> = spots.iter().map(Spot::id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
