use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// News categories the backend can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Sports,
    Crime,
    Politics,
}

impl Category {
    /// Canonical order, used when building the `categories` parameter
    pub const ALL: [Category; 4] = [
        Category::Entertainment,
        Category::Sports,
        Category::Crime,
        Category::Politics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Crime => "crime",
            Category::Politics => "politics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Crime => "Crime",
            Category::Politics => "Politics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::Other(format!("Unknown category: {}", s)))
    }
}

/// Boolean category selections narrowing the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub entertainment: bool,
    pub sports: bool,
    pub crime: bool,
    pub politics: bool,
}

impl FilterState {
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let mut filters = Self::default();
        for category in categories {
            filters.set(category, true);
        }
        filters
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Entertainment => self.entertainment,
            Category::Sports => self.sports,
            Category::Crime => self.crime,
            Category::Politics => self.politics,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        let flag = match category {
            Category::Entertainment => &mut self.entertainment,
            Category::Sports => &mut self.sports,
            Category::Crime => &mut self.crime,
            Category::Politics => &mut self.politics,
        };
        *flag = enabled;
    }

    pub fn toggle(&mut self, category: Category) {
        self.set(category, !self.is_enabled(category));
    }

    /// Only the true-valued flags, in canonical order
    pub fn active(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    /// Value of the `categories` query parameter, or None when it must be omitted
    pub fn categories_param(&self) -> Option<String> {
        let active = self.active();
        if active.is_empty() {
            return None;
        }
        Some(
            active
                .iter()
                .map(Category::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Whether an article with the given category passes these filters.
    /// With no active filter everything passes.
    pub fn matches(&self, category: Option<&str>) -> bool {
        let active = self.active();
        if active.is_empty() {
            return true;
        }
        category
            .and_then(|c| c.parse::<Category>().ok())
            .map(|c| active.contains(&c))
            .unwrap_or(false)
    }
}

/// Cache and single-flight key for one feed request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedKey {
    pub filters: FilterState,
    pub page: u32,
    pub search: Option<String>,
}

impl FeedKey {
    /// Pages are 1-based; blank searches count as no search
    pub fn new(filters: FilterState, page: u32, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            filters,
            page: page.max(1),
            search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active_filter_omits_param() {
        assert_eq!(FilterState::default().categories_param(), None);
    }

    #[test]
    fn test_param_uses_canonical_order() {
        let filters = FilterState::from_categories([Category::Politics, Category::Sports]);
        assert_eq!(filters.categories_param().as_deref(), Some("sports,politics"));

        let all = FilterState::from_categories(Category::ALL);
        assert_eq!(
            all.categories_param().as_deref(),
            Some("entertainment,sports,crime,politics")
        );
    }

    #[test]
    fn test_toggle() {
        let mut filters = FilterState::default();
        filters.toggle(Category::Crime);
        assert!(filters.crime);
        filters.toggle(Category::Crime);
        assert!(!filters.crime);
    }

    #[test]
    fn test_matches() {
        let none = FilterState::default();
        assert!(none.matches(None));
        assert!(none.matches(Some("crime")));

        let sports = FilterState::from_categories([Category::Sports]);
        assert!(sports.matches(Some("Sports")));
        assert!(!sports.matches(Some("crime")));
        assert!(!sports.matches(None));
    }

    #[test]
    fn test_key_normalizes_search_and_page() {
        let key = FeedKey::new(FilterState::default(), 0, Some("   "));
        assert_eq!(key.page, 1);
        assert_eq!(key.search, None);

        let a = FeedKey::new(FilterState::default(), 2, Some(" election "));
        let b = FeedKey::new(FilterState::default(), 2, Some("election"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("POLITICS".parse::<Category>().unwrap(), Category::Politics);
        assert!("weather".parse::<Category>().is_err());
    }
}
