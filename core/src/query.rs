//! Query shaping vocabulary: filter, sort key, sort order.
//!
//! # Design
//! The enums carry their wire spellings (`active`, `createdAt`, ...) through
//! serde so the server's query extractor and the client's URL builder cannot
//! drift apart. Stores share the same predicate and ordering helpers instead
//! of reimplementing the semantics per backend.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Which done-flag states a list should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    /// Predicate over a record's done-flag. `All` admits everything.
    pub fn matches(self, is_done: bool) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !is_done,
            TodoFilter::Completed => is_done,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Active => "active",
            TodoFilter::Completed => "completed",
        }
    }
}

/// Field a list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TodoSortKey {
    #[default]
    CreatedAt,
    Title,
}

impl TodoSortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoSortKey::CreatedAt => "createdAt",
            TodoSortKey::Title => "title",
        }
    }
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoSortOrder {
    Asc,
    #[default]
    Desc,
}

impl TodoSortOrder {
    /// Apply the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            TodoSortOrder::Asc => ordering,
            TodoSortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TodoSortOrder::Asc => "asc",
            TodoSortOrder::Desc => "desc",
        }
    }
}

/// One shaped reading of the todo collection. Defaults mirror the list
/// endpoint: every record, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQuery {
    pub filter: TodoFilter,
    pub sort_key: TodoSortKey,
    pub sort_order: TodoSortOrder,
}

impl ListQuery {
    /// Render the query parameters for a request URL. The same string keys
    /// cached list variants, so equal shapes share one cache entry.
    pub fn query_string(&self) -> String {
        format!(
            "filter={}&sortKey={}&sortOrder={}",
            self.filter.as_str(),
            self.sort_key.as_str(),
            self.sort_order.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_created_at_desc() {
        let query = ListQuery::default();
        assert_eq!(query.filter, TodoFilter::All);
        assert_eq!(query.sort_key, TodoSortKey::CreatedAt);
        assert_eq!(query.sort_order, TodoSortOrder::Desc);
    }

    #[test]
    fn query_string_uses_wire_spellings() {
        let query = ListQuery {
            filter: TodoFilter::Active,
            sort_key: TodoSortKey::Title,
            sort_order: TodoSortOrder::Asc,
        };
        assert_eq!(query.query_string(), "filter=active&sortKey=title&sortOrder=asc");
    }

    #[test]
    fn active_filter_excludes_done_records() {
        assert!(TodoFilter::Active.matches(false));
        assert!(!TodoFilter::Active.matches(true));
        assert!(TodoFilter::Completed.matches(true));
        assert!(TodoFilter::All.matches(true) && TodoFilter::All.matches(false));
    }

    #[test]
    fn desc_reverses_the_comparison() {
        assert_eq!(TodoSortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(TodoSortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(TodoSortOrder::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let query: ListQuery = serde_json::from_str(r#"{"filter":"completed"}"#).unwrap();
        assert_eq!(query.filter, TodoFilter::Completed);
        assert_eq!(query.sort_key, TodoSortKey::CreatedAt);
        assert_eq!(query.sort_order, TodoSortOrder::Desc);
    }
}
