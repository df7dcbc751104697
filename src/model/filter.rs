use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query string key carrying the free-text search
pub const SEARCH_PARAM: &str = "search";

/// What a list view asks for: a free-text search plus categorical filters.
/// Empty values on either side are no-ops.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Split flat query-string parameters into search and filters
    pub fn from_params<I>(params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in params {
            if key == SEARCH_PARAM {
                query.search = Some(value);
            } else {
                query.filters.insert(key, value);
            }
        }
        query
    }

    /// The search term, if there is anything to search for
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Filters whose selected value is non-empty
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_splits_search() {
        let query = ListQuery::from_params(vec![
            ("search".to_string(), "ubuntu".to_string()),
            ("type".to_string(), "ami".to_string()),
            ("status".to_string(), String::new()),
        ]);

        assert_eq!(query.search_term(), Some("ubuntu"));
        let active: Vec<_> = query.active_filters().collect();
        assert_eq!(active, vec![("type", "ami")]);
    }

    #[test]
    fn test_empty_search_is_none() {
        let query = ListQuery::new().search("");
        assert_eq!(query.search_term(), None);
    }
}
