//! Workshop search
//!
//! A query is a free-text string plus an optional category filter. The text
//! is lowercased and split on whitespace; every term must appear (as a
//! case-insensitive substring) in at least one of a workshop's title,
//! description or location. There is no ranking: results come back in the
//! catalog's usual date-descending order.

use serde::{Deserialize, Serialize};

use crate::models::Workshop;

/// Free-text search with an optional category filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Raw query text
    #[serde(default)]
    pub text: String,
    /// Only return workshops in this category
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl SearchQuery {
    /// Query on `text` across all categories
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category_id: None,
        }
    }

    /// Restrict the query to one category
    pub fn in_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Lowercased, whitespace-separated terms. Blank input yields none.
    pub fn terms(&self) -> Vec<String> {
        self.text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// True when the query filters nothing out
    pub fn is_unfiltered(&self) -> bool {
        self.category_id.is_none() && self.terms().is_empty()
    }

    /// Whether `workshop` satisfies the category filter and every term
    pub fn matches(&self, workshop: &Workshop) -> bool {
        if self
            .category_id
            .is_some_and(|id| workshop.category_id != id)
        {
            return false;
        }

        let fields = [
            workshop.title.to_lowercase(),
            workshop.description.to_lowercase(),
            workshop.location.to_lowercase(),
        ];
        self.terms()
            .iter()
            .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }
}

/// `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\` taken literally
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Catalog order for workshops: newest date first, then id
pub fn sort_workshops(workshops: &mut [Workshop]) {
    workshops.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
}
