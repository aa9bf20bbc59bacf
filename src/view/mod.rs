//! View-model of the recommendation console
//!
//! Plain data the controller writes into after every action. Nothing in here
//! touches the network; the console binary only prints it.

pub mod form;
pub mod table;

use std::fmt::Display;

pub use form::{FormField, RecommendationForm};
pub use table::{render_results, ResultsTable, RowAction, RowView};

/// Status text describing the outcome of the last action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(Option<String>);

impl Flash {
    pub fn set(&mut self, message: impl Into<String>) {
        self.0 = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Filters of a search, kept in the order they are sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    filters: Vec<(&'static str, String)>,
}

impl SearchQuery {
    pub fn new(filters: Vec<(&'static str, String)>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[(&'static str, String)] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// `key=value` pairs joined with `&`, unencoded
    pub fn query_string(&self) -> String {
        self.filters
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query_string())
    }
}
