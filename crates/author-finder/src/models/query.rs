//! Search query submitted by the user.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::error::{FinderError, FinderResult};

/// Inclusive year range; an empty bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// Lower bound.
    #[serde(default)]
    pub from: Option<i32>,

    /// Upper bound.
    #[serde(default)]
    pub to: Option<i32>,
}

impl YearRange {
    /// Range with both bounds set.
    #[must_use]
    pub const fn between(from: i32, to: i32) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    /// Check both bounds lie in `[EARLIEST_YEAR, current_year]` and are ordered.
    pub fn validate(&self, current_year: i32) -> FinderResult<()> {
        for year in [self.from, self.to].into_iter().flatten() {
            if !(defaults::EARLIEST_YEAR..=current_year).contains(&year) {
                return Err(FinderError::validation(
                    "years",
                    format!(
                        "{year} is outside {}..={current_year}",
                        defaults::EARLIEST_YEAR
                    ),
                ));
            }
        }

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(FinderError::validation(
                    "years",
                    format!("lower bound {from} exceeds upper bound {to}"),
                ));
            }
        }

        Ok(())
    }

    fn bound(year: Option<i32>) -> String {
        year.map(|y| y.to_string()).unwrap_or_default()
    }
}

/// A person-search query. Immutable once submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// First name.
    #[serde(default)]
    pub first_name: String,

    /// Last name.
    #[serde(default)]
    pub last_name: String,

    /// Research interests.
    #[serde(default)]
    pub interests: String,

    /// Publication keywords.
    #[serde(default)]
    pub keywords: String,

    /// Publication venue.
    #[serde(default)]
    pub venue: String,

    /// Institutional affiliation.
    #[serde(default)]
    pub affiliation: String,

    /// Publication year range.
    #[serde(default)]
    pub years: YearRange,

    /// Selected engine names.
    #[serde(default)]
    pub engines: BTreeSet<String>,
}

impl SearchQuery {
    /// Normalized argument mapping handed to the search engines.
    #[must_use]
    pub fn arguments(&self) -> QueryArguments {
        let mut args = BTreeMap::new();
        args.insert(QueryArguments::FIRST_NAME, normalize(&self.first_name));
        args.insert(QueryArguments::LAST_NAME, normalize(&self.last_name));
        args.insert(QueryArguments::INTERESTS, normalize(&self.interests));
        args.insert(QueryArguments::KEYWORDS, normalize(&self.keywords));
        args.insert(QueryArguments::VENUE, normalize(&self.venue));
        args.insert(QueryArguments::AFFILIATION, normalize(&self.affiliation));
        args.insert(QueryArguments::YEARS_FROM, YearRange::bound(self.years.from));
        args.insert(QueryArguments::YEARS_TO, YearRange::bound(self.years.to));
        QueryArguments(args)
    }

    /// Selected engines in canonical order: trimmed, deduplicated, sorted.
    #[must_use]
    pub fn engine_list(&self) -> Vec<String> {
        self.engines
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Validate against the current calendar year.
    pub fn validate(&self) -> FinderResult<()> {
        self.validate_at(chrono::Utc::now().year())
    }

    /// Validate against a fixed calendar year.
    pub fn validate_at(&self, current_year: i32) -> FinderResult<()> {
        if self.engine_list().is_empty() {
            return Err(FinderError::validation("engines", "select at least one search engine"));
        }

        let has_text = self.arguments().text_fields().any(|(_, value)| !value.is_empty());
        if !has_text {
            return Err(FinderError::validation("query", "fill in at least one search field"));
        }

        self.years.validate(current_year)
    }
}

/// Field-mapping form of a [`SearchQuery`], excluding engine selection.
///
/// Every key is always present; empty or whitespace-only values normalize
/// to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryArguments(BTreeMap<&'static str, String>);

impl QueryArguments {
    pub const FIRST_NAME: &'static str = "firstname";
    pub const LAST_NAME: &'static str = "lastname";
    pub const INTERESTS: &'static str = "interests";
    pub const KEYWORDS: &'static str = "keywords";
    pub const VENUE: &'static str = "venue";
    pub const AFFILIATION: &'static str = "affiliation";
    pub const YEARS_FROM: &'static str = "years_from";
    pub const YEARS_TO: &'static str = "years_to";

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Query-string pairs for an engine request.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn text_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.iter().filter(|(k, _)| *k != Self::YEARS_FROM && *k != Self::YEARS_TO)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_string()
}
