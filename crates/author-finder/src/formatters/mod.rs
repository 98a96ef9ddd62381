//! Output formatters for Markdown and JSON.
//!
//! [`ProfileView`] holds the display-ready form of an author record that
//! both formatters render from.

mod json;
mod markdown;

pub use self::json::*;
pub use markdown::*;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::keys::AuthorId;
use crate::models::{AuthorName, AuthorRecord, Publication};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("valid regex"));

/// A labelled list of profile entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSection {
    pub label: &'static str,
    pub entries: Vec<String>,
}

/// A publication as displayed on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRow {
    pub authors: Vec<String>,
    pub title: String,
    pub year: String,
    pub venue: String,
}

impl From<&Publication> for PublicationRow {
    fn from(publication: &Publication) -> Self {
        Self {
            authors: publication.authors.clone(),
            title: publication.title.clone().unwrap_or_default(),
            year: publication.year.clone().unwrap_or_default(),
            venue: publication.venue.clone().unwrap_or_default(),
        }
    }
}

/// Display-ready author profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub id: AuthorId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sections: Vec<ProfileSection>,
    pub homepages: Vec<String>,
    pub publications: Vec<PublicationRow>,
}

impl ProfileView {
    /// Build the view of `record`.
    ///
    /// Digits are stripped from name parts (engines append disambiguation
    /// numbers) and co-author groups are joined with ", ". Text entries
    /// shorter than two characters are dropped.
    #[must_use]
    pub fn from_record(id: &AuthorId, record: &AuthorRecord) -> Self {
        let mut sections = vec![ProfileSection {
            label: "Institution",
            entries: meaningful(&record.affiliation),
        }];
        if let Some(biography) = &record.biography {
            sections.push(ProfileSection { label: "Biography", entries: meaningful(biography) });
        }
        if let Some(interests) = &record.interests {
            sections.push(ProfileSection { label: "Research areas", entries: meaningful(interests) });
        }
        sections.retain(|s| !s.entries.is_empty());

        Self {
            id: id.clone(),
            name: clean_name(&record.name),
            image: record.image.clone(),
            sections,
            homepages: record.homepages.clone().unwrap_or_default(),
            publications: record.publications().iter().map(PublicationRow::from).collect(),
        }
    }
}

/// Name with digits removed and groups joined with ", ".
#[must_use]
pub fn clean_name(name: &AuthorName) -> String {
    match name {
        AuthorName::Text(text) => DIGITS.replace_all(text, "").trim().to_string(),
        AuthorName::Group(parts) => parts
            .iter()
            .map(clean_name)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn meaningful(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| e.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}
