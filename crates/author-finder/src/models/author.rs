//! Author record as produced by the search engines.
//!
//! Engines are loose about shapes: a field may arrive as a single string or
//! as a list of strings, and a name may nest co-author groups. Records are
//! normalized on deserialization and always serialize in list form.

use serde::{Deserialize, Deserializer, Serialize};

/// Author name: plain text or an ordered group of nested names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorName {
    /// A single name part.
    Text(String),
    /// Name parts or co-author groups, in order.
    Group(Vec<AuthorName>),
}

impl Default for AuthorName {
    fn default() -> Self {
        Self::Group(Vec::new())
    }
}

impl AuthorName {
    /// All text parts concatenated depth-first, in order.
    #[must_use]
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Group(parts) => parts.iter().for_each(|p| p.flatten_into(out)),
        }
    }

    /// Human-readable form: nested groups joined with ", ".
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Group(parts) => {
                parts.iter().map(Self::display).collect::<Vec<_>>().join(", ")
            }
        }
    }

    /// True if no part carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Group(parts) => parts.iter().all(Self::is_empty),
        }
    }
}

impl From<&str> for AuthorName {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A publication listed on an author profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Author names as printed on the publication.
    #[serde(default, alias = "author", deserialize_with = "one_or_many")]
    pub authors: Vec<String>,

    /// Title.
    #[serde(default, deserialize_with = "first_of_one_or_many")]
    pub title: Option<String>,

    /// Publication year as reported by the engine.
    #[serde(default, deserialize_with = "first_of_one_or_many")]
    pub year: Option<String>,

    /// Venue or free-form note.
    #[serde(default, alias = "other", deserialize_with = "first_of_one_or_many")]
    pub venue: Option<String>,
}

/// A discovered author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Name, possibly a co-author group.
    pub name: AuthorName,

    /// Institutional affiliations.
    #[serde(deserialize_with = "one_or_many")]
    pub affiliation: Vec<String>,

    /// Image URL.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "first_of_one_or_many"
    )]
    pub image: Option<String>,

    /// Homepage URLs.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_one_or_many"
    )]
    pub homepages: Option<Vec<String>>,

    /// Biography paragraphs.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_one_or_many"
    )]
    pub biography: Option<Vec<String>>,

    /// Research interests.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_one_or_many"
    )]
    pub interests: Option<Vec<String>>,

    /// Publications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<Publication>>,
}

impl AuthorRecord {
    /// Create a record with only the identifying fields.
    #[must_use]
    pub fn new(name: impl Into<AuthorName>, affiliation: Vec<String>) -> Self {
        Self { name: name.into(), affiliation, ..Self::default() }
    }

    /// Display name (co-author groups joined with ", ").
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.display()
    }

    /// Affiliation text concatenated in order.
    #[must_use]
    pub fn affiliation_text(&self) -> String {
        self.affiliation.concat()
    }

    /// Publications, empty if the engine reported none.
    #[must_use]
    pub fn publications(&self) -> &[Publication] {
        self.publications.as_deref().unwrap_or(&[])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(value.map(Vec::from).unwrap_or_default())
}

fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(value.map(Vec::from))
}

fn first_of_one_or_many<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| Vec::from(v).into_iter().next()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_deserialize_lists() {
        let json = r#"{
            "name": ["Jane", " ", "Smith"],
            "affiliation": ["MIT", "CSAIL"],
            "image": ["https://img.test/jane.png", "https://img.test/other.png"],
            "homepages": "https://jane.test",
            "publications": [{
                "author": ["Jane Smith", "Bob Jones"],
                "title": ["On Caches"],
                "year": ["2019"],
                "other": ["SOSP"]
            }]
        }"#;

        let author: AuthorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(author.name.flatten(), "Jane Smith");
        assert_eq!(author.affiliation_text(), "MITCSAIL");
        assert_eq!(author.image.as_deref(), Some("https://img.test/jane.png"));
        assert_eq!(author.homepages, Some(vec!["https://jane.test".to_string()]));

        let publication = &author.publications()[0];
        assert_eq!(publication.authors.len(), 2);
        assert_eq!(publication.title.as_deref(), Some("On Caches"));
        assert_eq!(publication.venue.as_deref(), Some("SOSP"));
    }

    #[test]
    fn test_author_minimal() {
        let json = r#"{"name": "Ada Lovelace", "affiliation": "Analytical Engines Ltd"}"#;
        let author: AuthorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(author.display_name(), "Ada Lovelace");
        assert_eq!(author.affiliation, vec!["Analytical Engines Ltd".to_string()]);
        assert!(author.image.is_none());
        assert!(author.publications().is_empty());
    }

    #[test]
    fn test_author_requires_name_and_affiliation() {
        assert!(serde_json::from_str::<AuthorRecord>(r#"{"name": "X"}"#).is_err());
        assert!(serde_json::from_str::<AuthorRecord>(r#"{"affiliation": []}"#).is_err());
    }

    #[test]
    fn test_nested_name_group() {
        let json = r#"{"name": [["Ann", "1"], "Bob"], "affiliation": []}"#;
        let author: AuthorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(author.name.flatten(), "Ann1Bob");
        assert_eq!(author.display_name(), "Ann, 1, Bob");
        assert!(!author.name.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_populated_fields() {
        let original = AuthorRecord {
            name: AuthorName::Group(vec!["Grace ".into(), "Hopper".into()]),
            affiliation: vec!["Yale".into()],
            image: Some("https://img.test/grace.png".into()),
            homepages: Some(vec!["https://grace.test".into()]),
            biography: Some(vec!["Compiler pioneer".into()]),
            interests: None,
            publications: Some(vec![Publication {
                authors: vec!["Grace Hopper".into()],
                title: Some("A-0".into()),
                year: Some("1952".into()),
                venue: None,
            }]),
        };

        let text = serde_json::to_string(&original).unwrap();
        assert!(!text.contains("interests"));
        let decoded: AuthorRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, original);
    }
}
