//! Enumeration types for request parameters.

use serde::{Deserialize, Serialize};

/// Output format for listing and profile responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    Markdown,
    /// Machine-readable JSON format.
    #[default]
    Json,
}

impl ResponseFormat {
    /// Check if this is markdown format.
    #[must_use]
    pub const fn is_markdown(self) -> bool {
        matches!(self, Self::Markdown)
    }

    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_format_default_is_json() {
        assert!(ResponseFormat::default().is_json());
    }

    #[test]
    fn test_response_format_lowercase() {
        let format: ResponseFormat = serde_json::from_str(r#""markdown""#).unwrap();
        assert!(format.is_markdown());
    }
}
