//! Metadata attached to a published video.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility of a published video on the hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    /// Publicly visible
    #[default]
    Public,
    /// Visible only to the owner
    Private,
    /// Reachable by link, not listed
    Unlisted,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Public => "public",
            PrivacyStatus::Private => "private",
            PrivacyStatus::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title, description and classification for one published video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,
    /// Long-form description
    pub description: String,
    /// Search tags
    pub tags: Vec<String>,
    /// Platform category identifier
    pub category_id: String,
    /// Visibility policy
    pub privacy: PrivacyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_serializes_lowercase() {
        let json = serde_json::to_string(&PrivacyStatus::Public).unwrap();
        assert_eq!(json, "\"public\"");
    }

    #[test]
    fn test_privacy_default_is_public() {
        assert_eq!(PrivacyStatus::default(), PrivacyStatus::Public);
    }
}
