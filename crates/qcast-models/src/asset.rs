//! Remote asset model.

use serde::{Deserialize, Serialize};

/// A media resource in the remote asset store.
///
/// Assets are never deleted by the pipeline; once published they are tagged
/// so the selection query excludes them forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable unique identifier within the store
    pub public_id: String,
    /// Direct download URL
    pub secure_url: String,
    /// Store resource type (e.g. "video")
    pub resource_type: String,
    /// Tags currently attached to the asset
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Asset {
    /// Whether the asset carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag() {
        let asset = Asset {
            public_id: "quotes/clip_001".to_string(),
            secure_url: "https://store.example.com/quotes/clip_001.mp4".to_string(),
            resource_type: "video".to_string(),
            tags: vec!["inspiration".to_string(), "uploaded_to_youtube".to_string()],
        };
        assert!(asset.has_tag("uploaded_to_youtube"));
        assert!(!asset.has_tag("draft"));
    }

    #[test]
    fn test_tags_default_to_empty_on_deserialize() {
        let json = r#"{
            "public_id": "quotes/clip_002",
            "secure_url": "https://store.example.com/quotes/clip_002.mp4",
            "resource_type": "video"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert!(asset.tags.is_empty());
    }
}
