//! Rendered artifact returned to clients and held by the cache.

use serde::{Serialize, Serializer};

/// A component template with its localized strings filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedArtifact {
    pub component_name: String,
    pub component_type: String,
    /// Language as requested, even when strings fell back to the default
    pub language: String,
    pub template: String,
    pub localized_data: LocalizedData,
    pub metadata: ArtifactMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactMetadata {
    pub component_id: String,
    pub last_updated: String,
    pub required_keys: Vec<String>,
}

// == Localized Data ==
/// Localized strings in the order the component requires them.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizedData(Vec<(String, String)>);

impl LocalizedData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for LocalizedData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for LocalizedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
