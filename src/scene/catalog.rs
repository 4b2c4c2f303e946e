use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::scene::model::SceneDef;

/// Source of scene sequences keyed by topic.
///
/// Implementations may be static tables or remote lookups. A successful result must contain at
/// least one scene; the stage treats an empty list as a provider failure regardless.
pub trait SceneCatalog: Send + Sync {
    /// Produce the ordered scene records for `topic`.
    fn provide(&self, topic: &str) -> VignetteResult<Vec<SceneDef>>;
}

/// In-memory catalog.
///
/// Topic lookup ignores case and surrounding whitespace. Unknown topics get the fallback
/// sequence when one is set, so any event name still yields a show.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StaticCatalog {
    /// Sequences keyed by topic name.
    #[serde(default)]
    pub topics: BTreeMap<String, Vec<SceneDef>>,
    /// Sequence served for topics not in `topics`.
    #[serde(default)]
    pub fallback: Option<Vec<SceneDef>>,
}

impl StaticCatalog {
    /// Empty catalog with no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the sequence for `topic`.
    pub fn with_topic(mut self, topic: impl Into<String>, scenes: Vec<SceneDef>) -> Self {
        self.topics.insert(topic.into(), scenes);
        self
    }

    /// Set the sequence served for unknown topics.
    pub fn with_fallback(mut self, scenes: Vec<SceneDef>) -> Self {
        self.fallback = Some(scenes);
        self
    }

    /// Topic names in sorted order.
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    fn lookup(&self, topic: &str) -> Option<&Vec<SceneDef>> {
        let wanted = topic.trim();
        self.topics
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, scenes)| scenes)
            .or(self.fallback.as_ref())
    }
}

impl SceneCatalog for StaticCatalog {
    fn provide(&self, topic: &str) -> VignetteResult<Vec<SceneDef>> {
        self.lookup(topic)
            .cloned()
            .ok_or_else(|| VignetteError::provider(format!("no scenes for topic \"{topic}\"")))
    }
}

/// [`StaticCatalog`] loaded from a JSON document on disk.
///
/// Shape: `{"topics": {"<name>": [SceneDef, ...]}, "fallback": [SceneDef, ...]}`.
#[derive(Clone, Debug)]
pub struct JsonCatalog {
    inner: StaticCatalog,
}

impl JsonCatalog {
    /// Parse a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VignetteResult<Self> {
        let inner: StaticCatalog = serde_json::from_reader(r)
            .map_err(|e| VignetteError::serde(format!("parse catalog JSON: {e}")))?;
        Ok(Self { inner })
    }

    /// Parse a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> VignetteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VignetteError::validation(format!("open catalog JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Borrow the parsed table.
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner
    }
}

impl SceneCatalog for JsonCatalog {
    fn provide(&self, topic: &str) -> VignetteResult<Vec<SceneDef>> {
        self.inner.provide(topic)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/catalog.rs"]
mod tests;
