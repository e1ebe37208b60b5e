use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::PageConfigSource;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Page configuration held in memory, keyed by script tag id
#[derive(Debug, Clone, Default)]
pub struct EmbeddedPageConfig {
    tags: HashMap<String, String>,
}

impl EmbeddedPageConfig {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tags: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a JSON object mapping tag ids to tag text.
    ///
    /// String values are the raw tag text; any other value stands for its
    /// own JSON serialization.
    pub fn from_json(text: &str) -> DomainResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::Configuration(format!("page config is not JSON: {}", e)))?;

        let Value::Object(map) = value else {
            return Err(DomainError::Configuration(
                "page config must be a JSON object".to_string(),
            ));
        };

        Ok(Self::from_pairs(map.into_iter().map(|(id, v)| {
            let text = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (id, text)
        })))
    }

    pub fn from_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.tags.insert(id.into(), text.into());
    }
}

impl PageConfigSource for EmbeddedPageConfig {
    fn text_content(&self, id: &str) -> Option<String> {
        self.tags.get(id).cloned()
    }
}
