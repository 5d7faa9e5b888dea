use crate::error::LoadError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// List of resources to register at once.
///
/// ```json
/// {
///     "images": { "hero": "img/hero.png" },
///     "json": { "config": "config.json" }
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub images: IndexMap<String, String>,
    #[serde(default, alias = "jsons")]
    pub json: IndexMap<String, String>,
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::parse("manifest", e))
    }

    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        Self::deserialize(value).map_err(|e| LoadError::parse("manifest", e))
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.json.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
