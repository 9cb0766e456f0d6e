use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Session settings. Only the persistence backend for the profile is configurable.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct SessionConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the last known user profile is persisted between runs.
/// We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    #[serde(rename = "file")]
    File { path: String },
    #[default]
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "none")]
    Disabled,
}
