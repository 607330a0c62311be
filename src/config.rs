use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub marker: MarkerConfig,
    #[serde(default)]
    pub random: RandomConfig,
}

/// Namespaced child element recording that an item was already announced.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MarkerConfig {
    /// Namespace URI (compared after prefix resolution)
    #[serde(default = "default_marker_namespace")]
    pub namespace: String,
    /// Local element name
    #[serde(default = "default_marker_element")]
    pub element: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            namespace: default_marker_namespace(),
            element: default_marker_element(),
        }
    }
}

fn default_marker_namespace() -> String {
    "https://bsky.app/ns".to_string()
}

fn default_marker_element() -> String {
    "postId".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RandomConfig {
    /// Posts newer than this many days are never picked
    #[serde(default = "default_exclude_days")]
    pub exclude_days: i64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            exclude_days: default_exclude_days(),
        }
    }
}

fn default_exclude_days() -> i64 {
    30
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load `path` when one was given on the command line, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
