use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Build-time settings of a `Recommender`.
///
/// Every field may be omitted from a TOML file; omitted fields keep their
/// defaults.
///
/// ```toml
/// title_column = "title"
/// tags_column = "genres"
/// tag_delimiter = "|"
/// max_items = 1000
/// max_features = 1000
/// default_top_n = 5
/// parallel = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// header of the column holding display titles
    pub title_column: String,
    /// header of the column holding the delimited tag list
    pub tags_column: String,
    /// separator between tags inside the tag column
    pub tag_delimiter: char,
    /// only the first `max_items` records are loaded
    pub max_items: usize,
    /// vocabulary cap (V)
    pub max_features: usize,
    /// neighbor count used by `Recommender::recommend_default`
    pub default_top_n: usize,
    /// compute similarity rows on the rayon pool
    pub parallel: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            title_column: "title".to_string(),
            tags_column: "genres".to_string(),
            tag_delimiter: '|',
            max_items: 1000,
            max_features: 1000,
            default_top_n: 5,
            parallel: false,
        }
    }
}

impl RecommenderConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Reject values that would make the model meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items == 0 {
            return Err(ConfigError::InvalidMaxItems);
        }
        if self.max_features == 0 {
            return Err(ConfigError::InvalidMaxFeatures);
        }
        if self.default_top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        Ok(())
    }
}
