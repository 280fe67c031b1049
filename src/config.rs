//! Device Configuration
//!
//! What a device needs before play: the seed both teams agreed on, which
//! team it belongs to, where its keyword bank lives and which part of it
//! to play with.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::loader::KeywordFilter;

/// Device configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Seed agreed on by both teams before play.
    pub shared_seed: String,
    /// Team label (`white` or `black`), parsed when the engine is built.
    pub team: String,
    /// Keyword bank file. `None` uses the bundled demo bank.
    pub keywords_path: Option<PathBuf>,
    /// Selected word levels. Empty selects every level.
    pub levels: Vec<String>,
    /// Selected word tags. Empty selects every tag.
    pub tags: Vec<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            shared_seed: "NEBULA7".to_string(),
            team: "white".to_string(),
            keywords_path: None,
            levels: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl DeviceConfig {
    /// Create config from environment variables.
    ///
    /// - `DECRYPTO_SEED`: shared seed
    /// - `DECRYPTO_TEAM`: `white` or `black`
    /// - `DECRYPTO_KEYWORDS`: path to the keyword JSON file
    /// - `DECRYPTO_LEVELS`: comma-separated levels, e.g. `A1,A2`
    /// - `DECRYPTO_TAGS`: comma-separated tags
    ///
    /// Unset variables fall back to [`Default`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            shared_seed: lookup("DECRYPTO_SEED").unwrap_or(defaults.shared_seed),
            team: lookup("DECRYPTO_TEAM").unwrap_or(defaults.team),
            keywords_path: lookup("DECRYPTO_KEYWORDS")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            levels: lookup("DECRYPTO_LEVELS").map(|v| split_list(&v)).unwrap_or_default(),
            tags: lookup("DECRYPTO_TAGS").map(|v| split_list(&v)).unwrap_or_default(),
        }
    }

    /// Level and tag selection for the keyword loader.
    pub fn keyword_filter(&self) -> KeywordFilter {
        let select = |values: &[String]| -> Option<BTreeSet<String>> {
            (!values.is_empty()).then(|| values.iter().cloned().collect())
        };
        KeywordFilter {
            levels: select(&self.levels),
            tags: select(&self.tags),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = DeviceConfig::from_lookup(|_| None);
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: BTreeMap<&str, &str> = [
            ("DECRYPTO_SEED", "ORBIT42"),
            ("DECRYPTO_TEAM", "black"),
            ("DECRYPTO_KEYWORDS", "/tmp/keywords.json"),
        ]
        .into_iter()
        .collect();

        let config = DeviceConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.shared_seed, "ORBIT42");
        assert_eq!(config.team, "black");
        assert_eq!(config.keywords_path, Some(PathBuf::from("/tmp/keywords.json")));
    }

    #[test]
    fn test_empty_keywords_path_ignored() {
        let config = DeviceConfig::from_lookup(|k| (k == "DECRYPTO_KEYWORDS").then(String::new));
        assert_eq!(config.keywords_path, None);
    }

    #[test]
    fn test_levels_and_tags() {
        let vars: BTreeMap<&str, &str> = [
            ("DECRYPTO_LEVELS", "A1, A2,"),
            ("DECRYPTO_TAGS", "animal"),
        ]
        .into_iter()
        .collect();

        let config = DeviceConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.levels, ["A1", "A2"]);
        assert_eq!(config.tags, ["animal"]);

        let filter = config.keyword_filter();
        assert_eq!(filter.levels.unwrap().len(), 2);
        assert_eq!(filter.tags.unwrap().into_iter().collect::<Vec<_>>(), ["animal"]);

        assert!(DeviceConfig::default().keyword_filter().is_open());
    }
}
