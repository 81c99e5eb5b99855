//! Generator registry for selecting marker generators by name.

use crate::{CrossoverConfig, CrossoverGenerator, SignalConfig, SignalGenerator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use signal_core::error::GeneratorError;
use signal_core::traits::MarkerGenerator;
use std::collections::BTreeMap;

/// Information about a registered generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Registry key
    pub key: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry of the built-in marker generators.
pub struct GeneratorRegistry {
    generators: BTreeMap<String, GeneratorInfo>,
}

impl GeneratorRegistry {
    /// Create a registry with all built-in generators.
    pub fn new() -> Self {
        let mut generators = BTreeMap::new();

        let confirmed = SignalGenerator::default();
        generators.insert(
            "confirmed".to_string(),
            GeneratorInfo {
                key: "confirmed".to_string(),
                name: confirmed.name().to_string(),
                description: confirmed.description().to_string(),
                default_config: config_value(confirmed.config()),
            },
        );

        let crossover = CrossoverGenerator::default();
        generators.insert(
            "crossover".to_string(),
            GeneratorInfo {
                key: "crossover".to_string(),
                name: crossover.name().to_string(),
                description: crossover.description().to_string(),
                default_config: config_value(crossover.config()),
            },
        );

        Self { generators }
    }

    /// List all generators, ordered by key.
    pub fn list(&self) -> Vec<&GeneratorInfo> {
        self.generators.values().collect()
    }

    /// Get generator info by key.
    pub fn get(&self, key: &str) -> Option<&GeneratorInfo> {
        self.generators.get(key)
    }

    /// Check if a generator exists.
    pub fn exists(&self, key: &str) -> bool {
        self.generators.contains_key(key)
    }

    /// All registry keys.
    pub fn names(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }

    /// Create a generator from a JSON configuration.
    ///
    /// Missing fields fall back to their defaults; the generator constructor
    /// validates the merged configuration.
    pub fn create(
        &self,
        key: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn MarkerGenerator>, GeneratorError> {
        match key {
            "confirmed" => {
                let config: SignalConfig = parse_config(config)?;
                Ok(Box::new(SignalGenerator::new(config)?))
            }
            "crossover" => {
                let config: CrossoverConfig = parse_config(config)?;
                Ok(Box::new(CrossoverGenerator::new(config)?))
            }
            _ => Err(GeneratorError::NotFound(key.to_string())),
        }
    }

    /// Create a generator with its default configuration.
    pub fn create_default(&self, key: &str) -> Result<Box<dyn MarkerGenerator>, GeneratorError> {
        let info = self
            .get(key)
            .ok_or_else(|| GeneratorError::NotFound(key.to_string()))?;
        self.create(key, info.default_config.clone())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn config_value<T: Serialize>(config: &T) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or_else(|_| serde_json::json!({}))
}

fn parse_config<C: DeserializeOwned>(value: serde_json::Value) -> Result<C, GeneratorError> {
    serde_json::from_value(value).map_err(|e| GeneratorError::InvalidConfig(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_list() {
        let registry = GeneratorRegistry::new();
        let keys: Vec<&str> = registry.list().iter().map(|g| g.key.as_str()).collect();

        assert_eq!(keys, vec!["confirmed", "crossover"]);
        assert_eq!(registry.names(), keys);
    }

    #[test]
    fn test_registry_get() {
        let registry = GeneratorRegistry::new();

        let info = registry.get("confirmed").unwrap();
        assert_eq!(info.name, "Confirmed Crossover");
        assert_eq!(info.default_config["min_bars"], 50);
        assert!(registry.exists("crossover"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_create_default() {
        let registry = GeneratorRegistry::new();

        let generator = registry.create_default("confirmed").unwrap();
        assert_eq!(generator.name(), "Confirmed Crossover");
        assert_eq!(generator.warmup_period(), 50);

        let generator = registry.create_default("crossover").unwrap();
        assert_eq!(generator.warmup_period(), 31);
    }

    #[test]
    fn test_create_with_partial_config() {
        let registry = GeneratorRegistry::new();

        let config = serde_json::json!({
            "min_bars": 80,
            "rsi_lower": 35.0,
            "macd": { "signal_period": 5 }
        });

        let generator = registry.create("confirmed", config).unwrap();
        assert_eq!(generator.warmup_period(), 80);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let registry = GeneratorRegistry::new();

        let inverted = serde_json::json!({ "fast_period": 40, "slow_period": 10 });
        assert!(matches!(
            registry.create("crossover", inverted),
            Err(GeneratorError::InvalidConfig(_))
        ));

        let malformed = serde_json::json!({ "min_bars": "many" });
        assert!(registry.create("confirmed", malformed).is_err());
    }

    #[test]
    fn test_create_unknown_generator() {
        let registry = GeneratorRegistry::new();

        let result = registry.create_default("unknown");
        assert!(matches!(result, Err(GeneratorError::NotFound(_))));
    }
}
