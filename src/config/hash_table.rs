//! Hash table configuration.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{DsaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sizing policy for [`HashTable`](crate::HashTable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Slots allocated on construction; also the floor for shrinking
    pub initial_capacity: usize,
    /// Halve capacity when the table drops to an eighth full
    pub enable_shrink: bool,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            enable_shrink: true,
        }
    }
}

impl Config for HashTableConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(DsaError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity = parse_env_var(
            &format!("{}HASH_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.enable_shrink =
            parse_env_bool(&format!("{}HASH_ENABLE_SHRINK", prefix), config.enable_shrink);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1024,
            enable_shrink: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 8,
            enable_shrink: true,
        }
    }

    fn realtime_preset() -> Self {
        // no shrink rehash on the removal path
        Self {
            initial_capacity: 256,
            enable_shrink: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            DsaError::configuration(format!("Failed to serialize hash table config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DsaError::configuration(format!("Failed to parse hash table config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
