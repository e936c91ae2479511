//! Sorting thresholds and pivot seed.

use super::{parse_env_var, Config};
use crate::error::{DsaError, Result};
use crate::random::{DEFAULT_SEQUENCE, DEFAULT_STATE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cutoffs and RNG seed used by [`Sorter`](crate::algorithms::Sorter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Ranges at or below this length are finished by insertion sort in quicksort
    pub quick_insertion_threshold: usize,
    /// Ranges at or below this length are finished by insertion sort in mergesort
    pub merge_insertion_threshold: usize,
    /// Initial state for the pivot generator
    pub seed_state: u64,
    /// Stream selector for the pivot generator
    pub seed_sequence: u64,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            quick_insertion_threshold: 20,
            merge_insertion_threshold: 200,
            seed_state: DEFAULT_STATE,
            seed_sequence: DEFAULT_SEQUENCE,
        }
    }
}

impl Config for SortConfig {
    fn validate(&self) -> Result<()> {
        if self.merge_insertion_threshold == 0 {
            return Err(DsaError::configuration(
                "merge_insertion_threshold must be greater than 0",
            ));
        }
        if self.quick_insertion_threshold < 2 {
            return Err(DsaError::configuration(
                "quick_insertion_threshold must be at least 2",
            ));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.quick_insertion_threshold = parse_env_var(
            &format!("{}SORT_QUICK_THRESHOLD", prefix),
            config.quick_insertion_threshold,
        );
        config.merge_insertion_threshold = parse_env_var(
            &format!("{}SORT_MERGE_THRESHOLD", prefix),
            config.merge_insertion_threshold,
        );
        config.seed_state = parse_env_var(&format!("{}SORT_SEED", prefix), config.seed_state);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            quick_insertion_threshold: 24,
            merge_insertion_threshold: 64,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        // longer insertion runs keep the merge buffer untouched for small inputs
        Self {
            quick_insertion_threshold: 16,
            merge_insertion_threshold: 256,
            ..Self::default()
        }
    }

    fn realtime_preset() -> Self {
        Self {
            quick_insertion_threshold: 12,
            merge_insertion_threshold: 32,
            ..Self::default()
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            DsaError::configuration(format!("Failed to serialize sort config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DsaError::configuration(format!("Failed to parse sort config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
