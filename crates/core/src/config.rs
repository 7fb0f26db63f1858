use serde::{Deserialize, Serialize};

use crate::rating::DimensionWeights;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding events.json and ratings.json.
    pub dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

/// Immutable scoring configuration owned by the engine. Explicit config
/// rather than ambient module state so parallel test runs can use different
/// weight sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: DimensionWeights,
}
