use dem::{GeoTransform, C};
use serde::{Deserialize, Serialize};

/// What to do when a profile sample falls outside the interpolable
/// extent of the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Fail the feature with a sampling error.
    #[default]
    Fail,

    /// Sample at the nearest pixel-center location instead.
    Clamp,
}

/// How to resolve several burns landing on the same pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// The later write, in iteration order, wins.
    #[default]
    LastWriteWins,

    /// Keep the lower of the existing and burned elevation.
    MinElevation,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Maximum distance between profile samples, in raster world
    /// units. Defaults to half the raster's pixel diagonal.
    pub max_sample_dist: Option<C>,

    pub edge_policy: EdgePolicy,
}

impl SamplingConfig {
    /// Returns the configured sample distance, or the default derived
    /// from `transform`.
    pub fn max_sample_dist(&self, transform: &GeoTransform) -> C {
        self.max_sample_dist
            .unwrap_or_else(|| transform.default_max_sample_dist())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnConfig {
    pub overlap: OverlapPolicy,
}

/// Complete configuration of a hydro adjustment run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub burn: BurnConfig,
}
