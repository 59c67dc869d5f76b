//! Index configuration.
use crate::precision::{DEFAULT_PRECISION, is_valid_precision};
use crate::spatial::DistanceMetric;
use serde::de::Error;

/// Settings fixed when a [`GeoTrie`](crate::GeoTrie) is built.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Geocell code length used for every stored point (1-12)
    #[serde(default = "Config::default_precision")]
    pub precision: usize,

    /// Metric for the final distance filter
    #[serde(default)]
    pub metric: DistanceMetric,
}

impl Config {
    const fn default_precision() -> usize {
        DEFAULT_PRECISION
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_precision(self.precision) {
            return Err(format!(
                "Precision must be between 1 and 12, got {}",
                self.precision
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Self::default_precision(),
            metric: DistanceMetric::default(),
        }
    }
}
