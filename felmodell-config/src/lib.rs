//! # felmodell-config
//!
//! Declarative construction of error models from YAML files and
//! environment overrides.
//!
//! A scenario file names the model kind and its parameters; [`build`] turns
//! the parsed configuration into a boxed [`ErrorModel`] ready to hand to a
//! channel or device model. Validation happens at load time: a rate outside
//! `[0, 1]` is rejected here even though the runtime `set_rate` surface
//! stays total.
//!
//! ```yaml
//! kind: rate
//! rate: 0.001
//! unit: byte
//! seed: 42
//! ```
//!
//! [`build`]: ErrorModelConfig::build

use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use felmodell_core::model::{ErrorModel, ErrorUnit, ListErrorModel, NoErrorModel, RateErrorModel};
use felmodell_core::random::SeededUniform;

mod error;

pub use error::ConfigError;

/// Environment variable prefix recognized by [`ErrorModelConfig::load_from_path`].
pub const ENV_PREFIX: &str = "FELMODELL_";

/// Error model selection and parameters, tagged by `kind`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ErrorModelConfig {
    /// Probabilistic corruption at a configurable granularity.
    Rate(RateModelConfig),
    /// Deterministic corruption of listed packet uids.
    List(ListModelConfig),
    /// No corruption at all.
    None,
}

/// Parameters for the rate-based model.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct RateModelConfig {
    /// Per-trial error rate.
    #[validate(range(min = 0.0, max = 1.0, message = "error rate must lie in [0, 1]"))]
    pub rate: f64,

    /// Trial granularity. Defaults to per-byte.
    #[serde(default)]
    pub unit: ErrorUnit,

    /// Seed for the variate source. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Parameters for the list-based model.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ListModelConfig {
    /// Packet uids to corrupt. Duplicates collapse; empty means none.
    #[serde(default)]
    pub packets: Vec<u64>,
}

impl Default for ErrorModelConfig {
    fn default() -> Self {
        Self::Rate(RateModelConfig {
            rate: 0.0,
            unit: ErrorUnit::default(),
            seed: None,
        })
    }
}

impl ErrorModelConfig {
    /// Loads a configuration from a YAML file, merged with
    /// `FELMODELL_`-prefixed environment overrides, then validates it.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let config: Self = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the per-kind validation rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Rate(rate) => Validate::validate(rate).map_err(ConfigError::from),
            Self::List(list) => Validate::validate(list).map_err(ConfigError::from),
            Self::None => Ok(()),
        }
    }

    /// Builds the configured error model.
    pub fn build(&self) -> Box<dyn ErrorModel> {
        match self {
            Self::Rate(cfg) => {
                debug!(rate = cfg.rate, unit = ?cfg.unit, seed = ?cfg.seed, "building rate error model");
                let mut model = RateErrorModel::new(cfg.rate).with_unit(cfg.unit);
                if let Some(seed) = cfg.seed {
                    model = model.with_source(SeededUniform::seeded(seed));
                }
                Box::new(model)
            }
            Self::List(cfg) => {
                debug!(targets = cfg.packets.len(), "building list error model");
                let mut model = ListErrorModel::new();
                model.set_list(cfg.packets.iter().copied());
                Box::new(model)
            }
            Self::None => Box::new(NoErrorModel::new()),
        }
    }
}
