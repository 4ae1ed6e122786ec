use std::fs::File;
use std::path::Path;

use failure::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::*;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
pub const DEFAULT_MIN_TRAIN_UTTERANCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    /// Share of each intent's utterances used for training, the rest is used for testing
    pub train_fraction: f64,
    /// Intents ending up with fewer training utterances are left out of the evaluation
    pub min_train_utterances: usize,
    pub seed: u64,
    /// Number of threads evaluating test examples, 1 means sequential evaluation
    pub parallelism: usize,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            min_train_utterances: DEFAULT_MIN_TRAIN_UTTERANCES,
            seed: DEFAULT_SEED,
            parallelism: 1,
        }
    }
}

impl CrossValidationConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        let config_file = File::open(config_path).with_context(|_| {
            SnipsNluMetricsError::ConfigLoad(config_path.to_string_lossy().to_string())
        })?;
        let config: Self = serde_json::from_reader(config_file).with_context(|_| {
            format!("Invalid cross validation config file {:?}", config_path)
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(invalid_configuration(format!(
                "train_fraction must be in ]0, 1] but was {}",
                self.train_fraction
            )));
        }
        if self.min_train_utterances == 0 {
            return Err(invalid_configuration(
                "min_train_utterances must be strictly positive",
            ));
        }
        if self.parallelism == 0 {
            return Err(invalid_configuration("parallelism must be strictly positive"));
        }
        Ok(())
    }
}

fn invalid_configuration<S: Into<String>>(message: S) -> ::failure::Error {
    SnipsNluMetricsError::InvalidConfiguration(message.into()).into()
}
