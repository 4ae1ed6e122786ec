mod config;
pub mod cross_validation;
mod engine;
pub mod errors;
pub mod metrics;
pub mod models;
#[cfg(test)]
mod testutils;
mod tokenization;
mod utils;

pub use crate::config::{
    CrossValidationConfig, DEFAULT_MIN_TRAIN_UTTERANCES, DEFAULT_SEED, DEFAULT_TRAIN_FRACTION,
};
pub use crate::cross_validation::{
    cross_validate, repeated_cross_validation, CrossValidator, EvaluationContext,
};
pub use crate::engine::NluEngine;
pub use crate::errors::*;
pub use crate::metrics::{IntentLabel, Label, MultiClassF1Scorer, SlotTag};
pub use crate::models::*;
pub use crate::tokenization::UtteranceBuilder;
pub use crate::utils::{ContextName, EntityName, IntentName, SlotName};
