use crate::errors::*;
use crate::models::{EntityDefinition, IntentDefinition, PredictionResult};

/// Training and inference entry points of the NLU engine under evaluation.
///
/// `train` must have returned successfully before `predict` is called. Predictions must not
/// depend on previous `predict` calls.
pub trait NluEngine: Send + Sync {
    fn train(
        &mut self,
        train_set: &[IntentDefinition],
        entities: &[EntityDefinition],
        language: &str,
    ) -> Result<()>;

    /// Parses `text`, only considering intents attached to one of `contexts`
    fn predict(&self, text: &str, contexts: &[&str]) -> Result<PredictionResult>;
}

impl<E: NluEngine + ?Sized> NluEngine for Box<E> {
    fn train(
        &mut self,
        train_set: &[IntentDefinition],
        entities: &[EntityDefinition],
        language: &str,
    ) -> Result<()> {
        (**self).train(train_set, entities, language)
    }

    fn predict(&self, text: &str, contexts: &[&str]) -> Result<PredictionResult> {
        (**self).predict(text, contexts)
    }
}
