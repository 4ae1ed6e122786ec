use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::CrossValidationConfig;
use crate::cross_validation::test_set::{build_test_set, TestSet};
use crate::errors::*;
use crate::models::IntentDefinition;
use crate::tokenization::UtteranceBuilder;

pub type TrainSet = Vec<IntentDefinition>;

/// Splits the `language` utterances of each intent into a training pool and a test set.
///
/// Each intent is split on its own so that the train/test proportions hold per intent. The
/// random source only lives for the duration of the call and is seeded with `config.seed`, hence
/// the same corpus and seed always yield the same split.
pub fn split_dataset<B: UtteranceBuilder + ?Sized>(
    intents: &[IntentDefinition],
    language: &str,
    config: &CrossValidationConfig,
    utterance_builder: &B,
) -> Result<(TrainSet, TestSet)> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut train_set = TrainSet::with_capacity(intents.len());
    let mut test_set = TestSet::new();

    for intent in intents {
        let pool = intent.utterances_for(language);
        let nb_train = (config.train_fraction * pool.len() as f64).floor() as usize;
        if nb_train < config.min_train_utterances {
            warn!(
                "Intent '{}' excluded from cross validation: {} training utterances out of {}, at least {} required",
                intent.name,
                nb_train,
                pool.len(),
                config.min_train_utterances
            );
            continue;
        }

        let mut utterances = pool.to_vec();
        utterances.shuffle(&mut rng);
        let test_utterances = utterances.split_off(nb_train);
        debug!(
            "Intent '{}' split into {} train and {} test utterances",
            intent.name,
            utterances.len(),
            test_utterances.len()
        );

        test_set.extend(build_test_set(
            &test_utterances,
            &intent.contexts,
            &intent.name,
            language,
            utterance_builder,
        )?);
        train_set.push(intent.with_utterances(language, utterances));
    }

    Ok((train_set, test_set))
}
