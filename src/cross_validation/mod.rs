mod context;
mod splitter;
mod test_set;

use std::collections::BTreeMap;

use failure::ResultExt;
use log::{debug, info};
use rayon::prelude::*;

pub use self::context::{ContextUniverse, EvaluationContext, ALL_CONTEXTS};
pub use self::splitter::{split_dataset, TrainSet};
pub use self::test_set::{build_test_set, TestExample, TestSet};

use crate::config::CrossValidationConfig;
use crate::engine::NluEngine;
use crate::errors::*;
use crate::metrics::{IntentLabel, MultiClassF1Scorer, SlotTag};
use crate::models::{
    CrossValidationResult, EntityDefinition, IntentDefinition, PredictionResult,
    RepeatedCrossValidationResult, SeededRun,
};
use crate::tokenization::UtteranceBuilder;

/// Splits the corpus, trains `engine` on the training part and scores its predictions on the
/// held out part.
///
/// Intent predictions are scored once per context of each test example, and once more against
/// all contexts at the same time when the corpus has several of them. Slots are scored token by
/// token using the prediction made against all contexts.
///
/// Any tokenization, training or prediction failure aborts the whole run.
pub fn cross_validate<E, B>(
    engine: &mut E,
    utterance_builder: &B,
    intents: &[IntentDefinition],
    entities: &[EntityDefinition],
    language: &str,
    config: &CrossValidationConfig,
) -> Result<CrossValidationResult>
where
    E: NluEngine + ?Sized,
    B: UtteranceBuilder + ?Sized,
{
    config.validate()?;
    info!(
        "Starting cross validation on {} intents in '{}' with seed {}",
        intents.len(),
        language,
        config.seed
    );

    let (train_set, test_set) = split_dataset(intents, language, config, utterance_builder)?;
    info!(
        "Dataset split into {} training intents and {} test examples",
        train_set.len(),
        test_set.len()
    );

    info!("Training engine");
    engine
        .train(&train_set, entities, language)
        .with_context(|_| SnipsNluMetricsError::Training {
            language: language.to_string(),
        })?;
    info!("Engine trained");

    let universe = ContextUniverse::from_intents(intents);
    debug!("Evaluating intents in contexts {:?}", universe.contexts());

    let outcomes = evaluate_test_set(&*engine, &test_set, &universe, config.parallelism)?;

    let mut intent_scorers: BTreeMap<EvaluationContext, MultiClassF1Scorer<IntentLabel>> =
        universe
            .evaluation_contexts()
            .into_iter()
            .map(|context| (context, MultiClassF1Scorer::new()))
            .collect();
    let mut slot_scorer = MultiClassF1Scorer::new();
    for outcome in outcomes {
        for (context, predicted) in outcome.intents {
            if let Some(scorer) = intent_scorers.get_mut(&context) {
                scorer.record(predicted, outcome.expected_intent.clone());
            }
        }
        for (predicted, expected) in outcome.slots {
            slot_scorer.record(predicted, expected);
        }
    }

    let result = CrossValidationResult {
        intents: intent_scorers
            .into_iter()
            .map(|(context, scorer)| (context, scorer.results()))
            .collect(),
        slots: slot_scorer.results(),
    };
    info!(
        "Cross validation done, slots macro F1: {:.3}",
        result.slots.macro_f1
    );
    Ok(result)
}

/// Runs `cross_validate` once per seed, useful when a single split is not significant enough
pub fn repeated_cross_validation<E, B>(
    engine: &mut E,
    utterance_builder: &B,
    intents: &[IntentDefinition],
    entities: &[EntityDefinition],
    language: &str,
    config: &CrossValidationConfig,
    seeds: &[u64],
) -> Result<RepeatedCrossValidationResult>
where
    E: NluEngine + ?Sized,
    B: UtteranceBuilder + ?Sized,
{
    if seeds.is_empty() {
        return Err(SnipsNluMetricsError::InvalidConfiguration(
            "at least one seed is required".to_string(),
        )
        .into());
    }
    let runs = seeds
        .iter()
        .map(|seed| {
            let run_config = config.with_seed(*seed);
            let result = cross_validate(
                &mut *engine,
                utterance_builder,
                intents,
                entities,
                language,
                &run_config,
            )?;
            Ok(SeededRun {
                seed: *seed,
                result,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(RepeatedCrossValidationResult { runs })
}

pub struct CrossValidator<'a, E: ?Sized, B: ?Sized> {
    engine: &'a mut E,
    utterance_builder: &'a B,
    config: CrossValidationConfig,
}

impl<'a, E, B> CrossValidator<'a, E, B>
where
    E: NluEngine + ?Sized,
    B: UtteranceBuilder + ?Sized,
{
    pub fn new(engine: &'a mut E, utterance_builder: &'a B) -> Self {
        Self {
            engine,
            utterance_builder,
            config: CrossValidationConfig::default(),
        }
    }

    pub fn config(mut self, config: CrossValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn parallelism(mut self, parallelism: usize) -> Self {
        self.config.parallelism = parallelism;
        self
    }

    pub fn run(
        &mut self,
        intents: &[IntentDefinition],
        entities: &[EntityDefinition],
        language: &str,
    ) -> Result<CrossValidationResult> {
        cross_validate(
            &mut *self.engine,
            self.utterance_builder,
            intents,
            entities,
            language,
            &self.config,
        )
    }

    pub fn run_repeated(
        &mut self,
        intents: &[IntentDefinition],
        entities: &[EntityDefinition],
        language: &str,
        seeds: &[u64],
    ) -> Result<RepeatedCrossValidationResult> {
        repeated_cross_validation(
            &mut *self.engine,
            self.utterance_builder,
            intents,
            entities,
            language,
            &self.config,
            seeds,
        )
    }
}

/// Label pairs produced by the evaluation of a single test example
#[derive(Debug, Clone, PartialEq)]
struct ExampleOutcome {
    expected_intent: IntentLabel,
    /// Predicted intent for each context the example was evaluated in
    intents: Vec<(EvaluationContext, IntentLabel)>,
    /// (predicted, expected) tag for each token
    slots: Vec<(SlotTag, SlotTag)>,
}

fn evaluate_test_set<E: NluEngine + ?Sized>(
    engine: &E,
    test_set: &[TestExample],
    universe: &ContextUniverse,
    parallelism: usize,
) -> Result<Vec<ExampleOutcome>> {
    if parallelism <= 1 {
        return test_set
            .iter()
            .map(|example| evaluate_example(engine, example, universe))
            .collect();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()?;
    pool.install(|| {
        test_set
            .par_iter()
            .map(|example| evaluate_example(engine, example, universe))
            .collect()
    })
}

fn evaluate_example<E: NluEngine + ?Sized>(
    engine: &E,
    example: &TestExample,
    universe: &ContextUniverse,
) -> Result<ExampleOutcome> {
    let text = example.utterance.text.as_str();
    debug!("Evaluating '{}' (intent '{}')", text, example.intent);

    let mut intents = Vec::with_capacity(example.contexts.len() + 1);
    for context in &example.contexts {
        let prediction = predict(engine, text, &[context.as_str()])?;
        intents.push((
            EvaluationContext::Single(context.clone()),
            IntentLabel::from(prediction.intent.name),
        ));
    }

    let prediction = predict(engine, text, &universe.contexts())?;
    if universe.has_all_context() {
        intents.push((
            EvaluationContext::All,
            IntentLabel::from(prediction.intent.name.clone()),
        ));
    }

    let slots = example
        .utterance
        .tokens
        .iter()
        .zip(example.slots.iter())
        .map(|(token, expected)| {
            let predicted = SlotTag::from_slot_name(
                prediction
                    .slot_covering(token)
                    .map(|slot| slot.name.as_str()),
            );
            (predicted, expected.clone())
        })
        .collect();

    Ok(ExampleOutcome {
        expected_intent: IntentLabel::Intent(example.intent.clone()),
        intents,
        slots,
    })
}

fn predict<E: NluEngine + ?Sized>(
    engine: &E,
    text: &str,
    contexts: &[&str],
) -> Result<PredictionResult> {
    Ok(engine
        .predict(text, contexts)
        .with_context(|_| SnipsNluMetricsError::Prediction {
            text: text.to_string(),
        })?)
}
