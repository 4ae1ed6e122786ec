use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::cross_validation::EvaluationContext;
use crate::metrics::{IntentLabel, Label, SlotTag};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct F1Score {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Number of times the label was the expected one
    pub support: usize,
}

impl F1Score {
    pub fn from_counts(true_positives: usize, nb_predicted: usize, nb_actual: usize) -> Self {
        let precision = ratio(true_positives, nb_predicted);
        let recall = ratio(true_positives, nb_actual);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            precision,
            recall,
            f1,
            support: nb_actual,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct F1Summary<L: Label> {
    pub per_label: BTreeMap<L, F1Score>,
    pub macro_precision: f32,
    pub macro_recall: f32,
    pub macro_f1: f32,
}

impl<L: Label> F1Summary<L> {
    /// Builds the summary, macro averages skip sentinel labels
    pub fn new(per_label: BTreeMap<L, F1Score>) -> Self {
        let scores: Vec<&F1Score> = per_label
            .iter()
            .filter(|(label, _)| !label.is_sentinel())
            .map(|(_, score)| score)
            .collect();
        let mean = |value: fn(&F1Score) -> f32| {
            if scores.is_empty() {
                0.0
            } else {
                scores.iter().map(|score| value(score)).sum::<f32>() / scores.len() as f32
            }
        };
        let macro_precision = mean(|score| score.precision);
        let macro_recall = mean(|score| score.recall);
        let macro_f1 = mean(|score| score.f1);
        Self {
            per_label,
            macro_precision,
            macro_recall,
            macro_f1,
        }
    }

    pub fn get(&self, label: &L) -> Option<&F1Score> {
        self.per_label.get(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidationResult {
    /// Serialized as a list of `{context, scores}` entries since contexts are not plain strings
    #[serde(serialize_with = "serialize_context_scores")]
    pub intents: BTreeMap<EvaluationContext, F1Summary<IntentLabel>>,
    pub slots: F1Summary<SlotTag>,
}

#[derive(Serialize)]
struct ContextScores<'a> {
    context: &'a EvaluationContext,
    scores: &'a F1Summary<IntentLabel>,
}

fn serialize_context_scores<S: Serializer>(
    intents: &BTreeMap<EvaluationContext, F1Summary<IntentLabel>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        intents
            .iter()
            .map(|(context, scores)| ContextScores { context, scores }),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeededRun {
    pub seed: u64,
    pub result: CrossValidationResult,
}

/// Results of several cross validation runs over the same corpus with different seeds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatedCrossValidationResult {
    pub runs: Vec<SeededRun>,
}

impl RepeatedCrossValidationResult {
    /// Mean of the intent macro F1 of `context` over the runs where the context was evaluated
    pub fn mean_intent_macro_f1(&self, context: &EvaluationContext) -> Option<f32> {
        let scores: Vec<f32> = self
            .runs
            .iter()
            .filter_map(|run| run.result.intents.get(context))
            .map(|summary| summary.macro_f1)
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f32>() / scores.len() as f32)
        }
    }

    pub fn mean_slot_macro_f1(&self) -> f32 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs
            .iter()
            .map(|run| run.result.slots.macro_f1)
            .sum::<f32>()
            / self.runs.len() as f32
    }
}
