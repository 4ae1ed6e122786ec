use std::collections::{BTreeMap, BTreeSet};

use crate::metrics::Label;
use crate::models::{F1Score, F1Summary};

/// Accumulates (predicted, actual) label pairs and derives per label precision, recall and F1.
///
/// The label universe is not declared up front: every label passed to `record` becomes part of
/// the results, whether it was seen as a prediction, as an expectation, or both.
#[derive(Debug, Clone)]
pub struct MultiClassF1Scorer<L: Label> {
    confusion_counts: BTreeMap<(L, L), usize>,
}

impl<L: Label> Default for MultiClassF1Scorer<L> {
    fn default() -> Self {
        Self {
            confusion_counts: BTreeMap::new(),
        }
    }
}

impl<L: Label> MultiClassF1Scorer<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, predicted: L, actual: L) {
        *self
            .confusion_counts
            .entry((predicted, actual))
            .or_insert(0) += 1;
    }

    pub fn confusion_count(&self, predicted: &L, actual: &L) -> usize {
        self.confusion_counts
            .get(&(predicted.clone(), actual.clone()))
            .cloned()
            .unwrap_or(0)
    }

    pub fn nb_records(&self) -> usize {
        self.confusion_counts.values().sum()
    }

    pub fn labels(&self) -> BTreeSet<L> {
        self.confusion_counts
            .keys()
            .flat_map(|(predicted, actual)| vec![predicted.clone(), actual.clone()])
            .collect()
    }

    pub fn results(&self) -> F1Summary<L> {
        let mut true_positives: BTreeMap<&L, usize> = BTreeMap::new();
        let mut nb_predicted: BTreeMap<&L, usize> = BTreeMap::new();
        let mut nb_actual: BTreeMap<&L, usize> = BTreeMap::new();
        for ((predicted, actual), count) in &self.confusion_counts {
            *nb_predicted.entry(predicted).or_insert(0) += count;
            *nb_actual.entry(actual).or_insert(0) += count;
            if predicted == actual {
                *true_positives.entry(actual).or_insert(0) += count;
            }
        }
        let count_of = |counts: &BTreeMap<&L, usize>, label: &L| -> usize {
            counts.get(label).cloned().unwrap_or(0)
        };
        let per_label = self
            .labels()
            .into_iter()
            .map(|label| {
                let score = F1Score::from_counts(
                    count_of(&true_positives, &label),
                    count_of(&nb_predicted, &label),
                    count_of(&nb_actual, &label),
                );
                (label, score)
            })
            .collect();
        F1Summary::new(per_label)
    }
}
