use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::models::utterance::Token;
use crate::utils::{range_covers, IntentName, SlotName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedIntent {
    /// `None` when the engine did not match any intent
    pub name: Option<IntentName>,
    pub confidence_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedSlot {
    pub name: SlotName,
    pub start: usize,
    pub end: usize,
}

impl PredictedSlot {
    pub fn char_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn covers(&self, token: &Token) -> bool {
        range_covers(&self.char_range(), &token.char_range())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub intent: PredictedIntent,
    /// Extracted slots indexed by slot id
    #[serde(default)]
    pub slots: BTreeMap<String, PredictedSlot>,
}

impl PredictionResult {
    pub fn empty() -> PredictionResult {
        PredictionResult {
            intent: PredictedIntent {
                name: None,
                confidence_score: 1.0,
            },
            slots: BTreeMap::new(),
        }
    }

    /// First extracted slot, in slot id order, whose span covers the whole token
    pub fn slot_covering(&self, token: &Token) -> Option<&PredictedSlot> {
        self.slots.values().find(|slot| slot.covers(token))
    }
}
