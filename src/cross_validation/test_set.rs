use failure::ResultExt;

use crate::errors::*;
use crate::metrics::SlotTag;
use crate::models::Utterance;
use crate::tokenization::UtteranceBuilder;
use crate::utils::{ContextName, IntentName};

/// A held out utterance along with its expected labels
#[derive(Debug, Clone, PartialEq)]
pub struct TestExample {
    pub utterance: Utterance,
    pub contexts: Vec<ContextName>,
    pub intent: IntentName,
    /// One expected tag per token of the utterance
    pub slots: Vec<SlotTag>,
}

pub type TestSet = Vec<TestExample>;

pub fn build_test_set<B: UtteranceBuilder + ?Sized>(
    raw_texts: &[String],
    contexts: &[ContextName],
    intent: &str,
    language: &str,
    utterance_builder: &B,
) -> Result<TestSet> {
    if raw_texts.is_empty() {
        return Ok(vec![]);
    }
    let utterances = utterance_builder
        .build_utterance_batch(raw_texts, language)
        .with_context(|_| SnipsNluMetricsError::Tokenization {
            language: language.to_string(),
        })?;
    if utterances.len() != raw_texts.len() {
        return Err(SnipsNluMetricsError::InvalidUtteranceBatch {
            expected: raw_texts.len(),
            found: utterances.len(),
        }
        .into());
    }
    Ok(utterances
        .into_iter()
        .map(|utterance| {
            let slots = utterance
                .tokens
                .iter()
                .map(|token| SlotTag::from_slot_name(token.slot_name()))
                .collect();
            TestExample {
                utterance,
                contexts: contexts.to_vec(),
                intent: intent.to_string(),
                slots,
            }
        })
        .collect())
}
