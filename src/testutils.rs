use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter::FromIterator;
use std::sync::atomic::{AtomicUsize, Ordering};

use failure::{bail, format_err};

use crate::engine::NluEngine;
use crate::errors::*;
use crate::models::*;
use crate::tokenization::UtteranceBuilder;
use crate::utils::{ContextName, IntentName};

pub fn epsilon_eq(a: f32, b: f32, epsilon: f32) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

pub fn intent_with_raw_utterances(
    name: &str,
    contexts: &[&str],
    utterances: &[&str],
) -> IntentDefinition {
    let mut utterances_by_language = HashMap::new();
    utterances_by_language.insert(
        "en".to_string(),
        utterances.iter().map(|u| u.to_string()).collect(),
    );
    IntentDefinition {
        name: name.to_string(),
        contexts: contexts.iter().map(|c| c.to_string()).collect(),
        utterances: utterances_by_language,
        slots: vec![],
    }
}

/// Intent with `nb_utterances` distinct english utterances named after the intent
pub fn intent_with_utterances(
    name: &str,
    contexts: &[&str],
    nb_utterances: usize,
) -> IntentDefinition {
    let utterances: Vec<String> = (0..nb_utterances)
        .map(|i| format!("{} utterance {}", name, i))
        .collect();
    let utterances: Vec<&str> = utterances.iter().map(|u| u.as_str()).collect();
    intent_with_raw_utterances(name, contexts, &utterances)
}

/// Strips the `[value](slot_name)` annotations of a raw utterance, returning the clean text along
/// with the char ranges of the annotated slots
pub fn parse_annotated_utterance(raw: &str) -> Result<(String, Vec<TokenSlot>)> {
    let mut text = String::new();
    let mut slots = vec![];
    let mut rest = raw;
    while let Some(open_ix) = rest.find('[') {
        text.push_str(&rest[..open_ix]);
        let annotation = &rest[open_ix + 1..];
        let value_end = annotation
            .find("](")
            .ok_or_else(|| format_err!("Unclosed slot value in '{}'", raw))?;
        let name_part = &annotation[value_end + 2..];
        let name_end = name_part
            .find(')')
            .ok_or_else(|| format_err!("Unclosed slot name in '{}'", raw))?;
        let value = &annotation[..value_end];
        let start = text.chars().count();
        text.push_str(value);
        slots.push(TokenSlot {
            name: name_part[..name_end].to_string(),
            start,
            end: start + value.chars().count(),
        });
        rest = &name_part[name_end + 1..];
    }
    text.push_str(rest);
    Ok((text, slots))
}

fn tokenize_whitespace(text: &str, slots: &[TokenSlot]) -> Vec<Token> {
    let mut tokens = vec![];
    let mut current: Option<(usize, String)> = None;
    for (char_ix, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            if let Some((offset, value)) = current.take() {
                tokens.push((offset, value));
            }
        } else if let Some((_, ref mut value)) = current {
            value.push(c);
        } else {
            current = Some((char_ix, c.to_string()));
        }
    }
    if let Some((offset, value)) = current {
        tokens.push((offset, value));
    }
    tokens
        .into_iter()
        .map(|(offset, value)| {
            let end = offset + value.chars().count();
            let token_slots = slots
                .iter()
                .filter(|slot| slot.start <= offset && slot.end >= end)
                .cloned()
                .collect();
            Token {
                offset,
                value,
                slots: token_slots,
            }
        })
        .collect()
}

/// Whitespace tokenizer understanding `[value](slot_name)` slot annotations
#[derive(Default)]
pub struct MockedUtteranceBuilder {
    pub unsupported_languages: HashSet<String>,
}

impl MockedUtteranceBuilder {
    pub fn with_unsupported_languages(languages: Vec<&str>) -> Self {
        Self {
            unsupported_languages: languages.into_iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl UtteranceBuilder for MockedUtteranceBuilder {
    fn build_utterance_batch(&self, texts: &[String], language: &str) -> Result<Vec<Utterance>> {
        if self.unsupported_languages.contains(language) {
            bail!("Language '{}' is not supported", language);
        }
        texts
            .iter()
            .map(|raw| {
                let (text, slots) = parse_annotated_utterance(raw)?;
                let tokens = tokenize_whitespace(&text, &slots);
                Ok(Utterance { text, tokens })
            })
            .collect()
    }
}

/// Engine returning canned predictions indexed by input text.
///
/// Once trained, a canned intent whose contexts do not intersect the requested ones is replaced by
/// an empty prediction, the way a real engine restricts its candidate intents.
#[derive(Default)]
pub struct MockedNluEngine {
    pub mocked_outputs: HashMap<String, PredictionResult>,
    pub fail_training: bool,
    pub fail_prediction: bool,
    trained_intents: Vec<IntentDefinition>,
    intent_contexts: HashMap<IntentName, Vec<ContextName>>,
    predict_calls: AtomicUsize,
}

impl MockedNluEngine {
    /// Engine predicting the expected intent and slots of every utterance of the corpus
    pub fn perfect(intents: &[IntentDefinition], language: &str) -> Self {
        intents
            .iter()
            .flat_map(|intent| {
                intent
                    .utterances_for(language)
                    .iter()
                    .map(move |raw| canned_prediction(raw, Some(intent.name.as_str()), true))
            })
            .collect()
    }

    /// Engine always predicting `intent_name`, without any slot, on utterances of the corpus
    pub fn biased(intents: &[IntentDefinition], language: &str, intent_name: &str) -> Self {
        intents
            .iter()
            .flat_map(|intent| {
                intent
                    .utterances_for(language)
                    .iter()
                    .map(move |raw| canned_prediction(raw, Some(intent_name), false))
            })
            .collect()
    }

    pub fn failing_training(mut self) -> Self {
        self.fail_training = true;
        self
    }

    pub fn failing_prediction(mut self) -> Self {
        self.fail_prediction = true;
        self
    }

    pub fn trained_intents(&self) -> &[IntentDefinition] {
        &self.trained_intents
    }

    pub fn nb_predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }
}

fn canned_prediction(
    raw: &str,
    intent_name: Option<&str>,
    with_slots: bool,
) -> (String, PredictionResult) {
    let (text, slots) = parse_annotated_utterance(raw).unwrap();
    let predicted_slots: BTreeMap<String, PredictedSlot> = if with_slots {
        slots
            .into_iter()
            .enumerate()
            .map(|(ix, slot)| {
                (
                    format!("slot_{}", ix),
                    PredictedSlot {
                        name: slot.name,
                        start: slot.start,
                        end: slot.end,
                    },
                )
            })
            .collect()
    } else {
        BTreeMap::new()
    };
    let prediction = PredictionResult {
        intent: PredictedIntent {
            name: intent_name.map(|name| name.to_string()),
            confidence_score: 1.0,
        },
        slots: predicted_slots,
    };
    (text, prediction)
}

impl NluEngine for MockedNluEngine {
    fn train(
        &mut self,
        train_set: &[IntentDefinition],
        _entities: &[EntityDefinition],
        _language: &str,
    ) -> Result<()> {
        if self.fail_training {
            bail!("Training crashed");
        }
        self.trained_intents = train_set.to_vec();
        self.intent_contexts = train_set
            .iter()
            .map(|intent| (intent.name.clone(), intent.contexts.clone()))
            .collect();
        Ok(())
    }

    fn predict(&self, text: &str, contexts: &[&str]) -> Result<PredictionResult> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_prediction {
            bail!("Prediction crashed on '{}'", text);
        }
        let prediction = self
            .mocked_outputs
            .get(text)
            .cloned()
            .unwrap_or_else(PredictionResult::empty);
        let out_of_contexts = prediction
            .intent
            .name
            .as_ref()
            .and_then(|name| self.intent_contexts.get(name))
            .map(|intent_contexts| {
                !intent_contexts
                    .iter()
                    .any(|context| contexts.contains(&context.as_str()))
            })
            .unwrap_or(false);
        if out_of_contexts {
            Ok(PredictionResult::empty())
        } else {
            Ok(prediction)
        }
    }
}

impl FromIterator<(String, PredictionResult)> for MockedNluEngine {
    fn from_iter<T: IntoIterator<Item = (String, PredictionResult)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotated_utterance() {
        // When
        let (text, slots) = parse_annotated_utterance("fly to [new york](city) [now](date)").unwrap();

        // Then
        assert_eq!("fly to new york now", text);
        let expected_slots = vec![
            TokenSlot {
                name: "city".to_string(),
                start: 7,
                end: 15,
            },
            TokenSlot {
                name: "date".to_string(),
                start: 16,
                end: 19,
            },
        ];
        assert_eq!(expected_slots, slots);
    }

    #[test]
    fn test_mocked_utterance_builder_tokenizes_with_slots() {
        // When
        let utterances = MockedUtteranceBuilder::default()
            .build_utterance_batch(&["fly  to [new york](city)".to_string()], "en")
            .unwrap();

        // Then
        let tokens: Vec<(usize, &str, Option<&str>)> = utterances[0]
            .tokens
            .iter()
            .map(|t| (t.offset, t.value.as_str(), t.slot_name()))
            .collect();
        let expected_tokens = vec![
            (0, "fly", None),
            (5, "to", None),
            (8, "new", Some("city")),
            (12, "york", Some("city")),
        ];
        assert_eq!(expected_tokens, tokens);
    }
}
