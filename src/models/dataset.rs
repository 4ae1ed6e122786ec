use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::{ContextName, EntityName, IntentName, SlotName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub name: IntentName,
    #[serde(default)]
    pub contexts: Vec<ContextName>,
    /// Raw utterances indexed by language code
    #[serde(default)]
    pub utterances: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
}

impl IntentDefinition {
    pub fn utterances_for(&self, language: &str) -> &[String] {
        self.utterances
            .get(language)
            .map(|utterances| utterances.as_slice())
            .unwrap_or(&[])
    }

    /// Copy of this intent whose utterance pool only contains `utterances` for `language`
    pub fn with_utterances(&self, language: &str, utterances: Vec<String>) -> Self {
        let mut utterances_by_language = HashMap::with_capacity(1);
        utterances_by_language.insert(language.to_string(), utterances);
        Self {
            name: self.name.clone(),
            contexts: self.contexts.clone(),
            utterances: utterances_by_language,
            slots: self.slots.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub name: SlotName,
    #[serde(default)]
    pub entities: Vec<EntityName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    System,
    List,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityOccurrence {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub id: String,
    pub name: EntityName,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub occurrences: Vec<EntityOccurrence>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default)]
    pub sensitive: bool,
}
