use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::models::IntentDefinition;
use crate::utils::ContextName;

pub const ALL_CONTEXTS: &str = "all";

/// Context in which intent predictions are scored
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum EvaluationContext {
    /// Predictions made against every context of the corpus at once
    All,
    Single(ContextName),
}

impl EvaluationContext {
    pub fn single<S: Into<ContextName>>(name: S) -> Self {
        EvaluationContext::Single(name.into())
    }
}

impl fmt::Display for EvaluationContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationContext::All => write!(f, "{}", ALL_CONTEXTS),
            EvaluationContext::Single(name) => write!(f, "{}", name),
        }
    }
}

/// Deduplicated contexts referenced by the intents of a corpus, in order of first appearance
#[derive(Debug, Clone, PartialEq)]
pub struct ContextUniverse {
    contexts: Vec<ContextName>,
}

impl ContextUniverse {
    pub fn from_intents(intents: &[IntentDefinition]) -> Self {
        let contexts = intents
            .iter()
            .flat_map(|intent| intent.contexts.iter().cloned())
            .unique()
            .collect();
        Self { contexts }
    }

    pub fn contexts(&self) -> Vec<&str> {
        self.contexts.iter().map(|context| context.as_str()).collect()
    }

    pub fn has_all_context(&self) -> bool {
        self.contexts.len() > 1
    }

    /// Contexts that get their own intent scorer, `All` only exists when several contexts do
    pub fn evaluation_contexts(&self) -> Vec<EvaluationContext> {
        let all_context = if self.has_all_context() {
            Some(EvaluationContext::All)
        } else {
            None
        };
        all_context
            .into_iter()
            .chain(self.contexts.iter().cloned().map(EvaluationContext::Single))
            .collect()
    }
}
