use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::utils::SlotName;

/// Slot annotation attached to a token, bounds are char offsets in the utterance text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSlot {
    pub name: SlotName,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Char offset of the token in the utterance text
    pub offset: usize,
    pub value: String,
    #[serde(default)]
    pub slots: Vec<TokenSlot>,
}

impl Token {
    pub fn char_range(&self) -> Range<usize> {
        self.offset..self.offset + self.value.chars().count()
    }

    /// Name of the first slot annotation carried by this token, if any
    pub fn slot_name(&self) -> Option<&str> {
        self.slots.first().map(|slot| slot.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
