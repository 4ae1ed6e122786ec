use std::fmt;

use serde::{Serialize, Serializer};

use crate::utils::{IntentName, SlotName};

pub const OUTSIDE: &str = "O";
pub const NONE_INTENT: &str = "None";

/// A class label that can be fed to a `MultiClassF1Scorer`.
///
/// Sentinel labels take part in per-label scores but are left out of macro averages.
pub trait Label: Clone + Ord + fmt::Display {
    fn is_sentinel(&self) -> bool {
        false
    }
}

impl Label for String {}

/// Token level slot tag, either outside of any slot or inside the named slot
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotTag {
    Outside,
    Slot(SlotName),
}

impl SlotTag {
    pub fn from_slot_name(slot_name: Option<&str>) -> Self {
        slot_name
            .map(|name| SlotTag::Slot(name.to_string()))
            .unwrap_or(SlotTag::Outside)
    }
}

impl fmt::Display for SlotTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotTag::Outside => write!(f, "{}", OUTSIDE),
            SlotTag::Slot(name) => write!(f, "{}", name),
        }
    }
}

impl Label for SlotTag {
    fn is_sentinel(&self) -> bool {
        *self == SlotTag::Outside
    }
}

/// Intent label, `None` standing for an input the engine did not attach to any intent
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntentLabel {
    None,
    Intent(IntentName),
}

impl From<Option<IntentName>> for IntentLabel {
    fn from(intent_name: Option<IntentName>) -> Self {
        intent_name
            .map(IntentLabel::Intent)
            .unwrap_or(IntentLabel::None)
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntentLabel::None => write!(f, "{}", NONE_INTENT),
            IntentLabel::Intent(name) => write!(f, "{}", name),
        }
    }
}

impl Label for IntentLabel {
    fn is_sentinel(&self) -> bool {
        *self == IntentLabel::None
    }
}

macro_rules! serialize_as_str {
    ($label:ty) => {
        impl Serialize for $label {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

serialize_as_str!(SlotTag);
serialize_as_str!(IntentLabel);
