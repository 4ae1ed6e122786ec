use std::ops::Range;

pub type IntentName = String;
pub type SlotName = String;
pub type EntityName = String;
pub type ContextName = String;

/// Returns true when `inner` lies entirely within `outer`, bounds included
pub fn range_covers(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}
