mod f1_scorer;
mod labels;

pub use self::f1_scorer::MultiClassF1Scorer;
pub use self::labels::*;
