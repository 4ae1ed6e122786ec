pub mod dataset;
pub mod prediction;
pub mod results;
pub mod utterance;

pub use self::dataset::*;
pub use self::prediction::*;
pub use self::results::*;
pub use self::utterance::*;
