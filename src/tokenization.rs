use crate::errors::*;
use crate::models::Utterance;

pub trait UtteranceBuilder: Send + Sync {
    /// Tokenizes raw utterances, returning exactly one `Utterance` per input text, in order.
    ///
    /// Fails when the language is not supported or when a text cannot be parsed.
    fn build_utterance_batch(&self, texts: &[String], language: &str) -> Result<Vec<Utterance>>;
}
