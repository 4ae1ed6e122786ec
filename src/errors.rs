use failure::{Context, Fail};

#[derive(Debug, Fail)]
pub enum SnipsNluMetricsError {
    #[fail(display = "Unable to build utterances for language '{}'", language)]
    Tokenization { language: String },
    #[fail(
        display = "Expected {} utterances from tokenizer but found {}",
        expected, found
    )]
    InvalidUtteranceBatch { expected: usize, found: usize },
    #[fail(display = "Engine training failed for language '{}'", language)]
    Training { language: String },
    #[fail(display = "Engine prediction failed on input '{}'", text)]
    Prediction { text: String },
    #[fail(display = "Invalid cross validation configuration: {}", _0)]
    InvalidConfiguration(String),
    #[fail(display = "Unable to read configuration file '{}'", _0)]
    ConfigLoad(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

/// Returns the outermost `SnipsNluMetricsError` found in the error chain, whether it was raised
/// directly or attached as a context on top of a collaborator failure.
pub fn find_error_kind(error: &::failure::Error) -> Option<&SnipsNluMetricsError> {
    error.iter_chain().find_map(|fail| {
        fail.downcast_ref::<SnipsNluMetricsError>().or_else(|| {
            fail.downcast_ref::<Context<SnipsNluMetricsError>>()
                .map(|context| context.get_context())
        })
    })
}
