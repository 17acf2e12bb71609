use thiserror::Error;

/// Errors returned by datasets, tree parameters and the text tree itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// Training or evaluation data doesn't have the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// `predict` or `pretty_print` was called before `fit`.
    #[error("Tree wasn't built yet.")]
    NotFitted,
    /// A tree parameter was set to an unusable value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
