/// Invalid command-line values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("expected TAG=VALUE: {0}")]
    InvalidAxisSpec(String),

    #[error("axis tag must be 4 characters: {0}")]
    InvalidTag(String),

    #[error("invalid axis value: {0}")]
    InvalidValue(String),

    #[error("axis value must be finite: {0}")]
    NonFiniteValue(String),

    #[error("expected START..END character offsets: {0}")]
    InvalidRange(String),

    #[error("range must not be empty: {0}")]
    EmptyRange(String),
}
