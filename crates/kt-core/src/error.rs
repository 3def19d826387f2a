use thiserror::Error;

pub type KtResult<T> = Result<T, KtError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KtError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
