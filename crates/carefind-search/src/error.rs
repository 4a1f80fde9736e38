use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Rejected before any external call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("all {attempted} place searches failed")]
    AllSearchesFailed { attempted: usize },
}
