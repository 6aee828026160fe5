use thiserror::Error;

/// Errors from the authorization boundary.
///
/// "Policy says no" is never an error; every denial is an ordinary `false`
/// or an empty set from the evaluator.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// An identifier was not well-formed UUID text or a 16-byte packed form.
    /// Raised at the boundary, before any evaluation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The backing store could not be reached or failed mid-query. Callers
    /// must fail closed: surface the failure, never treat it as an allow.
    #[error("authorization storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
}
