/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while interpreting user-facing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The region code is not one of the supported regions.
    #[error("unknown region: \"{0}\" (expected jp, gl, or cn)")]
    UnknownRegion(String),

    /// The attribute key does not name a known field.
    #[error("unknown field: \"{0}\"")]
    UnknownField(String),
}
