use thiserror::Error;

/// Error taxonomy for the redemption-hint pipeline.
///
/// All variants are unrecoverable at the calculator's level: they abort the
/// computation and surface to the caller. The core never retries internally
/// and never substitutes defaults, since a fabricated price or debt floor
/// would yield an economically incorrect hint.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("external data unavailable: {0}")]
    DataUnavailable(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}
