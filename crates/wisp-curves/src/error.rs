use thiserror::Error;

/// Failure to read a `#rrggbb` colour coming from the colour picker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("colour must start with '#'")]
    MissingHash,
    #[error("expected 6 hex digits after '#', found {0}")]
    BadLength(usize),
    #[error("invalid hex digits in colour '{0}'")]
    BadHex(String),
}
