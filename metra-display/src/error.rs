//! Errors raised by the formatter

use metra_core::ConvertError;
use thiserror::Error;

/// Error type for display formatting
#[derive(Debug, Error)]
pub enum FormatError {
    /// No configuration was registered under the requested domain name.
    #[error("No conversion domain named `{0}` is configured")]
    UnknownDomain(String),

    /// The underlying conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}
