//! Metra Display - Locale-Aware Unit Formatting
//!
//! Converts values through a named domain configuration and renders the
//! result for display: rounding, below-minimum fallback units, and
//! translation-template substitution through a pluggable [`Translator`].
//!
//! Configuration arrives as already-deserialized [`DomainConfig`] values;
//! loading them and the file format they live in are the embedding
//! application's concern.

mod config;
mod error;
mod formatter;
mod translate;

pub use config::{DomainConfig, FormatOverrides};
pub use error::FormatError;
pub use formatter::{UnitFormatter, DEFAULT_PATTERN};
pub use translate::Translator;
