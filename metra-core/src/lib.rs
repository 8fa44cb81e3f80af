//! Metra Core - Unit Conversion
//!
//! A registry of named units with per-unit conversion factors, and a
//! conversion routine that normalizes values through an implicit common
//! base of magnitude 1.
//!
//! Conversion factors should be relative to that base; factors in SI terms
//! work well, e.g. `metre => 1, kilometre => 1000, yard => 0.9144,
//! foot => 0.3048`. A factor is either a plain number or a callable taking
//! `(value, invert)`, which lets non-linear or asymmetric units participate
//! in the same protocol.

mod converter;
mod error;
mod factor;

pub use converter::Converter;
pub use error::ConvertError;
pub use factor::{ConversionFactor, DynamicFactor};
