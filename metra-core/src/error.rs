//! Errors raised by the converter
//!
//! All failures are synchronous and surface to the immediate caller; the
//! converter never swallows one. Bulk registration does not roll back
//! partial state on failure - see [`Converter::set_units`].
//!
//! [`Converter::set_units`]: crate::Converter::set_units

use thiserror::Error;

/// Error type for unit registration and conversion
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// A blank unit name was passed to registration.
    #[error("The unit name must not be blank")]
    InvalidUnitName,

    /// A numeric registration factor was NaN or infinite.
    #[error("The conversion factor must be a finite number or a callable")]
    InvalidConversionFactor,

    /// Bulk registration hit an invalid entry; the registry keeps the
    /// entries processed before it.
    #[error("There was an error setting the unit `{unit}`")]
    InvalidUnitRegistration {
        unit: String,
        #[source]
        source: Box<ConvertError>,
    },

    /// A value to convert or normalize was NaN or infinite.
    #[error("The value to convert must be a finite number, got {value}")]
    InvalidValue { value: f64 },

    /// A normalization factor was NaN, infinite, or zero while an inversion
    /// was requested.
    #[error("The normalization factor must be a non-zero finite number or a callable")]
    InvalidNormalizationFactor,

    /// A named unit used in conversion is not registered.
    #[error("Unknown conversion {from} => {to}")]
    UnknownUnit { from: String, to: String },

    /// Normalization failed while converting between two factors.
    #[error("Normalization error")]
    Conversion(#[source] Box<ConvertError>),
}
