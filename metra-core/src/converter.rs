//! Converter between named units through an implicit common base

use std::collections::HashMap;

use crate::error::ConvertError;
use crate::factor::ConversionFactor;

/// Converts values from one named unit to another.
///
/// Every factor is relative to an assumed common base of magnitude 1; a
/// conversion normalizes the value into that base and re-expresses it in
/// the target unit. Registration and conversion are both O(1) per call.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    units: HashMap<String, ConversionFactor>,
}

impl Converter {
    /// Create a converter with an empty unit registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from an initial `unit => factor` mapping.
    pub fn with_units<I, N, F>(units: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = (N, F)>,
        N: Into<String>,
        F: Into<ConversionFactor>,
    {
        let mut converter = Self::new();
        converter.set_units(units)?;
        Ok(converter)
    }

    /// Sets the conversion factor for the given unit name.
    ///
    /// Values are divided by `factor` for normalization and multiplied by
    /// it for conversion. An existing registration is overwritten.
    pub fn set_unit(
        &mut self,
        unit: impl Into<String>,
        factor: impl Into<ConversionFactor>,
    ) -> Result<(), ConvertError> {
        let unit = unit.into();
        if unit.is_empty() {
            return Err(ConvertError::InvalidUnitName);
        }
        let factor = factor.into();
        if let ConversionFactor::Numeric(n) = &factor {
            if !n.is_finite() {
                return Err(ConvertError::InvalidConversionFactor);
            }
        }
        self.units.insert(unit, factor);
        Ok(())
    }

    /// Returns the given unit's conversion factor, or `None` if the unit
    /// is not registered.
    pub fn get_unit(&self, unit: &str) -> Option<&ConversionFactor> {
        self.units.get(unit)
    }

    /// Returns whether this converter has the given unit.
    pub fn has_unit(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Replaces the unit registry with the given `unit => factor` mapping.
    ///
    /// The registry is cleared first and entries are registered one by one,
    /// so on the first invalid entry it is left with the entries processed
    /// up to that point.
    pub fn set_units<I, N, F>(&mut self, units: I) -> Result<(), ConvertError>
    where
        I: IntoIterator<Item = (N, F)>,
        N: Into<String>,
        F: Into<ConversionFactor>,
    {
        self.units.clear();
        for (unit, factor) in units {
            let unit = unit.into();
            self.set_unit(unit.clone(), factor)
                .map_err(|e| ConvertError::InvalidUnitRegistration {
                    unit,
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    /// The current unit registry, as a read-only view.
    pub fn units(&self) -> &HashMap<String, ConversionFactor> {
        &self.units
    }

    /// Converts `value` from one named unit to another.
    pub fn convert_units(&self, value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
        if !value.is_finite() {
            return Err(ConvertError::InvalidValue { value });
        }

        let (Some(normalization), Some(conversion)) = (self.get_unit(from), self.get_unit(to))
        else {
            return Err(ConvertError::UnknownUnit {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        self.convert(value, normalization, conversion)
    }

    /// Converts `value`, expressed as a multiple of `normalization_factor`,
    /// into a multiple of `conversion_factor`.
    ///
    /// A numeric conversion factor of exactly zero short-circuits to `0.0`
    /// before the normalization factor is looked at, so inverting by zero
    /// is never reached on that path.
    pub fn convert(
        &self,
        value: f64,
        normalization_factor: &ConversionFactor,
        conversion_factor: &ConversionFactor,
    ) -> Result<f64, ConvertError> {
        if conversion_factor.as_numeric() == Some(0.0) {
            return Ok(0.0);
        }

        let normalized = self
            .normalize(value, normalization_factor, true)
            .map_err(|e| ConvertError::Conversion(Box::new(e)))?;
        self.normalize(normalized, conversion_factor, false)
            .map_err(|e| ConvertError::Conversion(Box::new(e)))
    }

    /// Normalizes `value` by `factor`.
    ///
    /// A numeric factor divides the value, after being replaced by its
    /// reciprocal when `invert` is set; zero is allowed only when `invert`
    /// is false and is then used as-is. A dynamic factor is called with
    /// `(value, invert)` and its result returned unchecked.
    pub fn normalize(
        &self,
        value: f64,
        factor: &ConversionFactor,
        invert: bool,
    ) -> Result<f64, ConvertError> {
        if !value.is_finite() {
            return Err(ConvertError::InvalidValue { value });
        }

        match factor {
            ConversionFactor::Dynamic(f) => Ok(f(value, invert)),
            ConversionFactor::Numeric(n) => {
                if !n.is_finite() || (*n == 0.0 && invert) {
                    return Err(ConvertError::InvalidNormalizationFactor);
                }
                let factor = if invert { 1.0 / n } else { *n };
                Ok(value / factor)
            }
        }
    }
}
