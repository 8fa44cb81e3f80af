//! Conversion factors: plain numbers or inversion-aware callables

use std::fmt;
use std::sync::Arc;

/// Function-valued conversion factor, called with `(value, invert)`.
///
/// The callable assumes full responsibility for inversion and scaling
/// semantics; the converter does not validate its return value. It must
/// remain callable for the lifetime of the converter holding it.
pub type DynamicFactor = Arc<dyn Fn(f64, bool) -> f64 + Send + Sync>;

/// A unit's conversion factor relative to the implicit common base.
#[derive(Clone)]
pub enum ConversionFactor {
    /// Plain multiplier; values are divided by it for normalization and
    /// multiplied by it for conversion.
    Numeric(f64),
    /// Callable factor for non-linear or conditional unit relationships,
    /// e.g. units that need calibration data.
    Dynamic(DynamicFactor),
}

impl ConversionFactor {
    /// Wrap a `(value, invert)` closure as a factor.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(f64, bool) -> f64 + Send + Sync + 'static,
    {
        ConversionFactor::Dynamic(Arc::new(f))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, ConversionFactor::Dynamic(_))
    }

    /// The numeric multiplier, or `None` for a dynamic factor.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            ConversionFactor::Numeric(n) => Some(*n),
            ConversionFactor::Dynamic(_) => None,
        }
    }
}

impl From<f64> for ConversionFactor {
    fn from(n: f64) -> Self {
        ConversionFactor::Numeric(n)
    }
}

impl fmt::Debug for ConversionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionFactor::Numeric(n) => f.debug_tuple("Numeric").field(n).finish(),
            ConversionFactor::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Numeric factors compare by value, dynamic factors by identity.
impl PartialEq for ConversionFactor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConversionFactor::Numeric(a), ConversionFactor::Numeric(b)) => a == b,
            (ConversionFactor::Dynamic(a), ConversionFactor::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
