//! Per-domain display configuration
//!
//! The shape a config provider hands the formatter for one conversion
//! domain, plus the partial form used for call-site overrides and for the
//! below-minimum fallback block.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for one conversion domain (e.g. "distance").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// `unit => factor` mapping seeding the domain's converter. Factors are
    /// relative to a common base; callable factors cannot be expressed in
    /// configuration and are registered programmatically instead.
    pub units: HashMap<String, f64>,
    /// Source unit of incoming values.
    pub from: String,
    /// Target unit to display.
    pub to: String,
    /// Decimal places for rounding the converted value.
    #[serde(default)]
    pub rounding: u32,
    /// Translation key; when unset, `metra.{domain}` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Threshold below which the fallback overrides apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Overrides applied when the converted value falls below `min`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FormatOverrides>,
}

/// Partial domain configuration; set fields replace the configured ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl FormatOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_unit(mut self, unit: impl Into<String>) -> Self {
        self.from = Some(unit.into());
        self
    }

    pub fn to_unit(mut self, unit: impl Into<String>) -> Self {
        self.to = Some(unit.into());
        self
    }

    pub fn rounding(mut self, places: u32) -> Self {
        self.rounding = Some(places);
        self
    }

    pub fn translation(mut self, key: impl Into<String>) -> Self {
        self.translation = Some(key.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_config_from_json() {
        let config: DomainConfig = serde_json::from_str(
            r#"{
                "units": { "km": 1, "m": 0.001, "mi": 1.609344 },
                "from": "km",
                "to": "mi",
                "rounding": 1,
                "translation": "app.distance",
                "min": 0.1,
                "fallback": { "to": "m", "rounding": 0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.units.len(), 3);
        assert_eq!(config.from, "km");
        assert_eq!(config.to, "mi");
        assert_eq!(config.rounding, 1);
        assert_eq!(config.translation.as_deref(), Some("app.distance"));
        assert_eq!(config.min, Some(0.1));

        let fallback = config.fallback.unwrap();
        assert_eq!(fallback.to.as_deref(), Some("m"));
        assert_eq!(fallback.rounding, Some(0));
        assert_eq!(fallback.from, None);
    }

    #[test]
    fn test_domain_config_defaults() {
        let config: DomainConfig = serde_json::from_str(
            r#"{ "units": { "km": 1 }, "from": "km", "to": "km" }"#,
        )
        .unwrap();

        assert_eq!(config.rounding, 0);
        assert_eq!(config.translation, None);
        assert_eq!(config.min, None);
        assert!(config.fallback.is_none());
    }

    #[test]
    fn test_overrides_builder() {
        let overrides = FormatOverrides::new()
            .from_unit("yd")
            .to_unit("ft")
            .rounding(2)
            .min(1.0);

        assert_eq!(overrides.from.as_deref(), Some("yd"));
        assert_eq!(overrides.to.as_deref(), Some("ft"));
        assert_eq!(overrides.rounding, Some(2));
        assert_eq!(overrides.min, Some(1.0));
        assert_eq!(overrides.translation, None);
    }
}
