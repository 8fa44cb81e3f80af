//! Formats converted values for display
//!
//! A formatter owns one converter per configured domain. Formatting merges
//! the domain configuration with call-site overrides, converts, applies the
//! below-minimum fallback, rounds, and renders through the translator or a
//! plain placeholder pattern.

use std::collections::HashMap;
use std::sync::Arc;

use metra_core::Converter;
use tracing::debug;

use crate::config::{DomainConfig, FormatOverrides};
use crate::error::FormatError;
use crate::translate::Translator;

/// Pattern used when no translator is set; `%value%` and `%units%` are
/// replaced with the rounded value and the target unit label.
pub const DEFAULT_PATTERN: &str = "%value%%units%";

/// Converts values per named domain configurations and renders the results
/// for display.
pub struct UnitFormatter {
    domains: HashMap<String, Domain>,
    translator: Option<Arc<dyn Translator>>,
    locale: Option<String>,
}

impl std::fmt::Debug for UnitFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitFormatter")
            .field("domains", &self.domains.keys().collect::<Vec<_>>())
            .field("translator", &self.translator.as_ref().map(|_| "<translator>"))
            .field("locale", &self.locale)
            .finish()
    }
}

struct Domain {
    config: DomainConfig,
    converter: Converter,
}

impl UnitFormatter {
    pub fn new() -> Self {
        Self {
            domains: HashMap::new(),
            translator: None,
            locale: None,
        }
    }

    /// Register a conversion domain; its converter is seeded from the
    /// configured `units` map.
    pub fn with_domain(
        mut self,
        name: impl Into<String>,
        config: DomainConfig,
    ) -> Result<Self, FormatError> {
        self.set_domain(name, config)?;
        Ok(self)
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Register or replace a conversion domain.
    pub fn set_domain(
        &mut self,
        name: impl Into<String>,
        config: DomainConfig,
    ) -> Result<(), FormatError> {
        let converter = Converter::with_units(
            config.units.iter().map(|(unit, factor)| (unit.clone(), *factor)),
        )?;
        self.domains.insert(name.into(), Domain { config, converter });
        Ok(())
    }

    /// The configuration registered for the named domain.
    pub fn config(&self, domain: &str) -> Option<&DomainConfig> {
        self.domains.get(domain).map(|d| &d.config)
    }

    /// The converter for the named domain.
    pub fn converter(&self, domain: &str) -> Option<&Converter> {
        self.domains.get(domain).map(|d| &d.converter)
    }

    /// Mutable converter access, for registering dynamic factors that
    /// cannot be expressed in configuration.
    pub fn converter_mut(&mut self, domain: &str) -> Option<&mut Converter> {
        self.domains.get_mut(domain).map(|d| &mut d.converter)
    }

    /// Convert `value` per the named domain and render it for display.
    pub fn format(
        &self,
        value: f64,
        domain: &str,
        overrides: &FormatOverrides,
    ) -> Result<String, FormatError> {
        self.format_with(value, domain, overrides, DEFAULT_PATTERN)
    }

    /// Like [`UnitFormatter::format`], with a caller-supplied placeholder
    /// pattern for the translator-less case.
    pub fn format_with(
        &self,
        value: f64,
        domain: &str,
        overrides: &FormatOverrides,
        pattern: &str,
    ) -> Result<String, FormatError> {
        let entry = self
            .domains
            .get(domain)
            .ok_or_else(|| FormatError::UnknownDomain(domain.to_string()))?;

        let mut params = Params::from_config(&entry.config);
        params.apply(overrides);

        debug!(domain, from = params.from, to = params.to, "converting for display");
        let mut converted = entry.converter.convert_units(value, params.from, params.to)?;

        // The fallback re-converts the already-converted value, not the
        // original input.
        if let (Some(min), Some(fallback)) = (params.min, &entry.config.fallback) {
            if converted < min {
                params.apply(fallback);
                debug!(
                    domain,
                    min,
                    from = params.from,
                    to = params.to,
                    "below minimum, switching to fallback units"
                );
                converted = entry
                    .converter
                    .convert_units(converted, params.from, params.to)?;
            }
        }

        let rounded = round_to(converted, params.rounding);
        let key = match params.translation {
            Some(key) => key.to_string(),
            None => format!("metra.{domain}"),
        };

        let mut replacements = HashMap::new();
        replacements.insert("%value%".to_string(), render_number(rounded));
        replacements.insert("%units%".to_string(), params.to.to_string());

        Ok(match &self.translator {
            Some(translator) => translator.translate(&key, &replacements, self.locale.as_deref()),
            None => substitute(pattern, &replacements),
        })
    }
}

impl Default for UnitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective formatting parameters after merging config, call-site
/// overrides and the fallback block, in that order.
struct Params<'a> {
    from: &'a str,
    to: &'a str,
    rounding: u32,
    translation: Option<&'a str>,
    min: Option<f64>,
}

impl<'a> Params<'a> {
    fn from_config(config: &'a DomainConfig) -> Self {
        Self {
            from: &config.from,
            to: &config.to,
            rounding: config.rounding,
            translation: config.translation.as_deref(),
            min: config.min,
        }
    }

    fn apply(&mut self, overrides: &'a FormatOverrides) {
        if let Some(from) = &overrides.from {
            self.from = from;
        }
        if let Some(to) = &overrides.to {
            self.to = to;
        }
        if let Some(rounding) = overrides.rounding {
            self.rounding = rounding;
        }
        if let Some(translation) = &overrides.translation {
            self.translation = Some(translation);
        }
        if let Some(min) = overrides.min {
            self.min = Some(min);
        }
    }
}

/// Round half away from zero to `places` decimal places.
fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Render a rounded value without a trailing `.0`.
fn render_number(value: f64) -> String {
    // rounding can yield -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}

fn substitute(pattern: &str, replacements: &HashMap<String, String>) -> String {
    let mut out = pattern.to_string();
    for (placeholder, replacement) in replacements {
        out = out.replace(placeholder, replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use metra_core::ConversionFactor;
    use metra_core::ConvertError;

    fn distance_config() -> DomainConfig {
        DomainConfig {
            units: [
                ("km".to_string(), 1.0),
                ("m".to_string(), 0.001),
                ("ft".to_string(), 0.0003048),
                ("yd".to_string(), 0.0009144),
            ]
            .into(),
            from: "m".to_string(),
            to: "km".to_string(),
            rounding: 1,
            translation: None,
            min: None,
            fallback: None,
        }
    }

    fn formatter() -> UnitFormatter {
        UnitFormatter::new()
            .with_domain("distance", distance_config())
            .unwrap()
    }

    #[test]
    fn test_format_plain_pattern() {
        let f = formatter();

        assert_eq!(
            f.format(1500.0, "distance", &FormatOverrides::new()).unwrap(),
            "1.5km"
        );
    }

    #[test]
    fn test_format_rounding() {
        let f = formatter();

        let overrides = FormatOverrides::new().rounding(0);
        // Half rounds away from zero.
        assert_eq!(f.format(1500.0, "distance", &overrides).unwrap(), "2km");

        let overrides = FormatOverrides::new().from_unit("yd").to_unit("km").rounding(4);
        assert_eq!(f.format(1.0, "distance", &overrides).unwrap(), "0.0009km");
    }

    #[test]
    fn test_format_overrides_beat_config() {
        let f = formatter();

        let overrides = FormatOverrides::new().from_unit("yd").to_unit("ft").rounding(0);
        assert_eq!(f.format(1.0, "distance", &overrides).unwrap(), "3ft");
    }

    #[test]
    fn test_format_with_custom_pattern() {
        let f = formatter();

        let rendered = f
            .format_with(1500.0, "distance", &FormatOverrides::new(), "%value% %units%")
            .unwrap();
        assert_eq!(rendered, "1.5 km");
    }

    #[test]
    fn test_format_min_fallback_reconverts_converted_value() {
        let mut config = distance_config();
        config.min = Some(1.0);
        config.fallback = Some(
            FormatOverrides::new()
                .from_unit("km")
                .to_unit("m")
                .rounding(0),
        );
        let f = UnitFormatter::new().with_domain("distance", config).unwrap();

        // 500 m -> 0.5 km, below the minimum; the fallback feeds the
        // converted 0.5 back in as km and renders it in m.
        assert_eq!(
            f.format(500.0, "distance", &FormatOverrides::new()).unwrap(),
            "500m"
        );

        // At or above the minimum the fallback stays inert.
        assert_eq!(
            f.format(2000.0, "distance", &FormatOverrides::new()).unwrap(),
            "2km"
        );
    }

    #[test]
    fn test_format_min_without_fallback_is_inert() {
        let mut config = distance_config();
        config.min = Some(1.0);
        let f = UnitFormatter::new().with_domain("distance", config).unwrap();

        assert_eq!(
            f.format(500.0, "distance", &FormatOverrides::new()).unwrap(),
            "0.5km"
        );
    }

    struct EchoTranslator;

    impl Translator for EchoTranslator {
        fn translate(
            &self,
            key: &str,
            params: &HashMap<String, String>,
            locale: Option<&str>,
        ) -> String {
            format!(
                "{key}|{}|{}|{}",
                params["%value%"],
                params["%units%"],
                locale.unwrap_or("-")
            )
        }
    }

    #[test]
    fn test_format_through_translator() {
        let f = UnitFormatter::new()
            .with_domain("distance", distance_config())
            .unwrap()
            .with_translator(Arc::new(EchoTranslator))
            .with_locale("en_GB");

        assert_eq!(
            f.format(1500.0, "distance", &FormatOverrides::new()).unwrap(),
            "metra.distance|1.5|km|en_GB"
        );
    }

    #[test]
    fn test_format_translation_key_from_config() {
        let mut config = distance_config();
        config.translation = Some("app.length".to_string());
        let f = UnitFormatter::new()
            .with_domain("distance", config)
            .unwrap()
            .with_translator(Arc::new(EchoTranslator));

        let rendered = f.format(1500.0, "distance", &FormatOverrides::new()).unwrap();
        assert!(rendered.starts_with("app.length|"));
    }

    #[test]
    fn test_format_unknown_domain() {
        let f = formatter();

        assert!(matches!(
            f.format(1.0, "pressure", &FormatOverrides::new()).unwrap_err(),
            FormatError::UnknownDomain(domain) if domain == "pressure"
        ));
    }

    #[test]
    fn test_format_conversion_error_surfaces() {
        let f = formatter();

        let overrides = FormatOverrides::new().to_unit("furlong");
        assert!(matches!(
            f.format(1.0, "distance", &overrides).unwrap_err(),
            FormatError::Convert(ConvertError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_dynamic_factor_registered_on_domain_converter() {
        let mut f = formatter();
        f.converter_mut("distance")
            .unwrap()
            .set_unit("blocks", ConversionFactor::dynamic(|value, _| value / 5.0))
            .unwrap();

        let overrides = FormatOverrides::new().from_unit("km").to_unit("blocks").rounding(0);
        assert_eq!(f.format(50.0, "distance", &overrides).unwrap(), "10blocks");
    }

    #[test]
    fn test_set_domain_rejects_bad_units() {
        let mut config = distance_config();
        config.units.insert("bad".to_string(), f64::NAN);

        let err = UnitFormatter::new().with_domain("distance", config).unwrap_err();
        assert!(matches!(
            err,
            FormatError::Convert(ConvertError::InvalidUnitRegistration { unit, .. })
                if unit == "bad"
        ));
    }

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(2.0), "2");
        assert_eq!(render_number(0.5), "0.5");
        assert_eq!(render_number(-0.0), "0");
    }
}
