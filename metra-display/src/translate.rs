//! Translation seam

use std::collections::HashMap;

/// Resolves translation keys to display strings.
///
/// Resolution (catalogues, locale files, pluralization) is entirely the
/// implementor's concern; the formatter only supplies the key, the
/// placeholder replacements (`%value%`, `%units%`) and the active locale.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        key: &str,
        params: &HashMap<String, String>,
        locale: Option<&str>,
    ) -> String;
}
