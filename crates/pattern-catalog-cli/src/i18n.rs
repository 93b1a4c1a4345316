// crates/pattern-catalog-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings so output can be localized.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Every line the `pattern-catalog` binary prints comes from a catalog keyed
//! by message id. Output is routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The locale is chosen once per process.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale tag, ignoring case and region suffixes.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next().unwrap_or_default() {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Named placeholder value captured by [`macro@crate::t`].
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Preformatted replacement.
    pub value: String,
}

impl MessageArg {
    /// Creates an argument for `key`.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen for this process.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Current CLI locale, English when unset.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English messages.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "pattern-catalog {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to encode JSON output: {error}"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    ("input.read_too_large", "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit})."),
    ("input.kind.script", "script"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("audit.open_failed", "Failed to open audit log at {path}: {error}"),
    ("registry.build_failed", "Failed to build the built-in registry: {error}"),
    ("category.invalid", "{error}. Run `pattern-catalog categories` for valid labels."),
    ("categories.row", "{category}\t{count}"),
    ("list.empty", "No entries registered for {category}."),
    ("verify.not_found", "{error}"),
    ("verify.entry.pass", "PASS {category}/{entry} ({passed}/{total})"),
    ("verify.entry.fail", "FAIL {category}/{entry} ({passed}/{total})"),
    ("verify.check.pass", "  [pass] {check}"),
    ("verify.check.fail", "  [fail] {check}: {detail}"),
    ("verify.summary", "{entries} entries verified, {failed} failed."),
    ("verify.markdown.header", "| Category | Entry | Check | Result | Detail |"),
    ("verify.markdown.separator", "| --- | --- | --- | --- | --- |"),
    ("verify.markdown.row", "| {category} | {entry} | {check} | {result} | {detail} |"),
    ("verify.result.pass", "pass"),
    ("verify.result.fail", "fail"),
    ("run.script.parse_failed", "Failed to parse script at {path}: {error}"),
    ("run.lookup_failed", "{error}"),
    ("run.script.rejected", "Script rejected: {error}"),
    ("run.failed", "Script failed: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan messages.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "pattern-catalog {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut codificar la sortida JSON: {error}"),
    ("input.read_failed", "No s'ha pogut llegir {kind} a {path}: {error}"),
    (
        "input.read_too_large",
        "No es llegeix {kind} a {path} perquè té {size} bytes (límit {limit}).",
    ),
    ("input.kind.script", "l'script"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida."),
    ("audit.open_failed", "No s'ha pogut obrir el registre d'auditoria a {path}: {error}"),
    ("registry.build_failed", "No s'ha pogut construir el registre integrat: {error}"),
    ("category.invalid", "{error}. Executeu `pattern-catalog categories` per veure les etiquetes vàlides."),
    ("list.empty", "No hi ha entrades registrades per a {category}."),
    ("verify.entry.pass", "CORRECTE {category}/{entry} ({passed}/{total})"),
    ("verify.entry.fail", "ERROR {category}/{entry} ({passed}/{total})"),
    ("verify.check.pass", "  [correcte] {check}"),
    ("verify.check.fail", "  [error] {check}: {detail}"),
    ("verify.summary", "{entries} entrades verificades, {failed} amb errors."),
    ("verify.markdown.header", "| Categoria | Entrada | Comprovació | Resultat | Detall |"),
    ("verify.result.pass", "correcte"),
    ("verify.result.fail", "error"),
    ("run.script.parse_failed", "No s'ha pogut analitzar l'script a {path}: {error}"),
    ("run.script.rejected", "S'ha rebutjat l'script: {error}"),
    ("run.failed", "L'script ha fallat: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Message catalog for `locale`.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` in the current locale, substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(current_locale())
        .get(key)
        .or_else(|| catalog_for(Locale::En).get(key))
        .copied()
        .unwrap_or(key);
    args.into_iter().fold(template.to_string(), |message, arg| {
        message.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::CATALOG_CA;
    use super::CATALOG_EN;
    use super::Locale;

    #[test]
    fn catalan_keys_exist_in_english() {
        for (key, _) in CATALOG_CA {
            assert!(CATALOG_EN.iter().any(|(english, _)| english == key), "{key} missing from English");
        }
    }

    #[test]
    fn locale_parse_ignores_region() {
        assert_eq!(Locale::parse("ca-ES"), Some(Locale::Ca));
        assert_eq!(Locale::parse("EN_us"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }
}
