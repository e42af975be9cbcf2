//! Flag image lookup for currency codes.
//!
//! Most currencies belong to one country whose ISO-3166 alpha-2 code is the
//! first two letters of the currency code (`EUR` -> `eu`, `GBP` -> `gb`), so
//! the URL is derived from a template. Supranational units that have no such
//! country get a literal URL from [`FLAG_OVERRIDES`]. The mapping is
//! best-effort: a wrong flag is cosmetic and never blocks a conversion.

/// Default image template. `{code}` is replaced with the lower-cased prefix.
pub const DEFAULT_FLAG_TEMPLATE: &str = "https://flagcdn.com/w40/{code}.png";

/// Currencies without a single-country flag.
pub const FLAG_OVERRIDES: &[(&str, &str)] = &[
    ("XAF", "https://flagcdn.com/w40/cm.png"),
    ("XCD", "https://flagcdn.com/w40/ag.png"),
    ("XDR", "https://static.currencyrate.today/f/flags/xdr.svg"),
    ("XOF", "https://currency.world/img/flags/tg.png"),
    ("XPF", "https://flagpedia.net/data/flags/w580/pf.webp"),
];

const CODE_PLACEHOLDER: &str = "{code}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagResolver {
    template: String,
}

impl Default for FlagResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FLAG_TEMPLATE)
    }
}

impl FlagResolver {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the flag URL for `code`, or `None` when no code is selected.
    pub fn resolve(&self, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        let upper = code.to_ascii_uppercase();
        if let Some((_, url)) = FLAG_OVERRIDES.iter().find(|(c, _)| *c == upper) {
            return Some((*url).to_string());
        }

        let country: String = code.chars().take(2).collect::<String>().to_lowercase();
        Some(self.template.replace(CODE_PLACEHOLDER, &country))
    }
}
