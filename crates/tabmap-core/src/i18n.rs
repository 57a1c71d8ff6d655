//! User-facing message lookup.
//!
//! Messages are looked up by key in the session language, then in English,
//! and finally fall back to the key itself. `{{name}}` placeholders are
//! replaced with the supplied parameters.

use std::collections::BTreeMap;

pub const UNSUPPORTED_FILE_TYPE: &str = "Only CSV, TSV, XLS, and XLSX files can be uploaded";
pub const REQUIRED_COLUMNS_MISSING: &str = "Please include all required columns";
/// Takes a `sheet` parameter.
pub const FIRST_SHEET_ONLY: &str = "Only the first sheet will be imported";
pub const STEP_UPLOAD: &str = "Upload";
pub const STEP_SELECT_HEADER: &str = "Select Header";
pub const STEP_MAP_COLUMNS: &str = "Map Columns";

const FALLBACK_LANGUAGE: &str = "en";

const ENGLISH: &[(&str, &str)] = &[
    (UNSUPPORTED_FILE_TYPE, UNSUPPORTED_FILE_TYPE),
    (REQUIRED_COLUMNS_MISSING, REQUIRED_COLUMNS_MISSING),
    (FIRST_SHEET_ONLY, "Only the first sheet (\"{{sheet}}\") will be imported"),
    (STEP_UPLOAD, STEP_UPLOAD),
    (STEP_SELECT_HEADER, STEP_SELECT_HEADER),
    (STEP_MAP_COLUMNS, STEP_MAP_COLUMNS),
];

/// Translation tables keyed by language, then message key.
#[derive(Debug, Clone)]
pub struct Translations {
    language: String,
    resources: BTreeMap<String, BTreeMap<String, String>>,
}

impl Translations {
    /// Built-in English messages, looked up in `language` first.
    pub fn new(language: impl Into<String>) -> Self {
        let english = ENGLISH
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        let mut resources = BTreeMap::new();
        resources.insert(FALLBACK_LANGUAGE.to_string(), english);
        Self {
            language: language.into(),
            resources,
        }
    }

    /// Overlay messages for `language`; existing keys are replaced.
    pub fn add(&mut self, language: &str, messages: &BTreeMap<String, String>) {
        self.resources
            .entry(language.to_string())
            .or_default()
            .extend(messages.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Message for `key` without parameters.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Message for `key` with `{{name}}` placeholders filled in.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut message = self
            .lookup(&self.language, key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
            .to_string();
        for (name, value) in params {
            message = message.replace(&format!("{{{{{name}}}}}"), value);
        }
        message
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.resources
            .get(language)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new(FALLBACK_LANGUAGE)
    }
}
