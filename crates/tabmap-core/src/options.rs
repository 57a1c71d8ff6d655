//! Session configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabmap_map::SimilarityMetric;
use tabmap_model::TemplateSource;

use crate::i18n::Translations;

/// Options fixed for the lifetime of an [`crate::ImportSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    /// Go straight from upload to column mapping, using row 0 as the header.
    pub skip_header_row_selection: bool,
    pub language: String,
    /// Message overlays keyed by language, then message key.
    pub custom_translations: BTreeMap<String, BTreeMap<String, String>>,
    /// Measure used for fuzzy column suggestions.
    pub similarity: SimilarityMetric,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            skip_header_row_selection: false,
            language: "en".to_string(),
            custom_translations: BTreeMap::new(),
            similarity: SimilarityMetric::default(),
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_header_row_selection(mut self, skip: bool) -> Self {
        self.skip_header_row_selection = skip;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_translations(
        mut self,
        language: impl Into<String>,
        messages: BTreeMap<String, String>,
    ) -> Self {
        self.custom_translations
            .entry(language.into())
            .or_default()
            .extend(messages);
        self
    }

    #[must_use]
    pub fn with_similarity(mut self, similarity: SimilarityMetric) -> Self {
        self.similarity = similarity;
        self
    }

    /// Translation tables for these options.
    pub fn translations(&self) -> Translations {
        let mut translations = Translations::new(self.language.clone());
        for (language, messages) in &self.custom_translations {
            translations.add(language, messages);
        }
        translations
    }
}

/// Importer configuration as read from a JSON file.
///
/// ```json
/// {
///   "template": { "columns": [{ "name": "Email", "required": true }] },
///   "skipHeaderRowSelection": true,
///   "language": "de",
///   "customTranslations": { "de": { "Upload": "Hochladen" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterConfig {
    /// Template object, or a JSON string holding one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    #[serde(flatten)]
    pub options: SessionOptions,
}

impl ImporterConfig {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// The configured template, if any.
    pub fn template_source(&self) -> Option<TemplateSource> {
        self.template.clone().map(TemplateSource::Value)
    }
}
