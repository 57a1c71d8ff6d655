//! Destination schema definitions and template loading.
//!
//! A [`Template`] is the ordered list of destination columns an uploaded
//! file is mapped onto. Templates arrive either as an already-built value or
//! as JSON (see [`TemplateSource`]); JSON templates are validated the same
//! way regardless of which form the host uses.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::combiner::{BuiltinCombiner, Combiner, CombinerRegistry};
use crate::error::{ModelError, Result};

/// File name suggested for the downloadable template.
pub const TEMPLATE_FILE_NAME: &str = "template.csv";

/// A single destination column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateColumn {
    /// Display name.
    pub name: String,
    /// Stable destination identifier, unique within a template.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Source column names that map onto this column verbatim (case-insensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_mappings: Vec<String>,
    /// Whether more than one source column may map onto this key.
    #[serde(default)]
    pub multiple: bool,
}

impl TemplateColumn {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: None,
            required: false,
            suggested_mappings: Vec::new(),
            multiple: false,
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use]
    pub fn with_suggested_mappings<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested_mappings = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// True if any alias equals `source_name`, ignoring case.
    pub fn has_alias(&self, source_name: &str) -> bool {
        let source = source_name.to_lowercase();
        self.suggested_mappings
            .iter()
            .any(|alias| alias.to_lowercase() == source)
    }
}

/// Ordered destination schema plus its combiner strategies.
#[derive(Clone, Default)]
pub struct Template {
    columns: Vec<TemplateColumn>,
    combiners: CombinerRegistry,
}

impl Template {
    /// Build a template, rejecting empty column lists and duplicate keys.
    pub fn new(columns: Vec<TemplateColumn>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ModelError::NoColumns);
        }
        let mut seen = BTreeSet::new();
        for (index, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(ModelError::MissingName { index });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ModelError::DuplicateKey(column.key.clone()));
            }
        }
        Ok(Self {
            columns,
            combiners: CombinerRegistry::new(),
        })
    }

    /// Parse a JSON-encoded template.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| ModelError::InvalidJson(err.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Build a template from an already-parsed JSON value.
    ///
    /// Missing keys are derived from the column name with [`sanitize_key`];
    /// missing names default to the key.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .filter(|object| !object.is_empty())
            .ok_or(ModelError::TemplateRequired)?;
        let raw_columns = object.get("columns").ok_or(ModelError::NoColumns)?;
        let items = raw_columns.as_array().ok_or(ModelError::ColumnsNotArray)?;

        let mut columns = Vec::with_capacity(items.len());
        let mut combiners = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let fields = item
                .as_object()
                .ok_or(ModelError::ColumnNotObject { index })?;
            let column = column_from_fields(index, fields)?;
            if let Some(name) = string_field(fields, "combiner") {
                let combiner =
                    BuiltinCombiner::from_name(&name).ok_or_else(|| ModelError::UnknownCombiner {
                        key: column.key.clone(),
                        name: name.clone(),
                    })?;
                combiners.push((column.key.clone(), combiner));
            }
            columns.push(column);
        }

        let mut template = Self::new(columns)?;
        for (key, combiner) in combiners {
            template.combiners.insert(key, Arc::new(combiner));
        }
        Ok(template)
    }

    /// Register a combiner strategy for a destination key.
    pub fn with_combiner<C>(mut self, key: &str, combiner: C) -> Result<Self>
    where
        C: Combiner + 'static,
    {
        if self.column(key).is_none() {
            return Err(ModelError::UnknownColumn(key.to_string()));
        }
        self.combiners.insert(key, Arc::new(combiner));
        Ok(self)
    }

    pub fn columns(&self) -> &[TemplateColumn] {
        &self.columns
    }

    /// Look up a column by destination key.
    pub fn column(&self, key: &str) -> Option<&TemplateColumn> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Whether `key` accepts more than one source column. Unknown keys are not.
    pub fn is_multiple(&self, key: &str) -> bool {
        self.column(key).is_some_and(|column| column.multiple)
    }

    /// Columns flagged as required.
    pub fn required_columns(&self) -> impl Iterator<Item = &TemplateColumn> {
        self.columns.iter().filter(|column| column.required)
    }

    pub fn combiners(&self) -> &CombinerRegistry {
        &self.combiners
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Contents of the downloadable template: display names on one line.
    pub fn download_line(&self) -> String {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("columns", &self.columns)
            .field("combiners", &self.combiners)
            .finish()
    }
}

/// How a host hands a template to the pipeline.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// A template built in code.
    Template(Template),
    /// A JSON value, typically from a config file.
    Value(Value),
    /// A JSON-encoded string.
    Json(String),
}

impl TemplateSource {
    /// Resolve the source into a validated template.
    pub fn into_template(self) -> Result<Template> {
        match self {
            Self::Template(template) => Ok(template),
            Self::Value(value) => match value {
                Value::String(raw) => Template::from_json_str(&raw),
                other => Template::from_json_value(&other),
            },
            Self::Json(raw) => {
                if raw.trim().is_empty() {
                    return Err(ModelError::TemplateRequired);
                }
                Template::from_json_str(&raw)
            }
        }
    }
}

impl From<Template> for TemplateSource {
    fn from(template: Template) -> Self {
        Self::Template(template)
    }
}

impl From<String> for TemplateSource {
    fn from(raw: String) -> Self {
        Self::Json(raw)
    }
}

impl From<&str> for TemplateSource {
    fn from(raw: &str) -> Self {
        Self::Json(raw.to_string())
    }
}

impl From<Value> for TemplateSource {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Derive a destination key from a display name.
///
/// Lowercases, turns whitespace into `_` and drops anything outside
/// `[A-Za-z0-9_]`.
pub fn sanitize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

fn column_from_fields(index: usize, fields: &Map<String, Value>) -> Result<TemplateColumn> {
    let name = string_field(fields, "name").unwrap_or_default();
    let mut key = string_field(fields, "key").unwrap_or_default();
    if key.is_empty() {
        key = sanitize_key(&name);
    }
    if key.is_empty() {
        return Err(ModelError::MissingName { index });
    }
    let name = if name.is_empty() { key.clone() } else { name };

    let suggested_mappings = fields
        .get("suggested_mappings")
        .and_then(Value::as_array)
        .map(|aliases| {
            aliases
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(TemplateColumn {
        name,
        key,
        description: string_field(fields, "description").filter(|d| !d.is_empty()),
        required: bool_field(fields, "required"),
        suggested_mappings,
        multiple: bool_field(fields, "multiple"),
    })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

fn bool_field(fields: &Map<String, Value>, name: &str) -> bool {
    fields.get(name).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("First Name"), "first_name");
        assert_eq!(sanitize_key("E-mail (work)"), "email_work");
        assert_eq!(sanitize_key("!!!"), "");
    }

    #[test]
    fn test_has_alias_ignores_case() {
        let column = TemplateColumn::new("email", "Email").with_suggested_mappings(["E-Mail"]);
        assert!(column.has_alias("e-mail"));
        assert!(!column.has_alias("mail"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Template::new(vec![
            TemplateColumn::new("a", "A"),
            TemplateColumn::new("a", "Again"),
        ])
        .unwrap_err();
        assert_eq!(err, ModelError::DuplicateKey("a".to_string()));
    }

    #[test]
    fn test_download_line() {
        let template = Template::new(vec![
            TemplateColumn::new("first_name", "First Name"),
            TemplateColumn::new("email", "Email"),
        ])
        .unwrap();
        assert_eq!(template.download_line(), "First Name,Email");
    }

    #[test]
    fn test_with_combiner_unknown_key() {
        let template = Template::new(vec![TemplateColumn::new("a", "A")]).unwrap();
        let err = template
            .with_combiner("b", |values: &[String]| values.concat())
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownColumn("b".to_string()));
    }
}
