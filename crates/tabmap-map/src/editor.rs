//! Live mapping state during the column-mapping step.

use tabmap_model::{ColumnMapping, ColumnMappings, Template, TemplateColumn};
use tracing::debug;

use crate::error::{MappingError, Result};
use crate::similarity::Similarity;
use crate::suggest::MappingSuggester;

/// Owns the per-source-column mappings for one uploaded file.
///
/// Edits never touch other columns: keeping non-multiple keys exclusive is
/// done by offering only [`MappingEditor::available_destinations`].
#[derive(Debug, Clone)]
pub struct MappingEditor {
    template: Template,
    mappings: ColumnMappings,
}

impl MappingEditor {
    /// Start from existing mappings, one entry per source column.
    pub fn new(template: Template, mappings: ColumnMappings) -> Self {
        Self { template, mappings }
    }

    /// Seed mappings from source column names with the default similarity.
    pub fn suggested(template: Template, source_names: &[String]) -> Self {
        let mappings = MappingSuggester::new(&template).suggest(source_names);
        Self::new(template, mappings)
    }

    /// Seed mappings with a specific similarity measure.
    pub fn suggested_with<S: Similarity>(
        template: Template,
        source_names: &[String],
        similarity: S,
    ) -> Self {
        let mappings =
            MappingSuggester::with_similarity(&template, similarity).suggest(source_names);
        Self::new(template, mappings)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn mappings(&self) -> &ColumnMappings {
        &self.mappings
    }

    pub fn mapping(&self, source_index: usize) -> Option<&ColumnMapping> {
        self.mappings.get(&source_index)
    }

    /// Number of source columns.
    pub fn column_count(&self) -> usize {
        self.mappings.len()
    }

    /// Point a source column at `key`, or clear it with an empty key.
    pub fn set_destination(&mut self, source_index: usize, key: &str) -> Result<&ColumnMapping> {
        let is_multiple = if key.is_empty() {
            false
        } else {
            self.template
                .column(key)
                .ok_or_else(|| MappingError::UnknownDestination(key.to_string()))?
                .multiple
        };
        let columns = self.mappings.len();
        let mapping = self
            .mappings
            .get_mut(&source_index)
            .ok_or(MappingError::SourceColumnOutOfRange {
                index: source_index,
                columns,
            })?;
        *mapping = ColumnMapping::for_key(key, is_multiple);
        debug!(column = source_index, key, "destination changed");
        Ok(mapping)
    }

    /// Include or exclude a source column. Columns without a key stay excluded.
    ///
    /// Returns the effective include flag.
    pub fn set_include(&mut self, source_index: usize, include: bool) -> Result<bool> {
        let columns = self.mappings.len();
        let mapping = self
            .mappings
            .get_mut(&source_index)
            .ok_or(MappingError::SourceColumnOutOfRange {
                index: source_index,
                columns,
            })?;
        mapping.include = include && mapping.has_key();
        Ok(mapping.include)
    }

    /// Destinations a source column may be pointed at.
    ///
    /// Hides non-multiple keys that another column currently occupies; the
    /// column's own selection always stays visible.
    pub fn available_destinations(&self, source_index: usize) -> Vec<&TemplateColumn> {
        self.template
            .columns()
            .iter()
            .filter(|column| column.multiple || self.occupant(&column.key, source_index).is_none())
            .collect()
    }

    /// Another source column holding the non-multiple `key`, if any.
    pub fn occupant(&self, key: &str, source_index: usize) -> Option<usize> {
        if self.template.column(key).is_none_or(|column| column.multiple) {
            return None;
        }
        self.mappings
            .iter()
            .find(|(index, mapping)| {
                **index != source_index && mapping.selected && mapping.key == key
            })
            .map(|(index, _)| *index)
    }

    /// Required template columns with no included mapping.
    pub fn missing_required(&self) -> Vec<&TemplateColumn> {
        self.template
            .required_columns()
            .filter(|column| {
                !self
                    .mappings
                    .values()
                    .any(|mapping| mapping.include && mapping.key == column.key)
            })
            .collect()
    }

    /// True iff every required column has an included mapping.
    pub fn validate_required(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// The mappings that take part in the transform.
    pub fn included_mappings(&self) -> ColumnMappings {
        self.mappings
            .iter()
            .filter(|(_, mapping)| mapping.include)
            .map(|(index, mapping)| (*index, mapping.clone()))
            .collect()
    }
}
