//! Initial mapping suggestions from source column names.

use std::collections::BTreeSet;

use tabmap_model::{ColumnMapping, ColumnMappings, Template, TemplateColumn};
use tracing::debug;

use crate::similarity::{BigramDice, Similarity, exceeds_threshold};

/// Proposes a destination key for each source column.
///
/// Per column, an exact alias match wins; otherwise the first template
/// column whose key (underscores read as spaces) is similar enough to the
/// lowercased source name is chosen. A non-multiple key taken by an earlier
/// column is no longer a candidate for later ones.
#[derive(Debug, Clone)]
pub struct MappingSuggester<'a, S = BigramDice> {
    template: &'a Template,
    similarity: S,
}

impl<'a> MappingSuggester<'a, BigramDice> {
    pub fn new(template: &'a Template) -> Self {
        Self::with_similarity(template, BigramDice)
    }
}

impl<'a, S: Similarity> MappingSuggester<'a, S> {
    pub fn with_similarity(template: &'a Template, similarity: S) -> Self {
        Self {
            template,
            similarity,
        }
    }

    /// One mapping per source column index, in column order.
    pub fn suggest(&self, source_names: &[String]) -> ColumnMappings {
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut mappings = ColumnMappings::new();

        for (index, name) in source_names.iter().enumerate() {
            let matched = self.match_column(name, &claimed);
            let mapping = match matched {
                Some((column, via)) => {
                    debug!(column = index, key = %column.key, via, "suggested mapping");
                    if !column.multiple {
                        claimed.insert(column.key.as_str());
                    }
                    ColumnMapping::for_key(column.key.clone(), column.multiple)
                }
                None => ColumnMapping::unmapped(),
            };
            mappings.insert(index, mapping);
        }
        mappings
    }

    fn match_column(
        &self,
        source_name: &str,
        claimed: &BTreeSet<&str>,
    ) -> Option<(&'a TemplateColumn, &'static str)> {
        let template: &'a Template = self.template;
        let candidates = move || {
            template
                .columns()
                .iter()
                .filter(move |column| column.multiple || !claimed.contains(column.key.as_str()))
        };

        if let Some(column) = candidates().find(|column| column.has_alias(source_name)) {
            return Some((column, "alias"));
        }

        let source = source_name.to_lowercase();
        candidates()
            .find(|column| {
                let key = column.key.replace('_', " ");
                exceeds_threshold(self.similarity.similarity(&key, &source))
            })
            .map(|column| (column, "fuzzy"))
    }
}
