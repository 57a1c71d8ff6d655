use std::collections::BTreeMap;

use tabmap_model::{
    ColumnMappings, FileData, FileRow, ImportResult, MappedRow, ResultColumn, Template,
};
use tracing::info;

/// Turns data rows into [`MappedRow`]s for one template.
#[derive(Debug, Clone, Copy)]
pub struct RowTransformer<'a> {
    template: &'a Template,
}

impl<'a> RowTransformer<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    /// Transform every row from `data_start_offset` on.
    ///
    /// Only mappings with `include` set contribute. Each emitted row is
    /// re-based so the first data row has index 0; rows with no mapped
    /// cells are still emitted with empty values. Result columns are the
    /// distinct included keys in source-column order.
    pub fn transform(
        &self,
        mappings: &ColumnMappings,
        data: &FileData,
        data_start_offset: usize,
    ) -> ImportResult {
        let rows: Vec<MappedRow> = data
            .rows
            .iter()
            .skip(data_start_offset)
            .enumerate()
            .map(|(index, row)| self.transform_row(mappings, row, index))
            .collect();
        let columns = result_columns(mappings);

        info!(
            file = %data.file_name,
            rows = rows.len(),
            columns = columns.len(),
            "transformed rows"
        );
        ImportResult::from_rows(columns, rows)
    }

    fn transform_row(&self, mappings: &ColumnMappings, row: &FileRow, index: usize) -> MappedRow {
        // Grouped cells per key, in source-column order.
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (column, value) in row.values.iter().enumerate() {
            if let Some(mapping) = mappings.get(&column)
                && mapping.include
            {
                grouped
                    .entry(mapping.key.as_str())
                    .or_default()
                    .push(value.clone());
            }
        }

        let mut mapped = MappedRow::new(index);
        let combiners = self.template.combiners();
        for (key, values) in grouped {
            mapped = mapped.with_value(key, combiners.combine(key, &values));
        }
        mapped
    }
}

fn result_columns(mappings: &ColumnMappings) -> Vec<ResultColumn> {
    let mut keys: Vec<&str> = Vec::new();
    for mapping in mappings.values().filter(|mapping| mapping.include) {
        if !keys.contains(&mapping.key.as_str()) {
            keys.push(mapping.key.as_str());
        }
    }
    keys.into_iter().map(ResultColumn::from_key).collect()
}
