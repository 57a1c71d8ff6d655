//! The import state machine.
//!
//! An [`ImportSession`] owns everything for one import: the template, the
//! decoded file, the chosen header row and the live mappings. Hosts drive it
//! with explicit method calls and observe it through [`ImportListener`]s.
//!
//! ```text
//! Upload ──upload──▶ RowSelection ──confirm──▶ MapColumns ──submit──▶ Complete
//!    ▲                    │  ▲                     │                    │
//!    └──────retreat───────┘  └──────retreat────────┘                    │
//!    └──────────────────────────────reset / close───────────────────────┘
//! ```

use std::fmt;

use tabmap_ingest::{IngestError, RowPreview, UploadColumn};
use tabmap_map::MappingEditor;
use tabmap_model::{
    ColumnMapping, FileData, ImportResult, Template, TemplateColumn, TemplateSource,
};
use tabmap_transform::RowTransformer;
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::event::{ImportEvent, ImportListener};
use crate::i18n::{self, Translations};
use crate::options::SessionOptions;
use crate::step::ImportStep;

/// One import, from upload to result.
pub struct ImportSession {
    template: Template,
    options: SessionOptions,
    translations: Translations,
    step: ImportStep,
    data: Option<FileData>,
    header_row: usize,
    editor: Option<MappingEditor>,
    error: Option<String>,
    listeners: Vec<Box<dyn ImportListener>>,
}

impl ImportSession {
    /// Start a session. Fails if the template cannot be loaded.
    pub fn new(template: impl Into<TemplateSource>, options: SessionOptions) -> Result<Self> {
        let template = template.into().into_template().inspect_err(|err| {
            warn!(error = %err, "template rejected");
        })?;
        let translations = options.translations();
        debug!(
            columns = template.len(),
            skip_header_row_selection = options.skip_header_row_selection,
            language = %options.language,
            "import session created"
        );
        Ok(Self {
            template,
            options,
            translations,
            step: ImportStep::Upload,
            data: None,
            header_row: 0,
            editor: None,
            error: None,
            listeners: Vec::new(),
        })
    }

    /// Register a listener for session events.
    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: ImportListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Decoded file, once an upload succeeded.
    pub fn data(&self) -> Option<&FileData> {
        self.data.as_ref()
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Index of the first data row.
    pub fn data_start_offset(&self) -> usize {
        tabmap_ingest::data_start_offset(self.header_row)
    }

    /// Last user-facing error, cleared by the next upload or a reset.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mapping state, available in the column-mapping step.
    pub fn editor(&self) -> Option<&MappingEditor> {
        self.editor.as_ref()
    }

    /// Leading rows for choosing the header row.
    pub fn preview(&self) -> Option<RowPreview> {
        self.data.as_ref().map(RowPreview::new)
    }

    /// Translated notice shown when a workbook has more than one sheet.
    pub fn first_sheet_notice(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        if !data.has_multiple_sheets() {
            return None;
        }
        let sheet = data.sheet_list.first()?;
        Some(
            self.translations
                .t_with(i18n::FIRST_SHEET_ONLY, &[("sheet", sheet.as_str())]),
        )
    }

    /// Source columns for the current header row, with sample data.
    pub fn upload_columns(&self) -> Vec<UploadColumn> {
        self.data
            .as_ref()
            .map(|data| tabmap_ingest::upload_columns(data, self.header_row))
            .unwrap_or_default()
    }

    /// Translated stepper labels with whether each step is enabled.
    pub fn step_labels(&self) -> Vec<(ImportStep, String, bool)> {
        [ImportStep::Upload, ImportStep::RowSelection, ImportStep::MapColumns]
            .into_iter()
            .filter_map(|step| {
                let key = step.label_key()?;
                let enabled =
                    !(step == ImportStep::RowSelection && self.options.skip_header_row_selection);
                Some((step, self.translations.t(key), enabled))
            })
            .collect()
    }

    /// Accept an uploaded file.
    ///
    /// An unsupported extension or an undecodable container leaves the
    /// session in `Upload` with a translated error. On success the session
    /// advances, landing on `MapColumns` directly when header selection is
    /// skipped.
    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<ImportStep> {
        self.expect_step(ImportStep::Upload)?;
        self.error = None;

        match tabmap_ingest::decode(file_name, bytes) {
            Ok(data) => {
                info!(
                    file = file_name,
                    rows = data.len(),
                    warnings = data.errors.len(),
                    "upload decoded"
                );
                self.data = Some(data);
                self.header_row = 0;
                self.editor = None;
                Ok(self.step_forward())
            }
            Err(IngestError::UnsupportedFormat { extension, .. }) => {
                warn!(file = file_name, %extension, "upload rejected");
                let message = self.translations.t(i18n::UNSUPPORTED_FILE_TYPE);
                self.raise(&message);
                Err(SessionError::UnsupportedFormat { extension, message })
            }
            Err(err) => {
                warn!(file = file_name, error = %err, "upload could not be decoded");
                Err(self.fail_upload(err.to_string()))
            }
        }
    }

    /// Report a failed file read. The session stays in `Upload`.
    pub fn fail_upload(&mut self, message: impl Into<String>) -> SessionError {
        let message = message.into();
        self.raise(&message);
        SessionError::Decode(message)
    }

    /// Choose which decoded row holds the column names.
    pub fn select_header_row(&mut self, row: usize) -> Result<()> {
        self.expect_step(ImportStep::RowSelection)?;
        let rows = self.data.as_ref().map_or(0, FileData::len);
        if row >= rows {
            return Err(SessionError::HeaderRowOutOfRange { row, rows });
        }
        self.header_row = row;
        debug!(header_row = row, "header row selected");
        Ok(())
    }

    /// Accept the selected header row and move on to column mapping.
    pub fn confirm_header_row(&mut self) -> Result<ImportStep> {
        self.expect_step(ImportStep::RowSelection)?;
        Ok(self.step_forward())
    }

    /// Move one step forward, honouring `skip_header_row_selection`.
    ///
    /// Entering `MapColumns` seeds the mappings from the header row.
    /// `Complete` is terminal. Leaving `Upload` needs a decoded file, and
    /// leaving `MapColumns` goes through [`Self::submit`]; the result then
    /// reaches listeners only.
    pub fn advance(&mut self) -> Result<ImportStep> {
        match self.step {
            _ if self.data.is_none() => Err(SessionError::NoFile),
            ImportStep::MapColumns => self.submit().map(|_| self.step),
            _ => Ok(self.step_forward()),
        }
    }

    /// Move one step back.
    ///
    /// From `MapColumns` this returns to `RowSelection`, or resets when
    /// header selection is skipped. From `RowSelection` it resets.
    pub fn retreat(&mut self) -> ImportStep {
        match self.step {
            ImportStep::MapColumns if !self.options.skip_header_row_selection => {
                self.editor = None;
                self.move_to(ImportStep::RowSelection);
            }
            ImportStep::MapColumns | ImportStep::RowSelection => self.reset(),
            ImportStep::Upload | ImportStep::Complete => {}
        }
        self.step
    }

    /// Point a source column at a destination key, or clear it with `""`.
    ///
    /// A non-multiple key held by another column is refused; only keys in
    /// [`Self::available_destinations`] are accepted.
    pub fn set_destination(&mut self, source_index: usize, key: &str) -> Result<ColumnMapping> {
        let editor = self.editor_mut()?;
        if let Some(column) = editor.occupant(key, source_index) {
            debug!(column = source_index, key, holder = column, "destination taken");
            return Err(SessionError::DestinationTaken {
                key: key.to_string(),
                column,
            });
        }
        Ok(editor.set_destination(source_index, key)?.clone())
    }

    /// Include or exclude a source column; returns the effective flag.
    pub fn set_include(&mut self, source_index: usize, include: bool) -> Result<bool> {
        let editor = self.editor_mut()?;
        Ok(editor.set_include(source_index, include)?)
    }

    /// Destinations that may be offered for a source column.
    pub fn available_destinations(&self, source_index: usize) -> Vec<&TemplateColumn> {
        self.editor
            .as_ref()
            .map(|editor| editor.available_destinations(source_index))
            .unwrap_or_default()
    }

    /// Validate and transform.
    ///
    /// Fails with a translated validation error while a required column is
    /// unmapped; nothing is transformed in that case. On success listeners
    /// receive [`ImportEvent::Completed`], the session moves to `Complete`
    /// and the result is handed to the caller.
    pub fn submit(&mut self) -> Result<ImportResult> {
        self.expect_step(ImportStep::MapColumns)?;
        let offset = self.data_start_offset();
        let (Some(editor), Some(data)) = (self.editor.as_ref(), self.data.as_ref()) else {
            return Err(SessionError::InvalidStep {
                expected: ImportStep::MapColumns,
                actual: self.step,
            });
        };

        let missing: Vec<String> = editor
            .missing_required()
            .iter()
            .map(|column| column.key.clone())
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "submission blocked by required columns");
            let message = self.translations.t(i18n::REQUIRED_COLUMNS_MISSING);
            self.raise(&message);
            return Err(SessionError::Validation { missing, message });
        }

        let included = editor.included_mappings();
        let result = RowTransformer::new(&self.template).transform(&included, data, offset);
        info!(
            rows = result.num_rows,
            columns = result.num_columns,
            "import completed"
        );
        self.error = None;
        self.notify(&ImportEvent::Completed(&result));
        self.step_forward();
        Ok(result)
    }

    /// Discard the file, mappings and errors and return to `Upload`.
    pub fn reset(&mut self) {
        self.data = None;
        self.header_row = 0;
        self.editor = None;
        self.error = None;
        self.move_to(ImportStep::Upload);
    }

    /// Notify listeners that the host is closing the importer.
    ///
    /// Closing a completed session resets it so the next open starts clean.
    pub fn close(&mut self) {
        self.notify(&ImportEvent::Closed);
        if self.step == ImportStep::Complete {
            self.reset();
        }
    }

    fn step_forward(&mut self) -> ImportStep {
        let next = self.step.next(self.options.skip_header_row_selection);
        if next == ImportStep::MapColumns && self.step != ImportStep::MapColumns {
            self.seed_mappings();
        }
        self.move_to(next);
        next
    }

    fn seed_mappings(&mut self) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let names = tabmap_ingest::source_column_names(data, self.header_row);
        let editor = MappingEditor::suggested_with(
            self.template.clone(),
            &names,
            self.options.similarity,
        );
        debug!(
            columns = editor.column_count(),
            included = editor.included_mappings().len(),
            "mappings seeded"
        );
        self.editor = Some(editor);
    }

    fn editor_mut(&mut self) -> Result<&mut MappingEditor> {
        let actual = self.step;
        match self.editor.as_mut() {
            Some(editor) if actual == ImportStep::MapColumns => Ok(editor),
            _ => Err(SessionError::InvalidStep {
                expected: ImportStep::MapColumns,
                actual,
            }),
        }
    }

    fn expect_step(&self, expected: ImportStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn move_to(&mut self, to: ImportStep) {
        let from = self.step;
        if from == to {
            return;
        }
        self.step = to;
        info!(%from, %to, "step changed");
        self.notify(&ImportEvent::StepChanged { from, to });
    }

    fn raise(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.notify(&ImportEvent::Error(message));
    }

    fn notify(&mut self, event: &ImportEvent<'_>) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

impl fmt::Debug for ImportSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSession")
            .field("step", &self.step)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("header_row", &self.header_row)
            .field("rows", &self.data.as_ref().map(FileData::len))
            .field("error", &self.error)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
