//! Non-interactive import: drive an [`ImportSession`] from command-line choices.
//!
//! The user decisions a host UI would collect (header row, per-column
//! destination, include flag) come from the [`ImportRequest`] instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tabmap_core::{ImportSession, ImportStep, ImporterConfig, SessionError, SessionOptions, i18n};
use tabmap_ingest::{RowPreview, UploadColumn, suggest_header_row};
use tabmap_map::SimilarityMetric;
use tabmap_model::{ImportResult, Template, TemplateSource};
use tracing::{debug, info, info_span, warn};

/// A `COLUMN=KEY` mapping override.
///
/// `COLUMN` is a header name or a zero-based column index. An empty `KEY`
/// clears the column's destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOverride {
    pub column: String,
    pub key: String,
}

impl FromStr for ColumnOverride {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let (column, key) = raw
            .rsplit_once('=')
            .ok_or_else(|| format!("expected COLUMN=KEY, got `{raw}`"))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column in `{raw}`"));
        }
        Ok(Self {
            column: column.to_string(),
            key: key.trim().to_string(),
        })
    }
}

/// Everything needed to run one import.
#[derive(Debug, Clone, Default)]
pub struct ImportRequest {
    pub file: PathBuf,
    /// Inline template JSON or a path to a JSON file.
    pub template: Option<String>,
    /// Importer configuration file; explicit request fields take precedence.
    pub config: Option<PathBuf>,
    pub header_row: Option<usize>,
    /// Guess the header row when `header_row` is not given.
    pub detect_header: bool,
    pub skip_header_selection: bool,
    pub overrides: Vec<ColumnOverride>,
    /// Columns (name or index) to leave out of the result.
    pub excluded: Vec<String>,
    pub language: Option<String>,
    pub similarity: Option<SimilarityMetric>,
}

/// Final mapping of one source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSummary {
    pub index: usize,
    pub name: String,
    pub key: Option<String>,
    pub include: bool,
    /// Destination came from a suggestion rather than an override.
    pub suggested: bool,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub result: ImportResult,
    pub header_row: usize,
    pub mappings: Vec<MappingSummary>,
    /// Non-fatal decode warnings.
    pub warnings: Vec<String>,
    /// Multi-sheet notice, already translated.
    pub notice: Option<String>,
}

/// Leading rows of a file with the suggested header row.
#[derive(Debug, Clone)]
pub struct FilePreview {
    pub rows: RowPreview,
    pub warnings: Vec<String>,
    pub suggested_header: usize,
    /// Multi-sheet notice, already translated.
    pub notice: Option<String>,
}

/// Run a whole session: upload, header row, mapping, submit.
pub fn run_import(request: &ImportRequest) -> Result<ImportOutcome> {
    let file_name = display_file_name(&request.file);
    let span = info_span!("import", file = %file_name);
    let _guard = span.enter();

    let config = match &request.config {
        Some(path) => load_config(path)?,
        None => ImporterConfig::default(),
    };
    let options = merge_options(config.options.clone(), request);
    let source = match &request.template {
        Some(raw) => TemplateSource::Json(load_template_text(raw)?),
        None => config
            .template_source()
            .ok_or_else(|| anyhow!("no template given; pass --template or a config with one"))?,
    };

    let mut session = ImportSession::new(source, options).context("invalid template")?;
    let bytes = match fs::read(&request.file) {
        Ok(bytes) => bytes,
        Err(err) => {
            let err = session.fail_upload(err.to_string());
            return Err(err).with_context(|| format!("read {}", request.file.display()));
        }
    };

    let step = session
        .upload(&file_name, &bytes)
        .with_context(|| format!("upload {file_name}"))?;
    if step == ImportStep::RowSelection {
        let row = choose_header_row(&session, request)?;
        session
            .select_header_row(row)
            .context("select header row")?;
        session.confirm_header_row()?;
    } else if request.header_row.is_some() || request.detect_header {
        warn!("header selection skipped; using row 0 as the header");
    }

    let columns = session.upload_columns();
    let mut overridden = Vec::new();
    for column_override in &request.overrides {
        let index = resolve_column(&columns, &column_override.column)?;
        apply_override(&mut session, index, &column_override.key)?;
        overridden.push(index);
    }
    for column in &request.excluded {
        let index = resolve_column(&columns, column)?;
        session.set_include(index, false)?;
        debug!(column = index, "column excluded");
    }

    let mappings = summarize(&session, &columns, &overridden);
    let header_row = session.header_row();
    let warnings = session
        .data()
        .map(|data| data.errors.clone())
        .unwrap_or_default();
    let notice = session.first_sheet_notice();

    let result = match session.submit() {
        Ok(result) => result,
        Err(SessionError::Validation { missing, message }) => {
            bail!("{message}: missing {}", missing.join(", "))
        }
        Err(err) => return Err(err).context("submit mappings"),
    };
    info!(
        rows = result.num_rows,
        columns = result.num_columns,
        "import complete"
    );
    session.close();

    Ok(ImportOutcome {
        result,
        header_row,
        mappings,
        warnings,
        notice,
    })
}

/// Decode a file for the header-row preview.
///
/// The multi-sheet notice is translated with `options`.
pub fn preview_file(path: &Path, options: &SessionOptions) -> Result<FilePreview> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let data = tabmap_ingest::decode(&display_file_name(path), &bytes)
        .with_context(|| format!("decode {}", path.display()))?;
    let suggested_header = suggest_header_row(&data);
    let rows = RowPreview::new(&data);
    let notice = rows.first_sheet_only.as_deref().map(|sheet| {
        options
            .translations()
            .t_with(i18n::FIRST_SHEET_ONLY, &[("sheet", sheet)])
    });
    Ok(FilePreview {
        rows,
        warnings: data.errors,
        suggested_header,
        notice,
    })
}

/// Header line of a blank CSV for `template`.
pub fn template_download_line(raw: &str) -> Result<String> {
    let template = Template::from_json_str(&load_template_text(raw)?).context("invalid template")?;
    Ok(template.download_line())
}

/// Template JSON from an inline string or, if `raw` names a file, its contents.
pub fn load_template_text(raw: &str) -> Result<String> {
    let path = Path::new(raw);
    if !raw.trim_start().starts_with('{') && path.is_file() {
        return fs::read_to_string(path)
            .with_context(|| format!("read template {}", path.display()));
    }
    Ok(raw.to_string())
}

pub fn load_config(path: &Path) -> Result<ImporterConfig> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    ImporterConfig::from_json_str(&raw).with_context(|| format!("parse config {}", path.display()))
}

fn merge_options(mut options: SessionOptions, request: &ImportRequest) -> SessionOptions {
    if request.skip_header_selection {
        options.skip_header_row_selection = true;
    }
    if let Some(language) = &request.language {
        options.language = language.clone();
    }
    if let Some(similarity) = request.similarity {
        options.similarity = similarity;
    }
    options
}

fn choose_header_row(session: &ImportSession, request: &ImportRequest) -> Result<usize> {
    if let Some(row) = request.header_row {
        return Ok(row);
    }
    if request.detect_header {
        let data = session
            .data()
            .ok_or_else(|| anyhow!("no decoded data to inspect"))?;
        let row = suggest_header_row(data);
        info!(row, "detected header row");
        return Ok(row);
    }
    Ok(0)
}

/// Find a source column by exact name, then case-insensitive name, then index.
fn resolve_column(columns: &[UploadColumn], selector: &str) -> Result<usize> {
    if let Some(column) = columns.iter().find(|column| column.name == selector) {
        return Ok(column.index);
    }
    if let Some(column) = columns
        .iter()
        .find(|column| column.name.eq_ignore_ascii_case(selector))
    {
        return Ok(column.index);
    }
    if let Ok(index) = selector.parse::<usize>()
        && index < columns.len()
    {
        return Ok(index);
    }
    Err(anyhow!("no source column matches `{selector}`"))
}

fn apply_override(session: &mut ImportSession, index: usize, key: &str) -> Result<()> {
    match session.set_destination(index, key) {
        Ok(_) => {
            debug!(column = index, key, "mapping overridden");
            Ok(())
        }
        Err(SessionError::DestinationTaken { column, .. }) => {
            let keys: Vec<&str> = session
                .available_destinations(index)
                .iter()
                .map(|column| column.key.as_str())
                .collect();
            bail!(
                "`{key}` is not available for column {index} (held by column {column}); \
                 choose one of: {}",
                if keys.is_empty() {
                    "(none)".to_string()
                } else {
                    keys.join(", ")
                }
            );
        }
        Err(err) => Err(err.into()),
    }
}

fn summarize(
    session: &ImportSession,
    columns: &[UploadColumn],
    overridden: &[usize],
) -> Vec<MappingSummary> {
    let Some(editor) = session.editor() else {
        return Vec::new();
    };
    columns
        .iter()
        .map(|column| {
            let mapping = editor.mapping(column.index);
            let key = mapping
                .filter(|mapping| mapping.has_key())
                .map(|mapping| mapping.key.clone());
            MappingSummary {
                index: column.index,
                name: column.name.clone(),
                include: mapping.is_some_and(|mapping| mapping.include),
                suggested: key.is_some() && !overridden.contains(&column.index),
                key,
            }
        })
        .collect()
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
