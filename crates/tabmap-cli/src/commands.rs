use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tabmap_cli::pipeline::{
    ImportRequest, load_config, preview_file, run_import as run_pipeline, template_download_line,
};
use tabmap_core::SessionOptions;
use tabmap_map::SimilarityMetric;
use tabmap_model::TEMPLATE_FILE_NAME;
use tracing::info;

use crate::cli::{ImportArgs, PreviewArgs, SimilarityArg, TemplateArgs};
use crate::summary::{print_mapping_summary, print_preview};

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let request = ImportRequest {
        file: args.file.clone(),
        template: args.template.clone(),
        config: args.config.clone(),
        header_row: args.header_row,
        detect_header: args.detect_header,
        skip_header_selection: args.skip_header_selection,
        overrides: args.map.clone(),
        excluded: args.exclude.clone(),
        language: args.language.clone(),
        similarity: args.similarity.map(|arg| match arg {
            SimilarityArg::BigramDice => SimilarityMetric::BigramDice,
            SimilarityArg::JaroWinkler => SimilarityMetric::JaroWinkler,
        }),
    };
    let outcome = run_pipeline(&request)?;
    print_mapping_summary(&outcome);

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome.result)
    } else {
        serde_json::to_string(&outcome.result)
    }
    .context("serialize result")?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = outcome.result.num_rows, "result written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("write result")?;
        }
    }
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let mut options = match &args.config {
        Some(path) => load_config(path)?.options,
        None => SessionOptions::default(),
    };
    if let Some(language) = &args.language {
        options.language.clone_from(language);
    }
    let preview = preview_file(&args.file, &options)?;
    print_preview(&preview);
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let line = template_download_line(&args.template)?;
    eprintln!("Save as {TEMPLATE_FILE_NAME}:");
    println!("{line}");
    Ok(())
}
