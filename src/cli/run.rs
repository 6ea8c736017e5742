//! Orchestration of one CLI invocation.
//!
//! The whole result is rendered in memory first; the output file or stdout is
//! only touched once every step has succeeded.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::settings::{Mode, Settings};
use super::ui;
use crate::codecs::{Output, read_tree, render};
use crate::config::SearcherKind;
use crate::core::{
    AuditReport, AuditReportBuilder, NativeSearch, RipgrepSearch, TextSearchPort, flatten,
    unflatten,
};
use crate::translate::{LibreTranslate, TranslationPipeline};

pub fn run(settings: &Settings) -> Result<()> {
    let rendered = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(execute(settings))?;

    write_output(settings.output.as_deref(), &rendered)
}

async fn execute(settings: &Settings) -> Result<String> {
    let tree = read_tree(&settings.input)?;
    debug!(input = %settings.input.display(), mode = ?settings.mode, "input loaded");

    let rendered = match &settings.mode {
        Mode::Audit => {
            let report = audit(settings, &tree).await?;
            render(Output::Report(&report), settings.output_format)?
        }
        Mode::Translate { source, target } => {
            let translated = translate(settings, source, target, &tree).await?;
            render(Output::Tree(&translated), settings.output_format)?
        }
        Mode::Convert => render(Output::Tree(&tree), settings.output_format)?,
    };
    Ok(rendered)
}

async fn audit(settings: &Settings, tree: &Value) -> Result<AuditReport> {
    let port: Box<dyn TextSearchPort> = match settings.searcher {
        SearcherKind::Ripgrep => Box::new(RipgrepSearch::new()),
        SearcherKind::Native => Box::new(NativeSearch::new()),
    };

    let spinner = ui::spinner("Scanning sources...");
    let report = AuditReportBuilder::new(settings.audit)
        .audit(port.as_ref(), &settings.scope, tree)
        .await;
    spinner.finish_and_clear();

    Ok(report?)
}

async fn translate(settings: &Settings, source: &str, target: &str, tree: &Value) -> Result<Value> {
    let backend = LibreTranslate::new(settings.api_url.as_str())?;
    let pipeline = TranslationPipeline::new(&backend, settings.pipeline_options(source, target))
        .with_progress(ui::spinner("Checking languages..."));

    let translated = pipeline.run(&flatten(tree)).await?;
    Ok(unflatten(&translated)?)
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            ui::print_saved(path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
