//! Renders a [`Report`] as Markdown, JSON or plain text.

use std::{fmt::Write as _, path::PathBuf};

use serde::Serialize;

use crate::{
    report::{Report, UnusedBinding},
    scope::Diagnostic,
};

pub const README_SECTION_HEADING: &str = "## Unused Variables";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Markdown,
    Json,
    Text,
}

pub fn render(report: &Report, format: Format) -> serde_json::Result<String> {
    Ok(match format {
        Format::Markdown => render_markdown(report),
        Format::Json => render_json(report)?,
        Format::Text => render_text(report),
    })
}

/// One section per file with unused bindings, one bullet per binding.
pub fn render_markdown(report: &Report) -> String {
    let mut output = String::from("# Unused Bindings\n");

    for file in report.files.iter().filter(|file| !file.unused.is_empty()) {
        let _ = write!(output, "\n## {}\n\n", file.path.display());
        for binding in &file.unused {
            let _ = writeln!(
                output,
                "- [{name}](#{name}) ({kind}, line {line}, column {column})",
                name = binding.name,
                kind = binding.kind,
                line = binding.line,
                column = binding.column,
            );
        }
    }

    let errors = report.errors().collect::<Vec<_>>();
    if !errors.is_empty() {
        output.push_str("\n## Skipped files\n\n");
        for error in errors {
            let _ = writeln!(output, "- {error}");
        }
    }

    if report.is_clean() {
        output.push_str("\nNo unused bindings found.\n");
    }
    output
}

#[derive(Serialize)]
struct JsonFile<'r> {
    path: &'r PathBuf,
    unused: &'r [UnusedBinding],
    diagnostics: Vec<JsonDiagnostic<'r>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'r> {
    #[serde(flatten)]
    diagnostic: &'r Diagnostic,
    message: String,
}

#[derive(Serialize)]
struct JsonReport<'r> {
    files: Vec<JsonFile<'r>>,
    unused_count: usize,
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    let files = report
        .files
        .iter()
        .map(|file| JsonFile {
            path: &file.path,
            unused: &file.unused,
            diagnostics: file
                .diagnostics
                .iter()
                .map(|diagnostic| JsonDiagnostic {
                    diagnostic,
                    message: diagnostic.message(),
                })
                .collect(),
            error: file.error.as_ref().map(ToString::to_string),
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        files,
        unused_count: report.unused_bindings().count(),
    })
}

/// `path:line:column: message` lines, the way linters print.
pub fn render_text(report: &Report) -> String {
    let mut output = String::new();
    for file in &report.files {
        if let Some(error) = &file.error {
            let _ = writeln!(output, "{error}");
            continue;
        }
        for binding in &file.unused {
            let _ = writeln!(
                output,
                "{}:{}:{}: '{}' is defined but never used. [{}]",
                file.path.display(),
                binding.line,
                binding.column,
                binding.name,
                binding.kind,
            );
        }
        for diagnostic in &file.diagnostics {
            let _ = writeln!(
                output,
                "{}:{}: warning: {}",
                file.path.display(),
                diagnostic.site,
                diagnostic.message(),
            );
        }
    }
    output
}

/// The section appended to a project README: a `File:` line per file
/// followed by its unused names.
pub fn readme_section(report: &Report) -> String {
    let mut output = format!("\n\n{README_SECTION_HEADING}\n\n");
    for file in report.files.iter().filter(|file| !file.unused.is_empty()) {
        let _ = writeln!(output, "File: {}", file.path.display());
        for binding in &file.unused {
            let _ = writeln!(output, "- {}", binding.name);
        }
    }
    output
}
