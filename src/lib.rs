#![allow(non_upper_case_globals)]

//! Scope-correct unused-binding analysis for JavaScript and TypeScript.
//!
//! Each file is parsed with tree-sitter, its scope tree is built and its
//! references resolved, and the reporter filters the finalized bindings down
//! to the ones that are never used.

mod ast_helpers;
pub mod config;
pub mod discover;
pub mod error;
pub mod format;
mod kind;
mod macros;
pub mod parser;
pub mod report;
pub mod scope;
mod text;
mod visit;

#[cfg(test)]
mod tests;

use std::{
    num::NonZeroUsize,
    path::PathBuf,
    thread,
};

use ast_helpers::NodeExt;
use itertools::Itertools;
use tracing::{debug, info, instrument, trace_span};

pub use error::{ConfigError, DiscoverError, Error, ParseError, ResolveError};
pub use parser::{ParsedFile, Site, SourceFile, SourceLanguage};
pub use report::{
    Args, CaughtErrors, FileReport, ParameterSlot, Report, ReportOptions, ReportOptionsBuilder,
    Reporter, UnusedBinding,
};
use scope::{BindingKind, DefinitionType, Diagnostic, ScopeKind};

/// One binding of an analyzed file, detached from the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingRecord {
    pub name: String,
    pub kind: BindingKind,
    pub site: Site,
    pub use_count: usize,
    pub read_count: usize,
    pub exported: bool,
    pub ambiguous: bool,
    pub scope_kind: ScopeKind,
    pub parameter: Option<ParameterSlot>,
    pub array_element: bool,
    pub has_rest_sibling: bool,
}

/// The owned result of analyzing one file. Safe to send across threads.
#[derive(Clone, Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub bindings: Vec<BindingRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

#[instrument(level = "debug", skip_all, fields(path = %file.path.display()))]
pub fn analyze_file(file: &ParsedFile) -> FileAnalysis {
    let scope_manager = scope::analyze(&file.tree, &file.source);

    let bindings = scope_manager
        .bindings()
        .filter_map(|id| {
            let binding = scope_manager.binding(id);
            let identifier = binding.declaration_node()?;
            let first_def = scope_manager.definition(*binding.defs.first()?);
            let read_count = binding
                .uses
                .iter()
                .filter(|&&reference| scope_manager.reference(reference).is_read())
                .count();

            Some(BindingRecord {
                name: binding.name.clone().into_owned(),
                kind: binding.kind,
                site: identifier.site(),
                use_count: binding.uses.len(),
                read_count,
                exported: binding.exported,
                ambiguous: binding.ambiguous,
                scope_kind: scope_manager.scope(binding.scope).kind,
                parameter: (first_def.type_ == DefinitionType::Parameter).then(|| ParameterSlot {
                    function: first_def.node.id(),
                    index: first_def.index.unwrap_or_default(),
                }),
                array_element: first_def.array_element,
                has_rest_sibling: first_def.has_rest_sibling,
            })
        })
        .collect::<Vec<_>>();
    debug!(bindings = bindings.len(), "analyzed file");

    FileAnalysis {
        path: file.path.clone(),
        bindings,
        diagnostics: scope_manager.diagnostics.clone(),
    }
}

/// Analyzes already-parsed files and reports their unused bindings.
pub fn analyze(files: &[ParsedFile], options: &ReportOptions) -> Report {
    Reporter::new(options).report(files.iter().map(|file| Ok(analyze_file(file))))
}

/// Parses and analyzes every source on a pool of scoped worker threads.
pub fn analyze_sources(
    sources: Vec<SourceFile>,
    options: &ReportOptions,
    jobs: Option<NonZeroUsize>,
) -> Report {
    let results = fan_out(sources, jobs, |source| {
        ParsedFile::parse(source).map(|file| analyze_file(&file))
    });
    Reporter::new(options).report(results)
}

/// Like [`analyze_sources`], reading each file on the worker that analyzes it.
pub fn analyze_paths(
    paths: Vec<PathBuf>,
    options: &ReportOptions,
    jobs: Option<NonZeroUsize>,
) -> Report {
    let results = fan_out(paths, jobs, |path: PathBuf| {
        SourceFile::read(path)
            .and_then(ParsedFile::parse)
            .map(|file| analyze_file(&file))
    });
    Reporter::new(options).report(results)
}

pub fn worker_count(jobs: Option<NonZeroUsize>, inputs: usize) -> usize {
    let available = jobs
        .or_else(|| thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);
    available.min(inputs).max(1)
}

/// Maps `inputs` over scoped threads, keeping input order in the output.
fn fan_out<TInput, TOutput>(
    inputs: Vec<TInput>,
    jobs: Option<NonZeroUsize>,
    work: impl Fn(TInput) -> TOutput + Sync,
) -> Vec<TOutput>
where
    TInput: Send,
    TOutput: Send,
{
    let workers = worker_count(jobs, inputs.len());
    info!(files = inputs.len(), workers, "analyzing");
    if workers <= 1 {
        return inputs.into_iter().map(work).collect();
    }

    let chunk_size = inputs.len().div_ceil(workers);
    let chunks = inputs
        .into_iter()
        .chunks(chunk_size)
        .into_iter()
        .map(|chunk| chunk.collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let work = &work;
    thread::scope(|scope| {
        let handles = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                scope.spawn(move || {
                    let _span = trace_span!("worker", index).entered();
                    chunk.into_iter().map(work).collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(outputs) => outputs,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
