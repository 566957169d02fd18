//! Filters finalized per-file analyses down to the bindings worth reporting.

use std::{
    cmp::Ordering,
    collections::HashSet,
    path::{Path, PathBuf},
};

use derive_builder::Builder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ParseError,
    scope::{BindingKind, Diagnostic, ScopeKind},
    BindingRecord, FileAnalysis,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Args {
    #[default]
    All,
    AfterUsed,
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaughtErrors {
    #[default]
    All,
    None,
}

#[derive(Builder, Clone, Debug, Default, Deserialize)]
#[builder(default, setter(strip_option))]
#[serde(default)]
pub struct ReportOptions {
    #[serde(with = "serde_regex")]
    pub ignore_pattern: Option<Regex>,
    pub args: Args,
    #[serde(with = "serde_regex")]
    pub args_ignore_pattern: Option<Regex>,
    pub caught_errors: CaughtErrors,
    #[serde(with = "serde_regex")]
    pub caught_errors_ignore_pattern: Option<Regex>,
    #[serde(with = "serde_regex")]
    pub destructured_array_ignore_pattern: Option<Regex>,
    pub ignore_rest_siblings: bool,
    /// Count only references that read the binding.
    pub reads_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnusedBinding {
    pub name: String,
    pub kind: BindingKind,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub unused: Vec<UnusedBinding>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the file could not be parsed; `unused` is then empty.
    pub error: Option<ParseError>,
}

#[derive(Debug, Default)]
pub struct Report {
    pub files: Vec<FileReport>,
}

impl Report {
    pub fn unused_bindings(&self) -> impl Iterator<Item = &UnusedBinding> {
        self.files.iter().flat_map(|file| &file.unused)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.files.iter().filter_map(|file| file.error.as_ref())
    }

    pub fn is_clean(&self) -> bool {
        self.unused_bindings().next().is_none()
    }
}

pub struct Reporter<'o> {
    options: &'o ReportOptions,
}

impl<'o> Reporter<'o> {
    pub fn new(options: &'o ReportOptions) -> Self {
        Self { options }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn report(
        &self,
        results: impl IntoIterator<Item = Result<FileAnalysis, ParseError>>,
    ) -> Report {
        let mut files = results
            .into_iter()
            .map(|result| match result {
                Ok(analysis) => self.file_report(analysis),
                Err(error) => {
                    debug!(%error, "file excluded from report");
                    FileReport {
                        path: error.path().clone(),
                        unused: Default::default(),
                        diagnostics: Default::default(),
                        error: Some(error),
                    }
                }
            })
            .collect::<Vec<_>>();
        files.sort_by(|a, b| compare_paths(&a.path, &b.path));

        Report { files }
    }

    pub fn file_report(&self, analysis: FileAnalysis) -> FileReport {
        let used_parameters = analysis
            .bindings
            .iter()
            .filter(|binding| self.is_used(binding))
            .filter_map(|binding| binding.parameter)
            .collect::<HashSet<_>>();

        let mut unused = analysis
            .bindings
            .iter()
            .filter(|binding| !self.is_used(binding) && !self.is_exempt(binding, &used_parameters))
            .map(|binding| UnusedBinding {
                name: binding.name.clone(),
                kind: binding.kind,
                file: analysis.path.clone(),
                line: binding.site.line,
                column: binding.site.column,
            })
            .collect::<Vec<_>>();
        unused.sort_by_key(|binding| (binding.line, binding.column));

        FileReport {
            path: analysis.path,
            unused,
            diagnostics: analysis.diagnostics,
            error: None,
        }
    }

    fn is_used(&self, binding: &BindingRecord) -> bool {
        if self.options.reads_only {
            binding.read_count > 0
        } else {
            binding.use_count > 0
        }
    }

    fn is_exempt(&self, binding: &BindingRecord, used_parameters: &HashSet<ParameterSlot>) -> bool {
        if binding.exported || binding.ambiguous {
            return true;
        }
        if matches!(
            binding.scope_kind,
            ScopeKind::FunctionExpressionName | ScopeKind::Class | ScopeKind::TypeParameters
        ) {
            return true;
        }
        if matches_pattern(&self.options.ignore_pattern, &binding.name) {
            return true;
        }

        match binding.kind {
            BindingKind::Parameter => {
                if matches_pattern(&self.options.args_ignore_pattern, &binding.name) {
                    return true;
                }
                match self.options.args {
                    Args::None => return true,
                    Args::AfterUsed => {
                        if binding.parameter.is_some_and(|parameter| {
                            used_parameters
                                .iter()
                                .any(|used| used.is_after(&parameter))
                        }) {
                            return true;
                        }
                    }
                    Args::All => {}
                }
            }
            BindingKind::CatchClause => {
                if self.options.caught_errors == CaughtErrors::None
                    || matches_pattern(&self.options.caught_errors_ignore_pattern, &binding.name)
                {
                    return true;
                }
            }
            _ => {}
        }

        if binding.array_element
            && matches_pattern(&self.options.destructured_array_ignore_pattern, &binding.name)
        {
            return true;
        }

        self.options.ignore_rest_siblings && binding.has_rest_sibling
    }
}

/// Position of a binding in its function's parameter list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSlot {
    /// Id of the function node, unique within one file.
    pub function: usize,
    pub index: usize,
}

impl ParameterSlot {
    fn is_after(&self, other: &Self) -> bool {
        self.function == other.function && self.index > other.index
    }
}

fn matches_pattern(pattern: &Option<Regex>, name: &str) -> bool {
    pattern.as_ref().is_some_and(|pattern| pattern.is_match(name))
}

pub(crate) fn compare_paths(a: &Path, b: &Path) -> Ordering {
    natord::compare(&a.to_string_lossy(), &b.to_string_lossy())
}
