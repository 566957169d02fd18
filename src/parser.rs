//! Parser adapter: turns source text into a tree-sitter syntax tree.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, instrument};
use tree_sitter::{Language, Parser, Tree};

use crate::{ast_helpers::find_first_error_node, ast_helpers::NodeExt, error::ParseError};

/// A 1-based line/column position in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Site {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceLanguage {
    Javascript,
    Typescript,
    Tsx,
}

impl SourceLanguage {
    pub const EXTENSIONS: &'static [&'static str] =
        &["js", "jsx", "mjs", "cjs", "ts", "mts", "cts", "tsx"];

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::Javascript),
            "ts" | "mts" | "cts" => Some(Self::Typescript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::Javascript => tree_sitter_javascript::language(),
            Self::Typescript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// Source text waiting to be parsed.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| ParseError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, source })
    }
}

pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub language: SourceLanguage,
    pub tree: Tree,
}

impl ParsedFile {
    /// Parses with the language implied by the file extension, falling back to
    /// JavaScript for unknown extensions.
    pub fn parse(file: SourceFile) -> Result<Self, ParseError> {
        let language = SourceLanguage::from_path(&file.path).unwrap_or(SourceLanguage::Javascript);
        Self::parse_as(file, language)
    }

    #[instrument(level = "debug", skip_all, fields(path = %file.path.display(), ?language))]
    pub fn parse_as(file: SourceFile, language: SourceLanguage) -> Result<Self, ParseError> {
        let SourceFile { path, source } = file;

        let mut parser = Parser::new();
        parser
            .set_language(language.language())
            .map_err(|error| ParseError::Language {
                path: path.clone(),
                message: error.to_string(),
            })?;
        let Some(tree) = parser.parse(&source, None) else {
            return Err(ParseError::NoTree { path });
        };

        if let Some(error_node) = find_first_error_node(tree.root_node()) {
            debug!(kind = error_node.kind(), "syntax error");

            return Err(ParseError::Syntax {
                path,
                site: error_node.site(),
                missing: error_node.is_missing().then(|| error_node.kind().to_owned()),
            });
        }

        Ok(Self {
            path,
            source,
            language,
            tree,
        })
    }
}

impl fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .finish()
    }
}
