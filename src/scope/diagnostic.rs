use serde::Serialize;

use crate::parser::Site;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A block-scoped name declared twice in one scope. The later
    /// declaration is skipped.
    Redeclaration,
    /// A declaration-position node that could not be classified. Any
    /// identifiers under it are treated as used.
    UnclassifiedDeclaration,
}

/// A non-fatal finding recorded while building the scope tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub name: Option<String>,
    #[serde(flatten)]
    pub site: Site,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match (self.kind, &self.name) {
            (DiagnosticKind::Redeclaration, Some(name)) => {
                format!("'{name}' has already been declared in this scope")
            }
            (DiagnosticKind::Redeclaration, None) => "duplicate declaration".to_owned(),
            (DiagnosticKind::UnclassifiedDeclaration, _) => {
                "could not classify declaration, bindings treated as used".to_owned()
            }
        }
    }
}
