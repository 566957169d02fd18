use std::{borrow::Cow, fmt};

use id_arena::{Arena, Id};
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::{
    definition::{DeclarationKind, Definition, DefinitionType},
    reference::Reference,
    scope::Scope,
};

/// A declared name, its definitions and every reference resolved to it.
#[derive(Debug)]
pub struct Binding<'a> {
    pub name: Cow<'a, str>,
    pub kind: BindingKind,
    pub identifiers: Vec<Node<'a>>,
    pub uses: Vec<Id<Reference<'a>>>,
    pub defs: Vec<Id<Definition<'a>>>,
    pub scope: Id<Scope<'a>>,
    /// Visible outside its lexical scope: declared by an `export`
    /// declaration or a TypeScript parameter property.
    pub exported: bool,
    pub ambiguous: bool,
}

impl<'a> Binding<'a> {
    pub fn new(
        arena: &mut Arena<Self>,
        name: Cow<'a, str>,
        kind: BindingKind,
        scope: Id<Scope<'a>>,
    ) -> Id<Self> {
        arena.alloc(Self {
            name,
            kind,
            identifiers: Default::default(),
            uses: Default::default(),
            defs: Default::default(),
            scope,
            exported: Default::default(),
            ambiguous: Default::default(),
        })
    }

    /// The first declaring identifier; later merged declarations keep it.
    pub fn declaration_node(&self) -> Option<Node<'a>> {
        self.identifiers.first().copied()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Parameter,
    Import,
    CatchClause,
    Destructured,
    TypeParameter,
}

impl BindingKind {
    pub fn from_definition(definition: &Definition) -> Self {
        match definition.type_ {
            DefinitionType::CatchClause => Self::CatchClause,
            DefinitionType::Parameter => Self::Parameter,
            DefinitionType::FunctionName => Self::Function,
            DefinitionType::ClassName => Self::Class,
            DefinitionType::ImportBinding => Self::Import,
            DefinitionType::TypeParameter => Self::TypeParameter,
            DefinitionType::Variable if !definition.top_level => Self::Destructured,
            DefinitionType::Variable => match definition.declaration_kind {
                Some(DeclarationKind::Let) => Self::Let,
                Some(DeclarationKind::Const) => Self::Const,
                Some(DeclarationKind::Var) | None => Self::Var,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
            Self::Function => "function",
            Self::Class => "class",
            Self::Parameter => "parameter",
            Self::Import => "import",
            Self::CatchClause => "catch-clause",
            Self::Destructured => "destructured",
            Self::TypeParameter => "type-parameter",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
