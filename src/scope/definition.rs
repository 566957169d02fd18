use id_arena::{Arena, Id};
use serde::Serialize;
use tree_sitter::Node;

use super::pattern_visitor::PatternInfo;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefinitionType {
    CatchClause,
    Parameter,
    FunctionName,
    ClassName,
    Variable,
    ImportBinding,
    TypeParameter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Debug)]
pub struct Definition<'a> {
    pub type_: DefinitionType,
    pub name: Node<'a>,
    /// The declaring node: declarator, function, class, catch clause or
    /// import specifier.
    pub node: Node<'a>,
    pub index: Option<usize>,
    pub declaration_kind: Option<DeclarationKind>,
    pub top_level: bool,
    pub array_element: bool,
    pub has_rest_sibling: bool,
}

impl<'a> Definition<'a> {
    pub fn new(
        arena: &mut Arena<Self>,
        type_: DefinitionType,
        name: Node<'a>,
        node: Node<'a>,
        index: Option<usize>,
        declaration_kind: Option<DeclarationKind>,
    ) -> Id<Self> {
        arena.alloc(Self {
            type_,
            name,
            node,
            index,
            declaration_kind,
            top_level: true,
            array_element: Default::default(),
            has_rest_sibling: Default::default(),
        })
    }

    pub fn new_from_pattern(
        arena: &mut Arena<Self>,
        type_: DefinitionType,
        name: Node<'a>,
        node: Node<'a>,
        index: Option<usize>,
        declaration_kind: Option<DeclarationKind>,
        info: &PatternInfo,
    ) -> Id<Self> {
        arena.alloc(Self {
            type_,
            name,
            node,
            index,
            declaration_kind,
            top_level: info.top_level,
            array_element: info.array_element,
            has_rest_sibling: info.has_rest_sibling,
        })
    }

    /// Declarations that denote the same storage when repeated in one scope.
    pub fn is_function_scoped(&self) -> bool {
        match self.type_ {
            DefinitionType::Parameter | DefinitionType::FunctionName => true,
            DefinitionType::Variable => self.declaration_kind == Some(DeclarationKind::Var),
            _ => false,
        }
    }
}
