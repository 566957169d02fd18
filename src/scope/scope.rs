use std::{borrow::Cow, collections::HashMap};

use id_arena::{Arena, Id};
use serde::Serialize;
use tree_sitter::Node;

use crate::kind::is_function_kind;

use super::{binding::Binding, definition::Definition, reference::Reference};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    Module,
    Function,
    FunctionExpressionName,
    Block,
    Switch,
    Catch,
    For,
    Class,
    ClassStaticBlock,
    /// Generic parameters of a function, class or type, and the key of a
    /// mapped type.
    TypeParameters,
}

impl ScopeKind {
    /// Scopes that `var` declarations hoist to.
    pub fn is_variable_scope(&self) -> bool {
        matches!(self, Self::Module | Self::Function | Self::ClassStaticBlock)
    }
}

#[derive(Debug)]
pub struct Scope<'a> {
    id: Id<Self>,
    pub kind: ScopeKind,
    pub block: Node<'a>,
    pub parent: Option<Id<Self>>,
    pub children: Vec<Id<Self>>,
    pub set: HashMap<Cow<'a, str>, Id<Binding<'a>>>,
    /// Bindings in declaration order.
    pub bindings: Vec<Id<Binding<'a>>>,
    pub references: Vec<Id<Reference<'a>>>,
    pub variable_scope: Id<Self>,
}

impl<'a> Scope<'a> {
    pub fn new(
        arena: &mut Arena<Self>,
        kind: ScopeKind,
        parent: Option<Id<Self>>,
        block: Node<'a>,
    ) -> Id<Self> {
        let inherited_variable_scope = match (kind.is_variable_scope(), parent) {
            (false, Some(parent)) => Some(arena[parent].variable_scope),
            _ => None,
        };
        let id = arena.alloc_with_id(|id| Self {
            id,
            kind,
            block,
            parent,
            children: Default::default(),
            set: Default::default(),
            bindings: Default::default(),
            references: Default::default(),
            variable_scope: inherited_variable_scope.unwrap_or(id),
        });
        if let Some(parent) = parent {
            arena[parent].children.push(id);
        }
        id
    }

    pub fn resolve_name(&self, name: &str) -> Option<Id<Binding<'a>>> {
        self.set.get(name).copied()
    }

    /// A reference from a function's parameter list must not see bindings
    /// that are declared only in that function's body.
    pub fn is_valid_resolution(
        &self,
        reference: &Reference<'a>,
        binding: &Binding<'a>,
        definitions: &Arena<Definition<'a>>,
    ) -> bool {
        if self.kind != ScopeKind::Function || !is_function_kind(self.block.kind()) {
            return true;
        }
        let Some(body) = self.block.child_by_field_name("body") else {
            return true;
        };
        let body_start = body.start_byte();

        !(binding.scope == self.id
            && reference.identifier.start_byte() < body_start
            && binding
                .defs
                .iter()
                .all(|&def| definitions[def].name.start_byte() >= body_start))
    }
}
