use std::collections::HashMap;

use id_arena::Id;
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::{ast_helpers::NodeExt, error::ResolveError, kind::Identifier};

use super::{
    arena::AllArenas,
    binding::{Binding, BindingKind},
    definition::Definition,
    diagnostic::{Diagnostic, DiagnosticKind},
    reference::{ReadWriteFlags, Reference},
    scope::{Scope, ScopeKind},
};

pub type NodeId = usize;

/// Owns every scope, binding, definition and reference of one file.
pub struct ScopeManager<'a> {
    pub scopes: Vec<Id<Scope<'a>>>,
    root_scope: Option<Id<Scope<'a>>>,
    pub node_to_scope: HashMap<NodeId, Vec<Id<Scope<'a>>>>,
    pub current_scope: Option<Id<Scope<'a>>>,
    pub arena: AllArenas<'a>,
    pub source_text: &'a str,
    pub diagnostics: Vec<Diagnostic>,
    resolved: bool,
}

impl<'a> ScopeManager<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self {
            scopes: Default::default(),
            root_scope: Default::default(),
            node_to_scope: Default::default(),
            current_scope: Default::default(),
            arena: Default::default(),
            source_text,
            diagnostics: Default::default(),
            resolved: Default::default(),
        }
    }

    pub fn root_scope(&self) -> Option<Id<Scope<'a>>> {
        self.root_scope
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(super) fn mark_resolved(&mut self) -> Result<(), ResolveError> {
        if self.resolved {
            return Err(ResolveError::AlreadyResolved);
        }
        self.resolved = true;
        Ok(())
    }

    pub fn scope(&self, id: Id<Scope<'a>>) -> &Scope<'a> {
        &self.arena.scopes[id]
    }

    pub fn binding(&self, id: Id<Binding<'a>>) -> &Binding<'a> {
        &self.arena.bindings[id]
    }

    pub fn binding_mut(&mut self, id: Id<Binding<'a>>) -> &mut Binding<'a> {
        &mut self.arena.bindings[id]
    }

    pub fn reference(&self, id: Id<Reference<'a>>) -> &Reference<'a> {
        &self.arena.references[id]
    }

    pub fn definition(&self, id: Id<Definition<'a>>) -> &Definition<'a> {
        &self.arena.definitions[id]
    }

    /// Every binding of the file, scope by scope in creation order.
    pub fn bindings(&self) -> impl Iterator<Item = Id<Binding<'a>>> + '_ {
        self.scopes
            .iter()
            .flat_map(|&scope| self.arena.scopes[scope].bindings.iter().copied())
    }

    pub fn acquire(&self, node: Node) -> Option<Id<Scope<'a>>> {
        self.node_to_scope
            .get(&node.id())
            .and_then(|scopes| scopes.last().copied())
    }

    pub(super) fn current_scope(&self) -> Id<Scope<'a>> {
        self.current_scope
            .expect("scope analysis visited a node outside the module scope")
    }

    pub(super) fn current_variable_scope(&self) -> Id<Scope<'a>> {
        self.arena.scopes[self.current_scope()].variable_scope
    }

    pub(super) fn nest_scope(&mut self, kind: ScopeKind, block: Node<'a>) -> Id<Scope<'a>> {
        let scope = Scope::new(&mut self.arena.scopes, kind, self.current_scope, block);
        trace!(?kind, ?block, "nesting scope");

        if kind == ScopeKind::Module {
            assert!(self.current_scope.is_none());
            self.root_scope = Some(scope);
        }
        self.scopes.push(scope);
        self.node_to_scope.entry(block.id()).or_default().push(scope);
        self.current_scope = Some(scope);
        scope
    }

    /// Pops every scope opened by `node`.
    pub(super) fn close(&mut self, node: Node<'a>) {
        while let Some(current_scope) = self.current_scope {
            let current_scope = &self.arena.scopes[current_scope];
            if current_scope.block != node {
                break;
            }
            self.current_scope = current_scope.parent;
        }
    }

    /// Registers `name_node` as a declaration of its text in `target`.
    ///
    /// Returns `None` when the declaration collides with an existing,
    /// non-mergeable binding, in which case it is skipped.
    pub(super) fn define(
        &mut self,
        target: Id<Scope<'a>>,
        name_node: Node<'a>,
        def: Id<Definition<'a>>,
    ) -> Option<Id<Binding<'a>>> {
        let name = name_node.text(&self.source_text);

        if let Some(existing) = self.arena.scopes[target].resolve_name(&name) {
            let existing_binding = &self.arena.bindings[existing];
            let mergeable = self.arena.definitions[def].is_function_scoped()
                && existing_binding
                    .defs
                    .iter()
                    .all(|&def| self.arena.definitions[def].is_function_scoped());
            if !mergeable {
                debug!(%name, site = %name_node.site(), "redeclaration");
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::Redeclaration,
                    name: Some(name.into_owned()),
                    site: name_node.site(),
                });
                return None;
            }
            let existing_binding = &mut self.arena.bindings[existing];
            existing_binding.defs.push(def);
            existing_binding.identifiers.push(name_node);
            return Some(existing);
        }

        let kind = BindingKind::from_definition(&self.arena.definitions[def]);
        let binding = Binding::new(&mut self.arena.bindings, name.clone(), kind, target);
        {
            let binding = &mut self.arena.bindings[binding];
            binding.defs.push(def);
            binding.identifiers.push(name_node);
        }
        let scope = &mut self.arena.scopes[target];
        scope.set.insert(name, binding);
        scope.bindings.push(binding);
        Some(binding)
    }

    pub(super) fn push_diagnostic(&mut self, kind: DiagnosticKind, node: Node<'a>) {
        let name = (node.kind() == Identifier).then(|| node.text(&self.source_text).into_owned());
        debug!(?kind, site = %node.site(), "scope diagnostic");
        self.diagnostics.push(Diagnostic {
            kind,
            name,
            site: node.site(),
        });
    }

    /// Records a reference from the current scope and resolves it against
    /// the scope chain.
    pub(super) fn referencing(
        &mut self,
        identifier: Node<'a>,
        flag: ReadWriteFlags,
    ) -> Id<Reference<'a>> {
        let from = self.current_scope();
        let reference = Reference::new(&mut self.arena.references, identifier, flag);
        self.arena.scopes[from].references.push(reference);

        let name = identifier.text(&self.source_text);
        let mut scope = Some(from);
        while let Some(current) = scope {
            let current_scope = &self.arena.scopes[current];
            if let Some(binding) = current_scope.resolve_name(&name) {
                if current_scope.is_valid_resolution(
                    &self.arena.references[reference],
                    &self.arena.bindings[binding],
                    &self.arena.definitions,
                ) {
                    trace!(%name, "resolved reference");
                    self.arena.references[reference].resolved = Some(binding);
                    self.arena.bindings[binding].uses.push(reference);
                    return reference;
                }
            }
            scope = current_scope.parent;
        }
        trace!(%name, "unresolved reference");
        reference
    }
}
