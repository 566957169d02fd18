mod arena;
mod binding;
mod definition;
mod diagnostic;
mod pattern_visitor;
mod reference;
mod resolver;
mod scope;
mod scope_builder;
mod scope_manager;

pub use binding::{Binding, BindingKind};
pub use definition::{DeclarationKind, Definition, DefinitionType};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use pattern_visitor::PatternInfo;
pub use reference::{ReadWriteFlags, Reference};
pub use scope::{Scope, ScopeKind};
pub use scope_manager::{NodeId, ScopeManager};

use tracing::{instrument, trace_span};
use tree_sitter::{Node, Tree};

use crate::{error::ResolveError, visit::Visit};
use resolver::ReferenceResolver;
use scope_builder::ScopeBuilder;

/// Builds the scope tree and binding tables. No uses are populated.
#[instrument(level = "debug", skip_all)]
pub fn build<'a>(tree: &'a Tree, source_text: &'a str) -> ScopeManager<'a> {
    let mut scope_manager = ScopeManager::new(source_text);
    ScopeBuilder::new(&mut scope_manager).visit(tree.root_node());

    assert!(
        scope_manager.current_scope.is_none(),
        "current_scope should be null."
    );

    scope_manager
}

/// Attaches every reference-position identifier under `root` to its binding.
///
/// May run at most once per built tree.
pub fn resolve<'a>(
    scope_manager: &mut ScopeManager<'a>,
    root: Node<'a>,
) -> Result<(), ResolveError> {
    scope_manager.mark_resolved()?;

    let _span = trace_span!("resolve references").entered();
    ReferenceResolver::new(scope_manager).visit(root);
    scope_manager.current_scope = None;
    Ok(())
}

/// Builds and resolves in one go.
pub fn analyze<'a>(tree: &'a Tree, source_text: &'a str) -> ScopeManager<'a> {
    let mut scope_manager = build(tree, source_text);
    if let Err(error) = resolve(&mut scope_manager, tree.root_node()) {
        unreachable!("fresh scope tree was already resolved: {error}");
    }
    scope_manager
}
