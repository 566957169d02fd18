use id_arena::Id;
use tracing::trace;
use tree_sitter::Node;

use crate::{
    ast_helpers::{
        get_for_in_declaration_kind, get_function_params, get_lexical_declaration_kind,
        is_exported_declaration,
    },
    kind::{
        ComputedPropertyName, Identifier, ImportClause, ImportRequireClause, ImportSpecifier,
        LexicalDeclaration, MappedTypeClause, NamedImports, NamespaceImport, StatementBlock,
        TypeParameter, VariableDeclarator,
    },
    return_if_none,
    visit::{visit_children, visit_children_except, Visit},
};

use super::{
    definition::{DeclarationKind, Definition, DefinitionType},
    diagnostic::DiagnosticKind,
    pattern_visitor::{traverse_identifier_in_pattern, PatternMode, PatternNodes},
    scope::{Scope, ScopeKind},
    scope_manager::ScopeManager,
};

/// First pass: opens scopes and registers every declaration.
pub struct ScopeBuilder<'a, 'b> {
    scope_manager: &'b mut ScopeManager<'a>,
}

struct PatternDeclaration<'a> {
    type_: DefinitionType,
    node: Node<'a>,
    index: Option<usize>,
    declaration_kind: Option<DeclarationKind>,
    exported: bool,
}

impl<'a, 'b> ScopeBuilder<'a, 'b> {
    pub fn new(scope_manager: &'b mut ScopeManager<'a>) -> Self {
        Self { scope_manager }
    }

    fn define_simple(
        &mut self,
        target: Id<Scope<'a>>,
        type_: DefinitionType,
        name: Node<'a>,
        node: Node<'a>,
        exported: bool,
    ) {
        let def = Definition::new(
            &mut self.scope_manager.arena.definitions,
            type_,
            name,
            node,
            None,
            None,
        );
        if let Some(binding) = self.scope_manager.define(target, name, def) {
            if exported {
                self.scope_manager.binding_mut(binding).exported = true;
            }
        }
    }

    fn define_pattern(
        &mut self,
        target: Id<Scope<'a>>,
        pattern: Node<'a>,
        declaration: PatternDeclaration<'a>,
    ) -> PatternNodes<'a> {
        let scope_manager = &mut *self.scope_manager;
        let nodes = traverse_identifier_in_pattern(pattern, PatternMode::Declaration, |name, info| {
            let def = Definition::new_from_pattern(
                &mut scope_manager.arena.definitions,
                declaration.type_,
                name,
                declaration.node,
                declaration.index,
                declaration.declaration_kind,
                info,
            );
            if let Some(binding) = scope_manager.define(target, name, def) {
                if declaration.exported {
                    scope_manager.binding_mut(binding).exported = true;
                }
            }
        });

        for &unclassified in &nodes.unclassified {
            self.define_ambiguous(target, unclassified, &declaration);
        }
        for &right_hand_node in &nodes.right_hand_nodes {
            self.visit(right_hand_node);
        }
        nodes
    }

    /// Every identifier under a node the pattern visitor could not classify
    /// becomes a binding that is never reported.
    fn define_ambiguous(
        &mut self,
        target: Id<Scope<'a>>,
        node: Node<'a>,
        declaration: &PatternDeclaration<'a>,
    ) {
        self.scope_manager
            .push_diagnostic(DiagnosticKind::UnclassifiedDeclaration, node);

        let mut identifiers = vec![];
        collect_identifiers(node, &mut identifiers);
        for identifier in identifiers {
            let def = Definition::new(
                &mut self.scope_manager.arena.definitions,
                declaration.type_,
                identifier,
                declaration.node,
                declaration.index,
                declaration.declaration_kind,
            );
            if let Some(binding) = self.scope_manager.define(target, identifier, def) {
                self.scope_manager.binding_mut(binding).ambiguous = true;
            }
        }
    }

    fn visit_declarators(&mut self, node: Node<'a>, declaration_kind: DeclarationKind) {
        let exported = is_exported_declaration(node);
        let target = match declaration_kind {
            DeclarationKind::Var => self.scope_manager.current_variable_scope(),
            DeclarationKind::Let | DeclarationKind::Const => self.scope_manager.current_scope(),
        };

        let mut cursor = node.walk();
        let declarators = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == VariableDeclarator)
            .collect::<Vec<_>>();
        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            self.define_pattern(
                target,
                name,
                PatternDeclaration {
                    type_: DefinitionType::Variable,
                    node: declarator,
                    index: None,
                    declaration_kind: Some(declaration_kind),
                    exported,
                },
            );
            visit_children_except(self, declarator, &[Some(name)]);
        }
    }

    /// Opens a scope on `node` holding its generic parameters, if it has any.
    fn nest_type_parameters(&mut self, node: Node<'a>) {
        let type_parameters = return_if_none!(node.child_by_field_name("type_parameters"));
        let scope = self
            .scope_manager
            .nest_scope(ScopeKind::TypeParameters, node);

        let mut cursor = type_parameters.walk();
        let parameters = type_parameters
            .named_children(&mut cursor)
            .filter(|child| child.kind() == TypeParameter)
            .collect::<Vec<_>>();
        for parameter in parameters {
            if let Some(name) = parameter.child_by_field_name("name") {
                self.define_simple(scope, DefinitionType::TypeParameter, name, parameter, false);
            }
        }
    }

    /// Opens the function scope, defines the parameters and walks the body
    /// in the same scope.
    fn visit_function_like(&mut self, node: Node<'a>) {
        self.nest_type_parameters(node);
        self.scope_manager.nest_scope(ScopeKind::Function, node);
        let target = self.scope_manager.current_scope();

        for (index, param) in get_function_params(node).into_iter().enumerate() {
            self.define_pattern(
                target,
                param.pattern,
                PatternDeclaration {
                    type_: DefinitionType::Parameter,
                    node,
                    index: Some(index),
                    declaration_kind: None,
                    exported: param.is_parameter_property,
                },
            );
            if let Some(wrapper) = param.wrapper {
                visit_children_except(self, wrapper, &[Some(param.pattern)]);
            }
        }

        let name = node.child_by_field_name("name");
        let parameters = node
            .child_by_field_name("parameters")
            .or_else(|| node.child_by_field_name("parameter"));
        let body = node.child_by_field_name("body");
        let mut cursor = node.walk();
        let rest = node
            .named_children(&mut cursor)
            .filter(|&child| Some(child) != parameters && Some(child) != body)
            .collect::<Vec<_>>();
        for child in rest {
            if Some(child) == name && child.kind() != ComputedPropertyName {
                continue;
            }
            self.visit(child);
        }

        if let Some(body) = body {
            if body.kind() == StatementBlock {
                visit_children(self, body);
            } else {
                self.visit(body);
            }
        }

        self.scope_manager.close(node);
    }

    fn visit_import_clause(&mut self, clause: Node<'a>, import_statement: Node<'a>) {
        let target = self.scope_manager.current_scope();
        let mut cursor = clause.walk();
        let children = clause.named_children(&mut cursor).collect::<Vec<_>>();
        for child in children {
            match child.kind() {
                Identifier => self.define_simple(
                    target,
                    DefinitionType::ImportBinding,
                    child,
                    import_statement,
                    false,
                ),
                NamespaceImport => {
                    if let Some(name) = last_identifier_child(child) {
                        self.define_simple(
                            target,
                            DefinitionType::ImportBinding,
                            name,
                            child,
                            false,
                        );
                    }
                }
                NamedImports => {
                    let mut cursor = child.walk();
                    let specifiers = child
                        .named_children(&mut cursor)
                        .filter(|specifier| specifier.kind() == ImportSpecifier)
                        .collect::<Vec<_>>();
                    for specifier in specifiers {
                        let Some(local) = specifier
                            .child_by_field_name("alias")
                            .or_else(|| specifier.child_by_field_name("name"))
                        else {
                            continue;
                        };
                        if local.kind() != Identifier {
                            self.scope_manager.push_diagnostic(
                                DiagnosticKind::UnclassifiedDeclaration,
                                specifier,
                            );
                            continue;
                        }
                        self.define_simple(
                            target,
                            DefinitionType::ImportBinding,
                            local,
                            specifier,
                            false,
                        );
                    }
                }
                _ => {}
            }
        }
    }
}

fn first_identifier_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let ret = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == Identifier);
    ret
}

fn last_identifier_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let ret = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == Identifier)
        .last();
    ret
}

fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let ret = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    ret
}

fn collect_identifiers<'a>(node: Node<'a>, identifiers: &mut Vec<Node<'a>>) {
    if node.kind() == Identifier {
        identifiers.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_identifiers(child, identifiers);
    }
}

impl<'a, 'b> Visit<'a> for ScopeBuilder<'a, 'b> {
    fn visit_program(&mut self, node: Node<'a>) {
        self.scope_manager.nest_scope(ScopeKind::Module, node);
        visit_children(self, node);
        self.scope_manager.close(node);
    }

    fn visit_import_statement(&mut self, node: Node<'a>) {
        let mut cursor = node.walk();
        let children = node.named_children(&mut cursor).collect::<Vec<_>>();
        for child in children {
            match child.kind() {
                ImportClause => self.visit_import_clause(child, node),
                ImportRequireClause => {
                    if let Some(name) = first_identifier_child(child) {
                        let target = self.scope_manager.current_scope();
                        self.define_simple(target, DefinitionType::ImportBinding, name, node, false);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_import_alias(&mut self, node: Node<'a>) {
        let name = return_if_none!(first_identifier_child(node));
        let target = self.scope_manager.current_scope();
        let exported = is_exported_declaration(node);
        self.define_simple(target, DefinitionType::ImportBinding, name, node, exported);
    }

    fn visit_variable_declaration(&mut self, node: Node<'a>) {
        self.visit_declarators(node, DeclarationKind::Var);
    }

    fn visit_lexical_declaration(&mut self, node: Node<'a>) {
        self.visit_declarators(node, get_lexical_declaration_kind(node));
    }

    fn visit_statement_block(&mut self, node: Node<'a>) {
        self.scope_manager.nest_scope(ScopeKind::Block, node);
        visit_children(self, node);
        self.scope_manager.close(node);
    }

    fn visit_switch_statement(&mut self, node: Node<'a>) {
        self.scope_manager.nest_scope(ScopeKind::Switch, node);
        visit_children(self, node);
        self.scope_manager.close(node);
    }

    fn visit_for_statement(&mut self, node: Node<'a>) {
        let has_lexical_initializer = node
            .child_by_field_name("initializer")
            .is_some_and(|initializer| initializer.kind() == LexicalDeclaration);
        if has_lexical_initializer {
            self.scope_manager.nest_scope(ScopeKind::For, node);
        }
        visit_children(self, node);
        self.scope_manager.close(node);
    }

    fn visit_for_in_statement(&mut self, node: Node<'a>) {
        let left = node.child_by_field_name("left");
        let declaration_kind = get_for_in_declaration_kind(node);

        match (declaration_kind, left) {
            (Some(declaration_kind), Some(left)) => {
                let target = match declaration_kind {
                    DeclarationKind::Var => self.scope_manager.current_variable_scope(),
                    DeclarationKind::Let | DeclarationKind::Const => {
                        self.scope_manager.nest_scope(ScopeKind::For, node)
                    }
                };
                self.define_pattern(
                    target,
                    left,
                    PatternDeclaration {
                        type_: DefinitionType::Variable,
                        node,
                            index: None,
                        declaration_kind: Some(declaration_kind),
                        exported: false,
                    },
                );
                visit_children_except(self, node, &[Some(left)]);
            }
            _ => visit_children(self, node),
        }

        self.scope_manager.close(node);
    }

    fn visit_catch_clause(&mut self, node: Node<'a>) {
        let catch_scope = self.scope_manager.nest_scope(ScopeKind::Catch, node);

        let parameter = node.child_by_field_name("parameter");
        if let Some(parameter) = parameter {
            self.define_pattern(
                catch_scope,
                parameter,
                PatternDeclaration {
                    type_: DefinitionType::CatchClause,
                    node,
                    index: None,
                    declaration_kind: None,
                    exported: false,
                },
            );
        }
        visit_children_except(self, node, &[parameter]);

        self.scope_manager.close(node);
    }

    fn visit_class(&mut self, node: Node<'a>) {
        let class_scope = self.scope_manager.nest_scope(ScopeKind::Class, node);

        let name = node.child_by_field_name("name");
        if let Some(name) = name {
            self.define_simple(class_scope, DefinitionType::ClassName, name, node, false);
        }
        self.nest_type_parameters(node);
        visit_children_except(self, node, &[name]);

        self.scope_manager.close(node);
    }

    fn visit_class_declaration(&mut self, node: Node<'a>) {
        let exported = is_exported_declaration(node);

        let name = node.child_by_field_name("name");
        if let Some(name) = name {
            let target = self.scope_manager.current_scope();
            self.define_simple(target, DefinitionType::ClassName, name, node, exported);
        }

        self.nest_type_parameters(node);
        self.scope_manager.nest_scope(ScopeKind::Class, node);
        visit_children_except(self, node, &[name]);
        self.scope_manager.close(node);
    }

    fn visit_class_static_block(&mut self, node: Node<'a>) {
        self.scope_manager.nest_scope(ScopeKind::ClassStaticBlock, node);
        let mut cursor = node.walk();
        let children = node.named_children(&mut cursor).collect::<Vec<_>>();
        for child in children {
            if child.kind() == StatementBlock {
                visit_children(self, child);
            } else {
                self.visit(child);
            }
        }
        self.scope_manager.close(node);
    }

    fn visit_function(&mut self, node: Node<'a>) {
        if let Some(name) = node.child_by_field_name("name") {
            let scope = self
                .scope_manager
                .nest_scope(ScopeKind::FunctionExpressionName, node);
            self.define_simple(scope, DefinitionType::FunctionName, name, node, false);
        }
        self.visit_function_like(node);
        self.scope_manager.close(node);
    }

    fn visit_function_declaration(&mut self, node: Node<'a>) {
        let exported = is_exported_declaration(node);

        if let Some(name) = node.child_by_field_name("name") {
            let target = self.scope_manager.current_scope();
            self.define_simple(target, DefinitionType::FunctionName, name, node, exported);
        }
        self.visit_function_like(node);
    }

    fn visit_arrow_function(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_method_definition(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_ambient_declaration(&mut self, _node: Node<'a>) {
        trace!("skipping ambient declaration");
    }

    fn visit_function_signature(&mut self, node: Node<'a>) {
        self.nest_type_parameters(node);
        let name = node
            .child_by_field_name("name")
            .filter(|name| name.kind() != ComputedPropertyName);
        visit_children_except(self, node, &[name]);
        self.scope_manager.close(node);
    }

    fn visit_type_declaration(&mut self, node: Node<'a>) {
        self.nest_type_parameters(node);
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
        self.scope_manager.close(node);
    }

    fn visit_index_signature(&mut self, node: Node<'a>) {
        let key = child_of_kind(node, MappedTypeClause)
            .and_then(|clause| Some((clause, clause.child_by_field_name("name")?)));
        if let Some((clause, name)) = key {
            let scope = self
                .scope_manager
                .nest_scope(ScopeKind::TypeParameters, node);
            self.define_simple(scope, DefinitionType::TypeParameter, name, clause, false);
        }
        visit_children(self, node);
        self.scope_manager.close(node);
    }
}
