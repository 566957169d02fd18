use tree_sitter::Node;

use crate::{
    ast_helpers::{get_for_in_declaration_kind, get_function_params, is_intrinsic_jsx_name},
    kind::{ComputedPropertyName, Identifier, VariableDeclarator},
    return_if_none,
    visit::{dispatch, visit_children, visit_children_except, Visit},
};

use super::{
    pattern_visitor::{traverse_identifier_in_pattern, PatternMode},
    reference::ReadWriteFlags,
    scope_manager::ScopeManager,
};

/// Second pass: re-enters the scopes opened by the builder and attaches a
/// reference to every identifier in reference position.
pub struct ReferenceResolver<'a, 'b> {
    scope_manager: &'b mut ScopeManager<'a>,
}

impl<'a, 'b> ReferenceResolver<'a, 'b> {
    pub fn new(scope_manager: &'b mut ScopeManager<'a>) -> Self {
        Self { scope_manager }
    }

    fn referencing(&mut self, identifier: Node<'a>, flag: ReadWriteFlags) {
        self.scope_manager.referencing(identifier, flag);
    }

    /// Skips the names bound by a declaration pattern and walks only its
    /// default values and computed keys.
    fn visit_declared_pattern(&mut self, pattern: Node<'a>) {
        let nodes = traverse_identifier_in_pattern(pattern, PatternMode::Declaration, |_, _| {});
        for right_hand_node in nodes.right_hand_nodes {
            self.visit(right_hand_node);
        }
    }

    /// Turns the identifiers of an assignment target into write references.
    fn visit_assigned_pattern(&mut self, pattern: Node<'a>, flag: ReadWriteFlags) {
        let mut targets = vec![];
        let nodes =
            traverse_identifier_in_pattern(pattern, PatternMode::Assignment, |identifier, _| {
                targets.push(identifier);
            });
        for target in targets {
            self.referencing(target, flag);
        }
        for right_hand_node in nodes.right_hand_nodes {
            self.visit(right_hand_node);
        }
        for unclassified in nodes.unclassified {
            self.visit(unclassified);
        }
    }

    fn visit_declarators(&mut self, node: Node<'a>) {
        let mut cursor = node.walk();
        let children = node.named_children(&mut cursor).collect::<Vec<_>>();
        for child in children {
            if child.kind() != VariableDeclarator {
                self.visit(child);
                continue;
            }
            let name = child.child_by_field_name("name");
            if let Some(name) = name {
                self.visit_declared_pattern(name);
            }
            visit_children_except(self, child, &[name]);
        }
    }

    fn visit_function_like(&mut self, node: Node<'a>) {
        for param in get_function_params(node) {
            self.visit_declared_pattern(param.pattern);
            if let Some(wrapper) = param.wrapper {
                visit_children_except(self, wrapper, &[Some(param.pattern)]);
            }
        }

        let name = node.child_by_field_name("name");
        let parameters = node
            .child_by_field_name("parameters")
            .or_else(|| node.child_by_field_name("parameter"));
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|&child| Some(child) != parameters)
            .collect::<Vec<_>>();
        for child in children {
            if Some(child) == name && child.kind() != ComputedPropertyName {
                continue;
            }
            self.visit(child);
        }
    }
}

impl<'a, 'b> Visit<'a> for ReferenceResolver<'a, 'b> {
    fn visit(&mut self, node: Node<'a>) {
        let Some(scope) = self.scope_manager.acquire(node) else {
            dispatch(self, node);
            return;
        };
        let saved = self.scope_manager.current_scope.replace(scope);
        dispatch(self, node);
        self.scope_manager.current_scope = saved;
    }

    fn visit_export_statement(&mut self, node: Node<'a>) {
        if node.child_by_field_name("source").is_some() {
            return;
        }
        visit_children(self, node);
    }

    fn visit_export_specifier(&mut self, node: Node<'a>) {
        let name = return_if_none!(node.child_by_field_name("name"));
        if name.kind() == Identifier {
            self.referencing(name, ReadWriteFlags::READ);
        }
    }

    fn visit_import_statement(&mut self, _node: Node<'a>) {}

    fn visit_import_alias(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.named_child(0)]);
    }

    fn visit_variable_declaration(&mut self, node: Node<'a>) {
        self.visit_declarators(node);
    }

    fn visit_lexical_declaration(&mut self, node: Node<'a>) {
        self.visit_declarators(node);
    }

    fn visit_for_in_statement(&mut self, node: Node<'a>) {
        let left = node.child_by_field_name("left");
        if let Some(left) = left {
            if get_for_in_declaration_kind(node).is_some() {
                self.visit_declared_pattern(left);
            } else {
                self.visit_assigned_pattern(left, ReadWriteFlags::WRITE);
            }
        }
        visit_children_except(self, node, &[left]);
    }

    fn visit_catch_clause(&mut self, node: Node<'a>) {
        let parameter = node.child_by_field_name("parameter");
        if let Some(parameter) = parameter {
            self.visit_declared_pattern(parameter);
        }
        visit_children_except(self, node, &[parameter]);
    }

    fn visit_labeled_statement(&mut self, node: Node<'a>) {
        let body = return_if_none!(node.child_by_field_name("body"));
        self.visit(body);
    }

    fn visit_class(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_class_declaration(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_function(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_function_declaration(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_arrow_function(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_method_definition(&mut self, node: Node<'a>) {
        self.visit_function_like(node);
    }

    fn visit_member_expression(&mut self, node: Node<'a>) {
        let object = return_if_none!(node.child_by_field_name("object"));
        self.visit(object);
    }

    fn visit_assignment_expression(&mut self, node: Node<'a>) {
        let left = node.child_by_field_name("left");
        if let Some(left) = left {
            self.visit_assigned_pattern(left, ReadWriteFlags::WRITE);
        }
        visit_children_except(self, node, &[left]);
    }

    fn visit_augmented_assignment_expression(&mut self, node: Node<'a>) {
        let left = node.child_by_field_name("left");
        match left {
            Some(left) if left.kind() == Identifier => {
                self.referencing(left, ReadWriteFlags::RW);
            }
            Some(left) => self.visit(left),
            None => {}
        }
        visit_children_except(self, node, &[left]);
    }

    fn visit_update_expression(&mut self, node: Node<'a>) {
        match node.child_by_field_name("argument") {
            Some(argument) if argument.kind() == Identifier => {
                self.referencing(argument, ReadWriteFlags::RW);
            }
            _ => visit_children(self, node),
        }
    }

    fn visit_pair(&mut self, node: Node<'a>) {
        if let Some(key) = node.child_by_field_name("key") {
            if key.kind() == ComputedPropertyName {
                self.visit(key);
            }
        }
        if let Some(value) = node.child_by_field_name("value") {
            self.visit(value);
        }
    }

    fn visit_identifier(&mut self, node: Node<'a>) {
        self.referencing(node, ReadWriteFlags::READ);
    }

    fn visit_shorthand_property_identifier(&mut self, node: Node<'a>) {
        self.referencing(node, ReadWriteFlags::READ);
    }

    fn visit_type_identifier(&mut self, node: Node<'a>) {
        self.referencing(node, ReadWriteFlags::READ);
    }

    fn visit_parameter(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("pattern")]);
    }

    fn visit_function_signature(&mut self, node: Node<'a>) {
        let name = node
            .child_by_field_name("name")
            .filter(|name| name.kind() != ComputedPropertyName);
        visit_children_except(self, node, &[name]);
    }

    fn visit_type_declaration(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_type_parameter(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_index_signature(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_mapped_type_clause(&mut self, node: Node<'a>) {
        visit_children_except(self, node, &[node.child_by_field_name("name")]);
    }

    fn visit_jsx_element_tag(&mut self, node: Node<'a>) {
        let name = node
            .child_by_field_name("name")
            .filter(|&name| is_intrinsic_jsx_name(name, self.scope_manager.source_text));
        visit_children_except(self, node, &[name]);
    }

    fn visit_jsx_closing_element(&mut self, _node: Node<'a>) {}
}
