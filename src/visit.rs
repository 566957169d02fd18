use tracing::trace;
use tree_sitter::Node;

use crate::kind::*;

pub trait Visit<'a> {
    fn visit(&mut self, node: Node<'a>) {
        dispatch(self, node);
    }

    fn visit_program(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_export_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_export_specifier(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_import_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_import_alias(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_variable_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_lexical_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_statement_block(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_switch_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_for_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_for_in_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_catch_clause(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_labeled_statement(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_class(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_class_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_class_static_block(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_function(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_function_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_arrow_function(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_method_definition(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_member_expression(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_assignment_expression(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_augmented_assignment_expression(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_update_expression(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_pair(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_identifier(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_shorthand_property_identifier(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_type_identifier(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_parameter(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_ambient_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_function_signature(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_type_declaration(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_type_parameter(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_index_signature(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_mapped_type_clause(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_jsx_element_tag(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_jsx_closing_element(&mut self, node: Node<'a>) {
        visit_children(self, node);
    }

    fn visit_comment(&mut self, _node: Node<'a>) {}
}

pub fn dispatch<'a, TVisit: Visit<'a> + ?Sized>(visitor: &mut TVisit, node: Node<'a>) {
    trace!(?node, "visiting node");

    match node.kind() {
        Program => visitor.visit_program(node),
        ExportStatement => visitor.visit_export_statement(node),
        ExportSpecifier => visitor.visit_export_specifier(node),
        ImportStatement => visitor.visit_import_statement(node),
        ImportAlias => visitor.visit_import_alias(node),
        VariableDeclaration => visitor.visit_variable_declaration(node),
        LexicalDeclaration => visitor.visit_lexical_declaration(node),
        StatementBlock => visitor.visit_statement_block(node),
        SwitchStatement => visitor.visit_switch_statement(node),
        ForStatement => visitor.visit_for_statement(node),
        ForInStatement => visitor.visit_for_in_statement(node),
        CatchClause => visitor.visit_catch_clause(node),
        LabeledStatement => visitor.visit_labeled_statement(node),
        Class => visitor.visit_class(node),
        ClassDeclaration | AbstractClassDeclaration => visitor.visit_class_declaration(node),
        ClassStaticBlock => visitor.visit_class_static_block(node),
        Function | GeneratorFunction => visitor.visit_function(node),
        FunctionDeclaration | GeneratorFunctionDeclaration => {
            visitor.visit_function_declaration(node)
        }
        ArrowFunction => visitor.visit_arrow_function(node),
        MethodDefinition => visitor.visit_method_definition(node),
        MemberExpression => visitor.visit_member_expression(node),
        AssignmentExpression => visitor.visit_assignment_expression(node),
        AugmentedAssignmentExpression => visitor.visit_augmented_assignment_expression(node),
        UpdateExpression => visitor.visit_update_expression(node),
        Pair => visitor.visit_pair(node),
        Identifier => visitor.visit_identifier(node),
        ShorthandPropertyIdentifier => visitor.visit_shorthand_property_identifier(node),
        TypeIdentifier => visitor.visit_type_identifier(node),
        RequiredParameter | OptionalParameter => visitor.visit_parameter(node),
        AmbientDeclaration => visitor.visit_ambient_declaration(node),
        FunctionSignature | MethodSignature | AbstractMethodSignature | CallSignature
        | ConstructSignature | FunctionType | ConstructorType => {
            visitor.visit_function_signature(node)
        }
        InterfaceDeclaration | TypeAliasDeclaration | EnumDeclaration | InternalModule
        | TsModule => visitor.visit_type_declaration(node),
        TypeParameter => visitor.visit_type_parameter(node),
        IndexSignature => visitor.visit_index_signature(node),
        MappedTypeClause => visitor.visit_mapped_type_clause(node),
        JsxOpeningElement | JsxSelfClosingElement => visitor.visit_jsx_element_tag(node),
        JsxClosingElement => visitor.visit_jsx_closing_element(node),
        Comment => visitor.visit_comment(node),
        _ => visit_children(visitor, node),
    }
}

pub fn visit_children<'a, TVisit: Visit<'a> + ?Sized>(visitor: &mut TVisit, node: Node<'a>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visitor.visit(child);
    }
}

pub fn visit_children_except<'a, TVisit: Visit<'a> + ?Sized>(
    visitor: &mut TVisit,
    node: Node<'a>,
    skipped: &[Option<Node<'a>>],
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if skipped.contains(&Some(child)) {
            continue;
        }
        visitor.visit(child);
    }
}
