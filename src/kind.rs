use std::collections::HashSet;

use once_cell::sync::Lazy;

pub type Kind = &'static str;

pub const AbstractClassDeclaration: &str = "abstract_class_declaration";
pub const AbstractMethodSignature: &str = "abstract_method_signature";
pub const AccessibilityModifier: &str = "accessibility_modifier";
pub const AmbientDeclaration: &str = "ambient_declaration";
pub const ArrayPattern: &str = "array_pattern";
pub const ArrowFunction: &str = "arrow_function";
pub const AssignmentExpression: &str = "assignment_expression";
pub const AssignmentPattern: &str = "assignment_pattern";
pub const AugmentedAssignmentExpression: &str = "augmented_assignment_expression";
pub const CallSignature: &str = "call_signature";
pub const CatchClause: &str = "catch_clause";
pub const Class: &str = "class";
pub const ClassDeclaration: &str = "class_declaration";
pub const ClassStaticBlock: &str = "class_static_block";
pub const Comment: &str = "comment";
pub const ComputedPropertyName: &str = "computed_property_name";
pub const ConstructSignature: &str = "construct_signature";
pub const ConstructorType: &str = "constructor_type";
pub const EnumDeclaration: &str = "enum_declaration";
pub const ExportSpecifier: &str = "export_specifier";
pub const ExportStatement: &str = "export_statement";
pub const ForInStatement: &str = "for_in_statement";
pub const ForStatement: &str = "for_statement";
pub const Function: &str = "function";
pub const FunctionDeclaration: &str = "function_declaration";
pub const FunctionSignature: &str = "function_signature";
pub const FunctionType: &str = "function_type";
pub const GeneratorFunction: &str = "generator_function";
pub const GeneratorFunctionDeclaration: &str = "generator_function_declaration";
pub const Identifier: &str = "identifier";
pub const ImportAlias: &str = "import_alias";
pub const ImportClause: &str = "import_clause";
pub const ImportRequireClause: &str = "import_require_clause";
pub const ImportSpecifier: &str = "import_specifier";
pub const ImportStatement: &str = "import_statement";
pub const IndexSignature: &str = "index_signature";
pub const InterfaceDeclaration: &str = "interface_declaration";
pub const InternalModule: &str = "internal_module";
pub const JsxClosingElement: &str = "jsx_closing_element";
pub const JsxNamespaceName: &str = "jsx_namespace_name";
pub const JsxOpeningElement: &str = "jsx_opening_element";
pub const JsxSelfClosingElement: &str = "jsx_self_closing_element";
pub const LabeledStatement: &str = "labeled_statement";
pub const LexicalDeclaration: &str = "lexical_declaration";
pub const MappedTypeClause: &str = "mapped_type_clause";
pub const MemberExpression: &str = "member_expression";
pub const MethodDefinition: &str = "method_definition";
pub const MethodSignature: &str = "method_signature";
pub const NamedImports: &str = "named_imports";
pub const NamespaceImport: &str = "namespace_import";
pub const NonNullExpression: &str = "non_null_expression";
pub const ObjectAssignmentPattern: &str = "object_assignment_pattern";
pub const ObjectPattern: &str = "object_pattern";
pub const OptionalParameter: &str = "optional_parameter";
pub const Pair: &str = "pair";
pub const PairPattern: &str = "pair_pattern";
pub const ParenthesizedExpression: &str = "parenthesized_expression";
pub const Program: &str = "program";
pub const RequiredParameter: &str = "required_parameter";
pub const RestPattern: &str = "rest_pattern";
pub const ShorthandPropertyIdentifier: &str = "shorthand_property_identifier";
pub const ShorthandPropertyIdentifierPattern: &str = "shorthand_property_identifier_pattern";
pub const StatementBlock: &str = "statement_block";
pub const SubscriptExpression: &str = "subscript_expression";
pub const SwitchStatement: &str = "switch_statement";
pub const This: &str = "this";
pub const TsModule: &str = "module";
pub const TypeAliasDeclaration: &str = "type_alias_declaration";
pub const TypeIdentifier: &str = "type_identifier";
pub const TypeParameter: &str = "type_parameter";
pub const UpdateExpression: &str = "update_expression";
pub const VariableDeclaration: &str = "variable_declaration";
pub const VariableDeclarator: &str = "variable_declarator";

pub static FUNCTION_KINDS: Lazy<HashSet<Kind>> = Lazy::new(|| {
    [
        Function,
        FunctionDeclaration,
        GeneratorFunction,
        GeneratorFunctionDeclaration,
        ArrowFunction,
        MethodDefinition,
    ]
    .into()
});

pub fn is_function_kind(kind: Kind) -> bool {
    FUNCTION_KINDS.contains(kind)
}
