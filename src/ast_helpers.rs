use std::borrow::Cow;

use tree_sitter::Node;

use crate::{
    kind::{
        AccessibilityModifier, ArrowFunction, Comment, ExportStatement, Identifier,
        JsxNamespaceName, LexicalDeclaration, OptionalParameter, RequiredParameter,
    },
    parser::Site,
    scope::DeclarationKind,
    text::SourceTextProvider,
};

pub trait NodeExt<'a> {
    fn text<'b>(&self, source_text_provider: &impl SourceTextProvider<'b>) -> Cow<'b, str>;
    fn site(&self) -> Site;
    fn maybe_first_child_of_kind(&self, kind: &str) -> Option<Node<'a>>;
    fn has_child_of_kind(&self, kind: &str) -> bool;
}

impl<'a> NodeExt<'a> for Node<'a> {
    fn text<'b>(&self, source_text_provider: &impl SourceTextProvider<'b>) -> Cow<'b, str> {
        source_text_provider.node_text(*self)
    }

    fn site(&self) -> Site {
        let position = self.start_position();
        Site {
            line: position.row + 1,
            column: position.column + 1,
        }
    }

    fn maybe_first_child_of_kind(&self, kind: &str) -> Option<Node<'a>> {
        let mut cursor = self.walk();
        let ret = self.children(&mut cursor).find(|child| child.kind() == kind);
        ret
    }

    fn has_child_of_kind(&self, kind: &str) -> bool {
        self.maybe_first_child_of_kind(kind).is_some()
    }
}

/// One entry of a function's parameter list.
///
/// For TypeScript parameters `pattern` is the unwrapped binding pattern and
/// `wrapper` is the `required_parameter`/`optional_parameter` node, whose other
/// children (type annotation, default value) are in reference position.
#[derive(Copy, Clone, Debug)]
pub struct FunctionParam<'a> {
    pub pattern: Node<'a>,
    pub wrapper: Option<Node<'a>>,
    pub is_parameter_property: bool,
}

pub fn get_function_params<'a>(node: Node<'a>) -> Vec<FunctionParam<'a>> {
    if node.kind() == ArrowFunction {
        if let Some(parameter) = node.child_by_field_name("parameter") {
            return vec![FunctionParam {
                pattern: parameter,
                wrapper: None,
                is_parameter_property: false,
            }];
        }
    }
    let Some(parameters) = node.child_by_field_name("parameters") else {
        return Default::default();
    };
    let mut cursor = parameters.walk();
    let ret = parameters
        .named_children(&mut cursor)
        .filter(|child| child.kind() != Comment)
        .filter_map(|param| match param.kind() {
            RequiredParameter | OptionalParameter => {
                param.child_by_field_name("pattern").map(|pattern| FunctionParam {
                    pattern,
                    wrapper: Some(param),
                    is_parameter_property: param.has_child_of_kind(AccessibilityModifier)
                        || param.has_child_of_kind("readonly"),
                })
            }
            _ => Some(FunctionParam {
                pattern: param,
                wrapper: None,
                is_parameter_property: false,
            }),
        })
        .collect();
    ret
}

pub fn get_lexical_declaration_kind(node: Node) -> DeclarationKind {
    assert_eq!(node.kind(), LexicalDeclaration);
    match node.child(0).map(|child| child.kind()) {
        Some("const") => DeclarationKind::Const,
        _ => DeclarationKind::Let,
    }
}

/// The declaration keyword of a `for (… in/of …)` head, if it has one.
pub fn get_for_in_declaration_kind(node: Node) -> Option<DeclarationKind> {
    let left = node.child_by_field_name("left")?;
    let mut cursor = node.walk();
    let ret = node
        .children(&mut cursor)
        .take_while(|&child| child != left)
        .find_map(|child| match child.kind() {
            "var" => Some(DeclarationKind::Var),
            "let" => Some(DeclarationKind::Let),
            "const" => Some(DeclarationKind::Const),
            _ => None,
        });
    ret
}

/// Whether `node` is the declaration of an `export` statement, as opposed to
/// something nested in one (a decorator argument, a function body).
pub fn is_exported_declaration(node: Node) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == ExportStatement && parent.child_by_field_name("declaration") == Some(node)
    })
}

/// `<div>`, `<my-element>` and `<svg:rect>` name host elements, not bindings.
pub fn is_intrinsic_jsx_name(name: Node, source_text: &str) -> bool {
    match name.kind() {
        JsxNamespaceName => true,
        Identifier => source_text[name.byte_range()].starts_with(|c: char| c.is_ascii_lowercase()),
        _ => false,
    }
}

/// The first `ERROR` or `MISSING` node in document order.
pub fn find_first_error_node(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }
    if root.is_error() || root.is_missing() {
        return Some(root);
    }
    let mut cursor = root.walk();
    let children = root.children(&mut cursor).collect::<Vec<_>>();
    children.into_iter().find_map(find_first_error_node)
}
