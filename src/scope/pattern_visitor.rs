use tree_sitter::Node;

use crate::kind::{
    ArrayPattern, AssignmentPattern, Comment, ComputedPropertyName, Identifier, MemberExpression,
    NonNullExpression, ObjectAssignmentPattern, ObjectPattern, PairPattern,
    ParenthesizedExpression, RestPattern, ShorthandPropertyIdentifierPattern, SubscriptExpression,
    This,
};

/// Where a bound identifier sits inside its root pattern.
#[derive(Copy, Clone, Debug)]
pub struct PatternInfo {
    pub top_level: bool,
    pub array_element: bool,
    pub has_rest_sibling: bool,
}

/// Whether a pattern declares names or assigns to existing targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatternMode {
    /// Member targets are not declarable and end up unclassified.
    Declaration,
    Assignment,
}

#[derive(Copy, Clone, Default)]
struct Context {
    array_element: bool,
    has_rest_sibling: bool,
}

/// Walks a declaration or assignment target, calling back once per bound
/// identifier.
pub struct PatternVisitor<'a, TCallback> {
    root_pattern: Node<'a>,
    mode: PatternMode,
    callback: TCallback,
    /// Expressions nested in the pattern that are in reference position:
    /// default values, computed keys and, when assigning, member-expression
    /// targets.
    pub right_hand_nodes: Vec<Node<'a>>,
    pub unclassified: Vec<Node<'a>>,
}

impl<'a, TCallback: FnMut(Node<'a>, &PatternInfo)> PatternVisitor<'a, TCallback> {
    pub fn new(root_pattern: Node<'a>, mode: PatternMode, callback: TCallback) -> Self {
        Self {
            root_pattern,
            mode,
            callback,
            right_hand_nodes: Default::default(),
            unclassified: Default::default(),
        }
    }

    pub fn visit(&mut self, node: Node<'a>) {
        self.visit_in(node, Context::default());
    }

    fn visit_in(&mut self, node: Node<'a>, context: Context) {
        match node.kind() {
            Identifier | ShorthandPropertyIdentifierPattern => {
                let info = PatternInfo {
                    top_level: node == self.root_pattern,
                    array_element: context.array_element,
                    has_rest_sibling: context.has_rest_sibling,
                };
                (self.callback)(node, &info);
            }
            ObjectPattern => {
                let mut cursor = node.walk();
                let properties = node
                    .named_children(&mut cursor)
                    .filter(|child| child.kind() != Comment)
                    .collect::<Vec<_>>();
                let has_rest_sibling = properties.iter().any(|child| child.kind() == RestPattern);
                for property in properties {
                    self.visit_in(
                        property,
                        Context {
                            has_rest_sibling: has_rest_sibling && property.kind() != RestPattern,
                            ..Default::default()
                        },
                    );
                }
            }
            PairPattern => {
                if let Some(key) = node.child_by_field_name("key") {
                    if key.kind() == ComputedPropertyName {
                        self.right_hand_nodes.push(key);
                    }
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit_in(value, context);
                }
            }
            ArrayPattern => {
                let mut cursor = node.walk();
                let elements = node
                    .named_children(&mut cursor)
                    .filter(|child| child.kind() != Comment)
                    .collect::<Vec<_>>();
                for element in elements {
                    self.visit_in(
                        element,
                        Context {
                            array_element: true,
                            ..Default::default()
                        },
                    );
                }
            }
            AssignmentPattern | ObjectAssignmentPattern => {
                let (Some(left), Some(right)) = (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) else {
                    self.unclassified.push(node);
                    return;
                };
                self.right_hand_nodes.push(right);
                self.visit_in(left, context);
            }
            RestPattern => {
                let mut cursor = node.walk();
                let argument = node
                    .named_children(&mut cursor)
                    .find(|child| child.kind() != Comment);
                match argument {
                    Some(argument) => self.visit_in(argument, Context::default()),
                    None => self.unclassified.push(node),
                }
            }
            ParenthesizedExpression | NonNullExpression => {
                match node.named_child(0) {
                    Some(inner) => self.visit_in(inner, context),
                    None => self.unclassified.push(node),
                }
            }
            MemberExpression | SubscriptExpression => match self.mode {
                PatternMode::Assignment => self.right_hand_nodes.push(node),
                PatternMode::Declaration => self.unclassified.push(node),
            },
            This | Comment => {}
            _ => {
                self.unclassified.push(node);
            }
        }
    }

    pub fn into_nodes(self) -> PatternNodes<'a> {
        PatternNodes {
            right_hand_nodes: self.right_hand_nodes,
            unclassified: self.unclassified,
        }
    }
}

/// What is left of a pattern once its bound identifiers are reported.
#[derive(Debug, Default)]
pub struct PatternNodes<'a> {
    pub right_hand_nodes: Vec<Node<'a>>,
    pub unclassified: Vec<Node<'a>>,
}

pub fn traverse_identifier_in_pattern<'a>(
    root_pattern: Node<'a>,
    mode: PatternMode,
    callback: impl FnMut(Node<'a>, &PatternInfo),
) -> PatternNodes<'a> {
    let mut visitor = PatternVisitor::new(root_pattern, mode, callback);
    visitor.visit(root_pattern);
    visitor.into_nodes()
}
