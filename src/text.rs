use std::borrow::Cow;

use tree_sitter::Node;

pub trait SourceTextProvider<'a> {
    fn node_text(&self, node: Node) -> Cow<'a, str>;
}

impl<'a> SourceTextProvider<'a> for &'a str {
    fn node_text(&self, node: Node) -> Cow<'a, str> {
        let source: &'a str = *self;
        String::from_utf8_lossy(&source.as_bytes()[node.byte_range()])
    }
}
