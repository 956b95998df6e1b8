//! Defines the read-only view of a parsed document that queries run against.

use crate::error::QueryError;
use std::fmt::Debug;

/// A reference to zero or more nodes in a parsed document.
///
/// The query engine is written exclusively against this trait; the document
/// itself is owned elsewhere and implementations are expected to be cheap
/// handles that borrow it.
pub trait Selection: Debug + Clone {
    /// Descendants of every matched node that match the CSS `selector`.
    fn find(&self, selector: &str) -> Result<Self, QueryError>;

    /// One single-node selection per matched node, in document order.
    fn each(&self) -> Vec<Self>;

    /// The attribute value on the first matched node, if present.
    fn attr(&self, name: &str) -> Option<String>;

    /// Serialized inner markup of the first matched node.
    fn inner_html(&self) -> Result<String, QueryError>;

    /// Concatenated text of all matched nodes and their descendants.
    fn text(&self) -> String;

    /// Number of matched nodes.
    fn count(&self) -> usize;

    /// A single-node selection for the node at `index`. Out of range yields
    /// an empty selection.
    fn at(&self, index: usize) -> Self;
}

/// An in-memory selection over a hand-built tree, for unit tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct MockElement {
        pub tag: &'static str,
        pub attrs: Vec<(&'static str, &'static str)>,
        pub text: &'static str,
        pub children: Vec<MockElement>,
    }

    impl MockElement {
        pub fn new(tag: &'static str, text: &'static str) -> Self {
            Self {
                tag,
                attrs: vec![],
                text,
                children: vec![],
            }
        }

        pub fn attr(mut self, name: &'static str, value: &'static str) -> Self {
            self.attrs.push((name, value));
            self
        }

        pub fn child(mut self, child: MockElement) -> Self {
            self.children.push(child);
            self
        }

        fn full_text(&self) -> String {
            let mut out = self.text.to_string();
            for child in &self.children {
                out.push_str(&child.full_text());
            }
            out
        }

        fn outer_html(&self) -> String {
            format!("<{0}>{1}</{0}>", self.tag, self.inner())
        }

        fn inner(&self) -> String {
            let mut out = self.text.to_string();
            for child in &self.children {
                out.push_str(&child.outer_html());
            }
            out
        }

        fn descendants<'a>(&'a self, out: &mut Vec<&'a MockElement>) {
            for child in &self.children {
                out.push(child);
                child.descendants(out);
            }
        }
    }

    /// Selects by tag name only; `"!"` is treated as an invalid selector and
    /// `<broken>` elements fail to serialize.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MockSelection {
        pub nodes: Vec<MockElement>,
    }

    impl MockSelection {
        pub fn root(root: MockElement) -> Self {
            Self { nodes: vec![root] }
        }
    }

    impl Selection for MockSelection {
        fn find(&self, selector: &str) -> Result<Self, QueryError> {
            if selector == "!" {
                return Err(QueryError::Selector {
                    selector: selector.to_string(),
                    message: "unexpected token".to_string(),
                });
            }
            let mut all = Vec::new();
            for node in &self.nodes {
                node.descendants(&mut all);
            }
            let nodes = all
                .into_iter()
                .filter(|el| el.tag == selector)
                .cloned()
                .collect();
            Ok(Self { nodes })
        }

        fn each(&self) -> Vec<Self> {
            self.nodes
                .iter()
                .map(|n| Self {
                    nodes: vec![n.clone()],
                })
                .collect()
        }

        fn attr(&self, name: &str) -> Option<String> {
            self.nodes.first().and_then(|n| {
                n.attrs
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| v.to_string())
            })
        }

        fn inner_html(&self) -> Result<String, QueryError> {
            match self.nodes.first() {
                Some(n) if n.tag == "broken" => {
                    Err(QueryError::Serialization("unserializable node".to_string()))
                }
                Some(n) => Ok(n.inner()),
                None => Ok(String::new()),
            }
        }

        fn text(&self) -> String {
            self.nodes.iter().map(|n| n.full_text()).collect()
        }

        fn count(&self) -> usize {
            self.nodes.len()
        }

        fn at(&self, index: usize) -> Self {
            Self {
                nodes: self.nodes.get(index).cloned().into_iter().collect(),
            }
        }
    }

    /// `<body><ul><li class="x">a</li><li>b</li></ul></body>`
    pub fn list_document() -> MockSelection {
        MockSelection::root(
            MockElement::new("body", "").child(
                MockElement::new("ul", "")
                    .child(MockElement::new("li", "a").attr("class", "x"))
                    .child(MockElement::new("li", "b")),
            ),
        )
    }
}
