//! Parsed page markup and the navigation the scrapers rely on.
//!
//! Pages are parsed with `scraper` (html5ever underneath). The scrapers walk
//! the resulting tree through [`MarkupNode`] rather than through CSS
//! selectors: discovery needs last-child/previous-sibling navigation and the
//! title walk must be able to stop descending at a match.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Read-only view of one node of a markup tree.
///
/// Implemented for `scraper`'s tree; tests implement it for hand-built trees.
pub trait MarkupNode<'a>: Copy + Sized {
    /// Tag name for element nodes, `None` for everything else.
    fn tag(self) -> Option<&'a str>;
    /// Attribute value on element nodes.
    fn attr(self, name: &str) -> Option<&'a str>;
    /// Literal content of text nodes.
    fn text(self) -> Option<&'a str>;
    fn first_child(self) -> Option<Self>;
    fn last_child(self) -> Option<Self>;
    fn next_sibling(self) -> Option<Self>;
    fn prev_sibling(self) -> Option<Self>;

    fn is_element(self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }
}

impl<'a> MarkupNode<'a> for NodeRef<'a, Node> {
    fn tag(self) -> Option<&'a str> {
        self.value().as_element().map(|element| element.name())
    }

    fn attr(self, name: &str) -> Option<&'a str> {
        self.value().as_element().and_then(|element| element.attr(name))
    }

    fn text(self) -> Option<&'a str> {
        self.value().as_text().map(|text| &**text)
    }

    fn first_child(self) -> Option<Self> {
        NodeRef::first_child(&self)
    }

    fn last_child(self) -> Option<Self> {
        NodeRef::last_child(&self)
    }

    fn next_sibling(self) -> Option<Self> {
        NodeRef::next_sibling(&self)
    }

    fn prev_sibling(self) -> Option<Self> {
        NodeRef::prev_sibling(&self)
    }
}

/// Children of `node` in document order.
pub fn children<'a, N: MarkupNode<'a>>(node: N) -> impl Iterator<Item = N> {
    std::iter::successors(node.first_child(), |child| child.next_sibling())
}

/// Children of `node` from the last one backward.
pub fn children_rev<'a, N: MarkupNode<'a>>(node: N) -> impl Iterator<Item = N> {
    std::iter::successors(node.last_child(), |child| child.prev_sibling())
}

/// First node, depth-first pre-order from `root` (inclusive), matching `predicate`.
pub fn find_first<'a, N, P>(root: N, predicate: P) -> Option<N>
where
    N: MarkupNode<'a>,
    P: Fn(N) -> bool,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if predicate(node) {
            return Some(node);
        }
        stack.extend(children_rev(node));
    }
    None
}

/// One parsed page. Lives only as long as the fetch-and-extract step that made it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a page body. Never fails: invalid UTF-8 is replaced with U+FFFD
    /// and html5ever recovers from any malformed markup.
    pub fn parse(body: &[u8]) -> Self {
        Self {
            html: Html::parse_document(&String::from_utf8_lossy(body)),
        }
    }

    pub fn root(&self) -> NodeRef<'_, Node> {
        self.html.tree.root()
    }
}
