//! Render tree.
//!
//! The interpreter produces a small element tree rather than a string so the
//! output can be inspected structurally and serialized once at the end.

use std::fmt::Write;

/// A node in the render tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    /// Attributes in insertion order. `None` renders a boolean attribute.
    pub attrs: Vec<(&'static str, Option<String>)>,
    pub children: Vec<Node>,
}

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add whitespace-separated classes.
    pub fn class(mut self, classes: impl AsRef<str>) -> Self {
        self.classes
            .extend(classes.as_ref().split_whitespace().map(str::to_owned));
        self
    }

    pub fn class_opt(self, classes: Option<&str>) -> Self {
        match classes {
            Some(c) => self.class(c),
            None => self,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, Some(value.into()));
        self
    }

    /// Add a boolean attribute such as `muted`.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.set_attr(name, None);
        self
    }

    fn set_attr(&mut self, name: &'static str, value: Option<String>) {
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Append a child. Empty fragments are dropped.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        let node = node.into();
        if !node.is_empty() {
            self.children.push(node);
        }
        self
    }

    pub fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, |element, node| element.child(node))
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| *n == name)
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Descendant elements matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_elements(&pred, &mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// A node that renders nothing.
    pub fn empty() -> Self {
        Node::Fragment(Vec::new())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Fragment(nodes) => nodes.iter().all(Node::is_empty),
            _ => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Elements (including this one) matching `pred`, in document order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_elements(&pred, &mut out);
        out
    }

    /// Elements carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    fn collect_elements<'a, F>(&'a self, pred: &F, out: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        match self {
            Node::Text(_) => {}
            Node::Element(e) => {
                if pred(e) {
                    out.push(e);
                }
                for child in &e.children {
                    child.collect_elements(pred, out);
                }
            }
            Node::Fragment(nodes) => {
                for child in nodes {
                    child.collect_elements(pred, out);
                }
            }
        }
    }

    /// Serialize to HTML. Text and attribute values are escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(out)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                if !e.classes.is_empty() {
                    write!(out, r#" class="{}""#, escape_html(&e.classes.join(" "))).unwrap();
                }
                for (name, value) in &e.attrs {
                    match value {
                        Some(v) => write!(out, r#" {}="{}""#, name, escape_html(v)).unwrap(),
                        None => write!(out, " {}", name).unwrap(),
                    }
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&e.tag) {
                    return;
                }

                for child in &e.children {
                    child.write_html(out);
                }
                write!(out, "</{}>", e.tag).unwrap();
            }
        }
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let node: Node = Element::new("div")
            .class("card  highlighted")
            .attr("id", "intro")
            .child(Element::new("p").text("Hello"))
            .into();

        assert_eq!(
            node.to_html(),
            r#"<div class="card highlighted" id="intro"><p>Hello</p></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: Node = Element::new("code")
            .attr("title", r#"a "quoted" <value>"#)
            .text("<script>alert('x')</script> & more")
            .into();

        assert_eq!(
            node.to_html(),
            "<code title=\"a &quot;quoted&quot; &lt;value&gt;\">&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more</code>"
        );
    }

    #[test]
    fn renders_void_and_boolean_attributes() {
        let node: Node = Element::new("video").flag("muted").attr("src", "a.mp4").into();
        assert_eq!(node.to_html(), r#"<video muted src="a.mp4"></video>"#);

        let hr: Node = Element::new("hr").class("divider").into();
        assert_eq!(hr.to_html(), r#"<hr class="divider">"#);
    }

    #[test]
    fn drops_empty_children() {
        let element = Element::new("div")
            .child(Node::empty())
            .child(Node::Fragment(vec![Node::empty()]))
            .text("x");

        assert_eq!(element.children.len(), 1);
        assert!(Node::Fragment(vec![Node::empty()]).is_empty());
    }

    #[test]
    fn finds_elements_and_text() {
        let node: Node = Element::new("ul")
            .child(Element::new("li").class("item").text("a"))
            .child(Element::new("li").class("item").text("b"))
            .into();

        let items = node.find_by_class("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text_content(), "b");
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn replaces_repeated_attribute() {
        let element = Element::new("a").attr("href", "/one").attr("href", "/two");

        assert_eq!(element.attrs.len(), 1);
        assert_eq!(element.attr_value("href"), Some("/two"));
    }
}
