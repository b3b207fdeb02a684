// crates/markup_segmenter/src/tree.rs

//! A minimal owned element tree built from an `html5ever` DOM.
//!
//! Parsing follows the HTML5 algorithm, so anything a browser would render
//! produces a tree: implied end tags, unquoted attributes, named entities and
//! raw `<script>`/`<style>` text are all accepted.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name, lower-cased by the parser.
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `true` when the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Every descendant element (depth-first, document order) for which
    /// `pred` holds. Matching elements are still searched for nested matches.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        find_all_in(&self.children, pred, &mut found);
        found
    }

    /// Removes the first descendant element (document order) for which `pred`
    /// holds. Returns `true` if one was removed.
    pub fn remove_first(&mut self, pred: &dyn Fn(&Element) -> bool) -> bool {
        for i in 0..self.children.len() {
            if let Node::Element(child) = &mut self.children[i] {
                if pred(child) {
                    self.children.remove(i);
                    return true;
                }
                if child.remove_first(pred) {
                    return true;
                }
            }
        }
        false
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

fn find_all_in<'a>(nodes: &'a [Node], pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if pred(element) {
                found.push(element);
            }
            find_all_in(&element.children, pred, found);
        }
    }
}

/// Parses `document` as HTML into a synthetic root element holding the
/// document's top-level nodes (normally a single `<html>`).
pub fn parse_markup(document: &str) -> Element {
    let dom = parse_document(RcDom::default(), Default::default()).one(document);
    let mut root = Element::default();
    append_children(&dom.document, &mut root.children);
    root
}

fn append_children(handle: &Handle, out: &mut Vec<Node>) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                let mut element = Element {
                    name: name.local.to_string(),
                    attributes: attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect(),
                    children: Vec::new(),
                };
                append_children(child, &mut element.children);
                out.push(Node::Element(element));
            }
            NodeData::Text { contents } => out.push(Node::Text(contents.borrow().to_string())),
            // Comments, doctypes and processing instructions carry no text.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(document: &str) -> String {
        let root = parse_markup(document);
        root.find_all(&|e: &Element| e.name == "body")
            .first()
            .map(|body| body.text())
            .unwrap_or_default()
    }

    #[test]
    fn test_parses_nested_elements_and_text() {
        let root = parse_markup("<div class=\"a b\"><p>one <b>two</b></p></div>");
        let divs = root.find_all(&|e: &Element| e.name == "div");
        assert_eq!(divs.len(), 1);
        assert!(divs[0].has_class("b"));
        assert_eq!(divs[0].text(), "one two");
    }

    #[test]
    fn test_void_elements_need_no_closing_tag() {
        assert_eq!(body_text("<p>line<br>next<img src=\"x.png\"></p>"), "linenext");
    }

    #[test]
    fn test_entities_are_resolved() {
        assert_eq!(body_text("<code>if a &lt; b &amp;&amp; c &rarr; d</code>"), "if a < b && c \u{2192} d");
    }

    #[test]
    fn test_implied_end_tags() {
        let root = parse_markup("<div id=outer><p>first<p>second</div><div>after</div>");
        let divs = root.find_all(&|e: &Element| e.name == "div");
        assert_eq!(divs.len(), 2);
        assert_eq!(divs[0].attribute("id"), Some("outer"));
        assert_eq!(divs[0].find_all(&|e: &Element| e.name == "p").len(), 2);
        assert_eq!(divs[1].text(), "after");
    }

    #[test]
    fn test_stray_closing_tag_is_ignored() {
        assert_eq!(body_text("text</div> more"), "text more");
    }

    #[test]
    fn test_script_text_is_kept_raw() {
        let root = parse_markup("<script>if (a < b) {}</script><div>x</div>");
        let scripts = root.find_all(&|e: &Element| e.name == "script");
        assert_eq!(scripts[0].text(), "if (a < b) {}");
    }

    #[test]
    fn test_remove_first_takes_document_order() {
        let mut root = parse_markup("<div><h2>A</h2><section><h3>B</h3></section><h1>C</h1></div>");
        assert!(root.remove_first(&|e: &Element| matches!(e.name.as_str(), "h1" | "h2" | "h3")));
        let div = root.find_all(&|e: &Element| e.name == "div")[0].clone();
        assert_eq!(div.text(), "BC");
    }
}
