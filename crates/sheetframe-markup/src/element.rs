//! The element tree.
//!
//! [`Element`] is a mutable node with a qualified name, ordered attributes
//! and ordered children. Attributes live in an [`IndexMap`] so that
//! replacing a value keeps its original position and serialization emits
//! attributes in the order they were first set.

use std::{io, mem};

use indexmap::IndexMap;
use log::trace;
use quick_xml::Writer;

use crate::{
    error::MarkupError,
    qname::QName,
    reader,
    writer::{self, WriteOptions},
};

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A markup element.
///
/// # Examples
///
/// ```
/// # use sheetframe_markup::Element;
/// let mut frame = Element::new("xdr:graphicFrame");
/// frame.set_attr("macro", "");
/// frame
///     .add_child("xdr:nvGraphicFramePr")
///     .add_child("xdr:cNvPr")
///     .set_attr("id", "2");
///
/// let props = frame
///     .child("xdr:nvGraphicFramePr")
///     .and_then(|nv| nv.child("xdr:cNvPr"))
///     .unwrap();
/// assert_eq!(props.attr("id"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: QName,
    attributes: IndexMap<QName, String>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<QName>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute (builder style).
    pub fn with_attr(mut self, key: impl Into<QName>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Declares a namespace prefix (builder style).
    pub fn with_namespace(mut self, prefix: &str, uri: &str) -> Self {
        self.declare_namespace(prefix, uri);
        self
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Returns the value of the attribute written as `key`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(&QName::from(key)).map(String::as_str)
    }

    /// Sets an attribute value.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn set_attr(&mut self, key: impl Into<QName>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Removes an attribute, preserving the order of the remaining ones.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(&QName::from(key))
    }

    /// Iterates over attributes in serialization order.
    pub fn attributes(&self) -> impl Iterator<Item = (&QName, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key, value.as_str()))
    }

    /// Declares `prefix` as bound to `uri` on this element.
    ///
    /// An empty prefix declares the default namespace.
    pub fn declare_namespace(&mut self, prefix: &str, uri: &str) {
        let key = if prefix.is_empty() {
            QName::new(None, "xmlns")
        } else {
            QName::new(Some("xmlns"), prefix)
        };
        self.attributes.insert(key, uri.to_string());
    }

    /// Returns the URI bound to `prefix` by a declaration on this element.
    ///
    /// Only this element's own declarations are consulted.
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            self.attr("xmlns")
        } else {
            self.attributes
                .iter()
                .find(|(key, _)| {
                    key.is_namespace_declaration() && key.prefix().is_some() && key.local() == prefix
                })
                .map(|(_, uri)| uri.as_str())
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over element children, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterates over element children written as `name`.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name.matches(name))
    }

    /// Returns the first element child written as `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name.matches(name))
    }

    /// Returns the first element child written as `name`, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|element| element.name.matches(name))
    }

    /// Appends a new empty child element and returns it.
    pub fn add_child(&mut self, name: impl Into<QName>) -> &mut Element {
        self.push_element(Element::new(name))
    }

    /// Appends an existing element and returns it.
    pub fn push_element(&mut self, element: Element) -> &mut Element {
        self.children.push(Node::Element(element));
        match self.children.last_mut() {
            Some(Node::Element(element)) => element,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Replaces the first element child written as `name` in place.
    ///
    /// Returns the replaced element, or `None` (leaving the children
    /// untouched) if there is no such child.
    pub fn replace_child(&mut self, name: &str, element: Element) -> Option<Element> {
        let slot = self
            .children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|child| child.name.matches(name))?;
        Some(mem::replace(slot, element))
    }

    /// Appends a node.
    pub fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Removes every element child written as `name`, returning how many were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(element) if element.name.matches(name)));
        before - self.children.len()
    }

    /// Concatenated text content of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Parses `markup` as a fragment and appends the resulting nodes.
    ///
    /// The fragment may contain any number of sibling elements and text.
    /// Returns the number of nodes appended. On error nothing is appended.
    pub fn append_raw(&mut self, markup: &str) -> Result<usize, MarkupError> {
        let nodes = reader::parse_nodes(markup)?;
        let count = nodes.len();
        trace!(parent = self.name.to_string(), count; "Appending raw markup");
        self.children.extend(nodes);
        Ok(count)
    }

    // =========================================================================
    // Parsing and serialization
    // =========================================================================

    /// Parses a complete document with exactly one root element.
    ///
    /// The XML declaration, comments and processing instructions are skipped.
    pub fn parse(source: &str) -> Result<Element, MarkupError> {
        let mut roots = reader::parse_nodes(source)?
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                Node::Text(_) => None,
            })
            .collect::<Vec<_>>();

        match roots.len() {
            0 => Err(MarkupError::NoRoot),
            1 => Ok(roots.remove(0)),
            count => Err(MarkupError::MultipleRoots { count }),
        }
    }

    /// Parses a fragment into a list of sibling nodes.
    pub fn parse_fragment(markup: &str) -> Result<Vec<Node>, MarkupError> {
        reader::parse_nodes(markup)
    }

    /// Serializes this element without declaration or indentation.
    pub fn to_xml(&self) -> Result<String, MarkupError> {
        self.to_xml_with(&WriteOptions::default())
    }

    /// Serializes this element as a document using `options`.
    pub fn to_xml_with(&self, options: &WriteOptions) -> Result<String, MarkupError> {
        writer::to_string(self, options)
    }

    /// Writes this element to an existing [`quick_xml::Writer`].
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), MarkupError> {
        writer::write_element(writer, self)
    }
}
