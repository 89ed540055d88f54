//! The element tree consumed from the host document.
//!
//! The host's markup parser is not part of this crate; whatever produces the
//! document hands us an [`Element`] tree. An element carries a recognized
//! [`Tag`], a string attribute map and its child elements. The scene root
//! walks this tree once at mount time to collect asset declarations and
//! contributor elements.

use std::collections::HashMap;

/// Tags this adapter reacts to. Anything else in the tree is carried along
/// untouched as [`Tag::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Scene,
    Asset,
    Sun,
    Environment,
    Camera,
    Model,
    Other,
}

impl Tag {
    pub fn from_name(name: &str) -> Tag {
        match name.to_ascii_lowercase().as_str() {
            "pbr-scene" => Tag::Scene,
            "pbr-asset" => Tag::Asset,
            "pbr-sun" => Tag::Sun,
            "pbr-environment" => Tag::Environment,
            "pbr-camera" => Tag::Camera,
            "pbr-model" => Tag::Model,
            _ => Tag::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Scene => "pbr-scene",
            Tag::Asset => "pbr-asset",
            Tag::Sun => "pbr-sun",
            Tag::Environment => "pbr-environment",
            Tag::Camera => "pbr-camera",
            Tag::Model => "pbr-model",
            Tag::Other => "unknown",
        }
    }
}

/// One node of the host document.
#[derive(Clone, Debug)]
pub struct Element {
    tag: Tag,
    attributes: HashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute assignment, handy when hosts construct trees
    /// programmatically.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Presence check: the attribute exists on the element.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// All elements below this one in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.children.iter().collect();
        stack.reverse();
        Descendants { stack }
    }
}

/// Depth-first iterator over an element's subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let element = self.stack.pop()?;
        // Reversed so children pop in document order.
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
