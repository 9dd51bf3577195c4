//! Minimal SVG document writer.
//!
//! The pipeline emits a fixed, tiny element vocabulary (`svg`, `g`, `path`,
//! `rect`, `title`), so this module builds documents from plain element
//! trees instead of going through a full SVG object model. Attribute order
//! follows insertion order, which keeps output deterministic.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;

const XMLNS: &str = "http://www.w3.org/2000/svg";

/// Formats a float attribute value without trailing zeros.
pub fn format_number(value: f64) -> String {
    let mut text = format!("{value}");
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

fn escape(value: &str, out: &mut String) {
    for character in value.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

// ============================================================================
// Element
// ============================================================================

/// A single SVG element with attributes, children, and optional text.
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, builder-style.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a numeric attribute, builder-style.
    pub fn attr_number(self, name: impl Into<String>, value: f64) -> Self {
        self.attr(name, format_number(value))
    }

    /// Sets the text content, builder-style.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    fn write(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"");
            escape(value, out);
            out.push('"');
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            escape(text, out);
        }
        for child in &self.children {
            child.write(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

// ============================================================================
// Document
// ============================================================================

/// An SVG document with a fixed pixel size.
#[derive(Debug, Clone)]
pub struct Document {
    width: f64,
    height: f64,
    children: Vec<Element>,
}

impl Document {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Serializes the document to a string.
    pub fn to_svg(&self) -> String {
        let mut root = Element::new("svg")
            .attr("xmlns", XMLNS)
            .attr("width", format_number(self.width))
            .attr("height", format_number(self.height));
        for child in &self.children {
            root.push(child.clone());
        }
        let mut out = String::new();
        root.write(&mut out);
        out.push('\n');
        out
    }

    /// Writes the document to a file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_svg())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_is_self_closing() {
        let mut out = String::new();
        Element::new("path").attr("d", "M 0,0").write(&mut out);
        assert_eq!(out, "<path d=\"M 0,0\"/>");
    }

    #[test]
    fn nested_elements_and_text() {
        let mut group = Element::new("g").attr_number("opacity", 0.5);
        group.push(Element::new("title").text("A & B"));
        let mut out = String::new();
        group.write(&mut out);
        assert_eq!(out, "<g opacity=\"0.5\"><title>A &amp; B</title></g>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut out = String::new();
        Element::new("path").attr("d", "\"<>").write(&mut out);
        assert_eq!(out, "<path d=\"&quot;&lt;&gt;\"/>");
    }

    #[test]
    fn document_wraps_children() {
        let mut document = Document::new(16.0, 16.0);
        document.push(Element::new("path").attr("d", "M 0,0"));
        assert_eq!(
            document.to_svg(),
            format!("<svg xmlns=\"{XMLNS}\" width=\"16\" height=\"16\"><path d=\"M 0,0\"/></svg>\n")
        );
    }

    #[test]
    fn format_number_trims() {
        assert_eq!(format_number(24.0), "24");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0");
    }
}
