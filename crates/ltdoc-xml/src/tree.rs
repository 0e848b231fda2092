//! Owned element tree built from a `quick-xml` event stream.
//!
//! Documents are small, so the whole tree is materialised up front. This
//! keeps the walkers in `ltdoc-html` free of reader state and lets them look
//! ahead (e.g. "the first `config` child") without re-parsing.
use std::fmt::Write;

use quick_xml::{
  Reader,
  escape::{resolve_xml_entity, unescape},
  events::{BytesStart, Event},
};

use crate::error::XmlError;

/// A single node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  /// Character data with entity references already resolved.
  Text(String),
  /// Content of a `<![CDATA[...]]>` section.
  CData(String),
}

/// An XML element, identified by its local name (namespace prefixes are
/// dropped; every source document lives in the same namespace).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
  pub name:       String,
  pub attributes: Vec<(String, String)>,
  pub children:   Vec<Node>,
}

impl Element {
  /// Create an element with no attributes or children.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Look up an attribute by local name.
  #[must_use]
  pub fn attr(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  /// Iterate over child elements, skipping text and CDATA.
  pub fn element_children(&self) -> impl Iterator<Item = &Self> {
    self.children.iter().filter_map(|node| {
      match node {
        Node::Element(element) => Some(element),
        _ => None,
      }
    })
  }

  /// Iterate over child elements with the given local name.
  pub fn children_named<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Iterator<Item = &'a Self> + 'a {
    self.element_children().filter(move |child| child.name == name)
  }

  /// The first child element with the given local name.
  #[must_use]
  pub fn first_child_named(&self, name: &str) -> Option<&Self> {
    self.element_children().find(|child| child.name == name)
  }

  /// Concatenated text of this element and all of its descendants.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut out = String::new();
    self.collect_text(&mut out);
    out
  }

  fn collect_text(&self, out: &mut String) {
    for child in &self.children {
      match child {
        Node::Element(element) => element.collect_text(out),
        Node::Text(text) | Node::CData(text) => out.push_str(text),
      }
    }
  }

  /// Serialise the children of this element back to markup.
  ///
  /// Used for literal HTML passthrough: text is re-escaped, CDATA sections
  /// are emitted as-is.
  #[must_use]
  pub fn inner_markup(&self) -> String {
    let mut out = String::new();
    for child in &self.children {
      write_node(child, &mut out, true);
    }
    out
  }

  /// Raw text of a code-like element.
  ///
  /// A lone CDATA child is returned verbatim. Otherwise the inner markup is
  /// returned with entities left decoded, so that code samples written
  /// without CDATA still read as the author typed them.
  #[must_use]
  pub fn code_text(&self) -> String {
    if let [Node::CData(content)] = self.children.as_slice() {
      return content.clone();
    }

    let mut out = String::new();
    for child in &self.children {
      write_node(child, &mut out, false);
    }
    out
  }
}

const VOID_ELEMENTS: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
  "source", "track", "wbr",
];

fn write_node(node: &Node, out: &mut String, escape: bool) {
  match node {
    Node::Text(text) => {
      if escape {
        html_escape::encode_text_to_string(text, out);
      } else {
        out.push_str(text);
      }
    },
    Node::CData(text) => out.push_str(text),
    Node::Element(element) => {
      out.push('<');
      out.push_str(&element.name);
      for (key, value) in &element.attributes {
        // Writing to String is infallible
        let _ = write!(
          out,
          " {key}=\"{}\"",
          html_escape::encode_double_quoted_attribute(value)
        );
      }

      if element.children.is_empty()
        && VOID_ELEMENTS.contains(&element.name.as_str())
      {
        out.push('>');
        return;
      }

      out.push('>');
      for child in &element.children {
        write_node(child, out, escape);
      }
      let _ = write!(out, "</{}>", element.name);
    },
  }
}

/// Parse a complete document and return its root element.
///
/// # Errors
///
/// Returns an [`XmlError`] if the input is not well-formed or does not have
/// exactly one root element.
pub fn parse_document(source: &str) -> Result<Element, XmlError> {
  let mut reader = Reader::from_str(source);
  reader.config_mut().trim_text(false);

  // Open elements, innermost last.
  let mut stack: Vec<Element> = Vec::new();
  let mut root: Option<Element> = None;

  loop {
    let event = reader.read_event().map_err(|source| {
      XmlError::Syntax {
        position: reader.error_position(),
        source,
      }
    })?;

    match event {
      Event::Start(start) => stack.push(start_element(&start)?),
      Event::Empty(start) => {
        let element = start_element(&start)?;
        attach(&mut stack, &mut root, Node::Element(element))?;
      },
      Event::End(end) => {
        let name = std::str::from_utf8(end.local_name().as_ref())?.to_string();
        let element = stack.pop().ok_or_else(|| {
          XmlError::MismatchedTag {
            expected: String::new(),
            found:    name.clone(),
          }
        })?;
        if element.name != name {
          return Err(XmlError::MismatchedTag {
            expected: element.name,
            found:    name,
          });
        }
        attach(&mut stack, &mut root, Node::Element(element))?;
      },
      Event::Text(text) => {
        let raw = std::str::from_utf8(&text)?;
        let decoded = unescape(raw).map_err(|e| {
          XmlError::UnknownEntity(e.to_string())
        })?;
        push_text(&mut stack, &decoded);
      },
      Event::GeneralRef(reference) => {
        let name = std::str::from_utf8(&reference)?;
        let resolved = resolve_reference(name)?;
        push_text(&mut stack, &resolved);
      },
      Event::CData(cdata) => {
        let content = std::str::from_utf8(&cdata)?.to_string();
        if let Some(parent) = stack.last_mut() {
          parent.children.push(Node::CData(content));
        }
      },
      Event::Eof => break,
      // Declarations, comments, doctypes and processing instructions carry
      // nothing the walkers care about.
      _ => {},
    }
  }

  if !stack.is_empty() {
    return Err(XmlError::NoRoot);
  }

  root.ok_or(XmlError::NoRoot)
}

fn start_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
  let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
  let mut attributes = Vec::new();

  for attribute in start.attributes() {
    let attribute = attribute.map_err(|e| {
      XmlError::Attribute {
        element: name.clone(),
        message: e.to_string(),
      }
    })?;

    let key = attribute.key.local_name();
    let key = std::str::from_utf8(key.as_ref())?;
    // Namespace declarations are not part of the document model.
    if key == "xmlns" || attribute.key.as_ref().starts_with(b"xmlns:") {
      continue;
    }

    let raw = std::str::from_utf8(&attribute.value)?;
    let value = unescape(raw).map_err(|e| {
      XmlError::Attribute {
        element: name.clone(),
        message: e.to_string(),
      }
    })?;
    attributes.push((key.to_string(), value.into_owned()));
  }

  Ok(Element {
    name,
    attributes,
    children: Vec::new(),
  })
}

fn attach(
  stack: &mut [Element],
  root: &mut Option<Element>,
  node: Node,
) -> Result<(), XmlError> {
  if let Some(parent) = stack.last_mut() {
    parent.children.push(node);
    return Ok(());
  }

  match node {
    Node::Element(element) if root.is_none() => {
      *root = Some(element);
      Ok(())
    },
    _ => Err(XmlError::NoRoot),
  }
}

/// Append text to the innermost open element, merging with a preceding text
/// node so that entity references do not split character data.
fn push_text(stack: &mut [Element], text: &str) {
  let Some(parent) = stack.last_mut() else {
    // Whitespace between the prolog and the root element.
    return;
  };

  if let Some(Node::Text(previous)) = parent.children.last_mut() {
    previous.push_str(text);
  } else {
    parent.children.push(Node::Text(text.to_string()));
  }
}

fn resolve_reference(name: &str) -> Result<String, XmlError> {
  if let Some(number) = name.strip_prefix('#') {
    let code = number.strip_prefix('x').map_or_else(
      || number.parse::<u32>().ok(),
      |hex| u32::from_str_radix(hex, 16).ok(),
    );
    return code
      .and_then(char::from_u32)
      .map(String::from)
      .ok_or_else(|| XmlError::UnknownEntity(name.to_string()));
  }

  resolve_xml_entity(name)
    .map(str::to_string)
    .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn parses_nested_elements_and_attributes() {
    let root = parse_document(
      r#"<?xml version="1.0"?>
<module xmlns="urn:lighttpd.net:lighttpd2/doc1" title="Foo" order="b">
  <short>does foo</short>
  <section title="Usage"><p>hi</p></section>
</module>"#,
    )
    .expect("valid document");

    assert_eq!(root.name, "module");
    assert_eq!(root.attr("title"), Some("Foo"));
    assert_eq!(root.attr("order"), Some("b"));
    assert_eq!(root.attr("xmlns"), None);

    let names: Vec<_> =
      root.element_children().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["short", "section"]);
    assert_eq!(
      root
        .first_child_named("short")
        .expect("short present")
        .text_content(),
      "does foo"
    );
  }

  #[test]
  fn first_child_outlives_the_looked_up_name() {
    let root = parse_document("<module><short>a</short><short>b</short></module>")
      .expect("valid");
    let short = {
      let name = String::from("short");
      root.first_child_named(&name)
    };
    assert_eq!(short.map(Element::text_content).as_deref(), Some("a"));
    assert!(root.first_child_named("description").is_none());
  }

  #[test]
  fn resolves_entities_into_a_single_text_node() {
    let root =
      parse_document("<a>x &lt; y &amp;&#65;&#x42;</a>").expect("valid");
    assert_eq!(root.children, vec![Node::Text("x < y &AB".to_string())]);
  }

  #[test]
  fn code_text_prefers_lone_cdata() {
    let root = parse_document("<config><![CDATA[a < b\n]]></config>")
      .expect("valid");
    assert_eq!(root.code_text(), "a < b\n");
  }

  #[test]
  fn code_text_keeps_inline_markup_unescaped() {
    let root =
      parse_document("<config>if 1 &lt; 2 { <b>x</b> }</config>").expect("ok");
    assert_eq!(root.code_text(), "if 1 < 2 { <b>x</b> }");
  }

  #[test]
  fn inner_markup_round_trips_html() {
    let root = parse_document(
      r#"<html><p class="x">a &amp; b<br/></p><ul><li>1</li></ul></html>"#,
    )
    .expect("valid");
    assert_eq!(
      root.inner_markup(),
      r#"<p class="x">a &amp; b<br></p><ul><li>1</li></ul>"#
    );
  }

  #[test]
  fn rejects_mismatched_tags() {
    assert!(parse_document("<a><b></a>").is_err());
  }

  #[test]
  fn rejects_missing_root() {
    assert!(matches!(
      parse_document("<?xml version=\"1.0\"?>"),
      Err(XmlError::NoRoot)
    ));
  }
}
