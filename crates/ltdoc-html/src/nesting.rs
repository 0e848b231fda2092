//! Heading depth, anchors and table-of-contents bookkeeping for one walk.
use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::{builder::HtmlBuilder, document::TocNode, error::StructuralError};

/// Headings at this depth or deeper never get an automatic anchor.
pub const MAX_AUTO_ANCHOR_DEPTH: usize = 3;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::expect_used, reason = "Pattern is a compile-time constant")]
  Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid")
});

/// How a section asks for its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRequest<'a> {
  /// Never anchored, never in the TOC.
  None,
  /// Anchored and listed only while shallow enough and collecting.
  Auto,
  /// Always anchored. The empty string names the document's root section.
  Explicit(&'a str),
}

/// Replace characters that are legal in ids but break CSS selectors.
#[must_use]
pub fn escape_anchor(anchor: &str) -> String {
  anchor.replace(['.', ':'], "-")
}

/// Lower-case `title` and collapse every run of characters outside
/// `[a-z0-9]` into a single underscore.
#[must_use]
pub fn slugify(title: &str) -> String {
  SLUG_RE.replace_all(&title.to_lowercase(), "_").into_owned()
}

/// State threaded through a single document walk.
///
/// Sections are entered through [`Nesting::section`], which renders the
/// heading, runs the body and restores depth and TOC state afterwards on
/// every path, including when the body fails.
#[derive(Debug)]
pub struct Nesting {
  basename:  String,
  depth:     usize,
  unique_id: usize,
  /// `None` while nested content must not contribute to the TOC.
  toc:       Option<Vec<TocNode>>,
  anchors:   HashSet<String>,
}

impl Nesting {
  #[must_use]
  pub fn new(basename: impl Into<String>) -> Self {
    Self {
      basename:  basename.into(),
      depth:     0,
      unique_id: 0,
      toc:       Some(Vec::new()),
      anchors:   HashSet::new(),
    }
  }

  #[must_use]
  pub fn basename(&self) -> &str {
    &self.basename
  }

  #[must_use]
  pub const fn depth(&self) -> usize {
    self.depth
  }

  #[must_use]
  pub const fn is_collecting(&self) -> bool {
    self.toc.is_some()
  }

  /// Compose the document-scoped anchor for an author-supplied one.
  #[must_use]
  pub fn compose_anchor(&self, supplied: &str) -> String {
    if supplied.is_empty() {
      escape_anchor(&self.basename)
    } else {
      escape_anchor(&format!("{}__{supplied}", self.basename))
    }
  }

  fn auto_anchor(&mut self, title: &str) -> String {
    let id = self.unique_id;
    self.unique_id += 1;
    self.compose_anchor(&format!("{id:02x}-{}", slugify(title)))
  }

  fn resolve(&mut self, title: &str, request: AnchorRequest<'_>) -> Option<String> {
    match request {
      AnchorRequest::None => None,
      AnchorRequest::Auto => {
        (self.depth < MAX_AUTO_ANCHOR_DEPTH && self.is_collecting())
          .then(|| self.auto_anchor(title))
      },
      AnchorRequest::Explicit(supplied) => Some(self.compose_anchor(supplied)),
    }
  }

  /// Render a heading and its body one level deeper than the current one.
  ///
  /// Returns the section's anchor, if it received one. If the section is
  /// anchored while the current context collects TOC entries, it is appended
  /// to that context with the entries collected from its body; otherwise the
  /// body's headings are kept out of the TOC.
  ///
  /// # Errors
  ///
  /// Returns [`StructuralError::DuplicateAnchor`] if the anchor was already
  /// used in this document, or whatever error `body` produces.
  pub fn section<F>(
    &mut self,
    out: &mut HtmlBuilder,
    title: &str,
    request: AnchorRequest<'_>,
    class: Option<&str>,
    body: F,
  ) -> Result<Option<String>, StructuralError>
  where
    F: FnOnce(&mut Self, &mut HtmlBuilder) -> Result<(), StructuralError>,
  {
    let anchor = self.resolve(title, request);
    if let Some(anchor) = &anchor
      && !self.anchors.insert(anchor.clone())
    {
      return Err(StructuralError::DuplicateAnchor(anchor.clone()));
    }

    let use_toc = self.is_collecting() && anchor.is_some();
    let parent = std::mem::replace(&mut self.toc, use_toc.then(Vec::new));

    self.depth += 1;
    if let Some(class) = class {
      out.open("div", &[("class", class)]);
    }
    let heading = format!("h{}", self.depth.min(6));
    match &anchor {
      Some(id) => out.element(&heading, &[("id", id)], title),
      None => out.element(&heading, &[], title),
    };

    let result = body(self, out);

    if class.is_some() {
      out.close("div");
    }
    self.depth -= 1;

    let children = std::mem::replace(&mut self.toc, parent);
    if use_toc && let Some(siblings) = self.toc.as_mut() {
      siblings.push(TocNode {
        anchor:    anchor.clone(),
        title:     title.to_string(),
        children:  children.unwrap_or_default(),
        css_class: class.map(str::to_string),
      });
    }

    result.map(|()| anchor)
  }

  /// Like [`Nesting::section`] with an explicit anchor, which is always
  /// assigned.
  ///
  /// # Errors
  ///
  /// See [`Nesting::section`].
  pub fn anchored_section<F>(
    &mut self,
    out: &mut HtmlBuilder,
    title: &str,
    supplied: &str,
    class: Option<&str>,
    body: F,
  ) -> Result<String, StructuralError>
  where
    F: FnOnce(&mut Self, &mut HtmlBuilder) -> Result<(), StructuralError>,
  {
    let anchor = self.compose_anchor(supplied);
    self
      .section(out, title, AnchorRequest::Explicit(supplied), class, body)
      .map(|resolved| resolved.unwrap_or(anchor))
  }

  /// Finish the walk and hand back the collected top-level TOC.
  #[must_use]
  pub fn into_toc(self) -> Vec<TocNode> {
    self.toc.unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn ok(_: &mut Nesting, _: &mut HtmlBuilder) -> Result<(), StructuralError> {
    Ok(())
  }

  fn collect_anchors(nodes: &[TocNode], out: &mut Vec<String>) {
    for node in nodes {
      if let Some(anchor) = &node.anchor {
        out.push(anchor.clone());
      }
      collect_anchors(&node.children, out);
    }
  }

  #[test]
  fn slugify_collapses_runs() {
    assert_eq!(slugify("Hello, World!"), "hello_world_");
    assert_eq!(slugify("a--b  c"), "a_b_c");
    assert_eq!(slugify("Ünïcode"), "_n_code");
  }

  #[test]
  fn explicit_anchors_are_namespaced_and_escaped() {
    let nesting = Nesting::new("mod_foo");
    assert_eq!(nesting.compose_anchor(""), "mod_foo");
    assert_eq!(nesting.compose_anchor("opt.a:b"), "mod_foo__opt-a-b");
  }

  #[test]
  fn root_section_renders_heading_and_toc() {
    let mut nesting = Nesting::new("doc");
    let mut out = HtmlBuilder::new();
    let anchor = nesting
      .section(&mut out, "Doc", AnchorRequest::Explicit(""), Some("chapter"), |cx, out| {
        cx.section(out, "Intro & more", AnchorRequest::Auto, Some("section"), ok)
          .map(|_| ())
      })
      .expect("walk succeeds");

    assert_eq!(anchor.as_deref(), Some("doc"));
    assert_eq!(nesting.depth(), 0);
    assert_eq!(
      out.as_str(),
      "<div class=\"chapter\"><h1 id=\"doc\">Doc</h1><div class=\"section\">\
       <h2 id=\"doc__00-intro_more\">Intro &amp; more</h2></div></div>"
    );

    let toc = nesting.into_toc();
    assert_eq!(toc.len(), 1);
    assert_eq!(toc[0].children.len(), 1);
    assert_eq!(
      toc[0].children[0].anchor.as_deref(),
      Some("doc__00-intro_more")
    );
    assert_eq!(toc[0].children[0].css_class.as_deref(), Some("section"));
  }

  #[test]
  fn auto_anchors_stop_at_depth_three() {
    let mut nesting = Nesting::new("d");
    let mut out = HtmlBuilder::new();
    nesting
      .section(&mut out, "1", AnchorRequest::Auto, None, |cx, out| {
        cx.section(out, "2", AnchorRequest::Auto, None, |cx, out| {
          cx.section(out, "3", AnchorRequest::Auto, None, |cx, out| {
            let deep = cx.section(out, "4", AnchorRequest::Auto, None, ok)?;
            assert_eq!(deep, None);
            Ok(())
          })
          .map(|_| ())
        })
        .map(|_| ())
      })
      .expect("walk succeeds");

    assert!(out.as_str().contains("<h4>4</h4>"));
    let toc = nesting.into_toc();
    assert_eq!(toc[0].children[0].children[0].title, "3");
    assert!(toc[0].children[0].children[0].children.is_empty());
  }

  #[test]
  fn unanchored_parent_suppresses_children() {
    let mut nesting = Nesting::new("d");
    let mut out = HtmlBuilder::new();
    nesting
      .section(&mut out, "Example", AnchorRequest::None, Some("example"), |cx, out| {
        assert!(!cx.is_collecting());
        let auto = cx.section(out, "Auto", AnchorRequest::Auto, None, ok)?;
        assert_eq!(auto, None);
        // Explicit anchors are still assigned, just not listed.
        let explicit =
          cx.section(out, "Pinned", AnchorRequest::Explicit("pin"), None, ok)?;
        assert_eq!(explicit.as_deref(), Some("d__pin"));
        Ok(())
      })
      .expect("walk succeeds");

    assert!(nesting.is_collecting());
    assert!(nesting.into_toc().is_empty());
  }

  #[test]
  fn duplicate_anchor_is_rejected() {
    let mut nesting = Nesting::new("d");
    let mut out = HtmlBuilder::new();
    nesting
      .section(&mut out, "a", AnchorRequest::Explicit("x"), None, ok)
      .expect("first use is fine");
    let err = nesting
      .section(&mut out, "b", AnchorRequest::Explicit("x"), None, ok)
      .expect_err("second use collides");
    assert_eq!(err, StructuralError::DuplicateAnchor("d__x".to_string()));
  }

  #[test]
  fn state_is_restored_when_body_fails() {
    let mut nesting = Nesting::new("d");
    let mut out = HtmlBuilder::new();
    let result = nesting.section(
      &mut out,
      "t",
      AnchorRequest::Auto,
      Some("section"),
      |_, _| {
        Err(StructuralError::missing_attribute("section", "title"))
      },
    );
    assert!(result.is_err());
    assert_eq!(nesting.depth(), 0);
    assert!(nesting.is_collecting());
    assert!(out.as_str().ends_with("</div>"));
  }

  #[test]
  fn anchors_in_one_document_are_unique() {
    let mut nesting = Nesting::new("d");
    let mut out = HtmlBuilder::new();
    nesting
      .section(&mut out, "Root", AnchorRequest::Explicit(""), None, |cx, out| {
        for _ in 0..5 {
          cx.section(out, "Same title", AnchorRequest::Auto, None, |cx, out| {
            cx.section(out, "Same title", AnchorRequest::Auto, None, ok)
              .map(|_| ())
          })?;
        }
        Ok(())
      })
      .expect("walk succeeds");

    let mut anchors = Vec::new();
    collect_anchors(&nesting.into_toc(), &mut anchors);
    let unique: HashSet<_> = anchors.iter().collect();
    assert_eq!(anchors.len(), 11);
    assert_eq!(unique.len(), anchors.len());
  }
}
