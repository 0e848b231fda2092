//! Output document model shared by every build stage.
use std::{cmp::Ordering, rc::Rc};

use serde::Serialize;

use crate::nesting::escape_anchor;

/// What produced an [`OutputDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
  Module,
  AngelModule,
  Chapter,
  /// Cross-reference of all module items.
  ModuleIndex,
  /// The single page containing every other page.
  Merged,
  /// The list of all pages.
  Navigation,
}

/// One entry of a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
  /// `None` for headings that are not navigation targets.
  pub anchor:    Option<String>,
  pub title:     String,
  pub children:  Vec<Self>,
  pub css_class: Option<String>,
}

/// Identifies the document an [`IndexEntry`] belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
  pub basename: String,
  pub title:    String,
}

impl DocumentRef {
  #[must_use]
  pub fn filename(&self) -> String {
    format!("{}.html", self.basename)
  }

  /// Link target of the document's own root section.
  #[must_use]
  pub fn href(&self) -> String {
    format!("{}#{}", self.filename(), escape_anchor(&self.basename))
  }
}

/// A named action, setup or option defined somewhere in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
  pub name:  String,
  /// `<basename>.html#<anchor>`
  pub href:  String,
  pub short: Option<String>,
  pub owner: DocumentRef,
}

/// Items extracted from a module document, per kind, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntries {
  pub actions: Vec<IndexEntry>,
  pub setups:  Vec<IndexEntry>,
  pub options: Vec<IndexEntry>,
}

impl IndexEntries {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.actions.is_empty() && self.setups.is_empty() && self.options.is_empty()
  }
}

/// A fully built page. Immutable once its walk has finished.
#[derive(Debug, Clone)]
pub struct OutputDocument {
  /// Output file stem and anchor namespace.
  pub basename:  String,
  pub title:     String,
  /// Explicit sort key; [`Self::order_key`] falls back to the basename.
  pub order:     Option<String>,
  pub kind:      DocumentKind,
  /// Short description, only set for module documents.
  pub short:     Option<String>,
  /// HTML fragment for the main column.
  pub content:   String,
  pub toc:       Vec<TocNode>,
  pub entries:   IndexEntries,
  /// Pages listed beneath this one in navigation.
  pub sub_pages: Vec<Rc<Self>>,
}

impl OutputDocument {
  #[must_use]
  pub fn filename(&self) -> String {
    format!("{}.html", self.basename)
  }

  #[must_use]
  pub fn order_key(&self) -> &str {
    self.order.as_deref().unwrap_or(&self.basename)
  }

  #[must_use]
  pub fn reference(&self) -> DocumentRef {
    DocumentRef {
      basename: self.basename.clone(),
      title:    self.title.clone(),
    }
  }

  /// Total emission order: by order key, ties broken by basename.
  #[must_use]
  pub fn emission_order(&self, other: &Self) -> Ordering {
    self
      .order_key()
      .cmp(other.order_key())
      .then_with(|| self.basename.cmp(&other.basename))
  }
}

/// Sort documents into emission order.
pub fn sort_documents(documents: &mut [Rc<OutputDocument>]) {
  documents.sort_by(|a, b| a.emission_order(b));
}
