//! Merging finished pages into the single "all in one" page.
use std::{collections::HashSet, rc::Rc};

use kuchikikiki::parse_html;
use log::debug;
use markup5ever::local_name;
use tendril::TendrilSink;

use crate::{
  document::{DocumentKind, IndexEntries, OutputDocument, TocNode},
  error::RenderError,
};

pub const MERGED_BASENAME: &str = "all";
pub const MERGED_TITLE: &str = "all in one";

#[derive(Debug, Default)]
struct Merger {
  content:   String,
  toc:       Vec<TocNode>,
  filenames: HashSet<String>,
}

impl Merger {
  /// Append `pages` in order, each followed by its sub-pages.
  fn append(&mut self, pages: &[Rc<OutputDocument>]) {
    for page in pages {
      // A page reachable twice is only included once.
      if !self.filenames.insert(page.filename()) {
        continue;
      }
      self.content.push_str(&page.content);
      self.toc.extend(page.toc.iter().cloned());
      self.append(&page.sub_pages);
    }
  }
}

/// Concatenate `pages` (and, recursively, their sub-pages) into one page.
///
/// The TOC of the result is the flat sequence of every included page's TOC
/// forest. Links into included pages are rewritten to plain fragments.
///
/// # Errors
///
/// Returns a [`RenderError`] if the merged markup cannot be re-serialized.
pub fn merge_documents(
  pages: &[Rc<OutputDocument>],
) -> Result<OutputDocument, RenderError> {
  let mut merger = Merger::default();
  merger.append(pages);
  debug!("Merging {} pages into {MERGED_BASENAME}", merger.filenames.len());

  let content = rewrite_links(&merger.content, &merger.filenames)?;

  Ok(OutputDocument {
    basename: MERGED_BASENAME.to_string(),
    title: MERGED_TITLE.to_string(),
    order: None,
    kind: DocumentKind::Merged,
    short: None,
    content,
    toc: merger.toc,
    entries: IndexEntries::default(),
    sub_pages: Vec::new(),
  })
}

/// The in-page form of `href` if it points into one of `filenames`.
///
/// `page.html#anchor` becomes `#anchor`; links without a fragment or to
/// other files yield `None`.
#[must_use]
pub fn local_target(href: &str, filenames: &HashSet<String>) -> Option<String> {
  let (file, fragment) = href.split_once('#')?;
  filenames.contains(file).then(|| format!("#{fragment}"))
}

/// Rewrite every link in `html` with [`local_target`].
///
/// # Errors
///
/// Returns a [`RenderError`] if serialization fails or produces invalid
/// UTF-8.
pub fn rewrite_links(
  html: &str,
  filenames: &HashSet<String>,
) -> Result<String, RenderError> {
  let document = parse_html().one(html);

  if let Ok(links) = document.select("a[href]") {
    for link in links {
      let mut attributes = link.attributes.borrow_mut();
      let Some(target) = attributes
        .get(local_name!("href"))
        .and_then(|href| local_target(href, filenames))
      else {
        continue;
      };
      attributes.insert(local_name!("href"), target);
    }
  }

  // The parser wraps fragments in html/head/body; keep only the body.
  let mut buf = Vec::new();
  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      child.serialize(&mut buf)?;
    }
  }
  Ok(String::from_utf8(buf)?)
}
