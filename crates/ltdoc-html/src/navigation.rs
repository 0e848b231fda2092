//! The navigation index page listing every page.
use std::rc::Rc;

use crate::{
  builder::HtmlBuilder,
  document::{DocumentKind, IndexEntries, OutputDocument},
  error::StructuralError,
  merge::MERGED_BASENAME,
  nesting::Nesting,
};

pub const NAVIGATION_BASENAME: &str = "index";
pub const NAVIGATION_TITLE: &str = "Index";

fn page_list(out: &mut HtmlBuilder, pages: &[Rc<OutputDocument>]) {
  if pages.is_empty() {
    return;
  }
  out.open("ul", &[]);
  for page in pages {
    out.open("li", &[]).link(&page.filename(), &page.title);
    page_list(out, &page.sub_pages);
    out.close("li");
  }
  out.close("ul");
}

/// Build the `index` page: a pointer to the merged page and a nested list
/// of `pages` and their sub-pages.
///
/// # Errors
///
/// Propagates [`StructuralError`] from the nesting manager.
pub fn build_navigation(
  pages: &[Rc<OutputDocument>],
) -> Result<OutputDocument, StructuralError> {
  let mut cx = Nesting::new(NAVIGATION_BASENAME);
  let mut out = HtmlBuilder::new();
  cx.anchored_section(
    &mut out,
    NAVIGATION_TITLE,
    "",
    Some(NAVIGATION_BASENAME),
    |_, out| {
      out
        .open("p", &[])
        .text("The documentation is also available as a ")
        .link(&format!("{MERGED_BASENAME}.html"), "single HTML page")
        .text(".")
        .close("p");
      page_list(out, pages);
      Ok(())
    },
  )?;

  Ok(OutputDocument {
    basename: NAVIGATION_BASENAME.to_string(),
    title: NAVIGATION_TITLE.to_string(),
    order: None,
    kind: DocumentKind::Navigation,
    short: None,
    content: out.finish(),
    toc: cx.into_toc(),
    entries: IndexEntries::default(),
    sub_pages: Vec::new(),
  })
}
