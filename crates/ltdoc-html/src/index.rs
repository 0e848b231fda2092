//! The module cross-reference page.
use std::rc::Rc;

use log::debug;

use crate::{
  builder::HtmlBuilder,
  document::{
    DocumentKind,
    DocumentRef,
    IndexEntries,
    IndexEntry,
    OutputDocument,
  },
  error::StructuralError,
  nesting::Nesting,
};

pub const MODULE_INDEX_BASENAME: &str = "index_modules";
pub const MODULE_INDEX_TITLE: &str = "Module index";

fn module_link(out: &mut HtmlBuilder, module: &DocumentRef) {
  out.link(&module.href(), &module.title);
}

fn modules_table(out: &mut HtmlBuilder, modules: &[Rc<OutputDocument>]) {
  out
    .open("table", &[("class", "table table-striped")])
    .open("tr", &[])
    .element("th", &[], "name")
    .element("th", &[], "description")
    .close("tr");
  for module in modules {
    out.open("tr", &[]).open("td", &[]);
    module_link(out, &module.reference());
    out
      .close("td")
      .element("td", &[], module.short.as_deref().unwrap_or_default())
      .close("tr");
  }
  out.close("table");
}

fn entry_table(out: &mut HtmlBuilder, entries: &[IndexEntry]) {
  out
    .open("table", &[("class", "table table-striped aso")])
    .open("tr", &[])
    .element("th", &[], "name")
    .element("th", &[], "module")
    .element("th", &[], "description")
    .close("tr");
  for entry in entries {
    out
      .open("tr", &[])
      .open("td", &[])
      .link(&entry.href, &entry.name)
      .close("td")
      .open("td", &[]);
    module_link(out, &entry.owner);
    out
      .close("td")
      .element("td", &[], entry.short.as_deref().unwrap_or_default())
      .close("tr");
  }
  out.close("table");
  if entries.is_empty() {
    out.text("none");
  }
}

/// Gather the entries of every module, each kind sorted by name.
///
/// Entries with the same name keep the order of their modules, so the
/// result is deterministic for a given module order.
#[must_use]
pub fn collect_entries(modules: &[Rc<OutputDocument>]) -> IndexEntries {
  let mut all = IndexEntries::default();
  for module in modules {
    all.actions.extend(module.entries.actions.iter().cloned());
    all.setups.extend(module.entries.setups.iter().cloned());
    all.options.extend(module.entries.options.iter().cloned());
  }
  for list in [&mut all.actions, &mut all.setups, &mut all.options] {
    list.sort_by(|a, b| a.name.cmp(&b.name));
  }
  all
}

/// Build the cross-reference page for `documents`.
///
/// Only [`DocumentKind::Module`] documents are aggregated; they become the
/// page's sub-pages. Returns `None` if there are none.
///
/// # Errors
///
/// Returns a [`StructuralError`] only if the page's own anchors collide,
/// which the fixed section layout rules out in practice.
pub fn build_module_index(
  documents: &[Rc<OutputDocument>],
) -> Result<Option<OutputDocument>, StructuralError> {
  let modules: Vec<Rc<OutputDocument>> = documents
    .iter()
    .filter(|doc| doc.kind == DocumentKind::Module)
    .cloned()
    .collect();
  if modules.is_empty() {
    return Ok(None);
  }

  let entries = collect_entries(&modules);
  debug!(
    "Module index: {} modules, {} actions, {} setups, {} options",
    modules.len(),
    entries.actions.len(),
    entries.setups.len(),
    entries.options.len()
  );

  let mut cx = Nesting::new(MODULE_INDEX_BASENAME);
  let mut out = HtmlBuilder::new();
  cx.anchored_section(
    &mut out,
    MODULE_INDEX_TITLE,
    "",
    Some(MODULE_INDEX_BASENAME),
    |cx, out| {
      cx.anchored_section(out, "Modules", "modules", None, |_, out| {
        modules_table(out, &modules);
        Ok(())
      })?;
      for (title, anchor, list) in [
        ("Actions", "actions", &entries.actions),
        ("Setups", "setups", &entries.setups),
        ("Options", "options", &entries.options),
      ] {
        cx.anchored_section(out, title, anchor, None, |_, out| {
          entry_table(out, list);
          Ok(())
        })?;
      }
      Ok(())
    },
  )?;

  Ok(Some(OutputDocument {
    basename: MODULE_INDEX_BASENAME.to_string(),
    title: MODULE_INDEX_TITLE.to_string(),
    order: None,
    kind: DocumentKind::ModuleIndex,
    short: None,
    content: out.finish(),
    toc: cx.into_toc(),
    entries: IndexEntries::default(),
    sub_pages: modules,
  }))
}
