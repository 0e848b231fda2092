#![allow(clippy::expect_used, reason = "Fine in tests")]
mod common;

use std::rc::Rc;

use common::sample_set;
use ltdoc_html::{
  DocumentKind,
  OutputDocument,
  PageRenderer,
  build_module_index,
  build_navigation,
  merge_documents,
  sort_documents,
};

fn basenames(docs: &[Rc<OutputDocument>]) -> Vec<&str> {
  docs.iter().map(|doc| doc.basename.as_str()).collect()
}

/// Runs the aggregation stages the way the binary does.
fn assemble() -> (Vec<Rc<OutputDocument>>, Rc<OutputDocument>) {
  let mut docs = sample_set();
  sort_documents(&mut docs);

  let index = build_module_index(&docs)
    .expect("Failed to build module index")
    .map(Rc::new)
    .expect("sample set has modules");

  let mut pages: Vec<_> = docs
    .iter()
    .filter(|doc| doc.kind != DocumentKind::Module)
    .cloned()
    .collect();
  pages.push(Rc::clone(&index));
  (pages, index)
}

#[test]
fn test_documents_sort_by_order_key() {
  let mut docs = sample_set();
  sort_documents(&mut docs);
  assert_eq!(basenames(&docs), [
    "core_config",
    "mod_bar",
    "angel_simple",
    "mod_foo"
  ]);
}

#[test]
fn test_module_index_keeps_same_named_items() {
  let (_, index) = assemble();
  assert_eq!(basenames(&index.sub_pages), ["mod_bar", "mod_foo"]);

  let bar = index
    .content
    .find(r#"<a href="mod_bar.html#mod_bar__action_shared">shared</a>"#)
    .expect("bar's action is listed");
  let foo = index
    .content
    .find(r#"<a href="mod_foo.html#mod_foo__action_shared">shared</a>"#)
    .expect("foo's action is listed");
  assert!(bar < foo);
  assert!(index.content.contains(
    r#"<a href="mod_bar.html#mod_bar__setup_bar-setup">bar.setup</a>"#
  ));
  assert!(!index.content.contains("angel_simple"));
}

#[test]
fn test_merged_page_rewrites_every_internal_link() {
  let (pages, _) = assemble();
  let merged = merge_documents(&pages).expect("Failed to merge");

  assert!(merged.content.contains(r##"<a href="#mod_foo__option_foo">foo</a>"##));
  assert!(merged.content.contains(r##"<a href="#mod_bar__action_shared">bar</a>"##));
  assert!(!merged.content.contains(".html#"));

  let titles: Vec<_> = merged.toc.iter().map(|node| node.title.as_str()).collect();
  assert_eq!(titles, [
    "Configuration",
    "angel_simple",
    "Module index",
    "mod_bar",
    "Foo"
  ]);
}

#[test]
fn test_navigation_lists_sub_pages() {
  let (pages, _) = assemble();
  let nav = build_navigation(&pages).expect("Failed to build navigation");
  assert!(nav.content.contains(concat!(
    r#"<li><a href="index_modules.html">Module index</a>"#,
    r#"<ul><li><a href="mod_bar.html">mod_bar</a></li>"#,
    r#"<li><a href="mod_foo.html">Foo</a></li></ul></li>"#
  )));
}

#[test]
fn test_pages_render_through_embedded_shell() {
  let (_, index) = assemble();
  let renderer = PageRenderer::new(ltdoc_templates::PAGE_TEMPLATE, "lighttpd2")
    .expect("Embedded template compiles");

  let html = renderer.render(&index).expect("Failed to render page");
  assert!(html.starts_with("<!DOCTYPE html>"));
  assert!(html.contains("<title>lighttpd2 - Module index</title>"));
  assert!(html.contains(
    r#"<ul class="nav bs-sidenav"><li class="index"><a href="index.html">Index</a></li>"#
  ));
  assert!(html.contains(r#"<h1 id="index_modules">Module index</h1>"#));
}
