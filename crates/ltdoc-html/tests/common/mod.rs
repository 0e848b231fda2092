#![allow(dead_code)]
use std::rc::Rc;

use ltdoc_html::{
  CommonMarkRenderer,
  Grammar,
  OutputDocument,
  build_document,
};

/// Parses `xml` and walks it with the grammar its root names.
pub fn compile(basename: &str, xml: &str) -> Rc<OutputDocument> {
  let root = ltdoc_xml::parse_document(xml).expect("Failed to parse test XML");
  let grammar =
    Grammar::from_root(&root.name).expect("Test XML has a known root");
  let doc =
    build_document(grammar, basename, &root, &CommonMarkRenderer::default())
      .expect("Failed to walk test XML");
  Rc::new(doc)
}

/// A small documentation set: two modules, one angel module, one chapter.
pub fn sample_set() -> Vec<Rc<OutputDocument>> {
  vec![
    compile(
      "mod_foo",
      r#"<module xmlns="urn:lighttpd.net:lighttpd2/doc1" title="Foo">
        <short>does foo things</short>
        <option name="foo">
          <short>enables foo</short>
          <default><value>false</value></default>
        </option>
        <action name="shared"><short>from foo</short></action>
        <section title="See also">
          Related: <html><a href="mod_bar.html#mod_bar__action_shared">bar</a></html>
        </section>
      </module>"#,
    ),
    compile(
      "mod_bar",
      r#"<module xmlns="urn:lighttpd.net:lighttpd2/doc1" order="a">
        <short>does bar things</short>
        <action name="shared"><short>from bar</short></action>
        <setup name="bar.setup"><parameter name="x"><short>the x</short></parameter></setup>
      </module>"#,
    ),
    compile(
      "angel_simple",
      r#"<angel-module xmlns="urn:lighttpd.net:lighttpd2/doc1">
        <item name="run"><short>runs</short></item>
      </angel-module>"#,
    ),
    compile(
      "core_config",
      r#"<chapter xmlns="urn:lighttpd.net:lighttpd2/doc1" title="Configuration" order="0">
        <description>See <html><a href="mod_foo.html#mod_foo__option_foo">foo</a></html>.</description>
        <section title="Basics"/>
      </chapter>"#,
    ),
  ]
}
