#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use ltdoc_xml::{XmlError, load_file};
use tempfile::tempdir;

#[test]
fn test_load_file_reads_root() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("mod_foo.xml");
  fs::write(
    &path,
    r#"<?xml version="1.0" encoding="utf-8"?>
<!-- generated -->
<module xmlns="urn:lighttpd.net:lighttpd2/doc1">
  <short>foo things</short>
</module>
"#,
  )
  .expect("Failed to write source in test");

  let root = load_file(&path).expect("document should load");
  assert_eq!(root.name, "module");
  assert_eq!(root.element_children().count(), 1);
}

#[test]
fn test_load_file_missing_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let err = load_file(temp_dir.path().join("nope.xml"))
    .expect_err("missing file must fail");
  assert!(matches!(err, XmlError::ReadFile { .. }));
}

#[test]
fn test_load_file_rejects_two_roots() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("two.xml");
  fs::write(&path, "<a/><b/>").expect("Failed to write source in test");

  assert!(load_file(&path).is_err());
}
