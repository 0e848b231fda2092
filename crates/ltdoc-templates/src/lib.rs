use std::collections::HashMap;

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const DEFAULT_CSS: &str = include_str!("../templates/style.css");

/// File name the stylesheet is written under, next to the pages.
pub const STYLESHEET_NAME: &str = "style.css";

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("page.html", PAGE_TEMPLATE);
  templates.insert(STYLESHEET_NAME, DEFAULT_CSS);
  templates
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_template_has_all_slots() {
    for slot in ["{{ title }}", "{{ toc | safe }}", "{{ content | safe }}"] {
      assert!(PAGE_TEMPLATE.contains(slot), "missing {slot}");
    }
    assert!(PAGE_TEMPLATE.contains(STYLESHEET_NAME));
  }

  #[test]
  fn all_templates_lists_embedded_files() {
    let templates = all_templates();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates.get("style.css"), Some(&DEFAULT_CSS));
  }
}
