//! Lightweight markup blocks (`<textile>`) rendered to inline HTML.
use comrak::{Options, markdown_to_html};

/// Turns a block of lightweight markup into an HTML fragment.
///
/// Walkers only see this trait, so the dialect can be swapped without
/// touching the document grammar.
pub trait MarkupRenderer {
  fn render(&self, text: &str) -> String;
}

/// [`MarkupRenderer`] backed by comrak.
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkRenderer {
  /// Pass raw HTML in the source through instead of stripping it.
  pub allow_raw_html: bool,
}

impl Default for CommonMarkRenderer {
  fn default() -> Self {
    Self {
      allow_raw_html: true,
    }
  }
}

impl CommonMarkRenderer {
  fn options(&self) -> Options<'_> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.render.r#unsafe = self.allow_raw_html;
    options
  }
}

impl MarkupRenderer for CommonMarkRenderer {
  fn render(&self, text: &str) -> String {
    markdown_to_html(text, &self.options())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_paragraphs_and_emphasis() {
    let html = CommonMarkRenderer::default().render("Some *emphasis* here.\n");
    assert_eq!(html, "<p>Some <em>emphasis</em> here.</p>\n");
  }

  #[test]
  fn raw_html_is_optional() {
    let source = "<b>bold</b>\n";
    let allowed = CommonMarkRenderer::default().render(source);
    assert!(allowed.contains("<b>bold</b>"));

    let stripped = CommonMarkRenderer {
      allow_raw_html: false,
    }
    .render(source);
    assert!(!stripped.contains("<b>"));
  }
}
