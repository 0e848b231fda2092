use std::fmt::Write;

/// Append-only HTML fragment writer.
///
/// Every handler receives the builder explicitly; there is no ambient
/// "current output". Text is escaped, raw markup is trusted.
#[derive(Debug, Default, Clone)]
pub struct HtmlBuilder {
  buf: String,
}

impl HtmlBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Open `tag` with the given attributes. Attribute values are escaped.
  pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
    self.buf.push('<');
    self.buf.push_str(tag);
    for (key, value) in attrs {
      // Writing to String is infallible
      let _ = write!(
        self.buf,
        " {key}=\"{}\"",
        html_escape::encode_double_quoted_attribute(value)
      );
    }
    self.buf.push('>');
    self
  }

  pub fn close(&mut self, tag: &str) -> &mut Self {
    let _ = write!(self.buf, "</{tag}>");
    self
  }

  /// Append escaped text.
  pub fn text(&mut self, text: &str) -> &mut Self {
    html_escape::encode_text_to_string(text, &mut self.buf);
    self
  }

  /// Append trusted markup verbatim.
  pub fn raw(&mut self, html: &str) -> &mut Self {
    self.buf.push_str(html);
    self
  }

  /// `<tag attrs>text</tag>`
  pub fn element(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> &mut Self {
    self.open(tag, attrs).text(text).close(tag)
  }

  pub fn link(&mut self, href: &str, text: &str) -> &mut Self {
    self.element("a", &[("href", href)], text)
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.buf
  }

  #[must_use]
  pub fn finish(self) -> String {
    self.buf
  }
}
