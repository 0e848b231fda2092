//! Indentation normalisation for embedded code blocks.
//!
//! Source documents indent code samples to match the surrounding XML, with
//! whatever mix of tabs and spaces the author's editor produced. Before
//! rendering we strip the common indentation so that the least-indented line
//! starts in column zero.

/// Columns a tab advances to (the next multiple of this value).
pub const TAB_WIDTH: usize = 4;

const fn advance(column: usize, c: char) -> usize {
  if c == '\t' {
    column + TAB_WIDTH - column % TAB_WIDTH
  } else {
    column + 1
  }
}

/// Width in columns of the leading whitespace of `line`.
#[must_use]
pub fn indent_width(line: &str) -> usize {
  line
    .chars()
    .take_while(|c| *c == ' ' || *c == '\t')
    .fold(0, advance)
}

/// Remove up to `indent` columns of leading whitespace from `line`.
///
/// A tab that straddles the budget is consumed whole. Lines with less
/// leading whitespace than the budget lose all of it and nothing more.
#[must_use]
pub fn strip_indent(line: &str, indent: usize) -> &str {
  let mut column = 0;
  for (pos, c) in line.char_indices() {
    if column >= indent || (c != ' ' && c != '\t') {
      return &line[pos..];
    }
    column = advance(column, c);
  }
  ""
}

/// Bring a code blob into canonical form.
///
/// The common indentation of all non-blank lines is removed, trailing
/// whitespace is stripped from every line, leading and trailing blank lines
/// are dropped and runs of blank lines collapse into one. Non-empty results
/// always end with exactly one newline; blank input yields an empty string.
///
/// The transformation is idempotent.
#[must_use]
pub fn normalize_code(code: &str) -> String {
  let lines: Vec<&str> = code.trim_end().lines().collect();

  let Some(indent) = lines
    .iter()
    .filter(|line| !line.trim().is_empty())
    .map(|line| indent_width(line))
    .min()
  else {
    return String::new();
  };

  let mut out = String::with_capacity(code.len());
  let mut pending_blank = false;

  for line in lines {
    let line = strip_indent(line, indent).trim_end();
    if line.is_empty() {
      pending_blank = !out.is_empty();
      continue;
    }
    if pending_blank {
      out.push('\n');
      pending_blank = false;
    }
    out.push_str(line);
    out.push('\n');
  }

  out
}
