//! Recursive-descent walkers turning source trees into [`OutputDocument`]s.
//!
//! The three document grammars share one walker; a [`Grammar`] value decides
//! which element kinds are legal at the root and inside sections, and every
//! element is dispatched through the closed [`ElementKind`] enum.
mod item;

use log::debug;
use ltdoc_xml::{Element, Node};

use crate::{
  builder::HtmlBuilder,
  code::normalize_code,
  document::{DocumentKind, DocumentRef, IndexEntries, OutputDocument},
  error::StructuralError,
  markup::MarkupRenderer,
  nesting::{AnchorRequest, Nesting},
};

/// The angel document that describes the angel's own configuration and does
/// not get an introductory paragraph.
pub const CORE_CONFIG_ANGEL: &str = "core_config_angel";

/// Element kinds with a meaning somewhere in a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
  Action,
  Setup,
  Option,
  /// Generic angel-module item.
  Item,
  Example,
  Section,
  Html,
  Textile,
  Short,
  Description,
}

impl ElementKind {
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    Some(match name {
      "action" => Self::Action,
      "setup" => Self::Setup,
      "option" => Self::Option,
      "item" => Self::Item,
      "example" => Self::Example,
      "section" => Self::Section,
      "html" => Self::Html,
      "textile" => Self::Textile,
      "short" => Self::Short,
      "description" => Self::Description,
      _ => return None,
    })
  }

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Action => "action",
      Self::Setup => "setup",
      Self::Option => "option",
      Self::Item => "item",
      Self::Example => "example",
      Self::Section => "section",
      Self::Html => "html",
      Self::Textile => "textile",
      Self::Short => "short",
      Self::Description => "description",
    }
  }
}

/// One of the three recognised document shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
  Module,
  AngelModule,
  Chapter,
}

impl Grammar {
  /// Pick the grammar for a root element name, if it is one we compile.
  #[must_use]
  pub fn from_root(name: &str) -> Option<Self> {
    match name {
      "module" => Some(Self::Module),
      "angel-module" => Some(Self::AngelModule),
      "chapter" => Some(Self::Chapter),
      _ => None,
    }
  }

  #[must_use]
  pub const fn root_name(self) -> &'static str {
    match self {
      Self::Module => "module",
      Self::AngelModule => "angel-module",
      Self::Chapter => "chapter",
    }
  }

  #[must_use]
  pub const fn document_kind(self) -> DocumentKind {
    match self {
      Self::Module => DocumentKind::Module,
      Self::AngelModule => DocumentKind::AngelModule,
      Self::Chapter => DocumentKind::Chapter,
    }
  }

  /// Context named in "invalid ... element" errors at the root.
  const fn root_context(self) -> &'static str {
    match self {
      Self::Module | Self::AngelModule => "module",
      Self::Chapter => "chapter",
    }
  }

  const fn item_kinds(self) -> &'static [ElementKind] {
    match self {
      Self::Module => {
        &[ElementKind::Action, ElementKind::Setup, ElementKind::Option]
      },
      Self::AngelModule => &[ElementKind::Item],
      Self::Chapter => &[],
    }
  }

  /// Metadata children of the root, consumed up front and skipped when the
  /// root's children are dispatched.
  const fn root_metadata(self) -> &'static [ElementKind] {
    match self {
      Self::Module | Self::AngelModule => {
        &[ElementKind::Short, ElementKind::Description]
      },
      Self::Chapter => &[ElementKind::Description],
    }
  }

  fn allows_at_root(self, kind: ElementKind) -> bool {
    self.item_kinds().contains(&kind)
      || matches!(kind, ElementKind::Example | ElementKind::Section)
  }

  fn allows_in_section(self, kind: ElementKind) -> bool {
    self.item_kinds().contains(&kind)
      || matches!(
        kind,
        ElementKind::Html
          | ElementKind::Textile
          | ElementKind::Example
          | ElementKind::Section
      )
  }
}

/// Walk a source tree and produce its output document.
///
/// # Errors
///
/// Returns a [`StructuralError`] if the tree does not follow `grammar`:
/// wrong root, missing required attributes or elements, or elements that
/// are not allowed where they appear.
pub fn build_document(
  grammar: Grammar,
  basename: &str,
  root: &Element,
  renderer: &dyn MarkupRenderer,
) -> Result<OutputDocument, StructuralError> {
  if root.name != grammar.root_name() {
    return Err(StructuralError::UnexpectedRoot {
      expected: grammar.root_name(),
      found:    root.name.clone(),
    });
  }

  let title = match (grammar, root.attr("title")) {
    (_, Some(title)) => title.to_string(),
    (Grammar::Chapter, None) => {
      return Err(StructuralError::missing_attribute("chapter", "title"));
    },
    (_, None) => basename.to_string(),
  };

  let mut walker = Walker {
    grammar,
    renderer,
    owner: DocumentRef {
      basename: basename.to_string(),
      title:    title.clone(),
    },
    entries: IndexEntries::default(),
  };
  let mut nesting = Nesting::new(basename);
  let mut out = HtmlBuilder::new();

  let short = walker.root(&mut nesting, &mut out, root)?;

  debug!(
    "Walked {basename}: {} actions, {} setups, {} options",
    walker.entries.actions.len(),
    walker.entries.setups.len(),
    walker.entries.options.len()
  );

  Ok(OutputDocument {
    basename: basename.to_string(),
    title,
    order: root.attr("order").map(str::to_string),
    kind: grammar.document_kind(),
    short,
    content: out.finish(),
    toc: nesting.into_toc(),
    entries: walker.entries,
    sub_pages: Vec::new(),
  })
}

/// Trimmed text of the first `short` child, if any.
fn short_text(parent: &Element) -> Option<String> {
  let text = parent.first_child_named("short")?.text_content();
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_string())
}

/// Render a code-like element as a normalized `<pre><code>` block.
fn code_block(out: &mut HtmlBuilder, element: &Element) {
  out
    .open("pre", &[])
    .open("code", &[])
    .text(&normalize_code(&element.code_text()))
    .close("code")
    .close("pre");
}

/// Non-blank character data becomes a paragraph of its own.
fn paragraph(out: &mut HtmlBuilder, text: &str) {
  let text = text.trim();
  if !text.is_empty() {
    out.element("p", &[], text);
  }
}

struct Walker<'a> {
  grammar:  Grammar,
  renderer: &'a dyn MarkupRenderer,
  owner:    DocumentRef,
  entries:  IndexEntries,
}

impl Walker<'_> {
  fn root(
    &mut self,
    cx: &mut Nesting,
    out: &mut HtmlBuilder,
    root: &Element,
  ) -> Result<Option<String>, StructuralError> {
    let short = match self.grammar {
      Grammar::Module | Grammar::AngelModule => short_text(root),
      Grammar::Chapter => None,
    };
    let intro = self.grammar != Grammar::Chapter
      && self.owner.basename != CORE_CONFIG_ANGEL;

    let title = self.owner.title.clone();
    cx.anchored_section(
      out,
      &title,
      "",
      Some(self.grammar.root_name()),
      |cx, out| {
        if intro {
          out
            .open("p", &[])
            .text(&self.owner.basename)
            .text(" ")
            .text(short.as_deref().unwrap_or_default())
            .close("p");
        }
        self.description(out, root)?;

        for child in root.element_children() {
          let kind = ElementKind::from_name(&child.name);
          match kind {
            Some(kind) if self.grammar.allows_at_root(kind) => {
              self.dispatch(cx, out, kind, child)?;
            },
            Some(kind) if self.grammar.root_metadata().contains(&kind) => {},
            _ => {
              return Err(StructuralError::invalid_element(
                self.grammar.root_context(),
                &child.name,
              ));
            },
          }
        }
        Ok(())
      },
    )?;

    Ok(short)
  }

  fn dispatch(
    &mut self,
    cx: &mut Nesting,
    out: &mut HtmlBuilder,
    kind: ElementKind,
    element: &Element,
  ) -> Result<(), StructuralError> {
    match kind {
      ElementKind::Action
      | ElementKind::Setup
      | ElementKind::Option
      | ElementKind::Item => self.item(cx, out, kind, element),
      ElementKind::Example => self.example(cx, out, element),
      ElementKind::Section => self.section(cx, out, element),
      ElementKind::Html => {
        out.raw(&element.inner_markup());
        Ok(())
      },
      ElementKind::Textile => {
        self.textile(out, element);
        Ok(())
      },
      ElementKind::Short | ElementKind::Description => Ok(()),
    }
  }

  fn textile(&self, out: &mut HtmlBuilder, element: &Element) {
    let source = normalize_code(&element.code_text());
    out.raw(&self.renderer.render(&source));
  }

  /// Render the first `description` child of `parent`, if there is one.
  fn description(
    &self,
    out: &mut HtmlBuilder,
    parent: &Element,
  ) -> Result<(), StructuralError> {
    let Some(description) = parent.first_child_named("description") else {
      return Ok(());
    };

    for child in &description.children {
      match child {
        Node::Text(text) => paragraph(out, text),
        Node::CData(_) => {
          return Err(StructuralError::invalid_element(
            "description",
            "#cdata-section",
          ));
        },
        Node::Element(element) => {
          match ElementKind::from_name(&element.name) {
            Some(ElementKind::Html) => {
              out.raw(&element.inner_markup());
            },
            Some(ElementKind::Textile) => self.textile(out, element),
            _ => {
              return Err(StructuralError::invalid_element(
                "description",
                &element.name,
              ));
            },
          }
        },
      }
    }
    Ok(())
  }

  fn section(
    &mut self,
    cx: &mut Nesting,
    out: &mut HtmlBuilder,
    element: &Element,
  ) -> Result<(), StructuralError> {
    let title = element
      .attr("title")
      .ok_or_else(|| StructuralError::missing_attribute("section", "title"))?;
    let request = element
      .attr("anchor")
      .map_or(AnchorRequest::Auto, AnchorRequest::Explicit);

    cx.section(out, title, request, Some("section"), |cx, out| {
      for child in &element.children {
        match child {
          Node::Text(text) => paragraph(out, text),
          Node::CData(_) => {
            return Err(StructuralError::invalid_element(
              "section",
              "#cdata-section",
            ));
          },
          Node::Element(child) => {
            match ElementKind::from_name(&child.name) {
              Some(kind) if self.grammar.allows_in_section(kind) => {
                self.dispatch(cx, out, kind, child)?;
              },
              _ => {
                return Err(StructuralError::invalid_element(
                  "section",
                  &child.name,
                ));
              },
            }
          },
        }
      }
      Ok(())
    })?;
    Ok(())
  }

  fn example(
    &mut self,
    cx: &mut Nesting,
    out: &mut HtmlBuilder,
    element: &Element,
  ) -> Result<(), StructuralError> {
    let title = element.attr("title").unwrap_or("Example");
    let request = element
      .attr("anchor")
      .map_or(AnchorRequest::None, AnchorRequest::Explicit);

    cx.section(out, title, request, Some("example"), |_, out| {
      self.description(out, element)?;
      let config = element.first_child_named("config").ok_or_else(|| {
        StructuralError::MissingElement {
          element: "example".to_string(),
          child:   "config",
        }
      })?;
      code_block(out, config);
      Ok(())
    })?;
    Ok(())
  }
}
