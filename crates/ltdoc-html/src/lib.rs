//! Turns parsed lighttpd documentation sources into HTML pages.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`build_document`] walks each source tree with a fresh [`Nesting`]
//!    context and yields an [`OutputDocument`] with its TOC and extracted
//!    [`IndexEntry`]s.
//! 2. [`build_module_index`] aggregates the entries of all modules.
//! 3. [`merge_documents`] concatenates pages into the "all in one" page and
//!    [`build_navigation`] lists them.
//! 4. [`PageRenderer`] wraps every document in the page shell.
//!
//! ```
//! use ltdoc_html::{CommonMarkRenderer, Grammar, build_document};
//!
//! let root = ltdoc_xml::parse_document(
//!   r#"<chapter title="Hello"><section title="World">Hi.</section></chapter>"#,
//! )?;
//! let doc = build_document(
//!   Grammar::Chapter,
//!   "hello",
//!   &root,
//!   &CommonMarkRenderer::default(),
//! )?;
//! assert_eq!(doc.toc[0].children[0].anchor.as_deref(), Some("hello__00-world"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod builder;
pub mod code;
pub mod document;
pub mod error;
pub mod index;
pub mod markup;
pub mod merge;
pub mod navigation;
pub mod nesting;
pub mod template;
pub mod walker;

pub use builder::HtmlBuilder;
pub use code::normalize_code;
pub use document::{
  DocumentKind,
  DocumentRef,
  IndexEntries,
  IndexEntry,
  OutputDocument,
  TocNode,
  sort_documents,
};
pub use error::{RenderError, StructuralError};
pub use index::build_module_index;
pub use markup::{CommonMarkRenderer, MarkupRenderer};
pub use merge::merge_documents;
pub use navigation::build_navigation;
pub use nesting::{AnchorRequest, Nesting, escape_anchor};
pub use template::PageRenderer;
pub use walker::{Grammar, build_document};
