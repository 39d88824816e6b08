//! Markdown parsing and HTML rendering for mdsite pages.
//!
//! A page source is split into [`FrontMatter`] and a markdown body, parsed into
//! an owned [`Document`] tree, and rendered by [`MarkdownRenderer`] through a
//! [`RenderBackend`].
//!
//! Besides plain markdown the renderer understands a few raw inline tags:
//! - `<mark category>` / `<mark category=target>`: colored highlight; the
//!   `name` category is indexed as a keyword and `wiki` / `baike` targets
//!   link to an encyclopedia lookup
//! - `<ins type="book_bib" ...>`: bibliography card
//! - `<img ...>`: lazy loading and a default margin
//!
//! # Example
//!
//! ```
//! use mdsite_renderer::{HtmlBackend, MarkdownRenderer, parse_page};
//!
//! let page = parse_page("<!---\nright_pane: toc\n--->\n# Hello\n\n<mark b>hi</mark>").unwrap();
//! let result = MarkdownRenderer::<HtmlBackend>::default()
//!     .render(&page.document)
//!     .unwrap();
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod backend;
mod document;
mod error;
mod frames;
mod frontmatter;
mod heading;
mod html;
mod keywords;
mod links;
mod markup;
mod palette;
mod parse;
mod renderer;
mod state;
mod tag;

pub use backend::RenderBackend;
pub use document::{Document, Node, NodeKind, ParsedPage};
pub use error::{Error, Result};
pub use frontmatter::{CLOSE_DELIMITER, FrontMatter, NavLink, OPEN_DELIMITER, split_front_matter};
pub use heading::{Heading, HeadingTracker};
pub use html::HtmlBackend;
pub use keywords::{Keyword, KeywordIndex, KeywordKind, anchor_id};
pub use links::{
    LookupTarget, is_external, is_internal, normalize_rel_path, reroot, split_target, with_suffix,
};
pub use markup::{DEFAULT_IMAGE_MARGIN, bibliography, encode_style, highlight, parse_style};
pub use palette::{DEFAULT_PALETTE, Palette};
pub use parse::{parse_document, parse_page};
pub use renderer::{MarkdownRenderer, RenderOptions, RenderResult};
pub use state::{escape_html, slugify};
pub use tag::{HtmlTag, closing_tag_name, is_markup_declaration};
