//! # nyan-plate
//!
//! Render markup templates annotated with `data-nyan*` directives against a
//! structured context, and extract that context back out of rendered markup.
//!
//! File Layout
//!
//!     src/plate
//!       ├── grammar      The directive table shared by both directions
//!       ├── context      Context / Value data model
//!       ├── lexing       logos markup tokenizer and open-tag scanner
//!       ├── rendering    Loop expansion, substitution, done markers
//!       ├── parsing      Markup to parse tree
//!       ├── extraction   Parse tree to context
//!       ├── formats      Parse tree / token visualizations
//!       ├── loader       Template loading and default template sources
//!       └── testing      Fluent context assertions and curated samples
//!
//! The two entry points are [`render`] and [`extract`]:
//!
//! ```rust,ignore
//! use nyan_plate::{extract, render, Context};
//!
//! let context = Context::new().with("title", "Hello");
//! let markup = render(&context, r#"<h1 data-nyanString="title">x</h1>"#);
//! assert_eq!(markup, r#"<h1 data-nyanDoneString="title">Hello</h1>"#);
//! assert_eq!(extract(&markup), context);
//! ```

pub mod plate;

pub use plate::context::{Context, ContextError, Value};
pub use plate::extraction::{extract, Extractor};
pub use plate::grammar::{Binding, Directive, DirectiveKind, DirectiveTable, DIRECTIVES};
pub use plate::rendering::{render, Renderer};
