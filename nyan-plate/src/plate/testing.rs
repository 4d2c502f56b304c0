//! Testing utilities
//!
//!     Two tools keep tests of the template engine short and honest.
//!
//! Curated Samples
//!
//!     Hand-written template strings drift: one test renders a slightly different markup
//!     shape than the next, and a change in the directive grammar means hunting through all
//!     of them. Whole-page fixtures live in `nyan-plate/samples/` instead, as numbered
//!     pairs of a template and the context it renders against:
//!
//!         01-greeting.html     01-greeting.json
//!         02-todo-list.html    02-todo-list.json
//!
//!     Every pair is chosen so that its template covers every key of its context, which
//!     makes each sample a round-trip fixture as well. [PlateSamples] loads them by number.
//!
//!     ```rust,ignore
//!     use nyan_plate::plate::testing::PlateSamples;
//!
//!     let sample = PlateSamples::get(2).unwrap();
//!     let markup = sample.render();
//!     ```
//!
//! Context Assertions
//!
//!     Comparing whole contexts with `assert_eq!` works for small cases but gives unreadable
//!     failures for nested ones. [assert_context] walks a context fluently and reports the
//!     path of the first mismatch:
//!
//!     ```rust,ignore
//!     use nyan_plate::plate::testing::assert_context;
//!
//!     assert_context(&extract(&markup))
//!         .text("heading", "Today")
//!         .list_len("todos", 3)
//!         .item("todos", 0, |todo| {
//!             todo.text("label", "Make tea").flag("done", true);
//!         });
//!     ```

pub mod context_assertions;
pub mod samples;

pub use context_assertions::{assert_context, ContextAssertion};
pub use samples::{PlateSamples, Sample, SampleError};

use std::path::PathBuf;

/// Path of a file in the samples directory
pub fn samples_path(name: &str) -> PathBuf {
    PlateSamples::dir().join(name)
}
