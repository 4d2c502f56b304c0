//! Main module for nyan-plate functionality
//!
//!     Rendering and extraction are mirror images of each other and share two things: the
//!     directive table ([grammar]) and the markup tokenizer ([lexing]). Everything else is
//!     specific to one direction:
//!
//!         render  = [rendering] (loops first, then substitution, then done markers)
//!         extract = [parsing] (markup to tree) then [extraction] (tree to context)
//!
//!     Neither direction has a failure mode. Missing bindings, mis-shaped loop values and
//!     unbalanced markup all degrade to a best-effort result, so templates can be previewed
//!     while they are still being written.

pub mod context;
pub mod extraction;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod rendering;
pub mod testing;
