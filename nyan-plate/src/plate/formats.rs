//! Inspection formats
//!
//! Renderings of the intermediate stages of extraction, for debugging templates:
//!
//!     treeviz     the parse tree as an indented text tree
//!     json        the parse tree, or the raw token stream, as JSON

pub mod json;
pub mod treeviz;

pub use json::{to_token_json, to_tree_json};
pub use treeviz::to_treeviz_str;
