//! Lexer
//!
//!     Markup is tokenized once by a logos lexer into tags, comments, declarations and text
//!     runs (see [tokens]). Both directions work off this token stream: rendering walks it
//!     with a nesting stack to find directive elements and their bodies, the tree parser
//!     folds it into a parse tree.
//!
//!     Tokens carry the byte range of their source text. Rendering copies everything that
//!     is not rewritten straight from the source through these ranges, so they must never be
//!     adjusted after tokenization.
//!
//!     Open tags are single tokens. Their attributes are scanned on demand by [tag], which
//!     also knows which elements are void.

pub mod tag;
pub mod tokens;

pub use tag::{close_tag_name, is_void, open_tag_name, opens_body, Attribute, OpenTag};
pub use tokens::MarkupToken;

use logos::Logos;

/// A token together with its byte range in the source
pub type Spanned = (MarkupToken, logos::Span);

/// Tokenize markup, dropping spans
pub fn tokenize(source: &str) -> Vec<MarkupToken> {
    MarkupToken::lexer(source).filter_map(|result| result.ok()).collect()
}

/// Tokenize markup and keep the byte range of every token
pub fn tokenize_with_spans(source: &str) -> Vec<Spanned> {
    let mut lexer = MarkupToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// Index of the close tag matching the open tag at `open_index`
///
/// Depth is tracked by tag name only, case-insensitively: same-named elements nested
/// inside raise it, self-closing and void ones do not. Returns `None` when the element is
/// never closed.
pub fn find_matching_close(source: &str, tokens: &[Spanned], open_index: usize) -> Option<usize> {
    let (token, span) = tokens.get(open_index)?;
    if *token != MarkupToken::OpenTag {
        return None;
    }
    let name = open_tag_name(&source[span.clone()]);
    let mut depth = 1usize;

    for (index, (token, span)) in tokens.iter().enumerate().skip(open_index + 1) {
        let raw = &source[span.clone()];
        match token {
            MarkupToken::OpenTag
                if open_tag_name(raw).eq_ignore_ascii_case(name) && opens_body(raw) =>
            {
                depth += 1;
            }
            MarkupToken::CloseTag if close_tag_name(raw).eq_ignore_ascii_case(name) => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }

    None
}
