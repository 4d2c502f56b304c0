//! Token definitions for template markup
//!
//! The markup is cut into tags, comments and text runs by a logos lexer. Tags are kept as
//! single tokens; their attributes are scanned afterwards by [super::tag].
use logos::{Lexer, Logos};

/// Everything a markup stream can contain
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MarkupToken {
    // `<!-- ... -->`, swallowing the rest of the input if never closed
    #[token("<!--", comment_body)]
    Comment,

    // `<!DOCTYPE html>`, `<?xml ...?>`
    #[regex(r"<![A-Za-z][^>]*>")]
    #[regex(r"<\?[^>]*>")]
    Declaration,

    #[regex(r"</[^>]*>")]
    CloseTag,

    #[regex(r"<[A-Za-z][^>]*>")]
    OpenTag,

    // A `<` that starts nothing, kept as literal text
    #[token("<")]
    StrayAngle,

    #[regex(r"[^<]+")]
    Text,
}

fn comment_body(lex: &mut Lexer<MarkupToken>) -> bool {
    let remainder = lex.remainder();
    match remainder.find("-->") {
        Some(end) => lex.bump(end + 3),
        None => lex.bump(remainder.len()),
    }
    true
}

impl MarkupToken {
    pub fn name(&self) -> &'static str {
        match self {
            MarkupToken::Comment => "Comment",
            MarkupToken::Declaration => "Declaration",
            MarkupToken::CloseTag => "CloseTag",
            MarkupToken::OpenTag => "OpenTag",
            MarkupToken::StrayAngle => "StrayAngle",
            MarkupToken::Text => "Text",
        }
    }
}
