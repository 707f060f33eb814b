//! Approximate TypeScript lexer for colorized display of generated code.
//!
//! Tokenization is lossless: concatenating the text of every token gives
//! back the input exactly. Anything the lexer does not recognize becomes a
//! `Text` token.

mod markup;

pub use markup::{escape_html, highlight, to_markup};

use logos::Logos;
use serde::Serialize;

/// Display category of a highlighted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Type,
    String,
    Comment,
    Punctuation,
    Identifier,
    Text,
}

impl TokenKind {
    /// Name used in the markup class (`syntax-<name>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Identifier => "identifier",
            TokenKind::Text => "text",
        }
    }
}

/// A slice of the source with its display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightToken<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

/// Raw lexemes. Literal tokens outrank the identifier pattern, so keywords
/// and type names only match as whole words.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"//[^\r\n]*")]
    Comment,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    #[token("interface")]
    #[token("type")]
    #[token("export")]
    #[token("import")]
    #[token("const")]
    #[token("let")]
    #[token("var")]
    #[token("function")]
    #[token("class")]
    #[token("extends")]
    #[token("implements")]
    #[token("public")]
    #[token("private")]
    #[token("protected")]
    #[token("readonly")]
    #[token("static")]
    #[token("abstract")]
    #[token("async")]
    #[token("await")]
    Keyword,

    #[token("string")]
    #[token("number")]
    #[token("boolean")]
    #[token("object")]
    #[token("any")]
    #[token("unknown")]
    #[token("void")]
    #[token("null")]
    #[token("undefined")]
    #[token("never")]
    #[token("Record")]
    #[token("Array")]
    #[token("Promise")]
    TypeName,

    #[regex(r"[{}();:,\[\]<>|&?!+=\-*/.]")]
    Punctuation,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,

    #[regex(r"\s+")]
    Whitespace,
}

impl Lexeme {
    fn kind(self) -> TokenKind {
        match self {
            Lexeme::Comment => TokenKind::Comment,
            Lexeme::Str => TokenKind::String,
            Lexeme::Keyword => TokenKind::Keyword,
            Lexeme::TypeName => TokenKind::Type,
            Lexeme::Punctuation => TokenKind::Punctuation,
            Lexeme::Identifier => TokenKind::Identifier,
            Lexeme::Whitespace => TokenKind::Text,
        }
    }
}

/// Split source text into highlight tokens.
///
/// Lexing restarts after every token. A position no pattern matches, such as
/// an unterminated quote, yields a single character of `Text`.
pub fn tokenize(source: &str) -> Vec<HighlightToken<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(first) = source[pos..].chars().next() {
        let rest = &source[pos..];
        let mut lexer = Lexeme::lexer(rest);
        let (kind, len) = match lexer.next() {
            Some(Ok(Lexeme::Identifier)) => match keyword_prefix(lexer.slice()) {
                Some((lexeme, end)) => (lexeme.kind(), end),
                None => (TokenKind::Identifier, lexer.span().end),
            },
            Some(Ok(lexeme)) => (lexeme.kind(), lexer.span().end),
            Some(Err(())) | None => (TokenKind::Text, first.len_utf8()),
        };
        tokens.push(HighlightToken {
            kind,
            text: &rest[..len],
        });
        pos += len;
    }
    tokens
}

/// A keyword or type name that ends where an identifier continues with `$`.
///
/// `$` is not a word character, so `type$x` reads as `type` then `$x`.
fn keyword_prefix(word: &str) -> Option<(Lexeme, usize)> {
    let end = word.find('$').filter(|&end| end > 0)?;
    let mut lexer = Lexeme::lexer(&word[..end]);
    match lexer.next() {
        Some(Ok(lexeme @ (Lexeme::Keyword | Lexeme::TypeName))) if lexer.span().end == end => {
            Some((lexeme, end))
        }
        _ => None,
    }
}
