use super::{HighlightToken, tokenize};

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap every token in a `<span class="syntax-<kind>">` with escaped text.
pub fn to_markup(tokens: &[HighlightToken<'_>]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "<span class=\"syntax-{}\">{}</span>",
                token.kind.as_str(),
                escape_html(token.text)
            )
        })
        .collect()
}

/// Tokenize and render markup in one step.
pub fn highlight(source: &str) -> String {
    to_markup(&tokenize(source))
}
