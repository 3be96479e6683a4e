//! Rich text from the CMS.
//!
//! Descriptions, blog content and testimonial messages are stored as HTML
//! produced by the dashboard editor. Nothing here trusts that HTML:
//! [`sanitize`] rebuilds it from an allowlist before it reaches the DOM, and
//! [`plain_excerpt`] flattens it to text for table cells.

#[cfg(test)]
#[path = "rich_text_test.rs"]
mod rich_text_test;

/// Elements kept by [`sanitize`]. Everything else is unwrapped.
const ALLOWED: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "ul", "ol", "li", "h1", "h2", "h3", "h4", "blockquote", "a",
    "span",
];

/// Elements removed together with everything inside them.
const DROPPED: &[&str] = &["script", "style", "iframe", "object", "embed", "noscript", "template"];

/// Elements that break a line when flattened to text.
const BLOCKS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "tr", "td",
];

// =============================================================================
// TOKENIZER
// =============================================================================

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
    /// Comments, doctypes and processing instructions.
    Ignored,
}

#[derive(Debug, PartialEq)]
struct Tag<'a> {
    name: String,
    closing: bool,
    attrs: &'a str,
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(html: &'a str) -> Self {
        Self { rest: html }
    }

    fn ignored(&mut self) -> Option<Token<'a>> {
        if let Some(after) = self.rest.strip_prefix("<!--") {
            let end = after.find("-->").map_or(after.len(), |at| at + 3);
            self.rest = &after[end..];
            return Some(Token::Ignored);
        }
        let after = self
            .rest
            .strip_prefix("<!")
            .or_else(|| self.rest.strip_prefix("<?"))?;
        let end = after.find('>').map_or(after.len(), |at| at + 1);
        self.rest = &after[end..];
        Some(Token::Ignored)
    }

    fn tag(&mut self) -> Option<Token<'a>> {
        let body = self.rest.strip_prefix('<')?;
        let (closing, body) = match body.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, body),
        };
        if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let end = tag_end(body)?;
        let inner = &body[..end];
        let name_len = inner
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(inner.len());
        self.rest = &body[end + 1..];
        Some(Token::Tag(Tag {
            name: inner[..name_len].to_ascii_lowercase(),
            closing,
            attrs: inner[name_len..].trim().trim_end_matches('/'),
        }))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.rest.is_empty() {
            return None;
        }
        if let Some(token) = self.ignored().or_else(|| self.tag()) {
            return Some(token);
        }
        // A `<` that does not open a tag is literal text.
        let first = self.rest.chars().next().map_or(0, char::len_utf8);
        let end = self.rest[first..].find('<').map_or(self.rest.len(), |at| at + first);
        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token::Text(text))
    }
}

/// Index of the `>` closing a tag, skipping quoted attribute values.
fn tag_end(body: &str) -> Option<usize> {
    let mut quote = None;
    for (at, c) in body.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(at),
            None => {}
        }
    }
    None
}

fn attributes(raw: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = raw.trim_start();
    while let Some(first) = rest.chars().next() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        if name_end == 0 {
            rest = rest[first.len_utf8()..].trim_start();
            continue;
        }
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();
        let mut value = String::new();
        if let Some(after) = rest.strip_prefix('=') {
            let after = after.trim_start();
            let (raw_value, remaining) = match after.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &after[1..];
                    match inner.find(quote) {
                        Some(at) => (&inner[..at], &inner[at + 1..]),
                        None => (inner, ""),
                    }
                }
                _ => {
                    let end = after.find(char::is_whitespace).unwrap_or(after.len());
                    after.split_at(end)
                }
            };
            value = decode_entities(raw_value);
            rest = remaining.trim_start();
        }
        out.push((name, value));
    }
    out
}

// =============================================================================
// ENTITIES
// =============================================================================

/// Decode the character references the editor emits: the five XML named
/// entities, `&nbsp;` and numeric references (decimal or hex).
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        rest = &rest[at..];
        if let Some((ch, len)) = entity(rest) {
            out.push(ch);
            rest = &rest[len..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

/// `raw` starts with `&`. Returns the character and the bytes consumed.
fn entity(raw: &str) -> Option<(char, usize)> {
    let body = &raw[1..];
    if let Some(number) = body.strip_prefix('#') {
        let (digits, radix, prefix) = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => (hex, 16, 2),
            None => (number, 10, 1),
        };
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let ch = u32::from_str_radix(&digits[..len], radix)
            .ok()
            .and_then(char::from_u32)?;
        let semicolon = usize::from(digits[len..].starts_with(';'));
        return Some((ch, 1 + prefix + len + semicolon));
    }
    let end = body.find(';')?;
    let ch = match &body[..end] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some((ch, end + 2))
}

// =============================================================================
// SANITIZE
// =============================================================================

/// Rebuild `html` keeping only allowlisted elements.
///
/// Disallowed elements are unwrapped (their text survives) except the
/// [`DROPPED`] ones, which vanish with their content. Attributes are
/// stripped; links keep a vetted `href` and gain `rel="noopener noreferrer"`.
/// The output is always balanced.
#[must_use]
pub fn sanitize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut open: Vec<&'static str> = Vec::new();
    let mut skipping: Option<String> = None;

    for token in Tokens::new(html) {
        if let Some(dropped) = &skipping {
            if matches!(&token, Token::Tag(tag) if tag.closing && tag.name == *dropped) {
                skipping = None;
            }
            continue;
        }
        let tag = match token {
            Token::Text(text) => {
                escape_text(text, &mut out);
                continue;
            }
            Token::Ignored => continue,
            Token::Tag(tag) => tag,
        };
        if DROPPED.contains(&tag.name.as_str()) {
            if !tag.closing {
                skipping = Some(tag.name);
            }
            continue;
        }
        let Some(name) = ALLOWED.iter().copied().find(|allowed| *allowed == tag.name) else {
            continue;
        };
        if name == "br" {
            out.push_str("<br>");
        } else if tag.closing {
            if let Some(depth) = open.iter().rposition(|element| *element == name) {
                for element in open.drain(depth..).rev() {
                    close(element, &mut out);
                }
            }
        } else {
            out.push('<');
            out.push_str(name);
            if name == "a" {
                link_attributes(tag.attrs, &mut out);
            }
            out.push('>');
            open.push(name);
        }
    }
    for element in open.into_iter().rev() {
        close(element, &mut out);
    }
    out
}

fn close(element: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(element);
    out.push('>');
}

fn link_attributes(raw: &str, out: &mut String) {
    let href = attributes(raw)
        .into_iter()
        .find(|(name, _)| name == "href")
        .map(|(_, value)| compact_url(&value))
        .filter(|href| safe_href(href));
    if let Some(href) = href {
        out.push_str(" href=\"");
        escape_attr(&href, out);
        out.push('"');
    }
    out.push_str(" rel=\"noopener noreferrer\"");
}

/// Browsers ignore whitespace and control characters inside URLs, so the
/// scheme check runs on the compacted value.
fn compact_url(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect()
}

/// `http`, `https` and `mailto` links, plus anything without a scheme
/// (relative paths, fragments, queries).
fn safe_href(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    match href.find([':', '/', '?', '#']) {
        Some(at) if href[at..].starts_with(':') => {
            matches!(href[..at].to_ascii_lowercase().as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

/// Text keeps existing character references, so `&` passes through.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

// =============================================================================
// EXCERPT
// =============================================================================

/// Plain text of `html`, whitespace collapsed, cut at `max_chars`
/// characters with a trailing ellipsis.
#[must_use]
pub fn plain_excerpt(html: &str, max_chars: usize) -> String {
    let mut text = String::new();
    let mut skipping: Option<String> = None;
    for token in Tokens::new(html) {
        match token {
            Token::Tag(tag) if skipping.is_some() => {
                if tag.closing && skipping.as_deref() == Some(tag.name.as_str()) {
                    skipping = None;
                }
            }
            _ if skipping.is_some() => {}
            Token::Text(chunk) => text.push_str(&decode_entities(chunk)),
            Token::Tag(tag) if DROPPED.contains(&tag.name.as_str()) => {
                if !tag.closing {
                    skipping = Some(tag.name);
                }
            }
            Token::Tag(tag) if BLOCKS.contains(&tag.name.as_str()) => text.push(' '),
            Token::Tag(_) | Token::Ignored => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
