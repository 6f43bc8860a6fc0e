//! Plain-text extraction from the trusted markup fields.
//!
//! `description`, `code` and `icon` arrive as HTML fragments. The search index
//! and navigation want what a browser would report as `textContent` (tags
//! dropped, entities decoded). Code blocks use [`inner_text`], which also turns
//! `<br>` into a line break the way `innerText` does for a `<pre>`.

/// Text content of an HTML fragment: tags removed, entities decoded.
pub fn text_content(html: &str) -> String {
    extract(html, false)
}

/// Like [`text_content`], but `<br>` becomes `\n`.
pub fn inner_text(html: &str) -> String {
    extract(html, true)
}

fn extract(html: &str, breaks: bool) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('<') {
        text.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if !opens_tag(rest) {
            text.push('<');
            rest = &rest[1..];
            continue;
        }
        // Drop comments whole; they may contain '>'.
        if let Some(body) = rest.strip_prefix("<!--") {
            rest = match body.find("-->") {
                Some(end) => &body[end + 3..],
                None => "",
            };
            continue;
        }
        match tag_end(rest) {
            Some(end) => {
                if breaks && is_br(&rest[1..end]) {
                    text.push('\n');
                }
                rest = &rest[end + 1..];
            }
            // An unterminated '<' is literal text.
            None => {
                text.push_str(rest);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    // Entities are decoded after tags are gone, so `&lt;` never opens one.
    html_escape::decode_html_entities(&text).into_owned()
}

/// `<` only starts markup when followed by a tag name, `/` or `!`.
fn opens_tag(s: &str) -> bool {
    s[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// Byte offset of the `>` closing the tag at the start of `s`, skipping
/// quoted attribute values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, b) in s.bytes().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }
    None
}

fn is_br(tag: &str) -> bool {
    let name = tag
        .trim_end_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or("");
    name.eq_ignore_ascii_case("br")
}
