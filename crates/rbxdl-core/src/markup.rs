//! Markup scraping: the `<Content>` URL in asset XML and display-name guesses.
//!
//! Third-party markup changes without notice. Only the `<Content>` lookup is
//! load-bearing; name guesses are optional and callers must tolerate `None`.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no <Content> element in asset data")]
    MissingContentElement,
    #[error("<Content> element has no URL")]
    EmptyContentUrl,
}

fn content_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<Content(?:\s[^>]*)?>(.*?)</Content\s*>").expect("static content pattern")
    })
}

fn tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static tag pattern"))
}

/// Text content of the first `<Content>` element: the sound's download URL.
pub fn parse_content_url(xml: &str) -> Result<String, ParseError> {
    let caps = content_pattern()
        .captures(xml)
        .ok_or(ParseError::MissingContentElement)?;
    let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let text = text_content(inner);
    if text.is_empty() {
        return Err(ParseError::EmptyContentUrl);
    }
    Ok(text)
}

/// Strips tags, resolves the basic entities and trims; roughly DOM `textContent`.
fn text_content(fragment: &str) -> String {
    let unwrapped = strip_cdata(fragment);
    let stripped = tag_pattern().replace_all(&unwrapped, "");
    unescape_entities(stripped.trim())
}

fn strip_cdata(s: &str) -> String {
    s.replace("<![CDATA[", "").replace("]]>", "")
}

fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Best-effort display name from a page's markup.
pub trait NameGuesser {
    fn guess(&self, markup: &str) -> Option<String>;
}

/// Looks for `h2.item-name`, then an `h1` inside `.item-name-container`.
/// The selectors are guesses about the catalog page layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupNameGuesser;

fn item_name_h2() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<h2\b[^>]*\bclass\s*=\s*["'][^"']*\bitem-name\b[^"']*["'][^>]*>(.*?)</h2\s*>"#)
            .expect("static h2 pattern")
    })
}

fn item_name_container_h1() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<[a-z0-9]+\b[^>]*\bclass\s*=\s*["'][^"']*\bitem-name-container\b[^"']*["'][^>]*>.*?<h1\b[^>]*>(.*?)</h1\s*>"#,
        )
        .expect("static h1 pattern")
    })
}

impl NameGuesser for MarkupNameGuesser {
    fn guess(&self, markup: &str) -> Option<String> {
        [item_name_h2(), item_name_container_h1()]
            .into_iter()
            .filter_map(|re| re.captures(markup))
            .filter_map(|caps| caps.get(1).map(|m| text_content(m.as_str())))
            .find(|name| !name.is_empty())
    }
}
