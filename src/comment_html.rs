use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    static ref PARAGRAPH: Regex = Regex::new(r"(?i)<p\s*/?>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a[href]").unwrap();
}

/// Plain-text rendering of an HN comment body.
pub fn to_plain_text(html: &str) -> String {
    let text = PARAGRAPH.replace_all(html, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    html_escape::decode_html_entities(text.trim()).to_string()
}

/// Hyperlink targets inside a comment body, in document order, without repeats.
pub fn links(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut found: Vec<String> = Vec::new();
    for anchor in fragment.select(&ANCHOR) {
        if let Some(href) = anchor.value().attr("href") {
            if (href.starts_with("http://") || href.starts_with("https://"))
                && !found.iter().any(|h| h == href)
            {
                found.push(href.to_string());
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_blank_lines() {
        let body = "First &amp; foremost<p>Second line with <i>style</i><p>Third";
        assert_eq!(
            to_plain_text(body),
            "First & foremost\n\nSecond line with style\n\nThird"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(to_plain_text("it&#x27;s &quot;fine&quot;"), "it's \"fine\"");
    }

    #[test]
    fn extracts_absolute_links_once() {
        let body = r#"See <a href="https://rust-lang.org" rel="nofollow">this</a> and
            <a href="https://rust-lang.org">again</a>, also <a href="item?id=1">rel</a>
            <a href="http://example.com/a?b=1&amp;c=2">x</a>"#;
        assert_eq!(
            links(body),
            vec!["https://rust-lang.org", "http://example.com/a?b=1&c=2"]
        );
    }
}
