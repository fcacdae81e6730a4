//! Markup reduction: HTML page to plain text for prompting.
//!
//! Regex-based on purpose. Startup landing pages are small and the
//! output only feeds a prompt, so a full HTML parser buys nothing here.

use regex::Regex;

/// Cap on reduced page text, in characters.
///
/// Providers additionally slice the excerpt they put in the prompt to
/// their own limit (see `CompletionProvider::excerpt_limit`).
pub const REDUCED_TEXT_CAP: usize = 15_000;

/// Minimum reduced length worth sending to a provider.
///
/// Below this the page is effectively empty (parked domain, JS-only
/// shell) and extraction would hallucinate.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Reduce an HTML document to plain text.
///
/// Removes `script`/`style`/`noscript` blocks including content,
/// prefers the inner HTML of `<main>` (falling back to `<body>`, then
/// the whole document), strips remaining tags, decodes the common
/// entities, collapses whitespace, and truncates to
/// [`REDUCED_TEXT_CAP`] characters.
pub fn reduce_markup(html: &str) -> String {
    let mut text = html.to_string();

    // Remove non-content blocks with their contents
    for pattern in [
        r"(?is)<script[^>]*>.*?</script>",
        r"(?is)<style[^>]*>.*?</style>",
        r"(?is)<noscript[^>]*>.*?</noscript>",
    ] {
        let re = Regex::new(pattern).unwrap();
        text = re.replace_all(&text, "").to_string();
    }

    // Prefer the marked main content region
    let main_pattern = Regex::new(r"(?is)<main[^>]*>(.*?)</main>").unwrap();
    let body_pattern = Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap();
    if let Some(cap) = main_pattern.captures(&text) {
        text = cap[1].to_string();
    } else if let Some(cap) = body_pattern.captures(&text) {
        text = cap[1].to_string();
    }

    // Strip remaining tags, leaving a space so words don't fuse
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    // Decode HTML entities
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse whitespace
    let ws_pattern = Regex::new(r"\s+").unwrap();
    let text = ws_pattern.replace_all(&text, " ").trim().to_string();

    text.chars().take(REDUCED_TEXT_CAP).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_and_style_content() {
        let html = r#"
            <html><body>
            <script>var secret = "tracking";</script>
            <style>.hero { color: red; }</style>
            <noscript>Enable JavaScript</noscript>
            <p>Visible text.</p>
            </body></html>
        "#;

        let text = reduce_markup(html);
        assert_eq!(text, "Visible text.");
    }

    #[test]
    fn test_prefers_main_over_body() {
        let html = r#"
            <body>
            <nav>Home About Careers</nav>
            <main><h1>Acme</h1><p>We build solar software.</p></main>
            <footer>Copyright</footer>
            </body>
        "#;

        let text = reduce_markup(html);
        assert_eq!(text, "Acme We build solar software.");
    }

    #[test]
    fn test_falls_back_to_body_then_whole_document() {
        let with_body = "<html><head><title>T</title></head><body><p>Body text</p></body></html>";
        assert_eq!(reduce_markup(with_body), "Body text");

        let bare = "<p>Fragment only</p>";
        assert_eq!(reduce_markup(bare), "Fragment only");
    }

    #[test]
    fn test_decodes_entities_and_collapses_whitespace() {
        let html = "<body><p>Ben &amp; Jerry&#39;s&nbsp;&nbsp;ice\n\n\tcream &lt;3</p></body>";
        assert_eq!(reduce_markup(html), "Ben & Jerry's ice cream <3");
    }

    #[test]
    fn test_case_insensitive_tag_matching() {
        let html = "<BODY><SCRIPT>junk()</SCRIPT><P>Kept</P></BODY>";
        assert_eq!(reduce_markup(html), "Kept");
    }

    #[test]
    fn test_truncates_to_cap() {
        let long_para = format!("<body><p>{}</p></body>", "word ".repeat(10_000));
        let text = reduce_markup(&long_para);
        assert_eq!(text.chars().count(), REDUCED_TEXT_CAP);
    }

    #[test]
    fn test_empty_document_reduces_to_empty() {
        assert_eq!(reduce_markup(""), "");
        assert_eq!(reduce_markup("<body><script>only()</script></body>"), "");
    }
}
