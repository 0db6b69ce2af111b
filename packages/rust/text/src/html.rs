//! HTML → plain text passes.
//!
//! Each pass is a function `&str -> String` applied in sequence. The
//! transform is purely textual: malformed markup degrades the output, it
//! never errors.

use std::sync::LazyLock;

use regex::Regex;

/// Strip markup from an HTML document and return whitespace-collapsed text.
pub fn strip_html(html: &str) -> String {
    let mut result = drop_executable_blocks(html);

    result = replace_tags(&result);
    result = decode_entities(&result);
    result = collapse_whitespace(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Drop <script> and <style> blocks with their content
// ---------------------------------------------------------------------------

/// Must run before tag replacement, otherwise script bodies survive as text.
fn drop_executable_blocks(html: &str) -> String {
    static SCRIPT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("valid regex"));
    static STYLE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("valid regex"));

    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    STYLE_RE.replace_all(&without_scripts, " ").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Replace remaining tags with a space
// ---------------------------------------------------------------------------

fn replace_tags(html: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

    TAG_RE.replace_all(html, " ").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Decode the four common entities
// ---------------------------------------------------------------------------

/// Only `&nbsp;`, `&amp;`, `&lt;` and `&gt;` are decoded; anything else is
/// left verbatim.
fn decode_entities(text: &str) -> String {
    static NBSP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)&nbsp;").expect("valid regex"));
    static AMP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)&amp;").expect("valid regex"));
    static LT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&lt;").expect("valid regex"));
    static GT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)&gt;").expect("valid regex"));

    let result = NBSP_RE.replace_all(text, " ");
    let result = AMP_RE.replace_all(&result, "&");
    let result = LT_RE.replace_all(&result, "<");
    GT_RE.replace_all(&result, ">").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: Collapse whitespace
// ---------------------------------------------------------------------------

fn collapse_whitespace(text: &str) -> String {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    WS_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_removed_and_tags_become_spaces() {
        let html = "<script>x</script><p>Hello <b>World</b></p>";
        assert_eq!(strip_html(html), "Hello World");
    }

    #[test]
    fn script_and_style_are_case_insensitive_and_multiline() {
        let html = "<STYLE type=\"text/css\">\nbody { color: red; }\n</Style>\
                    <p>Visible</p>\
                    <Script src=\"a.js\">\nvar tracking = 1;\n</SCRIPT>";
        assert_eq!(strip_html(html), "Visible");
    }

    #[test]
    fn multiple_script_blocks_are_non_greedy() {
        let html = "<script>a</script><p>Keep me</p><script>b</script>";
        assert_eq!(strip_html(html), "Keep me");
    }

    #[test]
    fn adjacent_tags_do_not_glue_words() {
        assert_eq!(strip_html("<li>One</li><li>Two</li>"), "One Two");
    }

    #[test]
    fn decodes_only_the_four_entities() {
        let html = "<p>Fast&nbsp;&amp;&nbsp;simple &lt;3 &GT; &copy; &#8217;</p>";
        assert_eq!(strip_html(html), "Fast & simple <3 > &copy; &#8217;");
    }

    #[test]
    fn whitespace_runs_collapse_and_trim() {
        let html = "\n\n   <div>\n\tAlpha \r\n\n  Beta   </div>  ";
        assert_eq!(strip_html(html), "Alpha Beta");
    }

    #[test]
    fn unclosed_markup_never_panics() {
        assert_eq!(strip_html("<p>Broken <b"), "Broken <b");
        assert_eq!(strip_html("<script>never closed"), "never closed");
        assert_eq!(strip_html(""), "");
    }
}
