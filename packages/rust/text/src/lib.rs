//! Plain-text normalization for fetched pages.
//!
//! Two stages, both infallible:
//! - [`strip_html`]: markup → whitespace-collapsed text, scripts and styles removed
//! - [`split_sentences`]: text → ordered sentences
//!
//! Deliberately regex-based rather than a DOM parse; signal cues downstream
//! match against raw markup and assume the same lightweight treatment.

mod html;
mod sentences;

pub use html::strip_html;
pub use sentences::split_sentences;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_to_sentences() {
        let html = r#"<html><head><title>Acme</title>
            <script>window.dataLayer = [];</script></head>
            <body><h1>Acme Robotics.</h1><p>We build warehouse robots! Want a demo?</p></body></html>"#;

        let text = strip_html(html);
        assert_eq!(
            text,
            "Acme Acme Robotics. We build warehouse robots! Want a demo?"
        );
        assert_eq!(
            split_sentences(&text),
            vec!["Acme Acme Robotics.", "We build warehouse robots!", "Want a demo?"]
        );
    }
}
