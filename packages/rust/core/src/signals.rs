//! Business signal inference from raw markup and page copy.
//!
//! Each signal is a set of literal cues; the signal is present when any cue
//! appears as a case-insensitive substring. Markup cues are matched against
//! the raw HTML (so link targets count), copy cues against the stripped text.

use scout_shared::{SignalRecord, SignalType};

/// Cues for one signal, split by what they are matched against.
struct CueSet {
    signal: SignalType,
    markup: &'static [&'static str],
    copy: &'static [&'static str],
}

const CUE_SETS: [CueSet; 5] = [
    CueSet {
        signal: SignalType::CareersPage,
        markup: &["href=\"/careers\"", "href='/careers'", "careers"],
        copy: &["we are hiring", "join our team"],
    },
    CueSet {
        signal: SignalType::BlogOrNews,
        markup: &["href=\"/blog\"", "href='/blog'"],
        copy: &["blog", "news"],
    },
    CueSet {
        signal: SignalType::DocsOrDeveloperPortal,
        markup: &["href=\"/docs\"", "href='/docs'"],
        copy: &["documentation", "api reference", "developer docs"],
    },
    CueSet {
        signal: SignalType::PricingPage,
        markup: &["href=\"/pricing\"", "href='/pricing'"],
        copy: &["pricing", "plans"],
    },
    CueSet {
        signal: SignalType::ProductOrPlatform,
        markup: &[],
        copy: &["platform", "product", "solution"],
    },
];

impl CueSet {
    fn matches(&self, lower_html: &str, lower_text: &str) -> bool {
        self.markup.iter().any(|cue| lower_html.contains(cue))
            || self.copy.iter().any(|cue| lower_text.contains(cue))
    }
}

/// Evaluate every signal against the page.
///
/// Returns only the present signals, in fixed order. When none are present
/// the first `min_records` records are returned as `present: false`
/// placeholders so callers always get some structure to display.
pub fn infer_signals(html: &str, text: &str, min_records: usize) -> Vec<SignalRecord> {
    let lower_html = html.to_lowercase();
    let lower_text = text.to_lowercase();

    let all: Vec<SignalRecord> = CUE_SETS
        .iter()
        .map(|set| SignalRecord::new(set.signal, set.matches(&lower_html, &lower_text)))
        .collect();

    if all.iter().any(|record| record.present) {
        all.into_iter().filter(|record| record.present).collect()
    } else {
        all.into_iter().take(min_records).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(records: &[SignalRecord]) -> Vec<SignalType> {
        records.iter().map(|r| r.signal_type).collect()
    }

    #[test]
    fn cue_sets_cover_every_signal_in_order() {
        let order: Vec<SignalType> = CUE_SETS.iter().map(|s| s.signal).collect();
        assert_eq!(order, SignalType::ALL.to_vec());
    }

    #[test]
    fn pricing_link_alone() {
        let html = r#"<nav><a href="/pricing">See it</a></nav>"#;
        let records = infer_signals(html, "See it", 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].signal_type, SignalType::PricingPage);
        assert!(records[0].present);
        assert_eq!(
            records[0].evidence.as_deref(),
            Some("Found pricing/plan links or copy")
        );
    }

    #[test]
    fn single_quoted_and_uppercase_links_match() {
        let html = "<A HREF='/DOCS'>Reference</A>";
        let records = infer_signals(html, "Reference", 2);
        assert_eq!(types(&records), vec![SignalType::DocsOrDeveloperPortal]);
    }

    #[test]
    fn nothing_present_returns_two_placeholders() {
        let records = infer_signals("<p>Hello world</p>", "Hello world", 2);
        assert_eq!(
            types(&records),
            vec![SignalType::CareersPage, SignalType::BlogOrNews]
        );
        assert!(records.iter().all(|r| !r.present && r.evidence.is_none()));
    }

    #[test]
    fn placeholder_count_is_configurable() {
        let records = infer_signals("", "", 5);
        assert_eq!(records.len(), 5);
        assert!(infer_signals("", "", 0).is_empty());
    }

    #[test]
    fn copy_cues_match_text() {
        let text = "We Are Hiring! Read our Blog. Developer Docs. Simple plans. An AI Solution.";
        let records = infer_signals("", text, 2);
        assert_eq!(types(&records), SignalType::ALL.to_vec());
        assert!(records.iter().all(|r| r.present && r.evidence.is_some()));
    }

    #[test]
    fn careers_matches_anywhere_in_markup() {
        let html = r#"<a href="https://jobs.example.com/careers/open">Jobs</a>"#;
        let records = infer_signals(html, "Jobs", 2);
        assert_eq!(types(&records), vec![SignalType::CareersPage]);
    }

    #[test]
    fn copy_only_cues_ignore_markup() {
        // "news" inside an attribute is not visible copy.
        let html = r#"<meta name="newsletter-id" content="x"><p>Hi</p>"#;
        let records = infer_signals(html, "Hi", 2);
        assert!(records.iter().all(|r| !r.present));
    }
}
