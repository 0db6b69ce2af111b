//! Short summary built from the leading sentences of a page.

use scout_shared::EnrichmentConfig;

/// Join the first `summary_sentences` substantial sentences.
///
/// A sentence is substantial when it is longer than `summary_min_chars`
/// characters. If none are, every sentence is a candidate. Empty input
/// yields an empty string.
pub fn build_summary(sentences: &[String], config: &EnrichmentConfig) -> String {
    let substantial: Vec<&str> = sentences
        .iter()
        .filter(|s| s.chars().count() > config.summary_min_chars)
        .map(String::as_str)
        .collect();

    let candidates = if substantial.is_empty() {
        sentences.iter().map(String::as_str).collect()
    } else {
        substantial
    };

    candidates
        .into_iter()
        .take(config.summary_sentences)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_is_empty_summary() {
        assert_eq!(build_summary(&[], &EnrichmentConfig::default()), "");
    }

    #[test]
    fn falls_back_to_short_sentences() {
        let input = sentences(&["short.", "x"]);
        assert_eq!(build_summary(&input, &EnrichmentConfig::default()), "short. x");
    }

    #[test]
    fn prefers_substantial_sentences_in_document_order() {
        let input = sentences(&[
            "Welcome!",
            "Acme builds autonomous forklifts for modern warehouses.",
            "Sign in.",
            "Our fleet software schedules every pallet move in real time.",
            "A third long sentence that should not make it into the summary.",
        ]);
        assert_eq!(
            build_summary(&input, &EnrichmentConfig::default()),
            "Acme builds autonomous forklifts for modern warehouses. \
             Our fleet software schedules every pallet move in real time."
        );
    }

    #[test]
    fn exactly_forty_chars_is_not_substantial() {
        let forty = "a".repeat(40);
        let longer = "b".repeat(41);
        let input = vec![forty, longer.clone()];
        assert_eq!(build_summary(&input, &EnrichmentConfig::default()), longer);
    }

    #[test]
    fn single_substantial_sentence_is_not_padded() {
        let input = sentences(&[
            "Hi.",
            "This is the only sentence that is longer than forty characters.",
        ]);
        assert_eq!(
            build_summary(&input, &EnrichmentConfig::default()),
            "This is the only sentence that is longer than forty characters."
        );
    }
}
