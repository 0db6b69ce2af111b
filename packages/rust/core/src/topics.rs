//! "What they do" bullets: early sentences that read like product framing.

use scout_shared::EnrichmentConfig;

/// Vocabulary that marks a sentence as describing the business.
/// Matched as lowercase substrings, so `"we "` and `"our "` keep their
/// trailing space.
const FOCUS_WORDS: [&str; 10] = [
    "platform", "solution", "product", "helps", "we ", "our ", "enables", "build", "ai", "saas",
];

/// Pick up to `what_they_do_limit` distinct sentences from the first
/// `focus_window`, ranked by focus-word hits then by length.
///
/// The cutoff is positional: zero-scoring sentences still appear when there
/// are not enough others.
pub fn build_what_they_do(sentences: &[String], config: &EnrichmentConfig) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = sentences
        .iter()
        .take(config.focus_window)
        .map(|s| (s.as_str(), focus_score(s)))
        .collect();

    // Stable: equal score and length keep document order.
    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .cmp(a_score)
            .then_with(|| b.chars().count().cmp(&a.chars().count()))
    });

    let mut picked: Vec<String> = Vec::new();
    for (sentence, _) in scored.into_iter().take(config.what_they_do_limit) {
        let trimmed = sentence.trim();
        if !trimmed.is_empty() && !picked.iter().any(|p| p == trimmed) {
            picked.push(trimmed.to_string());
        }
    }

    picked
}

/// Number of distinct focus words present in the sentence.
fn focus_score(sentence: &str) -> usize {
    let lower = sentence.to_lowercase();
    FOCUS_WORDS.iter().filter(|w| lower.contains(*w)).count()
}
