//! Frequency-ranked keyword extraction.

use std::collections::HashMap;

/// Common English function words plus nouns every company site uses.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "you", "your", "are", "our", "their",
    "they", "them", "have", "has", "into", "over", "under", "about", "through", "more", "than",
    "just", "will", "can", "all", "any", "out", "how", "why", "what", "when", "where", "which",
    "who", "company", "platform", "service", "services", "product", "products",
];

/// Top `max` tokens of `text` by descending frequency.
///
/// Text is lowercased and every char other than `a-z`, `0-9`, `-` or
/// whitespace becomes a space. Tokens of two chars or fewer and stopwords are
/// dropped. Equal counts keep first-seen order.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    // First-seen order plus an index into it.
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in cleaned.split_whitespace() {
        if word.len() <= 2 || STOPWORDS.contains(&word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(word, order.len());
                order.push((word, 1));
            }
        }
    }

    // `sort_by` is stable, which is what keeps ties in first-seen order.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    order
        .into_iter()
        .take(max)
        .map(|(word, _)| word.to_string())
        .collect()
}
