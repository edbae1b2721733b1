//! Salient-term extraction for lexical overlap scoring

use std::collections::BTreeSet;

/// Common English function words excluded from overlap computation
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "his", "if", "in", "into", "is", "it", "its", "may", "not", "of", "on", "or",
    "she", "shall", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "to", "was", "were", "which", "while", "with", "would",
];

/// Suffixes stripped by the light stemmer, longest first
const SUFFIXES: &[&str] = &["ment", "ions", "ures", "ing", "ure", "ion", "ed", "es", "e", "s"];

/// Extract the set of salient, lightly stemmed terms from text.
///
/// Lowercases, strips non-alphanumeric characters, drops stopwords and very
/// short tokens, and trims one common suffix so that "disclose" and
/// "disclosure" land on the same term.
pub fn salient_terms(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter_map(|token| {
            let word: String = token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.len() < 3 || STOPWORDS.contains(&word.as_str()) {
                return None;
            }
            Some(stem(&word))
        })
        .collect()
}

/// Normalized shared salient-term count between two texts, in [0.0, 1.0].
pub fn term_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let denom = a.len().min(b.len());
    (shared as f64 / denom as f64).clamp(0.0, 1.0)
}

fn stem(word: &str) -> String {
    for suffix in SUFFIXES {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.len() >= 3 {
                return stripped.to_string();
            }
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_filtered() {
        let terms = salient_terms("the engineer and the client");
        assert!(terms.contains("engineer"));
        assert!(terms.contains("client"));
        assert!(!terms.contains("the"));
        assert!(!terms.contains("and"));
    }

    #[test]
    fn test_stemming_unifies_variants() {
        assert_eq!(stem("disclose"), "disclos");
        assert_eq!(stem("disclosure"), "disclos");
        assert_eq!(stem("risks"), "risk");
        assert_eq!(stem("requires"), "requir");
    }

    #[test]
    fn test_overlap_rules_section_vs_obligation_label() {
        let section = salient_terms("The Code requires disclosure of known safety risks.");
        let label = salient_terms("Disclose Known Risks");

        // "disclos", "known", "risk" all shared
        let overlap = term_overlap(&section, &label);
        assert!(overlap > 0.9, "overlap {} should be near 1", overlap);
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = salient_terms("structural integrity report");
        let b = salient_terms("confidential client billing");
        assert_eq!(term_overlap(&a, &b), 0.0);
    }

    #[test]
    fn test_overlap_empty_is_zero() {
        let a = salient_terms("");
        let b = salient_terms("engineer");
        assert_eq!(term_overlap(&a, &b), 0.0);
    }

    #[test]
    fn test_overlap_symmetric() {
        let a = salient_terms("disclose known safety risks");
        let b = salient_terms("safety risks matter");
        assert_eq!(term_overlap(&a, &b), term_overlap(&b, &a));
    }

    #[test]
    fn test_punctuation_stripped() {
        let terms = salient_terms("risks, risks; risks!");
        assert_eq!(terms.len(), 1);
        assert!(terms.contains("risk"));
    }
}
