//! Lexical cue tables for FIRAC classification
//!
//! Each section type carries an ordered list of lowercase cue fragments
//! matched as substrings (so "disclos" hits both "disclose" and
//! "disclosure"). Facts additionally count past-tense verb forms, since fact
//! recitations are dominated by narrative past tense rather than a stable
//! vocabulary.

use ethos_domain::SectionType;

/// Classification priority when cue densities tie. Rule citations and
/// interrogative framing are stronger signals than narrative prose, so the
/// more distinctive types come first.
pub(crate) const TYPE_PRIORITY: [SectionType; 5] = [
    SectionType::Rules,
    SectionType::Issues,
    SectionType::Conclusion,
    SectionType::Facts,
    SectionType::Analysis,
];

const FACTS_CUES: &[&str] = &[
    "engineer",
    "employer",
    "client",
    "contractor",
    "firm",
    "project",
    "design",
    "contract",
    "report",
    "knowing",
    "knew",
    "aware",
    "flaw",
    "defect",
    "was ",
    "were ",
    "had ",
];

const ISSUES_CUES: &[&str] = &[
    "whether",
    "question",
    "issue",
    "is it ethical",
    "was it ethical",
    "ethical for",
    "ethically",
    "?",
];

const RULES_CUES: &[&str] = &[
    "code",
    "canon",
    "requires",
    "require that",
    "shall",
    "must",
    "standard",
    "regulation",
    "statute",
    "section",
    "pursuant",
    "obligat",
    "duty",
    "prohibit",
    "disclos",
    "safety",
    "\u{00a7}",
];

const ANALYSIS_CUES: &[&str] = &[
    "because",
    "therefore",
    "however",
    "although",
    "consider",
    "weigh",
    "balanc",
    "applying",
    "on the other hand",
    "on one hand",
    "suggests",
    "implies",
    "whereas",
    "in light of",
];

const CONCLUSION_CUES: &[&str] = &[
    "conclude",
    "conclusion",
    "accordingly",
    "in sum",
    "therefore",
    "recommend",
    "holds that",
    "finds that",
    "should have",
    "was obligated",
    "it follows",
];

/// Cue fragments for a section type
pub(crate) fn cues_for(section_type: SectionType) -> &'static [&'static str] {
    match section_type {
        SectionType::Facts => FACTS_CUES,
        SectionType::Issues => ISSUES_CUES,
        SectionType::Rules => RULES_CUES,
        SectionType::Analysis => ANALYSIS_CUES,
        SectionType::Conclusion => CONCLUSION_CUES,
    }
}

/// Count cue hits for a section type in a lowercased sentence.
///
/// Facts get an extra hit per past-tense token ("approved", "reported").
pub(crate) fn cue_hits(section_type: SectionType, lower_sentence: &str) -> usize {
    let mut hits = cues_for(section_type)
        .iter()
        .filter(|cue| lower_sentence.contains(**cue))
        .count();

    if section_type == SectionType::Facts {
        hits += lower_sentence
            .split_whitespace()
            .filter(|token| is_past_tense(token))
            .count();
    }

    // Interrogative framing is the strongest Issues signal; weight it above
    // the vocabulary hits so a question about facts still reads as an issue.
    if section_type == SectionType::Issues {
        if lower_sentence.trim_end().ends_with('?') {
            hits += 2;
        }
        if lower_sentence.trim_start().starts_with("whether") {
            hits += 2;
        }
    }

    hits
}

/// Heuristic past-tense detection: "-ed" suffix on a token of useful length.
fn is_past_tense(token: &str) -> bool {
    let word: String = token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    word.len() > 4 && word.ends_with("ed") && !word.ends_with("need")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cues_hit_citation_language() {
        let hits = cue_hits(SectionType::Rules, "the code requires disclosure of known safety risks.");
        assert!(hits >= 3, "expected code/requires/disclos/safety hits, got {}", hits);
    }

    #[test]
    fn test_facts_past_tense_counted() {
        let hits = cue_hits(SectionType::Facts, "engineer x approved a design despite knowing of a structural flaw.");
        assert!(hits >= 4, "expected lexicon plus past-tense hits, got {}", hits);
    }

    #[test]
    fn test_issues_interrogative() {
        let hits = cue_hits(SectionType::Issues, "whether the engineer may remain silent?");
        assert!(hits >= 2);
    }

    #[test]
    fn test_no_hits_on_neutral_text() {
        assert_eq!(cue_hits(SectionType::Rules, "a plain unrelated remark"), 0);
        assert_eq!(cue_hits(SectionType::Conclusion, "a plain unrelated remark"), 0);
    }

    #[test]
    fn test_past_tense_heuristic() {
        assert!(is_past_tense("approved"));
        assert!(is_past_tense("reported,"));
        assert!(!is_past_tense("red"));
        assert!(!is_past_tense("the"));
    }
}
