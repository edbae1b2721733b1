//! FIRAC section detection

use crate::config::ParserConfig;
use crate::cues::{cue_hits, TYPE_PRIORITY};
use crate::segment::{sentences, Sentence};
use ethos_domain::{CaseSection, SectionType};
use tracing::{debug, warn};

/// The FIRAC structural parser.
///
/// Classification is sentence-granular: each sentence is scored against the
/// cue table of every section type, consecutive sentences of the same winning
/// type merge into one section, and sentences with no cue hits attach to the
/// most recently confirmed section. Identical input always yields identical
/// output.
pub struct FiracParser {
    config: ParserConfig,
}

/// A sentence with its classification, before section assembly
struct ClassifiedSentence {
    sentence: Sentence,
    section_type: Option<SectionType>,
    hits: usize,
    tokens: usize,
}

/// A section being assembled from consecutive sentences
struct OpenSection {
    section_type: SectionType,
    start: usize,
    end: usize,
    hits: usize,
    tokens: usize,
}

impl FiracParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Create a parser with default configuration
    pub fn default_config() -> Self {
        Self::new(ParserConfig::default())
    }

    /// Whether a section fell below the configured confidence floor.
    ///
    /// Low-confidence sections are retained, never dropped; callers decide
    /// whether to use them.
    pub fn is_low_confidence(&self, section: &CaseSection) -> bool {
        section.confidence < self.config.confidence_floor
    }

    /// Segment a case narrative into typed FIRAC sections.
    ///
    /// Never fails: a narrative with no recognizable structure yields a
    /// single Analysis-typed section spanning the whole text with
    /// confidence 0.
    pub fn parse(&self, narrative: &str) -> Vec<CaseSection> {
        let sents = sentences(narrative);
        if sents.is_empty() {
            return vec![CaseSection::new(
                SectionType::Analysis,
                narrative,
                0.0,
                (0, narrative.len()),
            )];
        }

        let classified: Vec<ClassifiedSentence> = sents
            .into_iter()
            .map(|sentence| self.classify(narrative, sentence))
            .collect();

        // No sentence matched any cue table: degenerate whole-text section
        if classified.iter().all(|c| c.section_type.is_none()) {
            debug!("no recognizable FIRAC structure, emitting whole-text analysis section");
            return vec![CaseSection::new(
                SectionType::Analysis,
                narrative,
                0.0,
                (0, narrative.len()),
            )];
        }

        let sections = self.assemble(narrative, classified);

        for section in &sections {
            if self.is_low_confidence(section) {
                warn!(
                    section_type = %section.section_type,
                    confidence = section.confidence,
                    floor = self.config.confidence_floor,
                    "low-confidence section retained"
                );
            }
        }

        sections
    }

    /// Score one sentence against every cue table and pick the winner.
    fn classify(&self, narrative: &str, sentence: Sentence) -> ClassifiedSentence {
        let text = sentence.text(narrative);
        let lower = text.to_lowercase();
        let tokens = lower.split_whitespace().count().max(1);

        let mut best: Option<(SectionType, usize)> = None;
        // Priority order resolves density ties deterministically
        for section_type in TYPE_PRIORITY {
            let hits = cue_hits(section_type, &lower);
            if hits == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, best_hits)) => hits > best_hits,
            };
            if better {
                best = Some((section_type, hits));
            }
        }

        match best {
            Some((section_type, hits)) => ClassifiedSentence {
                sentence,
                section_type: Some(section_type),
                hits,
                tokens,
            },
            None => ClassifiedSentence {
                sentence,
                section_type: None,
                hits: 0,
                tokens,
            },
        }
    }

    /// Merge classified sentences into ordered sections.
    fn assemble(&self, narrative: &str, classified: Vec<ClassifiedSentence>) -> Vec<CaseSection> {
        let mut sections: Vec<CaseSection> = Vec::new();
        let mut open: Option<OpenSection> = None;
        // Unmatched sentences seen before the first confirmed section
        let mut leading: Option<(usize, usize, usize)> = None; // (start, end, tokens)

        for item in classified {
            match (item.section_type, open.as_mut()) {
                (Some(ty), Some(current)) if current.section_type == ty => {
                    current.end = item.sentence.end;
                    current.hits += item.hits;
                    current.tokens += item.tokens;
                }
                (Some(ty), _) => {
                    if let Some(finished) = open.take() {
                        sections.push(self.close(narrative, finished));
                    }
                    let mut next = OpenSection {
                        section_type: ty,
                        start: item.sentence.start,
                        end: item.sentence.end,
                        hits: item.hits,
                        tokens: item.tokens,
                    };
                    // Fold any leading unmatched prefix into the first section
                    if sections.is_empty() {
                        if let Some((start, _end, tokens)) = leading.take() {
                            next.start = start;
                            next.tokens += tokens;
                        }
                    }
                    open = Some(next);
                }
                (None, Some(current)) => {
                    // Unmatched sentences attach to the most recently
                    // confirmed section, diluting its cue density
                    current.end = item.sentence.end;
                    current.tokens += item.tokens;
                }
                (None, None) => {
                    let entry = leading.get_or_insert((item.sentence.start, item.sentence.end, 0));
                    entry.1 = item.sentence.end;
                    entry.2 += item.tokens;
                }
            }
        }

        if let Some(finished) = open.take() {
            sections.push(self.close(narrative, finished));
        }

        sections
    }

    fn close(&self, narrative: &str, open: OpenSection) -> CaseSection {
        let confidence = (open.hits as f64 / open.tokens as f64).clamp(0.0, 1.0);
        CaseSection::new(
            open.section_type,
            &narrative[open.start..open.end],
            confidence,
            (open.start, open.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARRATIVE: &str = "Engineer X approved a design despite knowing of a structural flaw. \
                             The Code requires disclosure of known safety risks.";

    #[test]
    fn test_facts_then_rules() {
        let parser = FiracParser::default_config();
        let sections = parser.parse(NARRATIVE);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].section_type, SectionType::Facts);
        assert_eq!(sections[1].section_type, SectionType::Rules);
        assert!(sections[0].confidence > 0.3, "facts confidence {}", sections[0].confidence);
        assert!(sections[1].confidence > 0.3, "rules confidence {}", sections[1].confidence);
    }

    #[test]
    fn test_spans_cover_source_text() {
        let parser = FiracParser::default_config();
        let sections = parser.parse(NARRATIVE);

        for section in &sections {
            let (start, end) = section.char_span;
            assert_eq!(&NARRATIVE[start..end], section.text);
        }
    }

    #[test]
    fn test_deterministic() {
        let parser = FiracParser::default_config();
        let first = parser.parse(NARRATIVE);
        for _ in 0..5 {
            assert_eq!(parser.parse(NARRATIVE), first);
        }
    }

    #[test]
    fn test_unstructured_text_yields_analysis_confidence_zero() {
        let parser = FiracParser::default_config();
        let text = "lorem ipsum dolor sit amet";
        let sections = parser.parse(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Analysis);
        assert_eq!(sections[0].confidence, 0.0);
        assert_eq!(sections[0].char_span, (0, text.len()));
    }

    #[test]
    fn test_empty_text_yields_analysis_confidence_zero() {
        let parser = FiracParser::default_config();
        let sections = parser.parse("");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Analysis);
        assert_eq!(sections[0].confidence, 0.0);
    }

    #[test]
    fn test_unmatched_sentence_attaches_to_previous_section() {
        let parser = FiracParser::default_config();
        let text = "The Code requires disclosure of known safety risks. \
                    Lorem ipsum dolor sit amet.";
        let sections = parser.parse(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Rules);
        assert!(sections[0].text.contains("Lorem ipsum"));
    }

    #[test]
    fn test_attachment_dilutes_confidence() {
        let parser = FiracParser::default_config();
        let bare = "The Code requires disclosure of known safety risks.";
        let padded = "The Code requires disclosure of known safety risks. \
                      Lorem ipsum dolor sit amet and more filler words here.";

        let bare_conf = parser.parse(bare)[0].confidence;
        let padded_conf = parser.parse(padded)[0].confidence;
        assert!(padded_conf < bare_conf);
    }

    #[test]
    fn test_consecutive_same_type_sentences_merge() {
        let parser = FiracParser::default_config();
        let text = "The Code requires disclosure. \
                    Canon 1 states engineers must hold paramount public safety.";
        let sections = parser.parse(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Rules);
    }

    #[test]
    fn test_issue_question_detected() {
        let parser = FiracParser::default_config();
        let text = "Whether the engineer should have disclosed the flaw?";
        let sections = parser.parse(text);

        assert_eq!(sections[0].section_type, SectionType::Issues);
    }

    #[test]
    fn test_low_confidence_flagging() {
        let parser = FiracParser::new(ParserConfig {
            confidence_floor: 0.99,
        });
        let sections = parser.parse(NARRATIVE);

        // Everything falls below an absurd floor yet nothing is dropped
        assert_eq!(sections.len(), 2);
        for section in &sections {
            assert!(parser.is_low_confidence(section));
        }
    }

    #[test]
    fn test_leading_unmatched_folds_into_first_section() {
        let parser = FiracParser::default_config();
        let text = "Lorem ipsum dolor sit amet. \
                    The Code requires disclosure of known safety risks.";
        let sections = parser.parse(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Rules);
        assert_eq!(sections[0].char_span.0, 0);
    }
}
