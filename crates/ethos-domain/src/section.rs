//! FIRAC case sections - the structural units of a case narrative

use std::fmt;

/// The five FIRAC component types of a professional-ethics case narrative.
///
/// Ordering follows canonical FIRAC order (Facts before Issues before Rules,
/// and so on), which keeps map iteration and serialized output deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionType {
    /// What happened: actors, events, and circumstances
    Facts,
    /// The ethical questions the case raises
    Issues,
    /// The normative rules, codes, and standards that apply
    Rules,
    /// Application of the rules to the facts
    Analysis,
    /// The resolution or recommendation
    Conclusion,
}

impl SectionType {
    /// All section types in canonical FIRAC order
    pub const ALL: [SectionType; 5] = [
        SectionType::Facts,
        SectionType::Issues,
        SectionType::Rules,
        SectionType::Analysis,
        SectionType::Conclusion,
    ];

    /// Parse a section type from its lowercase name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "facts" => Some(SectionType::Facts),
            "issues" => Some(SectionType::Issues),
            "rules" => Some(SectionType::Rules),
            "analysis" => Some(SectionType::Analysis),
            "conclusion" => Some(SectionType::Conclusion),
            _ => None,
        }
    }

    /// Lowercase name, stable across releases (used as a storage key)
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Facts => "facts",
            SectionType::Issues => "issues",
            SectionType::Rules => "rules",
            SectionType::Analysis => "analysis",
            SectionType::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected section of a case narrative.
///
/// Immutable once emitted by the parser. A narrative yields an ordered
/// sequence of sections; a type that is absent from the narrative simply does
/// not appear (or appears with confidence 0 in the degenerate
/// whole-text-as-Analysis case).
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSection {
    /// Which FIRAC component this section was classified as
    pub section_type: SectionType,

    /// The section text, exactly as it appeared in the narrative
    pub text: String,

    /// Classification confidence in [0.0, 1.0], derived from cue density
    pub confidence: f64,

    /// Byte offsets (start, end) into the original narrative
    pub char_span: (usize, usize),
}

impl CaseSection {
    /// Create a new section. Confidence is clamped into [0.0, 1.0].
    pub fn new(
        section_type: SectionType,
        text: impl Into<String>,
        confidence: f64,
        char_span: (usize, usize),
    ) -> Self {
        Self {
            section_type,
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            char_span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_type_roundtrip() {
        for ty in SectionType::ALL {
            assert_eq!(SectionType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_section_type_parse_unknown() {
        assert_eq!(SectionType::parse("discussion"), None);
        assert_eq!(SectionType::parse(""), None);
    }

    #[test]
    fn test_section_type_canonical_order() {
        let mut sorted = SectionType::ALL;
        sorted.sort();
        assert_eq!(sorted, SectionType::ALL);
    }

    #[test]
    fn test_case_section_clamps_confidence() {
        let section = CaseSection::new(SectionType::Facts, "text", 1.7, (0, 4));
        assert_eq!(section.confidence, 1.0);

        let section = CaseSection::new(SectionType::Facts, "text", -0.2, (0, 4));
        assert_eq!(section.confidence, 0.0);
    }
}
