//! Relevance scores - the output of the multi-metric scorer

/// Per-metric sub-scores, each in [0.0, 1.0] prior to weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricBreakdown {
    /// Sigmoid-normalized embedding similarity
    pub vector: f64,

    /// Normalized shared salient-term count
    pub term_overlap: f64,

    /// Section-type structural relevance (boost table or section-matched similarity)
    pub structural: f64,

    /// Caller-supplied external semantic-judgment score; 0.0 when unavailable
    pub external: f64,
}

/// A combined, weighted relevance judgment for one candidate against one
/// case section.
///
/// Created fresh per retrieval call and never persisted by the engine.
/// `graph_distance` records the BFS distance from the candidate to the
/// nearest anchor concept, used for tie-breaking and kept as provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceScore {
    /// URI of the scored concept, or id of the scored precedent case
    pub target_id: String,

    /// Per-metric sub-scores before weighting
    pub breakdown: MetricBreakdown,

    /// Weighted combination of the sub-scores, in [0.0, 1.0]
    pub combined: f64,

    /// 1-based position in the ranked result list
    pub rank: usize,

    /// BFS distance to the nearest anchor concept; None if disconnected or
    /// no anchors were supplied
    pub graph_distance: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_default_is_zero() {
        let breakdown = MetricBreakdown::default();
        assert_eq!(breakdown.vector, 0.0);
        assert_eq!(breakdown.term_overlap, 0.0);
        assert_eq!(breakdown.structural, 0.0);
        assert_eq!(breakdown.external, 0.0);
    }
}
