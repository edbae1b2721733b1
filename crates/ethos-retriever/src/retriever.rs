//! Two-phase precedent retrieval

use crate::candidate::Candidate;
use crate::scorer::{RelevanceScorer, ScoringContext};
use crate::RetrieverError;
use ethos_domain::{CaseSection, RelevanceScore};
use ethos_embedding::{CachingEmbedder, EmbeddingModel};
use std::cmp::Ordering;
use tracing::debug;

/// Retrieves the top-k most relevant candidates for a case section.
///
/// Phase one is a coarse vector-only pass bounding the working set (the fine
/// pass's term-overlap and structural computations cost more than a vector
/// comparison); phase two runs the full scorer over that set. If the coarse
/// pass yields fewer candidates than `top_k`, the fine pass runs over the
/// whole pool instead, so the result is never silently shorter than
/// requested unless the pool itself is.
pub struct PrecedentRetriever<M: EmbeddingModel> {
    scorer: RelevanceScorer,
    embedder: CachingEmbedder<M>,
}

impl<M: EmbeddingModel> PrecedentRetriever<M> {
    /// Create a retriever from a validated scorer and a caching embedder
    pub fn new(scorer: RelevanceScorer, embedder: CachingEmbedder<M>) -> Self {
        Self { scorer, embedder }
    }

    /// Borrow the scorer (for configuration inspection)
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Rank `pool` against `section` and return the top `top_k` scores,
    /// sorted descending by combined score with deterministic tie-breaks.
    ///
    /// A section with no text (the parser's degenerate output for empty
    /// narratives) has nothing to rank against and yields an empty list.
    pub fn retrieve(
        &self,
        section: &CaseSection,
        pool: &[Candidate<'_>],
        top_k: usize,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<RelevanceScore>, RetrieverError> {
        if pool.is_empty() || top_k == 0 || section.text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let section_embedding = self.embedder.embed(&section.text)?;
        let coarse_limit = self.scorer.config().coarse_limit;

        // Coarse pass: vector similarity alone, bounding the working set
        let working: Vec<&Candidate<'_>> = if pool.len() > coarse_limit {
            let mut by_vector: Vec<(f64, &Candidate<'_>)> = pool
                .iter()
                .map(|candidate| {
                    let similarity = candidate
                        .primary_embedding()
                        .map(|emb| ethos_embedding::normalized_similarity(&section_embedding, emb))
                        .unwrap_or(0.0);
                    (similarity, candidate)
                })
                .collect();
            by_vector.sort_by(|a, b| {
                b.0.total_cmp(&a.0)
                    .then_with(|| a.1.id().cmp(b.1.id()))
            });
            by_vector.truncate(coarse_limit);

            if by_vector.len() < top_k {
                // Coarse set too small to honor top_k; fall back to the pool
                pool.iter().collect()
            } else {
                by_vector.into_iter().map(|(_, c)| c).collect()
            }
        } else {
            pool.iter().collect()
        };

        debug!(
            section_type = %section.section_type,
            pool = pool.len(),
            working = working.len(),
            "running fine scoring pass"
        );

        // Fine pass: full multi-metric scoring
        let mut scores: Vec<RelevanceScore> = working
            .into_iter()
            .map(|candidate| self.scorer.score(section, &section_embedding, candidate, ctx))
            .collect();

        scores.sort_by(compare_scores);

        scores.truncate(top_k);
        for (idx, score) in scores.iter_mut().enumerate() {
            score.rank = idx + 1;
        }

        Ok(scores)
    }
}

/// Total ordering for ranked output: combined descending, then graph path
/// distance ascending (None last), then term overlap descending, then
/// target id ascending.
fn compare_scores(a: &RelevanceScore, b: &RelevanceScore) -> Ordering {
    b.combined
        .total_cmp(&a.combined)
        .then_with(|| match (a.graph_distance, b.graph_distance) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.breakdown.term_overlap.total_cmp(&a.breakdown.term_overlap))
        .then_with(|| a.target_id.cmp(&b.target_id))
}
