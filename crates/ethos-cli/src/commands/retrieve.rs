//! The retrieve command.

use crate::{Formatter, Result, RetrieveArgs, EMBED_DIM};
use ethos_domain::traits::KnowledgeBase;
use ethos_embedding::{CachingEmbedder, EmbeddingCache, HashEmbedder};
use ethos_graph::ConceptGraph;
use ethos_parser::FiracParser;
use ethos_pipeline::{PipelineConfig, SectionRetrieval};
use ethos_retriever::{Candidate, PrecedentRetriever, RelevanceScorer, ScoringContext};
use ethos_store::SqliteKnowledgeBase;
use tracing::warn;

/// Parse a narrative and print ranked candidates per section
pub fn execute_retrieve(
    args: RetrieveArgs,
    db: &str,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let narrative = args.narrative()?;
    let kb = SqliteKnowledgeBase::open(db)?;

    let graph = match ConceptGraph::load(&kb) {
        Ok(graph) => Some(graph),
        Err(e) => {
            warn!(error = %e, "concept graph unavailable; structural scoring degraded");
            None
        }
    };
    let precedents = kb.get_precedent_cases()?;

    let parser = FiracParser::new(config.parser.clone());
    let sections = parser.parse(&narrative);

    let scorer = RelevanceScorer::new(config.retriever.clone())?;
    let embedder = CachingEmbedder::new(HashEmbedder::new(EMBED_DIM), EmbeddingCache::new());
    let retriever = PrecedentRetriever::new(scorer, embedder);
    let top_k = args.top_k.unwrap_or(config.top_k);

    let mut pool: Vec<Candidate<'_>> = match &graph {
        Some(graph) => graph.concepts().map(Candidate::Concept).collect(),
        None => Vec::new(),
    };
    pool.extend(precedents.iter().map(Candidate::Precedent));

    let ctx = match &graph {
        Some(graph) => ScoringContext {
            graph: Some(graph),
            anchors: &args.anchor,
            external_score: None,
        },
        None => ScoringContext::degraded(),
    };

    let mut retrievals = Vec::with_capacity(sections.len());
    for section in &sections {
        let scores = retriever.retrieve(section, &pool, top_k, &ctx)?;
        retrievals.push(SectionRetrieval {
            section_type: section.section_type,
            scores,
        });
    }

    println!("{}", formatter.format_retrievals(&retrievals)?);
    Ok(())
}
