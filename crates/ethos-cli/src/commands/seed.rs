//! The seed command.

use crate::{Formatter, Result, EMBED_DIM};
use ethos_domain::{ConceptKind, ConceptNode, PrecedentCase, SectionType};
use ethos_embedding::{EmbeddingModel, HashEmbedder};
use ethos_store::SqliteKnowledgeBase;

/// Seed the knowledge base with a small engineering-ethics ontology and two
/// precedent cases, enough to exercise every pipeline stage
pub fn execute_seed(db: &str, formatter: &Formatter) -> Result<()> {
    let mut kb = SqliteKnowledgeBase::open(db)?;
    let model = HashEmbedder::new(EMBED_DIM);

    let concepts: [(&str, &str, ConceptKind, &[&str]); 14] = [
        ("ethos:role/engineer", "Engineer", ConceptKind::Role, &[]),
        ("ethos:role/client", "Client", ConceptKind::Role, &[]),
        ("ethos:role/employer", "Employer", ConceptKind::Role, &[]),
        ("ethos:role/public", "Public", ConceptKind::Role, &[]),
        ("ethos:principle/honesty", "Honesty", ConceptKind::Principle, &[]),
        ("ethos:principle/public-welfare", "Public Welfare", ConceptKind::Principle, &[]),
        ("ethos:principle/confidentiality", "Confidentiality", ConceptKind::Principle, &[]),
        (
            "ethos:obligation/disclose-known-risks",
            "Disclose Known Risks",
            ConceptKind::Obligation,
            &["ethos:role/engineer", "ethos:principle/public-welfare"],
        ),
        (
            "ethos:obligation/maintain-confidentiality",
            "Maintain Client Confidentiality",
            ConceptKind::Obligation,
            &["ethos:role/engineer", "ethos:principle/confidentiality"],
        ),
        (
            "ethos:obligation/report-violations",
            "Report Code Violations",
            ConceptKind::Obligation,
            &["ethos:role/engineer", "ethos:principle/honesty"],
        ),
        ("ethos:action/approve-design", "Approve Design", ConceptKind::Action, &[]),
        ("ethos:state/conflict-of-interest", "Conflict of Interest Exists", ConceptKind::State, &[]),
        ("ethos:event/structural-failure", "Structural Failure", ConceptKind::Event, &[]),
        ("ethos:resource/design-document", "Design Document", ConceptKind::Resource, &[]),
    ];

    for (uri, label, kind, parents) in concepts {
        let mut node = ConceptNode::new(uri, label, kind, model.embed(label)?);
        for parent in parents {
            node = node.with_parent(*parent);
        }
        kb.insert_concept(&node)?;
    }

    let precedents = [
        PrecedentCase::new("ber-92-6")
            .with_section_embedding(
                SectionType::Facts,
                model.embed("An engineer approved a design while aware of a structural flaw.")?,
            )
            .with_section_embedding(
                SectionType::Conclusion,
                model.embed("The engineer was obligated to disclose the known safety risk.")?,
            )
            .with_concept_ref("ethos:obligation/disclose-known-risks")
            .with_concept_ref("ethos:role/engineer"),
        PrecedentCase::new("ber-76-4")
            .with_section_embedding(
                SectionType::Facts,
                model.embed("An engineer learned of a client's violation through confidential work.")?,
            )
            .with_section_embedding(
                SectionType::Conclusion,
                model.embed("Confidentiality yielded to the duty to report the violation.")?,
            )
            .with_concept_ref("ethos:obligation/maintain-confidentiality")
            .with_concept_ref("ethos:obligation/report-violations"),
    ];

    for case in &precedents {
        kb.insert_precedent(case)?;
    }

    println!(
        "{}",
        formatter.format_message(&format!(
            "Seeded {} concepts and {} precedent cases into {}",
            concepts.len(),
            precedents.len(),
            db
        ))
    );
    Ok(())
}
