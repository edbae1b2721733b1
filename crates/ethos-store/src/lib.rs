//! SQLite-backed knowledge base.
//!
//! Persists the ethics ontology (concepts and parent edges) and the precedent
//! case library, and serves them through the read-only [`KnowledgeBase`]
//! trait. Embeddings are stored as little-endian f32 blobs.
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Each thread should open its own
//! `SqliteKnowledgeBase`; the engine only reads through it at session start.

#![warn(missing_docs)]

mod memory;

pub use memory::MemoryKnowledgeBase;

use ethos_domain::traits::{ConceptRelationship, KnowledgeBase};
use ethos_domain::{ConceptKind, ConceptNode, PrecedentCase, SectionType};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of [`KnowledgeBase`]
pub struct SqliteKnowledgeBase {
    conn: Connection,
}

impl SqliteKnowledgeBase {
    /// Open (or create) a knowledge base at the given database path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert or replace a concept, including its parent edges
    pub fn insert_concept(&mut self, node: &ConceptNode) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO concepts (uri, label, kind, embedding) VALUES (?1, ?2, ?3, ?4)",
            params![
                &node.uri,
                &node.label,
                node.kind.as_str(),
                embedding_to_bytes(&node.embedding),
            ],
        )?;

        tx.execute(
            "DELETE FROM concept_parents WHERE child_uri = ?1",
            params![&node.uri],
        )?;
        for parent in &node.parent_uris {
            tx.execute(
                "INSERT INTO concept_parents (child_uri, parent_uri) VALUES (?1, ?2)",
                params![&node.uri, parent],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Insert a parent/child edge between two concepts
    pub fn insert_relationship(&self, relationship: &ConceptRelationship) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO concept_parents (child_uri, parent_uri) VALUES (?1, ?2)",
            params![&relationship.child_uri, &relationship.parent_uri],
        )?;
        Ok(())
    }

    /// Insert or replace a precedent case with its section embeddings and
    /// concept references
    pub fn insert_precedent(&mut self, case: &PrecedentCase) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO precedent_cases (id) VALUES (?1)",
            params![&case.id],
        )?;
        tx.execute(
            "DELETE FROM precedent_sections WHERE case_id = ?1",
            params![&case.id],
        )?;
        tx.execute(
            "DELETE FROM precedent_concepts WHERE case_id = ?1",
            params![&case.id],
        )?;

        for (section_type, embedding) in &case.section_embeddings {
            tx.execute(
                "INSERT INTO precedent_sections (case_id, section_type, embedding) VALUES (?1, ?2, ?3)",
                params![&case.id, section_type.as_str(), embedding_to_bytes(embedding)],
            )?;
        }
        for concept_uri in &case.concept_refs {
            tx.execute(
                "INSERT INTO precedent_concepts (case_id, concept_uri) VALUES (?1, ?2)",
                params![&case.id, concept_uri],
            )?;
        }

        tx.commit()?;
        debug!(case = %case.id, sections = case.section_embeddings.len(), "stored precedent case");
        Ok(())
    }

    /// Number of stored concepts
    pub fn concept_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM concepts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl KnowledgeBase for SqliteKnowledgeBase {
    type Error = StoreError;

    fn get_concepts_by_kind(&self, kind: ConceptKind) -> Result<Vec<ConceptNode>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT uri, label, embedding FROM concepts WHERE kind = ?1 ORDER BY uri")?;

        let mut nodes = stmt
            .query_map(params![kind.as_str()], |row| {
                let uri: String = row.get(0)?;
                let label: String = row.get(1)?;
                let blob: Vec<u8> = row.get(2)?;
                Ok((uri, label, blob))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(uri, label, blob)| {
                let embedding = bytes_to_embedding(&blob)?;
                Ok(ConceptNode::new(uri, label, kind, embedding))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut parent_stmt = self
            .conn
            .prepare("SELECT parent_uri FROM concept_parents WHERE child_uri = ?1")?;
        for node in &mut nodes {
            let parents = parent_stmt
                .query_map(params![&node.uri], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            node.parent_uris.extend(parents);
        }

        Ok(nodes)
    }

    fn get_relationships(&self) -> Result<Vec<ConceptRelationship>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT child_uri, parent_uri FROM concept_parents ORDER BY child_uri, parent_uri")?;

        let relationships = stmt
            .query_map([], |row| {
                Ok(ConceptRelationship {
                    child_uri: row.get(0)?,
                    parent_uri: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(relationships)
    }

    fn get_precedent_cases(&self) -> Result<Vec<PrecedentCase>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM precedent_cases ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        let mut section_stmt = self
            .conn
            .prepare("SELECT section_type, embedding FROM precedent_sections WHERE case_id = ?1")?;
        let mut concept_stmt = self
            .conn
            .prepare("SELECT concept_uri FROM precedent_concepts WHERE case_id = ?1")?;

        let mut cases = Vec::with_capacity(ids.len());
        for id in ids {
            let mut sections: BTreeMap<SectionType, Vec<f32>> = BTreeMap::new();
            let rows = section_stmt
                .query_map(params![&id], |row| {
                    let section_type: String = row.get(0)?;
                    let blob: Vec<u8> = row.get(1)?;
                    Ok((section_type, blob))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            for (type_name, blob) in rows {
                let section_type = SectionType::parse(&type_name).ok_or_else(|| {
                    StoreError::InvalidData(format!("Unknown section type: {}", type_name))
                })?;
                sections.insert(section_type, bytes_to_embedding(&blob)?);
            }

            let concept_refs = concept_stmt
                .query_map(params![&id], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<String>, _>>()?;

            let mut case = PrecedentCase::new(id);
            case.section_embeddings = sections;
            case.concept_refs = concept_refs.into_iter().collect();
            cases.push(case);
        }

        Ok(cases)
    }
}

/// Serialize an embedding as a little-endian f32 blob
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Deserialize a little-endian f32 blob
fn bytes_to_embedding(bytes: &[u8]) -> Result<Vec<f32>, StoreError> {
    if bytes.len() % 4 != 0 {
        return Err(StoreError::InvalidData(format!(
            "Embedding blob length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
