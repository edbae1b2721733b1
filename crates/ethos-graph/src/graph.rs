//! Immutable concept graph with BFS path distance

use crate::GraphError;
use ethos_domain::traits::KnowledgeBase;
use ethos_domain::{ConceptKind, ConceptNode};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, info, warn};

/// The loaded ethics ontology: concepts plus a bidirectional adjacency
/// structure over their parent/child relationships.
///
/// Concepts form a DAG with multiple parents permitted, so adjacency is an
/// explicit `uri -> set of uris` map rather than tree nodes. Traversal tracks
/// visited sets, so an accidental cycle in the source data degrades to a
/// correct (if redundant) answer instead of looping.
///
/// # Thread Safety
///
/// Immutable after load; share freely across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ConceptGraph {
    nodes: BTreeMap<String, ConceptNode>,
    parents: BTreeMap<String, BTreeSet<String>>,
    children: BTreeMap<String, BTreeSet<String>>,
}

impl ConceptGraph {
    /// Load the full concept graph from a knowledge base.
    ///
    /// Concepts of every kind are fetched, then the relationship table is
    /// merged with the `parent_uris` already present on the nodes.
    /// Relationships that reference unknown concepts are skipped with a
    /// warning rather than failing the load.
    pub fn load<K: KnowledgeBase>(kb: &K) -> Result<Self, GraphError>
    where
        K::Error: std::fmt::Display,
    {
        let mut nodes = BTreeMap::new();

        for kind in ConceptKind::ALL {
            let concepts = kb
                .get_concepts_by_kind(kind)
                .map_err(|e| GraphError::Unavailable(e.to_string()))?;
            for concept in concepts {
                nodes.insert(concept.uri.clone(), concept);
            }
        }

        let relationships = kb
            .get_relationships()
            .map_err(|e| GraphError::Unavailable(e.to_string()))?;

        let mut parents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        // Edges already carried on the nodes themselves
        for node in nodes.values() {
            for parent_uri in &node.parent_uris {
                parents
                    .entry(node.uri.clone())
                    .or_default()
                    .insert(parent_uri.clone());
                children
                    .entry(parent_uri.clone())
                    .or_default()
                    .insert(node.uri.clone());
            }
        }

        // Edges from the relationship table
        for rel in relationships {
            if !nodes.contains_key(&rel.child_uri) || !nodes.contains_key(&rel.parent_uri) {
                warn!(
                    child = %rel.child_uri,
                    parent = %rel.parent_uri,
                    "skipping relationship referencing unknown concept"
                );
                continue;
            }
            parents
                .entry(rel.child_uri.clone())
                .or_default()
                .insert(rel.parent_uri.clone());
            children
                .entry(rel.parent_uri)
                .or_default()
                .insert(rel.child_uri);
        }

        info!(
            concepts = nodes.len(),
            "loaded concept graph from knowledge base"
        );

        Ok(Self {
            nodes,
            parents,
            children,
        })
    }

    /// Replace this graph with a fresh load from the knowledge base.
    pub fn reload<K: KnowledgeBase>(&mut self, kb: &K) -> Result<(), GraphError>
    where
        K::Error: std::fmt::Display,
    {
        debug!("reloading concept graph");
        *self = Self::load(kb)?;
        Ok(())
    }

    /// Look up a concept by URI
    pub fn node(&self, uri: &str) -> Option<&ConceptNode> {
        self.nodes.get(uri)
    }

    /// Whether the graph contains a concept
    pub fn contains(&self, uri: &str) -> bool {
        self.nodes.contains_key(uri)
    }

    /// Number of concepts in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no concepts
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All concepts of the given kind, in URI order
    pub fn concepts_of_kind(&self, kind: ConceptKind) -> Vec<&ConceptNode> {
        self.nodes.values().filter(|n| n.kind == kind).collect()
    }

    /// Iterate over all concepts in URI order
    pub fn concepts(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.values()
    }

    /// All directly connected concept URIs: parents union children.
    pub fn neighbors(&self, uri: &str) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        if let Some(ps) = self.parents.get(uri) {
            result.extend(ps.iter().cloned());
        }
        if let Some(cs) = self.children.get(uri) {
            result.extend(cs.iter().cloned());
        }
        result
    }

    /// Shortest path length between two concepts over the undirected view of
    /// the graph. `None` if either concept is unknown or they are
    /// disconnected. Distance 0 means the same concept.
    ///
    /// Path distance is an ontological-relatedness signal: a shorter distance
    /// marks a genuine analogue even when lexical similarity is low.
    pub fn path_distance(&self, uri_a: &str, uri_b: &str) -> Option<usize> {
        if !self.contains(uri_a) || !self.contains(uri_b) {
            return None;
        }
        if uri_a == uri_b {
            return Some(0);
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        visited.insert(uri_a);
        queue.push_back((uri_a, 0));

        while let Some((current, distance)) = queue.pop_front() {
            for neighbor in self.neighbor_refs(current) {
                if neighbor == uri_b {
                    return Some(distance + 1);
                }
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, distance + 1));
                }
            }
        }

        None
    }

    /// Minimum path distance from `uri` to any of `anchors`.
    pub fn min_distance_to_any<'a, I>(&self, uri: &str, anchors: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        anchors
            .into_iter()
            .filter_map(|anchor| self.path_distance(uri, anchor))
            .min()
    }

    /// Whether `to` is reachable from `from` over the undirected view.
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        self.path_distance(from, to).is_some()
    }

    /// Borrowed neighbor iteration for BFS (avoids per-step set allocation)
    fn neighbor_refs<'a>(&'a self, uri: &str) -> impl Iterator<Item = &'a str> + 'a {
        let ps = self.parents.get(uri).into_iter().flatten();
        let cs = self.children.get(uri).into_iter().flatten();
        ps.chain(cs).map(|s| s.as_str())
    }
}
