//! Ethos Knowledge Graph Accessor
//!
//! Read-only queries over the concept/relationship graph: neighbors, kind
//! queries, and BFS path distance.
//!
//! The graph is loaded once from a [`KnowledgeBase`](ethos_domain::traits::KnowledgeBase)
//! and treated as immutable for the lifetime of a scoring session. If the
//! underlying store changes, call [`ConceptGraph::reload`] explicitly - there
//! is no implicit invalidation.
//!
//! # Examples
//!
//! ```no_run
//! use ethos_graph::ConceptGraph;
//! # fn demo(kb: &impl ethos_domain::traits::KnowledgeBase<Error = String>) {
//! let graph = ConceptGraph::load(kb).unwrap();
//! let distance = graph.path_distance("ethos:role/engineer", "ethos:obligation/disclose");
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod graph;

pub use error::GraphError;
pub use graph::ConceptGraph;
