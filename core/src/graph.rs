use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, GraphResult};

/// Anything usable as a vertex id: integers, strings, small copyable keys.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

/// In-memory directed graph: vertex id -> set of out-neighbors.
///
/// The key set of `adjacency` is the vertex set, so every edge endpoint is
/// always a known vertex. There is no removal; vertices and edges live until
/// the graph is dropped.
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex = u64> {
    adjacency: HashMap<V, HashSet<V>>,
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(vertex_count),
        }
    }

    /// Insert a vertex with no out-neighbors. Re-adding an existing vertex
    /// clears its out-neighbors.
    pub fn add_vertex(&mut self, id: V) {
        self.adjacency.insert(id, HashSet::new());
    }

    /// Add a directed edge `from -> to`, creating either endpoint if missing.
    pub fn add_edge(&mut self, from: V, to: V) {
        if !self.adjacency.contains_key(&to) {
            self.add_vertex(to.clone());
        }
        self.adjacency.entry(from).or_default().insert(to);
    }

    /// Bulk load from an iterator of `(from, to)` pairs.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V)>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }

    /// Out-neighbors of `id`, or `None` when it has none.
    pub fn neighbors(&self, id: &V) -> GraphResult<Option<&HashSet<V>>> {
        let set = self.neighbor_set(id)?;
        Ok(if set.is_empty() { None } else { Some(set) })
    }

    /// Out-neighbors of `id`, empty set included. Used by the walk loops.
    pub(crate) fn neighbor_set(&self, id: &V) -> GraphResult<&HashSet<V>> {
        self.adjacency
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Fail with `VertexNotFound` unless `id` is in the graph.
    pub(crate) fn require(&self, id: &V) -> GraphResult<()> {
        self.neighbor_set(id).map(|_| ())
    }

    pub fn contains_vertex(&self, id: &V) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|set| set.contains(to))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
