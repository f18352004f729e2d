//! Shortest paths from one source to every vertex it can reach.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::GraphResult;
use crate::frontier::{Frontier, Queue};
use crate::graph::{Graph, Vertex};
use crate::path::Path;

/// Reachable vertex -> one shortest path to it from the source.
pub type ReachMap<V> = HashMap<V, Path<V>>;

/// One breadth-first pass from `source`, recording each vertex's path the
/// first time it is dequeued.
///
/// Paths are dequeued in non-decreasing length, so every recorded path is a
/// shortest one. The source itself maps to `[source]`. Unreachable vertices
/// are absent from the map.
pub fn reach<V: Vertex>(graph: &Graph<V>, source: &V) -> GraphResult<ReachMap<V>> {
    graph.require(source)?;

    let mut reached: ReachMap<V> = HashMap::new();
    let mut queue: Queue<Path<V>> = Queue::new();
    queue.push(Path::new(source.clone()));

    while let Some(path) = queue.pop() {
        let current = path.end();
        if reached.contains_key(current) {
            continue;
        }

        for next in graph.neighbor_set(current)? {
            queue.push(path.extended(next.clone()));
        }
        reached.insert(current.clone(), path);
    }

    debug!(source = ?source, reached = reached.len(), "reach computed");
    Ok(reached)
}

/// How far a source's network extends through the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachStats<V> {
    pub source: V,
    /// Other vertices reached (the source is not counted).
    pub reached: usize,
    /// Other vertices in the graph.
    pub population: usize,
    /// `reached` as a percentage of `population`; 0 for a one-vertex graph.
    pub coverage: f64,
    /// Mean hops over reached vertices; 0 when nothing is reached.
    pub average_separation: f64,
    pub max_separation: usize,
}

impl<V: Vertex> ReachStats<V> {
    pub fn from_reach(graph: &Graph<V>, source: &V, reach: &ReachMap<V>) -> Self {
        let others = reach.iter().filter(|(v, _)| *v != source);

        let mut reached = 0usize;
        let mut total_hops = 0usize;
        let mut max_separation = 0usize;
        for (_, path) in others {
            reached += 1;
            total_hops += path.hops();
            max_separation = max_separation.max(path.hops());
        }

        let population = graph.vertex_count().saturating_sub(1);
        let coverage = if population == 0 {
            0.0
        } else {
            reached as f64 * 100.0 / population as f64
        };
        let average_separation = if reached == 0 {
            0.0
        } else {
            total_hops as f64 / reached as f64
        };

        Self {
            source: source.clone(),
            reached,
            population,
            coverage,
            average_separation,
            max_separation,
        }
    }
}
