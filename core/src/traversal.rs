use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::GraphResult;
use crate::frontier::{Frontier, Queue, Stack};
use crate::graph::{Graph, Vertex};

/// One emitted vertex of a traversal. `order` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit<V> {
    pub order: usize,
    pub vertex: V,
}

/// Breadth-first traversal: every vertex reachable from `start`, once each.
///
/// Neighbor sets are unordered, so the result is one of the valid
/// breadth-first orders for the graph.
pub fn bft<V: Vertex>(graph: &Graph<V>, start: &V) -> GraphResult<Vec<Visit<V>>> {
    walk(graph, start, Queue::new())
}

/// Depth-first traversal with an explicit stack.
pub fn dft<V: Vertex>(graph: &Graph<V>, start: &V) -> GraphResult<Vec<Visit<V>>> {
    walk(graph, start, Stack::new())
}

/// Shared loop for [`bft`] and [`dft`].
///
/// Already-visited neighbors are still pushed and skipped when popped, so
/// the frontier may hold a vertex several times.
fn walk<V, F>(graph: &Graph<V>, start: &V, mut frontier: F) -> GraphResult<Vec<Visit<V>>>
where
    V: Vertex,
    F: Frontier<V>,
{
    graph.require(start)?;

    let mut visited: HashSet<V> = HashSet::new();
    let mut visits: Vec<Visit<V>> = Vec::new();
    let mut pushed = 1usize;

    frontier.push(start.clone());

    while let Some(current) = frontier.pop() {
        if visited.contains(&current) {
            continue;
        }
        visited.insert(current.clone());

        for next in graph.neighbor_set(&current)? {
            frontier.push(next.clone());
            pushed += 1;
        }

        visits.push(Visit {
            order: visits.len() + 1,
            vertex: current,
        });
    }

    debug!(
        start = ?start,
        visited = visits.len(),
        pushed,
        "traversal finished"
    );
    Ok(visits)
}

/// Depth-first traversal by recursion.
///
/// Visits `start` first, then recurses into each neighbor not yet seen.
/// The visited set and the counter belong to one [`DepthFirstWalk`] built
/// per call, so separate calls never share state.
///
/// Recursion depth equals the longest chain of first discoveries, up to one
/// frame per reachable vertex. When less than 64 KiB of stack remain, the
/// walk continues on a freshly allocated 1 MiB segment, so deep graphs cost
/// heap memory instead of overflowing the thread stack.
pub fn dft_recursive<V: Vertex>(graph: &Graph<V>, start: &V) -> GraphResult<Vec<Visit<V>>> {
    graph.require(start)?;

    let mut state = DepthFirstWalk {
        graph,
        visited: HashSet::new(),
        visits: Vec::new(),
    };
    state.visit(start)?;

    debug!(start = ?start, visited = state.visits.len(), "recursive traversal finished");
    Ok(state.visits)
}

/// Stack headroom below which a recursive step moves to a new segment.
const RED_ZONE: usize = 64 * 1024;

/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

struct DepthFirstWalk<'g, V: Vertex> {
    graph: &'g Graph<V>,
    visited: HashSet<V>,
    visits: Vec<Visit<V>>,
}

impl<V: Vertex> DepthFirstWalk<'_, V> {
    fn visit(&mut self, vertex: &V) -> GraphResult<()> {
        self.visited.insert(vertex.clone());
        self.visits.push(Visit {
            order: self.visits.len() + 1,
            vertex: vertex.clone(),
        });

        let graph = self.graph;
        for next in graph.neighbor_set(vertex)? {
            // Checked per neighbor: an earlier sibling's subtree may have reached it.
            if !self.visited.contains(next) {
                stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.visit(next))?;
            }
        }
        Ok(())
    }
}
