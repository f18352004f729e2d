use std::collections::{hash_set, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::GraphResult;
use crate::frontier::{Frontier, Queue, Stack};
use crate::graph::{Graph, Vertex};

/// A walk through the graph, first vertex = source, last = destination.
///
/// Never empty. Paths are values: [`Path::extended`] always builds a new
/// sequence, so partial paths sitting in a frontier never alias each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path<V> {
    vertices: Vec<V>,
}

// Never empty, so no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl<V: Vertex> Path<V> {
    /// The zero-hop path `[start]`.
    pub fn new(start: V) -> Self {
        Self {
            vertices: vec![start],
        }
    }

    /// Copy of this path with `next` appended.
    pub fn extended(&self, next: V) -> Self {
        let mut vertices = Vec::with_capacity(self.vertices.len() + 1);
        vertices.extend_from_slice(&self.vertices);
        vertices.push(next);
        Self { vertices }
    }

    pub fn first(&self) -> &V {
        &self.vertices[0]
    }

    pub fn end(&self) -> &V {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges.
    pub fn hops(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// True if every consecutive pair is an edge of `graph`.
    pub fn is_walk_in(&self, graph: &Graph<V>) -> bool {
        graph.contains_vertex(self.first())
            && self
                .vertices
                .windows(2)
                .all(|pair| graph.has_edge(&pair[0], &pair[1]))
    }
}

impl<V> From<Path<V>> for Vec<V> {
    fn from(path: Path<V>) -> Self {
        path.vertices
    }
}

impl<V: fmt::Display> fmt::Display for Path<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Which search [`find_path`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// [`bfs_path`]: fewest hops.
    BreadthFirst,
    /// [`dfs_path`]: first path found depth-first, not necessarily shortest.
    DepthFirst,
    /// [`dfs_shortest_path`]: enumerate every simple path, keep the shortest.
    ExhaustiveDepthFirst,
}

impl PathStrategy {
    pub const ALL: [PathStrategy; 3] = [
        PathStrategy::BreadthFirst,
        PathStrategy::DepthFirst,
        PathStrategy::ExhaustiveDepthFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PathStrategy::BreadthFirst => "bfs",
            PathStrategy::DepthFirst => "dfs",
            PathStrategy::ExhaustiveDepthFirst => "dfs-exhaustive",
        }
    }
}

/// Find a path from `start` to `destination` with the given strategy.
///
/// `Ok(None)` means no path exists. Unknown endpoints are an error.
pub fn find_path<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
    strategy: PathStrategy,
) -> GraphResult<Option<Path<V>>> {
    match strategy {
        PathStrategy::BreadthFirst => bfs_path(graph, start, destination),
        PathStrategy::DepthFirst => dfs_path(graph, start, destination),
        PathStrategy::ExhaustiveDepthFirst => dfs_shortest_path(graph, start, destination),
    }
}

/// Shortest path (by hop count) from `start` to `destination`.
///
/// The frontier holds whole paths. Because paths leave the queue in
/// non-decreasing length and a vertex is expanded only the first time it is
/// dequeued, the first path ending at `destination` is minimal.
pub fn bfs_path<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
) -> GraphResult<Option<Path<V>>> {
    search(graph, start, destination, Queue::new())
}

/// A path from `start` to `destination`, the first one found depth-first.
pub fn dfs_path<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
) -> GraphResult<Option<Path<V>>> {
    search(graph, start, destination, Stack::new())
}

fn search<V, F>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
    mut frontier: F,
) -> GraphResult<Option<Path<V>>>
where
    V: Vertex,
    F: Frontier<Path<V>>,
{
    graph.require(start)?;
    graph.require(destination)?;

    let mut visited: HashSet<V> = HashSet::new();
    frontier.push(Path::new(start.clone()));

    while let Some(path) = frontier.pop() {
        let current = path.end();
        if visited.contains(current) {
            continue;
        }
        if current == destination {
            debug!(start = ?start, destination = ?destination, hops = path.hops(), expanded = visited.len(), "path found");
            return Ok(Some(path));
        }
        visited.insert(current.clone());

        for next in graph.neighbor_set(current)? {
            frontier.push(path.extended(next.clone()));
        }
    }

    debug!(start = ?start, destination = ?destination, expanded = visited.len(), "no path");
    Ok(None)
}

/// Every simple path from `start` to `destination`, in depth-first
/// discovery order.
///
/// Exponential in the worst case; meant for small graphs. The search keeps
/// its own stack of neighbor iterators, one per vertex on the current
/// path, so depth is limited by memory rather than by the thread stack.
pub fn dfs_all_paths<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
) -> GraphResult<Vec<Path<V>>> {
    graph.require(start)?;
    graph.require(destination)?;

    let mut found: Vec<Path<V>> = Vec::new();
    if start == destination {
        found.push(Path::new(start.clone()));
        return Ok(found);
    }

    // `trail` is the path being built and `on_path` its vertex set. A vertex
    // leaves both when its iterator is exhausted, so other branches may
    // pass through it again.
    let mut trail: Vec<V> = vec![start.clone()];
    let mut on_path: HashSet<V> = HashSet::from([start.clone()]);
    let mut pending: Vec<hash_set::Iter<'_, V>> = vec![graph.neighbor_set(start)?.iter()];

    while let Some(neighbors) = pending.last_mut() {
        match neighbors.next() {
            Some(next) if next == destination => {
                let mut vertices = Vec::with_capacity(trail.len() + 1);
                vertices.extend_from_slice(&trail);
                vertices.push(next.clone());
                found.push(Path { vertices });
            }
            Some(next) => {
                if on_path.insert(next.clone()) {
                    trail.push(next.clone());
                    pending.push(graph.neighbor_set(next)?.iter());
                }
            }
            None => {
                pending.pop();
                if let Some(done) = trail.pop() {
                    on_path.remove(&done);
                }
            }
        }
    }

    debug!(start = ?start, destination = ?destination, paths = found.len(), "simple paths enumerated");
    Ok(found)
}

/// Shortest of [`dfs_all_paths`]. Ties go to the path found first.
pub fn dfs_shortest_path<V: Vertex>(
    graph: &Graph<V>,
    start: &V,
    destination: &V,
) -> GraphResult<Option<Path<V>>> {
    let paths = dfs_all_paths(graph, start, destination)?;
    Ok(paths.into_iter().min_by_key(|p| p.hops()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn make_chain(n: u64) -> Graph {
        let mut g = Graph::new();
        g.load_edges((0..n - 1).map(|i| (i, i + 1)));
        g
    }

    fn make_cycle(n: u64) -> Graph {
        let mut g = Graph::new();
        g.load_edges((0..n).map(|i| (i, (i + 1) % n)));
        g
    }

    fn sample_graph() -> Graph {
        let mut g = Graph::new();
        for v in 1..=7 {
            g.add_vertex(v);
        }
        g.load_edges(vec![
            (5, 3),
            (6, 3),
            (7, 1),
            (4, 7),
            (1, 2),
            (7, 6),
            (2, 4),
            (3, 5),
            (2, 3),
            (4, 6),
        ]);
        g
    }

    /// 0 -> 1 -> 2 -> 3 plus the shortcut 0 -> 2.
    fn make_shortcut() -> Graph {
        let mut g = Graph::new();
        g.load_edges(vec![(0, 1), (1, 2), (2, 3), (0, 2)]);
        g
    }

    // --- Path value ---

    #[test]
    fn test_path_extended_does_not_alias() {
        let base = Path::new(1u64);
        let a = base.extended(2);
        let b = base.extended(3);
        assert_eq!(base.vertices(), &[1]);
        assert_eq!(a.vertices(), &[1, 2]);
        assert_eq!(b.vertices(), &[1, 3]);
    }

    #[test]
    fn test_path_accessors() {
        let p = Path::new(1u64).extended(2).extended(4);
        assert_eq!(*p.first(), 1);
        assert_eq!(*p.end(), 4);
        assert_eq!(p.hops(), 2);
        assert_eq!(p.len(), 3);
        assert!(p.contains(&2));
        assert!(!p.contains(&3));
        assert_eq!(p.to_string(), "1 -> 2 -> 4");
        assert_eq!(Vec::from(p), vec![1, 2, 4]);
    }

    #[test]
    fn test_path_is_walk_in() {
        let g = sample_graph();
        assert!(Path::new(1u64).extended(2).extended(4).is_walk_in(&g));
        assert!(!Path::new(1u64).extended(4).is_walk_in(&g));
        assert!(!Path::new(99u64).is_walk_in(&g));
    }

    // --- BFS ---

    #[test]
    fn test_bfs_sample_1_to_6() {
        let g = sample_graph();
        let path = bfs_path(&g, &1, &6).unwrap().unwrap();
        assert_eq!(path.vertices(), &[1, 2, 4, 6]);
    }

    #[test]
    fn test_bfs_prefers_shortcut() {
        let g = make_shortcut();
        let path = bfs_path(&g, &0, &3).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 2, 3]);
    }

    #[test]
    fn test_bfs_self() {
        let g = make_chain(3);
        let path = bfs_path(&g, &1, &1).unwrap().unwrap();
        assert_eq!(path.vertices(), &[1]);
        assert_eq!(path.hops(), 0);
    }

    #[test]
    fn test_bfs_no_path_is_none() {
        let g = make_chain(4);
        assert_eq!(bfs_path(&g, &3, &0).unwrap(), None);
    }

    #[test]
    fn test_bfs_disconnected() {
        let mut g: Graph = Graph::new();
        g.add_vertex(0);
        g.add_vertex(1);
        assert_eq!(bfs_path(&g, &0, &1).unwrap(), None);
    }

    #[test]
    fn test_bfs_cycle() {
        let g = make_cycle(6);
        let path = bfs_path(&g, &0, &3).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_bfs_unknown_endpoints() {
        let g = make_chain(3);
        assert!(matches!(
            bfs_path(&g, &999, &0),
            Err(GraphError::VertexNotFound { .. })
        ));
        assert!(matches!(
            bfs_path(&g, &0, &999),
            Err(GraphError::VertexNotFound { .. })
        ));
    }

    // --- DFS ---

    #[test]
    fn test_dfs_sample_1_to_6() {
        let g = sample_graph();
        let path = dfs_path(&g, &1, &6).unwrap().unwrap();
        // Either [1, 2, 4, 6] or [1, 2, 4, 7, 6]
        assert!(path.is_walk_in(&g));
        assert_eq!(*path.first(), 1);
        assert_eq!(*path.end(), 6);
        assert!(path.hops() == 3 || path.hops() == 4);
    }

    #[test]
    fn test_dfs_chain() {
        let g = make_chain(6);
        let path = dfs_path(&g, &0, &5).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_dfs_no_path_is_none() {
        let g = make_chain(4);
        assert_eq!(dfs_path(&g, &2, &0).unwrap(), None);
    }

    #[test]
    fn test_dfs_unknown_endpoints() {
        let g = make_chain(3);
        assert!(dfs_path(&g, &0, &999).is_err());
    }

    // --- Exhaustive DFS ---

    #[test]
    fn test_all_paths_sample_1_to_6() {
        let g = sample_graph();
        let mut paths: Vec<Vec<u64>> = dfs_all_paths(&g, &1, &6)
            .unwrap()
            .into_iter()
            .map(Vec::from)
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![vec![1, 2, 4, 6], vec![1, 2, 4, 7, 6]]
        );
    }

    #[test]
    fn test_all_paths_finds_both_branches_through_shared_vertex() {
        // 0 -> {1, 2} -> 3 -> 4: both routes pass through 3
        let mut g: Graph = Graph::new();
        g.load_edges(vec![(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]);
        let paths = dfs_all_paths(&g, &0, &4).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.hops() == 3 && p.is_walk_in(&g)));
    }

    #[test]
    fn test_all_paths_are_simple() {
        let g = sample_graph();
        for dest in 2..=7 {
            for path in dfs_all_paths(&g, &1, &dest).unwrap() {
                let unique: HashSet<_> = path.vertices().iter().collect();
                assert_eq!(unique.len(), path.len());
            }
        }
    }

    #[test]
    fn test_all_paths_deep_chain() {
        let g = make_chain(200_000);
        let paths = dfs_all_paths(&g, &0, &199_999).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].hops(), 199_999);
        assert_eq!(*paths[0].end(), 199_999);
    }

    #[test]
    fn test_all_paths_cycle_back_to_start_not_followed() {
        // 0 -> 1 -> 2 -> 0 and 2 -> 3: the loop through 0 is not a simple path
        let mut g: Graph = Graph::new();
        g.load_edges(vec![(0, 1), (1, 2), (2, 0), (2, 3)]);
        let paths = dfs_all_paths(&g, &0, &3).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_dfs_shortest_sample_1_to_6() {
        let g = sample_graph();
        let path = dfs_shortest_path(&g, &1, &6).unwrap().unwrap();
        assert_eq!(path.vertices(), &[1, 2, 4, 6]);
    }

    #[test]
    fn test_dfs_shortest_takes_shortcut_even_if_found_late() {
        let g = make_shortcut();
        let path = dfs_shortest_path(&g, &0, &3).unwrap().unwrap();
        assert_eq!(path.vertices(), &[0, 2, 3]);
    }

    #[test]
    fn test_dfs_shortest_no_path_is_none() {
        let g = make_chain(4);
        assert!(dfs_all_paths(&g, &3, &0).unwrap().is_empty());
        assert_eq!(dfs_shortest_path(&g, &3, &0).unwrap(), None);
    }

    #[test]
    fn test_dfs_shortest_self() {
        let g = make_cycle(3);
        let path = dfs_shortest_path(&g, &2, &2).unwrap().unwrap();
        assert_eq!(path.vertices(), &[2]);
    }

    #[test]
    fn test_dfs_shortest_unknown_endpoints() {
        let g = make_chain(3);
        assert!(dfs_shortest_path(&g, &999, &0).is_err());
    }

    // --- Strategy dispatch ---

    #[test]
    fn test_find_path_strategies_agree_where_unique() {
        let g = make_chain(5);
        for strategy in PathStrategy::ALL {
            let path = find_path(&g, &0, &4, strategy).unwrap().unwrap();
            assert_eq!(path.vertices(), &[0, 1, 2, 3, 4], "{}", strategy.name());
        }
    }

    #[test]
    fn test_bfs_and_exhaustive_agree_on_length() {
        let g = sample_graph();
        for start in 1..=7 {
            for dest in 1..=7 {
                let bfs = bfs_path(&g, &start, &dest).unwrap().map(|p| p.hops());
                let dfs = dfs_shortest_path(&g, &start, &dest)
                    .unwrap()
                    .map(|p| p.hops());
                assert_eq!(bfs, dfs, "{} -> {}", start, dest);
            }
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(PathStrategy::BreadthFirst.name(), "bfs");
        assert_eq!(PathStrategy::ExhaustiveDepthFirst.name(), "dfs-exhaustive");
    }
}
