//! graph-reach-core: In-memory graph traversal and path finding.
//!
//! A small adjacency-set graph store with breadth-first and depth-first
//! walks, single-target path search (BFS, iterative DFS, exhaustive
//! recursive DFS), and one-pass shortest paths from a source to everything
//! it reaches. A friendship graph built on top answers "how is this user
//! connected to everyone else".
//!
//! Single-threaded and synchronous. Searches borrow the graph immutably, so
//! the graph cannot change while one runs.

mod error;
mod frontier;
mod graph;
mod path;
mod reach;
mod social;
mod traversal;

pub use error::{GraphError, GraphResult};
pub use frontier::{Frontier, Queue, Stack};
pub use graph::{Graph, Vertex};
pub use path::{
    bfs_path, dfs_all_paths, dfs_path, dfs_shortest_path, find_path, Path, PathStrategy,
};
pub use reach::{reach, ReachMap, ReachStats};
pub use social::{FriendshipOutcome, SocialGraph, User, UserId};
pub use traversal::{bft, dft, dft_recursive, Visit};
