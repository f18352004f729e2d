//! Typed errors for graph lookups.
//!
//! Only lookups of unknown vertices are errors. A search that finds no path
//! returns `Ok(None)`, and rejected friendship requests are reported through
//! [`crate::FriendshipOutcome`].

use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex id that was never added to the graph.
    #[error("vertex {vertex} not found")]
    VertexNotFound { vertex: String },
}

impl GraphError {
    pub fn vertex_not_found(vertex: &impl Debug) -> Self {
        Self::VertexNotFound {
            vertex: format!("{:?}", vertex),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_not_found_message() {
        let err = GraphError::vertex_not_found(&42u64);
        assert_eq!(err.to_string(), "vertex 42 not found");
    }

    #[test]
    fn test_vertex_not_found_string_id() {
        let err = GraphError::vertex_not_found(&"alice");
        assert_eq!(
            err,
            GraphError::VertexNotFound {
                vertex: "\"alice\"".to_string()
            }
        );
    }
}
