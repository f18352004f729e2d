//! Friendship graph: users with sequential ids joined by undirected edges.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::reach::{reach, ReachMap, ReachStats};

pub type UserId = u64;

/// Display data attached to a user id. Not part of the graph itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
}

/// Result of [`SocialGraph::add_friendship`].
///
/// The two rejected cases leave the graph untouched.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipOutcome {
    Created,
    SelfFriendship,
    AlreadyFriends,
}

impl FriendshipOutcome {
    pub fn is_created(self) -> bool {
        self == FriendshipOutcome::Created
    }
}

/// Users plus a friendship relation stored as a directed graph in which
/// every friendship is a pair of opposite edges.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    last_id: UserId,
    users: HashMap<UserId, User>,
    friendships: Graph<UserId>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all users and friendships; ids start again from 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register a user under the next sequential id.
    pub fn add_user(&mut self, name: impl Into<String>) -> UserId {
        self.last_id += 1;
        let id = self.last_id;
        self.users.insert(id, User { name: name.into() });
        self.friendships.add_vertex(id);
        id
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of undirected friendships.
    pub fn friendship_count(&self) -> usize {
        self.friendships.edge_count() / 2
    }

    /// Friends of `id`, or `None` when it has none.
    pub fn friends(&self, id: UserId) -> GraphResult<Option<&HashSet<UserId>>> {
        self.friendships.neighbors(&id)
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> bool {
        self.friendships.has_edge(&a, &b)
    }

    /// Befriend `a` and `b` in both directions.
    ///
    /// Both users must exist. A self-friendship, or a pair already linked in
    /// either direction, is logged as a warning and ignored.
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> GraphResult<FriendshipOutcome> {
        for id in [a, b] {
            if !self.users.contains_key(&id) {
                return Err(GraphError::vertex_not_found(&id));
            }
        }

        if a == b {
            warn!(user = a, "cannot befriend yourself");
            return Ok(FriendshipOutcome::SelfFriendship);
        }
        if self.friendships.has_edge(&a, &b) || self.friendships.has_edge(&b, &a) {
            warn!(user = a, friend = b, "friendship already exists");
            return Ok(FriendshipOutcome::AlreadyFriends);
        }

        self.friendships.add_edge(a, b);
        self.friendships.add_edge(b, a);
        Ok(FriendshipOutcome::Created)
    }

    /// Every user in `id`'s extended network mapped to a shortest chain of
    /// friendships leading to them. `id` maps to `[id]`.
    pub fn all_social_paths(&self, id: UserId) -> GraphResult<ReachMap<UserId>> {
        reach(&self.friendships, &id)
    }

    pub fn reach_stats(&self, id: UserId) -> GraphResult<ReachStats<UserId>> {
        let paths = self.all_social_paths(id)?;
        Ok(ReachStats::from_reach(&self.friendships, &id, &paths))
    }

    pub fn graph(&self) -> &Graph<UserId> {
        &self.friendships
    }
}
