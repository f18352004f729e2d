//! Random friendship graphs for the benchmark modes.

use anyhow::{ensure, Context, Result};
use graph_reach_core::{SocialGraph, UserId};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// Upper bound on the candidate list, 16 bytes per pair.
const MAX_CANDIDATE_PAIRS: u64 = 10_000_000;

/// Reset `graph` and fill it with `users` users and roughly
/// `avg_friendships` friends per user.
///
/// Every unordered pair `(a, b)` with `a < b` is a candidate; the candidates
/// are shuffled and the first `users * avg_friendships / 2` become
/// friendships. O(users²) memory, so the pair count is capped at
/// `MAX_CANDIDATE_PAIRS` (about 4 470 users); larger requests fail before
/// `graph` is touched.
///
/// Returns the number of friendships created.
pub fn populate<R: Rng>(
    graph: &mut SocialGraph,
    users: u64,
    avg_friendships: u64,
    rng: &mut R,
) -> Result<usize> {
    ensure!(
        users > avg_friendships,
        "user count ({}) must exceed the average friendship count ({})",
        users,
        avg_friendships
    );

    // users > avg_friendships >= 0, so users - 1 cannot underflow
    let pairs = users
        .checked_mul(users - 1)
        .map(|n| n / 2)
        .filter(|&n| n <= MAX_CANDIDATE_PAIRS)
        .with_context(|| {
            format!(
                "{} users need more than {} candidate pairs",
                users, MAX_CANDIDATE_PAIRS
            )
        })?;
    // avg_friendships < users, so this stays at or below `pairs`
    let target = users * avg_friendships / 2;

    graph.reset();
    for i in 0..users {
        graph.add_user(format!("User {}", i + 1));
    }

    let mut candidates: Vec<(UserId, UserId)> = Vec::with_capacity(pairs as usize);
    for a in 1..=users {
        for b in (a + 1)..=users {
            candidates.push((a, b));
        }
    }
    candidates.shuffle(rng);

    let mut created = 0usize;
    for &(a, b) in candidates.iter().take(target as usize) {
        if graph.add_friendship(a, b)?.is_created() {
            created += 1;
        }
    }

    info!(users, avg_friendships, friendships = created, "graph populated");
    Ok(created)
}
