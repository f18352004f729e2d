use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graph_reach_core::{
    bft, dft, dft_recursive, find_path, Graph, PathStrategy, ReachStats, SocialGraph, UserId,
    Visit,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

mod logging;
mod populate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Benchmark and walk-through for graph-reach-core")]
struct Cli {
    /// What to run
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Users in the generated social graph (at most 4472)
    #[arg(long, default_value_t = 1000, env = "GRAPH_REACH_USERS")]
    users: u64,

    /// Average friendships per user (must be below --users)
    #[arg(long, default_value_t = 5, env = "GRAPH_REACH_AVG_FRIENDSHIPS")]
    avg_friendships: u64,

    /// RNG seed for the populator
    #[arg(long, default_value_t = 42, env = "GRAPH_REACH_SEED")]
    seed: u64,

    /// User whose network is measured
    #[arg(long, default_value_t = 1, env = "GRAPH_REACH_SOURCE")]
    source: UserId,

    /// Largest user count for which the exhaustive DFS is run
    #[arg(long, default_value_t = 12, env = "GRAPH_REACH_EXHAUSTIVE_LIMIT")]
    exhaustive_limit: u64,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long, env = "GRAPH_REACH_LOG_JSON")]
    log_json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Everything below
    All,
    /// Walk-through of the seven-vertex sample graph
    Sample,
    /// Degrees of separation for one user of a random graph
    Reach,
    /// Compare the path strategies on a random graph
    Paths,
}

#[derive(Serialize, Default)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<SampleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reach: Option<ReachReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<PathsReport>,
}

#[derive(Serialize)]
struct SampleReport {
    adjacency: BTreeMap<u64, Vec<u64>>,
    bft: Vec<Visit<u64>>,
    dft: Vec<Visit<u64>>,
    dft_recursive: Vec<Visit<u64>>,
    paths: Vec<StrategyResult>,
}

#[derive(Serialize)]
struct ReachReport {
    users: u64,
    friendships: usize,
    elapsed_ms: f64,
    stats: ReachStats<UserId>,
}

#[derive(Serialize)]
struct PathsReport {
    from: UserId,
    to: UserId,
    results: Vec<StrategyResult>,
}

#[derive(Serialize)]
struct StrategyResult {
    strategy: PathStrategy,
    /// `None` when no path exists.
    path: Option<Vec<u64>>,
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let mut report = Report::default();
    let run_all = cli.mode == Mode::All;

    if run_all || cli.mode == Mode::Sample {
        report.sample = Some(run_sample(!cli.json)?);
    }

    if run_all || cli.mode == Mode::Reach || cli.mode == Mode::Paths {
        let mut graph = SocialGraph::new();
        let mut rng = StdRng::seed_from_u64(cli.seed);
        let t = Instant::now();
        let friendships = populate::populate(&mut graph, cli.users, cli.avg_friendships, &mut rng)?;
        info!(
            elapsed_ms = elapsed_ms(t),
            users = cli.users,
            friendships,
            "populated"
        );

        if run_all || cli.mode == Mode::Reach {
            report.reach = Some(run_reach(&graph, &cli, friendships, !cli.json)?);
        }
        if run_all || cli.mode == Mode::Paths {
            report.paths = Some(run_paths(&graph, &cli, !cli.json)?);
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

/// Seven vertices, ten edges: small enough to check every walk by hand.
fn sample_graph() -> Graph {
    let mut graph = Graph::with_capacity(7);
    for v in 1..=7 {
        graph.add_vertex(v);
    }
    graph.load_edges([
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
    graph
}

fn run_strategies(
    graph: &Graph,
    from: u64,
    to: u64,
    strategies: &[PathStrategy],
) -> Result<Vec<StrategyResult>> {
    strategies
        .iter()
        .map(|&strategy| -> Result<StrategyResult> {
            let t = Instant::now();
            let path = find_path(graph, &from, &to, strategy)
                .with_context(|| format!("{} search {} -> {}", strategy.name(), from, to))?;
            Ok(StrategyResult {
                strategy,
                path: path.map(Vec::from),
                elapsed_ms: elapsed_ms(t),
            })
        })
        .collect()
}

fn print_visits(name: &str, visits: &[Visit<u64>]) {
    for visit in visits {
        println!("{} node #{}: {}", name, visit.order, visit.vertex);
    }
}

fn print_strategy(result: &StrategyResult) {
    match &result.path {
        Some(path) => println!(
            "{:>15}: {:?} ({} hops, {:.3}ms)",
            result.strategy.name(),
            path,
            path.len() - 1,
            result.elapsed_ms
        ),
        None => println!(
            "{:>15}: no path ({:.3}ms)",
            result.strategy.name(),
            result.elapsed_ms
        ),
    }
}

fn run_sample(print: bool) -> Result<SampleReport> {
    let graph = sample_graph();

    let mut adjacency: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for &v in graph.vertices() {
        let mut next: Vec<u64> = match graph.neighbors(&v)? {
            Some(set) => set.iter().copied().collect(),
            None => Vec::new(),
        };
        next.sort_unstable();
        adjacency.insert(v, next);
    }

    let report = SampleReport {
        adjacency,
        bft: bft(&graph, &1)?,
        dft: dft(&graph, &1)?,
        dft_recursive: dft_recursive(&graph, &1)?,
        paths: run_strategies(&graph, 1, 6, &PathStrategy::ALL)?,
    };

    if print {
        println!("--- sample graph ---");
        for (v, next) in &report.adjacency {
            println!("{} -> {:?}", v, next);
        }
        println!();
        print_visits("BFT", &report.bft);
        println!();
        print_visits("DFT", &report.dft);
        println!();
        print_visits("Recursive DFT", &report.dft_recursive);
        println!();
        for result in &report.paths {
            print_strategy(result);
        }
        println!();
    }

    Ok(report)
}

fn run_reach(graph: &SocialGraph, cli: &Cli, friendships: usize, print: bool) -> Result<ReachReport> {
    let t = Instant::now();
    let stats = graph
        .reach_stats(cli.source)
        .with_context(|| format!("reach from user {}", cli.source))?;
    let elapsed = elapsed_ms(t);

    if print {
        println!("--- social reach ---");
        println!(
            "{} users, {} friendships (avg {} per user)",
            cli.users, friendships, cli.avg_friendships
        );
        println!(
            "User {} reaches {} of {} other users ({:.1}%)",
            stats.source, stats.reached, stats.population, stats.coverage
        );
        println!(
            "Average separation {:.2} hops, max {} ({:.1}ms)",
            stats.average_separation, stats.max_separation, elapsed
        );
        println!();
    }

    Ok(ReachReport {
        users: cli.users,
        friendships,
        elapsed_ms: elapsed,
        stats,
    })
}

fn run_paths(graph: &SocialGraph, cli: &Cli, print: bool) -> Result<PathsReport> {
    let reach = graph
        .all_social_paths(cli.source)
        .with_context(|| format!("reach from user {}", cli.source))?;

    // Farthest reached user, lowest id on ties
    let target = reach
        .iter()
        .map(|(&id, path)| (path.hops(), std::cmp::Reverse(id)))
        .max()
        .map(|(_, std::cmp::Reverse(id))| id)
        .unwrap_or(cli.source);

    let strategies: Vec<PathStrategy> = if cli.users <= cli.exhaustive_limit {
        PathStrategy::ALL.to_vec()
    } else {
        info!(
            users = cli.users,
            limit = cli.exhaustive_limit,
            "skipping exhaustive search"
        );
        vec![PathStrategy::BreadthFirst, PathStrategy::DepthFirst]
    };

    let results = run_strategies(graph.graph(), cli.source, target, &strategies)?;

    if print {
        println!("--- path strategies: user {} -> user {} ---", cli.source, target);
        for result in &results {
            print_strategy(result);
        }
        println!();
    }

    Ok(PathsReport {
        from: cli.source,
        to: target,
        results,
    })
}
