//! Damped random-walk centrality over the result graph.
//!
//! A team's win score is its rank in the graph as built (beating strong
//! opponents is worth more), its loss score is its rank with every edge
//! reversed (losing to strong opponents costs less). Each score vector is
//! stochastic: it sums to 1 over the surviving teams.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction::Outgoing;
use tracing::debug;

use crate::graph::ResultGraph;
use crate::ranking_context::RankingContext;
use crate::team::{Team, TeamTable};

/// Power iteration with uniform teleport. Dangling mass (teams with no
/// outgoing edges) is spread evenly, which keeps the vector summing to 1.
pub fn page_rank(graph: &DiGraph<String, ()>, ctx: &RankingContext) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let uniform = 1.0 / n as f64;
    let mut rank = vec![uniform; n];
    let out_degree: Vec<usize> = graph
        .node_indices()
        .map(|v| graph.edges_directed(v, Outgoing).count())
        .collect();

    for iteration in 0..ctx.max_rank_iterations {
        let mut next = vec![0.0; n];
        let mut dangling = 0.0;

        for v in graph.node_indices() {
            let i = v.index();
            if out_degree[i] == 0 {
                dangling += rank[i];
                continue;
            }
            let share = rank[i] / out_degree[i] as f64;
            for edge in graph.edges_directed(v, Outgoing) {
                next[edge.target().index()] += share;
            }
        }

        let base = (1.0 - ctx.damping_factor) * uniform + ctx.damping_factor * dangling * uniform;
        for r in next.iter_mut() {
            *r = ctx.damping_factor * *r + base;
        }

        let delta: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if delta < ctx.rank_tolerance {
            debug!(iteration, delta, "rank converged");
            break;
        }
    }

    rank
}

/// Scores the pruned graph both ways and builds the season's team table.
pub fn score_teams(graph: &ResultGraph, ctx: &RankingContext) -> TeamTable {
    let win_scores = page_rank(graph.inner(), ctx);
    let loss_scores = page_rank(&graph.reversed(), ctx);

    let mut teams = TeamTable::default();
    for ix in graph.inner().node_indices() {
        teams.insert(Team {
            name: graph.inner()[ix].clone(),
            win_score: win_scores[ix.index()],
            loss_score: loss_scores[ix.index()],
        });
    }
    teams
}
