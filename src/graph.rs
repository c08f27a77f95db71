use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction::{Incoming, Outgoing};
use tracing::{debug, info};

use crate::data_loader::Game;
use crate::error::RankError;
use crate::ranking_context::{PrunePolicy, RankingContext};

/// Directed multigraph of season results: one loser→winner edge per regular
/// game. Repeat matchups keep their parallel edges, so a pair that played
/// twice contributes twice to centrality.
#[derive(Debug, Default)]
pub struct ResultGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl ResultGraph {
    pub fn from_games(games: &[Game]) -> Self {
        let mut rg = Self::default();
        for game in games {
            let winner = rg.intern(&game.winner);
            let loser = rg.intern(&game.loser);
            rg.graph.add_edge(loser, winner, ());
        }
        rg
    }

    fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(&ix) = self.nodes.get(name) {
            return ix;
        }
        let ix = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), ix);
        ix
    }

    pub fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    // Edges point loser→winner, so in-edges are wins and out-edges losses.
    pub fn wins(&self, ix: NodeIndex) -> usize {
        self.graph.edges_directed(ix, Incoming).count()
    }

    pub fn losses(&self, ix: NodeIndex) -> usize {
        self.graph.edges_directed(ix, Outgoing).count()
    }

    pub fn total_degree(&self, ix: NodeIndex) -> usize {
        self.wins(ix) + self.losses(ix)
    }

    /// Removes teams with too few recorded games to score reliably, along
    /// with every edge touching them. Degrees are judged once, against the
    /// graph as built; a survivor may end up below the threshold if its
    /// opponents were dropped.
    pub fn prune(self, ctx: &RankingContext) -> Result<ResultGraph, RankError> {
        let mut survivors = Vec::new();
        let mut dropped = 0usize;

        for ix in self.graph.node_indices() {
            if self.total_degree(ix) >= ctx.min_games_for_ranking {
                survivors.push(ix);
                continue;
            }

            match ctx.prune_policy {
                PrunePolicy::FailFast => {
                    return Err(RankError::UnderConnected {
                        team: self.graph[ix].clone(),
                        wins: self.wins(ix),
                        losses: self.losses(ix),
                    });
                }
                PrunePolicy::Discard => {
                    debug!(team = %self.graph[ix], games = self.total_degree(ix), "pruned");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            info!(dropped, kept = survivors.len(), "pruned under-connected teams");
        }

        let mut pruned = ResultGraph::default();
        let mut remap = HashMap::new();
        for &old in &survivors {
            remap.insert(old, pruned.intern(&self.graph[old]));
        }
        for edge in self.graph.edge_references() {
            if let (Some(&source), Some(&target)) =
                (remap.get(&edge.source()), remap.get(&edge.target()))
            {
                pruned.graph.add_edge(source, target, ());
            }
        }

        Ok(pruned)
    }

    /// Clone of the graph with every edge direction flipped, for loss-side
    /// scoring.
    pub fn reversed(&self) -> DiGraph<String, ()> {
        let mut graph = self.graph.clone();
        graph.reverse();
        graph
    }
}
