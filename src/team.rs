use std::collections::HashMap;

use crate::error::RankError;
use crate::ranking_context::RankingContext;

/// A team's two centrality scores for one season. Built once by the rank
/// scorer and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub win_score: f64,
    pub loss_score: f64,
}

impl Team {
    /// Fixed linear combination of the two centrality scores. Losses weigh
    /// several times heavier than wins reward.
    pub fn combined_score(&self, ctx: &RankingContext) -> f64 {
        ctx.win_weight * self.win_score - ctx.loss_weight * self.loss_score
    }
}

/// Season registry keyed by canonical team name. Lookups of teams that were
/// pruned or never played a regular game fail loudly instead of defaulting.
#[derive(Debug, Default)]
pub struct TeamTable {
    teams: HashMap<String, Team>,
}

impl TeamTable {
    pub fn insert(&mut self, team: Team) {
        self.teams.insert(team.name.clone(), team);
    }

    pub fn get(&self, name: &str) -> Result<&Team, RankError> {
        self.teams
            .get(name)
            .ok_or_else(|| RankError::UnknownTeam(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }
}
