/// How nodes that fall under the games-played threshold are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrunePolicy {
    /// Drop under-connected teams from the graph before scoring.
    Discard,
    /// Abort the run on the first under-connected team.
    FailFast,
}

/// Slot order used when building the feature vector for a bowl matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOrder {
    /// Actual winner takes the first slot. Scores the recorded result,
    /// so low confidence marks an upset rather than a blind forecast.
    WinnerFirst,
    /// Slots assigned alphabetically by team name, a neutral order.
    Alphabetical,
}

#[derive(Debug, Clone)]
pub struct RankingContext {
    pub min_games_for_ranking: usize,
    pub prune_policy: PrunePolicy,

    pub damping_factor: f64,
    pub max_rank_iterations: usize,
    pub rank_tolerance: f64,

    pub win_weight: f64,
    pub loss_weight: f64,

    pub feature_order: FeatureOrder,

    /// Fixed seed for the trainer's slot coin flips. None draws from OS
    /// entropy, which makes fitted parameters vary run to run.
    pub rng_seed: Option<u64>,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            min_games_for_ranking: 10,
            prune_policy: PrunePolicy::Discard,

            damping_factor: 0.9,
            max_rank_iterations: 100,
            rank_tolerance: 1e-9,

            win_weight: 2.0,
            loss_weight: 7.0,

            feature_order: FeatureOrder::WinnerFirst,

            rng_seed: None,
        }
    }
}
