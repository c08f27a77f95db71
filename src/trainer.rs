use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::classifier::TrainingSet;
use crate::error::RankError;
use crate::pipeline::Season;

/// Builds one labeled example per bowl game across the historical seasons.
/// The winner lands in slot A on a coin flip (label 1) and in slot B
/// otherwise (label 0), so the classifier can't learn that one slot always
/// holds the winner.
pub fn build_training_set(
    history: &[Season],
    rng: &mut StdRng,
) -> Result<TrainingSet, RankError> {
    let mut set = TrainingSet::default();

    for season in history {
        for bowl in &season.bowls {
            let winner = season.teams.get(&bowl.winner)?;
            let loser = season.teams.get(&bowl.loser)?;

            if rng.random_bool(0.5) {
                set.push(
                    [
                        winner.win_score,
                        winner.loss_score,
                        loser.win_score,
                        loser.loss_score,
                    ],
                    1,
                );
            } else {
                set.push(
                    [
                        loser.win_score,
                        loser.loss_score,
                        winner.win_score,
                        winner.loss_score,
                    ],
                    0,
                );
            }
        }
    }

    info!(examples = set.len(), seasons = history.len(), "training set built");
    Ok(set)
}
