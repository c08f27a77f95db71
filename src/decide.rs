use std::cmp::Ordering;

use tracing::info;

use crate::classifier::GaussianNb;
use crate::error::RankError;
use crate::pipeline::Season;
use crate::ranking_context::{FeatureOrder, RankingContext};

/// One scored bowl matchup: the favored team and how confident the engine
/// is in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub confidence: f64,
    pub label: String,
    pub team: String,
}

/// Scores each bowl of the target season with the trained classifier.
///
/// Slot order follows `ctx.feature_order`. With `WinnerFirst` the vector is
/// built from the actual result, so the output reads as a confidence in the
/// recorded outcome and the lowest entries are the biggest upsets.
pub fn decide_with_model(
    model: &GaussianNb,
    season: &Season,
    ctx: &RankingContext,
) -> Result<Vec<Decision>, RankError> {
    let mut decisions = Vec::with_capacity(season.bowls.len());

    for bowl in &season.bowls {
        let winner = season.teams.get(&bowl.winner)?;
        let loser = season.teams.get(&bowl.loser)?;

        let (slot_a, slot_b) = match ctx.feature_order {
            FeatureOrder::WinnerFirst => (winner, loser),
            FeatureOrder::Alphabetical => {
                if winner.name <= loser.name {
                    (winner, loser)
                } else {
                    (loser, winner)
                }
            }
        };

        let (p_slot_b, p_slot_a) = model.predict_probability(&[
            slot_a.win_score,
            slot_a.loss_score,
            slot_b.win_score,
            slot_b.loss_score,
        ]);

        let (confidence, team) = if p_slot_a > p_slot_b {
            (p_slot_a, slot_a.name.clone())
        } else {
            (p_slot_b, slot_b.name.clone())
        };

        decisions.push(Decision {
            confidence,
            label: bowl.label(),
            team,
        });
    }

    sort_decisions(&mut decisions);
    info!(decisions = decisions.len(), "bowls scored with classifier");
    Ok(decisions)
}

/// The older, model-free mode: the favored team is whichever side has the
/// higher combined score, and the margin is the confidence.
pub fn decide_by_score(season: &Season, ctx: &RankingContext) -> Result<Vec<Decision>, RankError> {
    let mut decisions = Vec::with_capacity(season.bowls.len());

    for bowl in &season.bowls {
        let winner = season.teams.get(&bowl.winner)?;
        let loser = season.teams.get(&bowl.loser)?;

        let margin = winner.combined_score(ctx) - loser.combined_score(ctx);
        let (confidence, team) = if margin > 0.0 {
            (margin, winner.name.clone())
        } else {
            (-margin, loser.name.clone())
        };

        decisions.push(Decision {
            confidence,
            label: bowl.label(),
            team,
        });
    }

    sort_decisions(&mut decisions);
    info!(decisions = decisions.len(), "bowls scored by combined-score margin");
    Ok(decisions)
}

// Ascending by confidence puts the most contested outcomes on top; label
// and team break ties the way sorting bare 3-tuples would.
fn sort_decisions(decisions: &mut [Decision]) {
    decisions.sort_by(|a, b| {
        a.confidence
            .partial_cmp(&b.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.team.cmp(&b.team))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TrainingSet;
    use crate::data_loader::Game;
    use crate::team::{Team, TeamTable};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn bowl(winner: &str, loser: &str, notes: &str) -> Game {
        Game {
            winner: winner.into(),
            loser: loser.into(),
            date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            week: 16,
            notes: notes.into(),
        }
    }

    fn test_season() -> Season {
        let mut teams = TeamTable::default();
        teams.insert(Team {
            name: "Oregon".into(),
            win_score: 0.30,
            loss_score: 0.05,
        });
        teams.insert(Team {
            name: "Florida State".into(),
            win_score: 0.20,
            loss_score: 0.10,
        });
        teams.insert(Team {
            name: "Ohio State".into(),
            win_score: 0.25,
            loss_score: 0.06,
        });
        Season {
            year: 2014,
            teams,
            bowls: vec![
                bowl("Oregon", "Florida State", "Rose Bowl"),
                bowl("Ohio State", "Oregon", "Championship"),
            ],
        }
    }

    fn trained_model() -> GaussianNb {
        // Strong slot A wins (label 1), mirrored for label 0.
        let mut set = TrainingSet::default();
        for [aw, al, bw, bl] in [
            [0.30, 0.05, 0.15, 0.20],
            [0.28, 0.08, 0.12, 0.25],
            [0.35, 0.04, 0.18, 0.15],
            [0.26, 0.06, 0.20, 0.18],
        ] {
            set.push([aw, al, bw, bl], 1);
            set.push([bw, bl, aw, al], 0);
        }
        GaussianNb::fit(&set).unwrap()
    }

    #[test]
    fn score_mode_emits_margin_and_favored_team() {
        let season = test_season();
        let ctx = RankingContext::default();
        let decisions = decide_by_score(&season, &ctx).unwrap();

        assert_eq!(decisions.len(), 2);
        // Oregon (2*0.30 - 7*0.05 = 0.25) over Florida State (0.40 - 0.70 = -0.30).
        let rose = decisions.iter().find(|d| d.label == "Rose Bowl").unwrap();
        assert_eq!(rose.team, "Oregon");
        assert_relative_eq!(rose.confidence, 0.55, epsilon = 1e-12);
        // Every margin is non-negative by construction.
        assert!(decisions.iter().all(|d| d.confidence >= 0.0));
    }

    #[test]
    fn decisions_sort_ascending_by_confidence() {
        let season = test_season();
        let ctx = RankingContext::default();
        let decisions = decide_by_score(&season, &ctx).unwrap();

        for pair in decisions.windows(2) {
            assert!(pair[0].confidence <= pair[1].confidence);
        }
    }

    #[test]
    fn ties_break_on_label_then_team() {
        let mut decisions = vec![
            Decision {
                confidence: 0.5,
                label: "B Bowl".into(),
                team: "X".into(),
            },
            Decision {
                confidence: 0.5,
                label: "A Bowl".into(),
                team: "Z".into(),
            },
            Decision {
                confidence: 0.5,
                label: "A Bowl".into(),
                team: "Y".into(),
            },
        ];
        sort_decisions(&mut decisions);
        assert_eq!(decisions[0].team, "Y");
        assert_eq!(decisions[1].team, "Z");
        assert_eq!(decisions[2].label, "B Bowl");
    }

    #[test]
    fn winner_first_mode_picks_a_side_per_bowl() {
        let season = test_season();
        let ctx = RankingContext::default();
        let model = trained_model();
        let decisions = decide_with_model(&model, &season, &ctx).unwrap();

        assert_eq!(decisions.len(), 2);
        for d in &decisions {
            assert!(d.confidence >= 0.5 && d.confidence <= 1.0);
        }
        // Oregon's profile dominates Florida State's, and the model was
        // trained to favor the dominant side.
        let rose = decisions.iter().find(|d| d.label == "Rose Bowl").unwrap();
        assert_eq!(rose.team, "Oregon");
    }

    #[test]
    fn alphabetical_mode_is_blind_to_the_recorded_result() {
        let mut season = test_season();
        let ctx = RankingContext {
            feature_order: FeatureOrder::Alphabetical,
            ..RankingContext::default()
        };
        let model = trained_model();

        let forward = decide_with_model(&model, &season, &ctx).unwrap();
        // Flip the recorded result of every bowl; alphabetical slots see the
        // same matchup either way.
        for b in &mut season.bowls {
            std::mem::swap(&mut b.winner, &mut b.loser);
        }
        let flipped = decide_with_model(&model, &season, &ctx).unwrap();

        for (a, b) in forward.iter().zip(flipped.iter()) {
            assert_eq!(a.team, b.team);
            assert_relative_eq!(a.confidence, b.confidence, epsilon = 1e-12);
        }
    }
}
