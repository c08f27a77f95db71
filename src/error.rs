use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad results record: {0}")]
    Record(#[from] csv::Error),

    #[error("unparseable date {text:?} (expected e.g. \"Sep 6 2014\")")]
    Date {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("season file {0} is not named after a year")]
    BadSeasonFile(PathBuf),

    #[error("no season files found in {0}")]
    NoSeasons(PathBuf),

    #[error("need at least two seasons to train on, found {0}")]
    NotEnoughSeasons(usize),

    #[error("{team} should have won more than {wins} or lost more than {losses} games")]
    UnderConnected {
        team: String,
        wins: usize,
        losses: usize,
    },

    #[error("unknown team {0:?}")]
    UnknownTeam(String),

    #[error("degenerate training set: {0}")]
    DegenerateTraining(String),
}
