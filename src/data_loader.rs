use std::io;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::error::RankError;

const DATE_FORMAT: &str = "%b %e %Y";

// Record shape as it appears in the season files. Kept separate from Game so
// the serde-facing struct never leaks past this module.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawGame {
    winner: String,
    loser: String,
    date: String,
    week: u32,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub winner: String,
    pub loser: String,
    pub date: NaiveDate,
    pub week: u32,
    pub notes: String,
}

impl Game {
    fn from_raw(raw: RawGame) -> Result<Self, RankError> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT).map_err(|source| {
            RankError::Date {
                text: raw.date.clone(),
                source,
            }
        })?;

        Ok(Self {
            winner: canonical_name(&raw.winner),
            loser: canonical_name(&raw.loser),
            date,
            week: raw.week,
            notes: raw.notes.trim().to_string(),
        })
    }

    // Bowls and playoff games fall in January or late December. Everything
    // else feeds the ranking graph.
    pub fn is_bowl(&self) -> bool {
        self.date.month() == 1 || (self.date.month() == 12 && self.date.day() > 14)
    }

    pub fn label(&self) -> String {
        if self.notes.is_empty() {
            format!("{} vs {}", self.winner, self.loser)
        } else {
            self.notes.clone()
        }
    }
}

// Poll positions show up as a parenthesized prefix, e.g. "(3) Alabama".
// The canonical name is whatever follows it.
pub fn canonical_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix('(') {
        if let Some(close) = rest.find(')') {
            return rest[close + 1..].trim_start().to_string();
        }
    }
    trimmed.to_string()
}

pub fn load_games(path: &Path) -> Result<Vec<Game>, RankError> {
    let reader = csv::Reader::from_path(path)?;
    parse_games(reader)
}

fn parse_games<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Game>, RankError> {
    let mut games = Vec::new();
    for record in reader.deserialize::<RawGame>() {
        games.push(Game::from_raw(record?)?);
    }
    Ok(games)
}

/// Splits a season into (regular games, bowl games).
pub fn split_games(games: Vec<Game>) -> (Vec<Game>, Vec<Game>) {
    games.into_iter().partition(|g| !g.is_bowl())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn canonical_name_strips_rank_prefix() {
        assert_eq!(canonical_name("(3) Alabama"), "Alabama");
        assert_eq!(canonical_name("(14) Ohio State"), "Ohio State");
        assert_eq!(canonical_name("Ohio State"), "Ohio State");
        assert_eq!(canonical_name("  Baylor "), "Baylor");
    }

    #[test]
    fn parses_well_formed_records() {
        let data = "\
Winner,Loser,Date,Week,Notes
(2) Alabama,West Virginia,Aug 30 2014,1,Chick-fil-A Kickoff
Oregon,South Dakota,Sep 6 2014,2,
";
        let games = parse_games(reader(data)).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].winner, "Alabama");
        assert_eq!(games[0].loser, "West Virginia");
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2014, 8, 30).unwrap());
        assert_eq!(games[0].week, 1);
        assert_eq!(games[0].label(), "Chick-fil-A Kickoff");
        assert_eq!(games[1].label(), "Oregon vs South Dakota");
    }

    #[test]
    fn bad_date_aborts_parsing() {
        let data = "\
Winner,Loser,Date,Week,Notes
Oregon,South Dakota,sometime in fall,2,
";
        let err = parse_games(reader(data)).unwrap_err();
        assert!(matches!(err, RankError::Date { .. }));
    }

    #[test]
    fn non_integer_week_aborts_parsing() {
        let data = "\
Winner,Loser,Date,Week,Notes
Oregon,South Dakota,Sep 6 2014,two,
";
        assert!(matches!(
            parse_games(reader(data)),
            Err(RankError::Record(_))
        ));
    }

    #[test]
    fn missing_column_aborts_parsing() {
        let data = "\
Winner,Loser,Date
Oregon,South Dakota,Sep 6 2014
";
        assert!(matches!(
            parse_games(reader(data)),
            Err(RankError::Record(_))
        ));
    }

    fn game_on(y: i32, m: u32, d: u32) -> Game {
        Game {
            winner: "A".into(),
            loser: "B".into(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            week: 1,
            notes: String::new(),
        }
    }

    #[test]
    fn bowl_classification_follows_date_rule() {
        assert!(game_on(2015, 1, 1).is_bowl());
        assert!(game_on(2015, 1, 12).is_bowl());
        assert!(game_on(2014, 12, 20).is_bowl());
        assert!(!game_on(2014, 12, 10).is_bowl());
        assert!(!game_on(2014, 12, 14).is_bowl());
        assert!(!game_on(2014, 9, 6).is_bowl());
    }

    #[test]
    fn split_separates_bowls_from_regular_games() {
        let games = vec![game_on(2014, 9, 6), game_on(2015, 1, 1), game_on(2014, 11, 29)];
        let (regular, bowls) = split_games(games);
        assert_eq!(regular.len(), 2);
        assert_eq!(bowls.len(), 1);
    }
}
