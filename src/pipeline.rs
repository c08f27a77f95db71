use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::classifier::GaussianNb;
use crate::data_loader::{load_games, split_games, Game};
use crate::decide::{decide_by_score, decide_with_model, Decision};
use crate::error::RankError;
use crate::graph::ResultGraph;
use crate::ranking::score_teams;
use crate::ranking_context::RankingContext;
use crate::report::{write_decisions, write_rankings};
use crate::team::TeamTable;
use crate::trainer::build_training_set;

/// One season's worth of pipeline output: scored teams plus the bowls held
/// out of the ranking graph.
#[derive(Debug)]
pub struct Season {
    pub year: i32,
    pub teams: TeamTable,
    pub bowls: Vec<Game>,
}

/// Records → graph → pruned graph → scored team table.
pub fn build_season(year: i32, games: Vec<Game>, ctx: &RankingContext) -> Result<Season, RankError> {
    let (regular, bowls) = split_games(games);
    let graph = ResultGraph::from_games(&regular);
    let pruned = graph.prune(ctx)?;
    let teams = score_teams(&pruned, ctx);

    info!(
        year,
        regular = regular.len(),
        bowls = bowls.len(),
        teams = teams.len(),
        "season built"
    );
    Ok(Season { year, teams, bowls })
}

/// Single-season mode: rank the field, decide its bowls by combined-score
/// margin, no classifier involved.
pub fn run_single_season(
    results: &Path,
    out_path: &Path,
    ctx: &RankingContext,
) -> Result<(), RankError> {
    let year = year_from_stem(results).unwrap_or(0);
    let games = load_games(results)?;
    let season = build_season(year, games, ctx)?;

    write_rankings(&mut io::stdout().lock(), &season.teams, ctx)?;

    let decisions = decide_by_score(&season, ctx)?;
    write_decision_file(out_path, &decisions)?;
    Ok(())
}

/// Multi-season mode: every season but the chronologically latest trains the
/// classifier, which then scores the latest season's bowls.
pub fn run_season_directory(
    dir: &Path,
    out_path: &Path,
    ctx: &RankingContext,
) -> Result<(), RankError> {
    let mut seasons = Vec::new();
    for (year, path) in season_files(dir)? {
        let games = load_games(&path)?;
        seasons.push(build_season(year, games, ctx)?);
    }

    let Some((target, history)) = seasons.split_last() else {
        return Err(RankError::NoSeasons(dir.to_path_buf()));
    };
    if history.is_empty() {
        return Err(RankError::NotEnoughSeasons(seasons.len()));
    }

    let mut rng = match ctx.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let training_set = build_training_set(history, &mut rng)?;
    let model = GaussianNb::fit(&training_set)?;

    write_rankings(&mut io::stdout().lock(), &target.teams, ctx)?;

    let decisions = decide_with_model(&model, target, ctx)?;
    write_decision_file(out_path, &decisions)?;
    Ok(())
}

/// Per-year result files, `<year>.csv`, sorted chronologically. Anything
/// without a .csv extension is ignored; a .csv file that isn't named after
/// a year is an error.
fn season_files(dir: &Path) -> Result<Vec<(i32, PathBuf)>, RankError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(true, |ext| ext != "csv") {
            continue;
        }
        let year = year_from_stem(&path).ok_or_else(|| RankError::BadSeasonFile(path.clone()))?;
        files.push((year, path));
    }

    if files.is_empty() {
        return Err(RankError::NoSeasons(dir.to_path_buf()));
    }
    files.sort_by_key(|(year, _)| *year);
    Ok(files)
}

fn year_from_stem(path: &Path) -> Option<i32> {
    path.file_stem()?.to_str()?.parse().ok()
}

fn write_decision_file(path: &Path, decisions: &[Decision]) -> Result<(), RankError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_decisions(&mut out, decisions)?;
    out.flush()?;
    Ok(())
}
