use std::io;

use crate::decide::Decision;
use crate::ranking_context::RankingContext;
use crate::team::{Team, TeamTable};

/// Ranking listing, ascending by combined score.
pub fn write_rankings<W: io::Write>(
    out: &mut W,
    teams: &TeamTable,
    ctx: &RankingContext,
) -> io::Result<()> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| {
        a.combined_score(ctx)
            .partial_cmp(&b.combined_score(ctx))
            .unwrap()
    });

    for t in ranked {
        writeln!(out, "{:24} {:>12.8}", t.name, t.combined_score(ctx))?;
    }
    Ok(())
}

/// One `confidence,label,team` line per decided bowl.
pub fn write_decisions<W: io::Write>(out: &mut W, decisions: &[Decision]) -> io::Result<()> {
    for d in decisions {
        writeln!(out, "{},{},{}", d.confidence, d.label, d.team)?;
    }
    Ok(())
}
