//! Suggest command - stream the search and report the tied-best placements

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tilerank_core::{Board, Pos, Score, Tile};
use tilerank_solver::{SolveUpdate, Solver};

#[derive(Args)]
pub struct SuggestArgs {
    /// Saved board file
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Tile definition: 1 letter (homogeneous) or 6 letters (sides 0..5)
    pub tile: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Suggestion {
    pos: Pos,
    ori: u8,
    score: Score,
}

pub fn run(args: SuggestArgs) -> Result<()> {
    let board = Board::load(&args.board)
        .with_context(|| format!("failed to load board: {}", args.board.display()))?;
    let tile: Tile = args
        .tile
        .parse()
        .with_context(|| format!("bad tile definition '{}'", args.tile))?;

    let total = board.open_positions().count();
    tracing::info!("rating {} open positions for tile {}", total, tile);

    let suggestions = stream_search(&board, tile, total, args.json)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else if suggestions.is_empty() {
        println!("Tile {} is currently unplayable.", tile);
    } else {
        println!(
            "{} tied-best placement(s) for {}:",
            suggestions.len(),
            tile
        );
        for s in &suggestions {
            println!(
                "  ({:3}, {:3}) ori {}  [ruins {}, flexibility {}, opens {}]",
                s.pos.q, s.pos.r, s.ori, s.score.newly_ruined, s.score.flexibility, s.score.new_open
            );
        }
    }

    Ok(())
}

/// Run the solver, ticking a progress bar per evaluated position, and
/// reduce the stream to the sorted tied-best list.
fn stream_search(
    board: &Board,
    tile: Tile,
    total: usize,
    quiet: bool,
) -> Result<Vec<Suggestion>> {
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} positions")
                .expect("static progress template"),
        );
        bar
    };

    let mut solver = Solver::new();
    let handle = solver.solve(board, tile);

    let mut best: Option<Score> = None;
    let mut winners: Vec<(Pos, u8, Score)> = Vec::new();

    for SolveUpdate { pos, scores, .. } in handle.updates() {
        bar.inc(1);
        for (ori, score) in scores {
            match best {
                Some(b) if score > b => {}
                Some(b) if score == b => winners.push((pos, ori, score)),
                _ => {
                    best = Some(score);
                    winners.clear();
                    winners.push((pos, ori, score));
                }
            }
        }
    }
    bar.finish_and_clear();

    winners.sort_unstable_by_key(|&(pos, ori, _)| (pos, ori));
    Ok(winners
        .into_iter()
        .map(|(pos, ori, score)| Suggestion { pos, ori, score })
        .collect())
}
