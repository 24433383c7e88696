//! Show command - summarize a saved board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tilerank_core::{Board, Pos};

#[derive(Args)]
pub struct ShowArgs {
    /// Saved board file
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// List every placed tile, not just the summary
    #[arg(long)]
    pub tiles: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let board = Board::load(&args.board)
        .with_context(|| format!("failed to load board: {}", args.board.display()))?;

    println!(
        "{} tiles, {} open positions, {} ruined",
        board.len(),
        board.open_positions().count(),
        board.ruined_count()
    );

    let mut ruined: Vec<Pos> = board
        .placements()
        .map(|(pos, _)| pos)
        .filter(|&pos| board.is_ruined(pos))
        .collect();
    ruined.sort_unstable();
    if !ruined.is_empty() {
        println!("Ruined positions:");
        for pos in ruined {
            println!("  ({}, {})", pos.q, pos.r);
        }
    }

    if args.tiles {
        println!("Placements:");
        for (pos, tile) in board.placements() {
            println!("  {} ({}, {})", tile, pos.q, pos.r);
        }
    }

    Ok(())
}
