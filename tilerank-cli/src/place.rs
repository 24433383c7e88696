//! Place command - apply one placement to a saved board

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tilerank_core::{Board, Pos, Tile};

#[derive(Args)]
pub struct PlaceArgs {
    /// Saved board file (rewritten in place)
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Tile definition: 1 letter (homogeneous) or 6 letters (sides 0..5)
    pub tile: String,

    /// Axial q coordinate
    pub q: i32,

    /// Axial r coordinate
    pub r: i32,

    /// Rotation applied to the tile as written (0-5)
    #[arg(long, default_value = "0")]
    pub ori: u8,
}

pub fn run(args: PlaceArgs) -> Result<()> {
    let mut board = Board::load(&args.board)
        .with_context(|| format!("failed to load board: {}", args.board.display()))?;
    let tile: Tile = args
        .tile
        .parse()
        .with_context(|| format!("bad tile definition '{}'", args.tile))?;
    let tile = tile.oriented(tile.ori() + args.ori % 6);

    let pos = Pos::new(args.q, args.r);
    board
        .place(pos, tile)
        .with_context(|| format!("cannot place {} at ({}, {})", tile, args.q, args.r))?;

    if board.is_ruined(pos) {
        tracing::warn!("placement at ({}, {}) is ruined", args.q, args.r);
    }

    board
        .save(&args.board)
        .with_context(|| format!("failed to save board: {}", args.board.display()))?;

    println!(
        "Placed {} at ({}, {}); {} tiles, {} ruined.",
        tile,
        args.q,
        args.r,
        board.len(),
        board.ruined_count()
    );
    Ok(())
}
