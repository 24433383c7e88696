//! tilerank CLI - Placement advisor for a hex tile-laying game
//!
//! Commands:
//! - suggest: rank every legal placement of a drawn tile
//! - place: validate and record one placement
//! - show: summarize a saved board

use clap::{Parser, Subcommand};

mod place;
mod show;
mod suggest;

#[derive(Parser)]
#[command(name = "tilerank")]
#[command(about = "Placement advisor for a hex tile-laying game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the best placements for a drawn tile
    Suggest(suggest::SuggestArgs),
    /// Validate and record one placement
    Place(place::PlaceArgs),
    /// Summarize a saved board
    Show(show::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest(args) => suggest::run(args),
        Commands::Place(args) => place::run(args),
        Commands::Show(args) => show::run(args),
    }
}
