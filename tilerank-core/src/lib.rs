//! tilerank-core - Hex tile placement engine
//!
//! This crate provides the core logic for ranking tile placements in a
//! hexagonal tile-laying game:
//! - Terrain kinds and edge compatibility rules
//! - Rotation-canonical tiles (axial hex grid)
//! - Incremental board state (frontier, ruined positions, pattern counts)
//! - Exhaustive placement rating with a tied-best suggestion set
//! - Line-oriented board persistence

pub mod board;
pub mod compat;
pub mod error;
pub mod score;
pub mod store;
pub mod terrain;
pub mod tile;

// Re-exports for convenient access
pub use board::{Board, Pos, OFFSETS, ORIGIN};
pub use compat::{CompatCache, TileFit};
pub use error::{Error, LoadError};
pub use score::Score;
pub use terrain::{compare_terrains, EdgeFit, Terrain};
pub use tile::{Pattern, Tile};
