//! Placement rating and the tied-best suggestion search

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos};
use crate::error::Error;
use crate::tile::Tile;

/// Quality of one candidate placement, compared lexicographically with
/// smaller meaning better.
///
/// The field order is the comparison order:
/// 1. positions newly turned ruined by the placement;
/// 2. negated flexibility: how many already-seen tiles (with multiplicity)
///    could still take each resulting open neighbor without ruining
///    anything — preserving options is rewarded;
/// 3. frontier growth: open positions added, so compact play wins ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub newly_ruined: u32,
    pub flexibility: i64,
    pub new_open: u32,
}

impl Board {
    /// Weight of "safe alternative" tiles for an open position: the number
    /// of placed tiles, by canonical pattern and multiplicity, that have at
    /// least one orientation fitting `pos` without creating any imperfect
    /// edge. Occupied positions weigh zero.
    pub fn safe_alternatives(&self, pos: Pos) -> u32 {
        if !self.open.contains(&pos) {
            return 0;
        }

        let outer = self.outer_tile(pos);
        let mut total = 0;
        for (&pattern, &count) in &self.counter {
            let base = Tile::from_sides(pattern);
            let fits = (0..6u8).any(|ori| self.cache.compare(base.oriented(ori), outer).is_clean());
            if fits {
                total += count;
            }
        }
        total
    }

    /// Score a single candidate placement. Performs the speculative
    /// place/remove pair, leaving the board exactly as found.
    pub fn score_placement(&mut self, pos: Pos, tile: Tile) -> Result<Score, Error> {
        if !self.is_valid_placement(pos, tile) {
            return Err(Error::InvalidPlacement { pos });
        }

        let new_open = pos
            .neighbors()
            .into_iter()
            .filter(|adj| !self.tiles.contains_key(adj) && !self.open.contains(adj))
            .count() as u32;

        let pre_ruined = self.ruined_count();
        self.place(pos, tile)?;

        let preserved: u32 = pos
            .neighbors()
            .into_iter()
            .filter(|adj| self.open.contains(adj))
            .map(|adj| self.safe_alternatives(adj))
            .sum();
        let newly_ruined = (self.ruined_count() - pre_ruined) as u32;

        self.remove(pos)?;

        Ok(Score {
            newly_ruined,
            flexibility: -i64::from(preserved),
            new_open,
        })
    }

    /// All scored orientations of `tile`'s pattern at one open position.
    /// The tile's own orientation is irrelevant; all six are tried.
    pub fn rate_position(&mut self, pos: Pos, tile: Tile) -> Vec<(u8, Score)> {
        let mut scores = Vec::new();
        for ori in 0..6u8 {
            let candidate = tile.oriented(ori);
            if self.is_valid_placement(pos, candidate) {
                // Pre-filtered, so scoring cannot fail here.
                if let Ok(score) = self.score_placement(pos, candidate) {
                    scores.push((ori, score));
                }
            }
        }
        scores
    }

    /// Exhaustively evaluate every open position and orientation and
    /// return the full tied-best set. An empty set means the tile is
    /// currently unplayable, which is a normal outcome. Deterministic:
    /// scores are total-ordered and independent of evaluation order.
    pub fn suggest_placements(&mut self, tile: Tile) -> FxHashSet<(Pos, u8)> {
        let positions: Vec<Pos> = self.open_positions().collect();

        let mut best: Option<Score> = None;
        let mut winners = FxHashSet::default();

        for pos in positions {
            for (ori, score) in self.rate_position(pos, tile) {
                match best {
                    Some(b) if score > b => {}
                    Some(b) if score == b => {
                        winners.insert((pos, ori));
                    }
                    _ => {
                        best = Some(score);
                        winners.clear();
                        winners.insert((pos, ori));
                    }
                }
            }
        }

        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(code: &str) -> Tile {
        Tile::parse(code).unwrap()
    }

    #[test]
    fn test_score_ranch_on_seed() {
        let mut board = Board::new();
        let score = board.score_placement(Pos::new(1, 0), tile("r")).unwrap();
        // Ruins the seed and itself; ranch still fits two of the five new
        // frontier cells plus itself next to the third; grows the frontier
        // by the three cells not already adjacent to the seed.
        assert_eq!(
            score,
            Score {
                newly_ruined: 2,
                flexibility: -3,
                new_open: 3,
            }
        );
    }

    #[test]
    fn test_score_water_edge_outward() {
        let mut board = Board::new();
        let score = board.score_placement(Pos::new(1, 0), tile("wggggg")).unwrap();
        // The water edge faces open land, the grass edge matches the seed:
        // nothing is ruined and every new frontier cell keeps both placed
        // patterns as safe alternatives except the one behind the water.
        assert_eq!(
            score,
            Score {
                newly_ruined: 0,
                flexibility: -9,
                new_open: 3,
            }
        );
    }

    #[test]
    fn test_score_rejects_invalid() {
        let mut board = Board::new();
        assert!(board.score_placement(Pos::new(1, 0), tile("t")).is_err());
    }

    #[test]
    fn test_score_leaves_board_untouched() {
        let mut board = Board::new();
        board.place(Pos::new(1, 0), tile("c")).unwrap();
        let snapshot = board.clone();

        board.score_placement(Pos::new(0, 1), tile("r")).unwrap();
        board.rate_position(Pos::new(0, 1), tile("gfrdgf"));
        board.suggest_placements(tile("d"));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_score_ordering() {
        let a = Score {
            newly_ruined: 0,
            flexibility: -9,
            new_open: 3,
        };
        let b = Score {
            newly_ruined: 2,
            flexibility: -3,
            new_open: 3,
        };
        let c = Score {
            newly_ruined: 0,
            flexibility: -3,
            new_open: 2,
        };
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_suggest_on_fresh_board() {
        let mut board = Board::new();
        let suggestions = board.suggest_placements(tile("r"));

        // Every open position works equally well by symmetry, in every
        // orientation of a homogeneous tile.
        assert_eq!(suggestions.len(), 36);
        for &(pos, ori) in &suggestions {
            assert!(board.is_valid_placement(pos, tile("r").oriented(ori)));
        }
    }

    #[test]
    fn test_suggest_is_deterministic() {
        let mut board = Board::new();
        board.place(Pos::new(1, 0), tile("wggggg")).unwrap();
        board.place(Pos::new(0, 1), tile("ffgggg")).unwrap();

        let first = board.suggest_placements(tile("gfrdgf"));
        let second = board.suggest_placements(tile("gfrdgf"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_suggest_unplayable_tile_is_empty() {
        let mut board = Board::new();
        // All-train tiles cannot touch a lone grass seed anywhere.
        assert!(board.suggest_placements(tile("t")).is_empty());
    }

    #[test]
    fn test_perfect_match_beats_ruinous_one() {
        let mut board = Board::new();
        let suggestions = board.suggest_placements(tile("gfffff"));

        // Some orientation puts the grass side against the seed, ruining
        // nothing, so no ruinous candidate may win.
        assert!(!suggestions.is_empty());
        for &(pos, ori) in &suggestions {
            let score = board
                .score_placement(pos, tile("gfffff").oriented(ori))
                .unwrap();
            assert_eq!(score.newly_ruined, 0);
        }
    }
}
