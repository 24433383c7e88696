//! Board state: placed tiles, open frontier, ruined positions, pattern counts

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::compat::{CompatCache, TileFit};
use crate::error::Error;
use crate::terrain::Terrain;
use crate::tile::{Pattern, Tile};

/// Axial hex coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub q: i32,
    pub r: i32,
}

/// Direction vectors in axial coordinates (dq, dr). The index doubles as
/// the tile side facing that neighbor; direction `d` and `(d + 3) % 6`
/// are opposite.
pub const OFFSETS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Seed position occupied by the starting grass tile.
pub const ORIGIN: Pos = Pos::new(0, 0);

impl Pos {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Neighbor in direction (0-5).
    pub fn neighbor(&self, direction: u8) -> Pos {
        let (dq, dr) = OFFSETS[direction as usize % 6];
        Pos::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, indexed by direction.
    pub fn neighbors(&self) -> [Pos; 6] {
        let mut out = [*self; 6];
        for (d, slot) in out.iter_mut().enumerate() {
            *slot = self.neighbor(d as u8);
        }
        out
    }
}

/// The mutable grid state.
///
/// `place` and `remove` are the single source of truth for the derived
/// structures; nothing on the hot path recomputes them from scratch.
/// Invariants held after every mutation:
/// - `open` is exactly the unoccupied positions with an occupied neighbor
///   (while the board is empty, the last vacated position stays open as
///   the rebuild point);
/// - `ruined[p]` counts p's legal-but-imperfect edges, so membership is
///   exactly the occupied positions with at least one such edge;
/// - `counter[pat]` is exactly the number of placed tiles with canonical
///   pattern `pat`.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) tiles: FxHashMap<Pos, Tile>,
    /// Insertion order of `tiles`, preserved for persistence.
    pub(crate) order: Vec<Pos>,
    pub(crate) open: FxHashSet<Pos>,
    pub(crate) ruined: FxHashMap<Pos, u32>,
    pub(crate) counter: FxHashMap<Pattern, u32>,
    /// Shared between clones; holds only pure input-keyed results.
    pub(crate) cache: Arc<CompatCache>,
}

impl Board {
    /// A board holding only the seed tile: all grass at the origin.
    pub fn new() -> Self {
        let mut board = Self::bare();
        let seed = Tile::from_sides([Terrain::Grass; 6]);
        board
            .place(ORIGIN, seed)
            .expect("seed placement on an empty board cannot fail");
        board
    }

    /// Empty board with only the origin open. Used by `new` and by the
    /// loader, which replays a file from scratch.
    pub(crate) fn bare() -> Self {
        let mut open = FxHashSet::default();
        open.insert(ORIGIN);
        Board {
            tiles: FxHashMap::default(),
            order: Vec::new(),
            open,
            ruined: FxHashMap::default(),
            counter: FxHashMap::default(),
            cache: Arc::new(CompatCache::new()),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.tiles.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles in insertion order.
    pub fn placements(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.order.iter().map(move |&pos| (pos, self.tiles[&pos]))
    }

    /// The frontier of candidate positions.
    pub fn open_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.open.iter().copied()
    }

    pub fn is_ruined(&self, pos: Pos) -> bool {
        self.ruined.contains_key(&pos)
    }

    /// Number of distinct ruined positions.
    pub fn ruined_count(&self) -> usize {
        self.ruined.len()
    }

    /// Count of placed tiles sharing `tile`'s canonical pattern.
    pub fn pattern_count(&self, tile: Tile) -> u32 {
        self.counter.get(&tile.pattern()).copied().unwrap_or(0)
    }

    // ========================================================================
    // COMPATIBILITY QUERIES
    // ========================================================================

    /// Composite virtual neighbor for `pos`: side `d` carries the occupied
    /// neighbor's terrain facing back toward `pos`, or `Open`. Validity and
    /// ruin checks then reduce to a single tile-vs-tile comparison.
    pub fn outer_tile(&self, pos: Pos) -> Tile {
        let mut sides = [Terrain::Open; 6];
        for d in 0..6u8 {
            if let Some(neighbor) = self.tiles.get(&pos.neighbor(d)) {
                sides[d as usize] = neighbor.side((d + 3) % 6);
            }
        }
        Tile::from_sides(sides)
    }

    /// How `tile` would sit against its neighbors at `pos`.
    pub(crate) fn fit_at(&self, pos: Pos, tile: Tile) -> TileFit {
        self.cache.compare(tile, self.outer_tile(pos))
    }

    /// A placement is valid on an open (hence unoccupied, attached)
    /// position whose six edges are all legal.
    pub fn is_valid_placement(&self, pos: Pos, tile: Tile) -> bool {
        self.open.contains(&pos) && self.fit_at(pos, tile).valid
    }

    pub(crate) fn has_occupied_neighbor(&self, pos: Pos) -> bool {
        (0..6u8).any(|d| self.tiles.contains_key(&pos.neighbor(d)))
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place `tile` at `pos`, maintaining every derived structure. Touches
    /// only the six neighbors, so a speculative place/remove pair is cheap
    /// enough for the rating loop.
    pub fn place(&mut self, pos: Pos, tile: Tile) -> Result<(), Error> {
        let fit = self.fit_at(pos, tile);
        if !self.open.contains(&pos) || !fit.valid {
            return Err(Error::InvalidPlacement { pos });
        }

        self.tiles.insert(pos, tile);
        self.order.push(pos);
        *self.counter.entry(tile.pattern()).or_insert(0) += 1;
        self.open.remove(&pos);

        for d in 0..6u8 {
            let adj = pos.neighbor(d);
            // An imperfect edge ruins both endpoints. Some(false) implies
            // the neighbor is occupied; open edges report None.
            if fit.perfect[d as usize] == Some(false) {
                *self.ruined.entry(pos).or_insert(0) += 1;
                *self.ruined.entry(adj).or_insert(0) += 1;
            }
            if !self.tiles.contains_key(&adj) {
                self.open.insert(adj);
            }
        }

        Ok(())
    }

    /// Exact inverse of `place`. A position leaves `ruined` only once no
    /// remaining edge justifies it.
    pub fn remove(&mut self, pos: Pos) -> Result<Tile, Error> {
        let tile = match self.tiles.get(&pos) {
            Some(&tile) => tile,
            None => return Err(Error::InvalidPlacement { pos }),
        };

        // Edge fits recomputed while the tile is still down; outer_tile
        // never looks at pos itself.
        let fit = self.fit_at(pos, tile);
        for d in 0..6u8 {
            if fit.perfect[d as usize] == Some(false) {
                Self::unruin(&mut self.ruined, pos);
                Self::unruin(&mut self.ruined, pos.neighbor(d));
            }
        }

        self.tiles.remove(&pos);
        if self.order.last() == Some(&pos) {
            // Speculative trials always undo the latest placement.
            self.order.pop();
        } else {
            self.order.retain(|&p| p != pos);
        }

        if let Some(count) = self.counter.get_mut(&tile.pattern()) {
            *count -= 1;
            if *count == 0 {
                self.counter.remove(&tile.pattern());
            }
        }

        if self.has_occupied_neighbor(pos) || self.is_empty() {
            self.open.insert(pos);
        }
        for adj in pos.neighbors() {
            if !self.tiles.contains_key(&adj) && !self.has_occupied_neighbor(adj) {
                self.open.remove(&adj);
            }
        }

        Ok(tile)
    }

    fn unruin(ruined: &mut FxHashMap<Pos, u32>, pos: Pos) {
        if let Some(count) = ruined.get_mut(&pos) {
            *count -= 1;
            if *count == 0 {
                ruined.remove(&pos);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// State equality over everything but the shared cache.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
            && self.order == other.order
            && self.open == other.open
            && self.ruined == other.ruined
            && self.counter == other.counter
    }
}

impl Eq for Board {}
