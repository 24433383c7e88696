//! Whole-tile compatibility and its memoization cache

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::terrain::compare_terrains;
use crate::tile::Tile;

/// Outcome of comparing a tile against the composite tile formed by its
/// six would-be neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileFit {
    /// All six edges are legal.
    pub valid: bool,
    /// Per-side perfect flags; `None` where the side borders `Open`.
    /// Meaningless when `valid` is false.
    pub perfect: [Option<bool>; 6],
}

impl TileFit {
    /// No edge is legal-but-degrading. `Open` edges do not count against.
    pub fn is_clean(&self) -> bool {
        self.valid && !self.perfect.contains(&Some(false))
    }
}

/// Compare side `k` of `inner` against side `k` of `outer` for all six
/// sides. Composite outer tiles are synthesized so that their side `k`
/// already faces back toward the inner position, and both tiles carry
/// their own orientation, so a plain side-by-side walk suffices.
fn compare_tiles_uncached(inner: Tile, outer: Tile) -> TileFit {
    let mut valid = true;
    let mut perfect = [None; 6];

    for k in 0..6u8 {
        let fit = compare_terrains(inner.side(k), outer.side(k));
        valid &= fit.valid;
        perfect[k as usize] = fit.perfect;
    }

    TileFit { valid, perfect }
}

/// Memo table for tile-vs-tile comparisons, keyed by the full
/// (pattern, orientation) pair of both tiles.
///
/// The search performs thousands of comparisons per suggestion while the
/// tile alphabet stays small, so nearly every call after warm-up is a hit.
/// The entries are pure input-keyed values; a racing double insert just
/// re-stores the same result.
#[derive(Debug, Default)]
pub struct CompatCache {
    entries: Mutex<FxHashMap<(Tile, Tile), TileFit>>,
}

impl CompatCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(&self, inner: Tile, outer: Tile) -> TileFit {
        let key = (inner, outer);
        if let Some(&fit) = self.entries.lock().unwrap().get(&key) {
            return fit;
        }

        let fit = compare_tiles_uncached(inner, outer);
        self.entries.lock().unwrap().insert(key, fit);
        fit
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_tiles_fit_perfectly() {
        let tile = Tile::parse("gfrdwt").unwrap();
        let fit = compare_tiles_uncached(tile, tile);
        assert!(fit.valid);
        assert_eq!(fit.perfect, [Some(true); 6]);
        assert!(fit.is_clean());
    }

    use crate::terrain::Terrain::{Grass, Open};

    /// Composite with `terrain` on side 0 and open everywhere else.
    fn lone_neighbor(terrain: crate::terrain::Terrain) -> Tile {
        Tile::from_sides([terrain, Open, Open, Open, Open, Open])
    }

    #[test]
    fn test_open_sides_are_unconstrained() {
        let inner = Tile::parse("w").unwrap();
        let outer = Tile::from_sides([Open; 6]);
        let fit = compare_tiles_uncached(inner, outer);
        assert!(fit.valid);
        assert_eq!(fit.perfect, [None; 6]);
        assert!(fit.is_clean());
    }

    #[test]
    fn test_one_bad_edge_invalidates() {
        // Water against grass on side 0, open elsewhere.
        let inner = Tile::parse("wggggg").unwrap();
        assert!(!compare_tiles_uncached(inner, lone_neighbor(Grass)).valid);
    }

    #[test]
    fn test_degrading_edge_is_valid_but_not_clean() {
        let inner = Tile::parse("r").unwrap();
        let fit = compare_tiles_uncached(inner, lone_neighbor(Grass));
        assert!(fit.valid);
        assert_eq!(fit.perfect[0], Some(false));
        assert!(!fit.is_clean());
    }

    #[test]
    fn test_cache_coalesces_repeat_queries() {
        let cache = CompatCache::new();
        let inner = Tile::parse("gfrrrr").unwrap();
        let outer = Tile::parse("g").unwrap();

        let first = cache.compare(inner, outer);
        let second = cache.compare(inner, outer);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        // A different orientation is a different key.
        cache.compare(inner.oriented(1), outer);
        assert_eq!(cache.len(), 2);
    }
}
