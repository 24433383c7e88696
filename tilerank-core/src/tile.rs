//! Tiles: a rotation-canonical six-terrain pattern plus a placed orientation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::terrain::Terrain;

/// Canonical terrain pattern, the rotation-invariant identity of a tile.
pub type Pattern = [Terrain; 6];

/// A hexagonal tile.
///
/// `pattern` is the lexicographically smallest cyclic rotation of the six
/// side terrains, so two tiles showing the same sides in any rotation have
/// equal patterns. `ori` records how far the canonical pattern has been
/// rotated as placed: side `k` shows `pattern[(k - ori) mod 6]`.
///
/// Pattern-keyed structures (the board counter, the compatibility cache)
/// key on `pattern` alone; `ori` only matters for side lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pattern: Pattern,
    ori: u8,
}

impl Tile {
    /// Canonicalize raw as-placed sides. The returned tile's `side(k)`
    /// reproduces `sides[k]` exactly.
    pub fn from_sides(sides: [Terrain; 6]) -> Self {
        let mut pattern = sides;
        let mut ori = 0u8;

        for rot in 1..6u8 {
            let mut rotated = [Terrain::Open; 6];
            for (i, slot) in rotated.iter_mut().enumerate() {
                *slot = sides[(i + rot as usize) % 6];
            }
            if rotated < pattern {
                pattern = rotated;
                ori = rot;
            }
        }

        Tile { pattern, ori }
    }

    /// Parse a tile definition string: one letter expands to a homogeneous
    /// tile, six letters give the sides 0..5 as placed. `O` is rejected:
    /// the open sentinel never appears on a real tile.
    pub fn parse(code: &str) -> Result<Self, Error> {
        let chars: Vec<char> = code.chars().collect();
        let mut sides = [Terrain::Open; 6];

        match chars.as_slice() {
            [c] => {
                let t = Terrain::try_from(*c)?;
                sides = [t; 6];
            }
            six if six.len() == 6 => {
                for (slot, &c) in sides.iter_mut().zip(six) {
                    *slot = Terrain::try_from(c)?;
                }
            }
            _ => {
                return Err(Error::InvalidTileDefinition {
                    reason: format!("expected 1 or 6 letters, got {}", chars.len()),
                })
            }
        }

        if sides.contains(&Terrain::Open) {
            return Err(Error::InvalidTileDefinition {
                reason: "'O' (open) cannot appear on a tile".to_string(),
            });
        }

        Ok(Tile::from_sides(sides))
    }

    /// Same pattern at a different placed rotation.
    pub fn oriented(self, ori: u8) -> Self {
        Tile {
            pattern: self.pattern,
            ori: ori % 6,
        }
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn ori(&self) -> u8 {
        self.ori
    }

    /// Terrain shown on side `k` (0..5) under the placed orientation.
    pub fn side(&self, k: u8) -> Terrain {
        let idx = (k as i8 - self.ori as i8).rem_euclid(6) as usize;
        self.pattern[idx]
    }

    /// True when the canonical patterns match, i.e. the two tiles are the
    /// same physical tile regardless of rotation.
    pub fn same_pattern(&self, other: &Tile) -> bool {
        self.pattern == other.pattern
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Tile::parse(s)
    }
}

/// Emits the six as-placed side letters, the exact inverse of `parse` for
/// six-letter input. Saved boards rely on this for byte-exact round trips.
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for k in 0..6 {
            write!(f, "{}", self.side(k).letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_letter() {
        let tile = Tile::parse("w").unwrap();
        assert_eq!(tile.to_string(), "WWWWWW");
        assert_eq!(tile.ori(), 0);
    }

    #[test]
    fn test_parse_six_letters() {
        let tile = Tile::parse("gfrrrr").unwrap();
        assert_eq!(tile.to_string(), "GFRRRR");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Tile::parse("").is_err());
        assert!(Tile::parse("gg").is_err());
        assert!(Tile::parse("gfrrrrr").is_err());
        assert!(Tile::parse("gfrrrx").is_err());
        assert!(Tile::parse("o").is_err());
        assert!(Tile::parse("gggggo").is_err());
    }

    #[test]
    fn test_rotation_invariant_pattern() {
        let tile1 = Tile::parse("gfrrrr").unwrap();
        let tile2 = Tile::parse("frrrrg").unwrap();
        assert!(tile1.same_pattern(&tile2));

        // All six rotations of any sequence agree on the pattern.
        let sides = "rgggrr";
        let reference = Tile::parse(sides).unwrap();
        let chars: Vec<char> = sides.chars().collect();
        for rot in 0..6 {
            let rotated: String = (0..6).map(|i| chars[(i + rot) % 6]).collect();
            assert!(Tile::parse(&rotated).unwrap().same_pattern(&reference));
        }
    }

    #[test]
    fn test_side_lookup_respects_orientation() {
        // RGGGRR canonicalizes to GGGRRR at ori 1; the sides still read
        // back as written.
        let tile = Tile::parse("rgggrr").unwrap();
        assert_eq!(tile.ori(), 1);
        let expected = [
            Terrain::Ranch,
            Terrain::Grass,
            Terrain::Grass,
            Terrain::Grass,
            Terrain::Ranch,
            Terrain::Ranch,
        ];
        for k in 0..6u8 {
            assert_eq!(tile.side(k), expected[k as usize]);
        }
    }

    #[test]
    fn test_oriented_wraps() {
        let tile = Tile::parse("gfrrrr").unwrap();
        assert_eq!(tile.oriented(7).ori(), 1);
        assert_eq!(tile.oriented(3).pattern(), tile.pattern());
    }

    #[test]
    fn test_display_parse_round_trip() {
        for code in ["GFRDWT", "WWGGGG", "GGGGGW", "SSSSSS"] {
            let tile = Tile::parse(code).unwrap();
            assert_eq!(tile.to_string(), code);
            assert_eq!(Tile::parse(&tile.to_string()).unwrap(), tile);
        }
    }
}
