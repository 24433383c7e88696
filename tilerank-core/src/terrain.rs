//! Terrain kinds and the edge compatibility rules between them

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of a tile's six side terrains.
///
/// The declaration order fixes the `Ord` used to pick canonical tile
/// patterns, so it must not be rearranged. `Open` is a synthetic value
/// meaning "no tile here"; it only ever appears on composite neighbor
/// tiles at the board edge, never on a placed tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Grass,
    Forest,
    Ranch,
    Dwelling,
    Water,
    Station,
    Train,
    Coast,
    Open,
}

impl Terrain {
    /// Single-letter code used in tile strings and saved boards.
    pub fn letter(self) -> char {
        match self {
            Terrain::Grass => 'G',
            Terrain::Forest => 'F',
            Terrain::Ranch => 'R',
            Terrain::Dwelling => 'D',
            Terrain::Water => 'W',
            Terrain::Station => 'S',
            Terrain::Train => 'T',
            Terrain::Coast => 'C',
            Terrain::Open => 'O',
        }
    }

    /// True for terrains that demand exact continuation across an edge
    /// unless a named bridge exception applies.
    pub fn is_restricted(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Train)
    }
}

impl TryFrom<char> for Terrain {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Error> {
        match c.to_ascii_uppercase() {
            'G' => Ok(Terrain::Grass),
            'F' => Ok(Terrain::Forest),
            'R' => Ok(Terrain::Ranch),
            'D' => Ok(Terrain::Dwelling),
            'W' => Ok(Terrain::Water),
            'S' => Ok(Terrain::Station),
            'T' => Ok(Terrain::Train),
            'C' => Ok(Terrain::Coast),
            'O' => Ok(Terrain::Open),
            _ => Err(Error::InvalidTileDefinition {
                reason: format!("unknown terrain letter '{}'", c),
            }),
        }
    }
}

/// Outcome of comparing the terrains on two facing tile sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeFit {
    /// The two terrains may legally abut.
    pub valid: bool,
    /// The abutment does not degrade either tile. `None` when one side is
    /// `Open`: no constraint exists yet because the far side is unbuilt.
    pub perfect: Option<bool>,
}

/// Unordered pair membership test, so the rules below read like the
/// rulebook ("water beside station") without caring about argument order.
fn is_pair(a: Terrain, b: Terrain, x: Terrain, y: Terrain) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

/// Compare two facing terrains.
///
/// WATER and TRAIN are strict: they require exact continuation except
/// through the bridge exceptions (station bridges water and train, coast
/// bridges water and grass). Every other pair is always legal, but only
/// non-degrading ("perfect") on an exact match or an explicitly accepted
/// combination. Symmetric in its arguments.
pub fn compare_terrains(a: Terrain, b: Terrain) -> EdgeFit {
    if a == Terrain::Open || b == Terrain::Open {
        return EdgeFit {
            valid: true,
            perfect: None,
        };
    }

    let matching = a == b;
    let restricted = a.is_restricted() || b.is_restricted();
    let excepted = is_pair(a, b, Terrain::Water, Terrain::Station)
        || is_pair(a, b, Terrain::Water, Terrain::Coast)
        || is_pair(a, b, Terrain::Train, Terrain::Station);
    let accepted = excepted
        || is_pair(a, b, Terrain::Coast, Terrain::Grass)
        || is_pair(a, b, Terrain::Coast, Terrain::Station)
        || is_pair(a, b, Terrain::Grass, Terrain::Station);

    EdgeFit {
        valid: matching || excepted || !restricted,
        perfect: Some(matching || accepted),
    }
}
