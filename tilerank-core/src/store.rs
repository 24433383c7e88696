//! Line-oriented board persistence
//!
//! One placed tile per line, `<6-letter code> <q> <r>`, in placement
//! order. The code is the tile's as-placed sides, so no separate
//! orientation field is needed and a load/save cycle is byte-exact.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::board::{Board, Pos};
use crate::error::LoadError;
use crate::tile::Tile;

impl Board {
    /// Load a previously saved board, replaying every line as a placement
    /// in file order. The format only ever stores validated boards, so any
    /// malformed or unplaceable line fails the whole load.
    pub fn load(path: impl AsRef<Path>) -> Result<Board, LoadError> {
        let file = File::open(path)?;
        Board::read_from(BufReader::new(file))
    }

    pub fn read_from(reader: impl BufRead) -> Result<Board, LoadError> {
        let mut board = Board::bare();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            let (tile, pos) = parse_line(&line, lineno)?;
            board
                .place(pos, tile)
                .map_err(|source| LoadError::Placement {
                    line: lineno,
                    source,
                })?;
        }

        Ok(board)
    }

    /// Write the board in placement order.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    pub fn write_to(&self, mut writer: impl Write) -> std::io::Result<()> {
        for (pos, tile) in self.placements() {
            writeln!(writer, "{} {} {}", tile, pos.q, pos.r)?;
        }
        writer.flush()
    }
}

fn parse_line(line: &str, lineno: usize) -> Result<(Tile, Pos), LoadError> {
    let malformed = |reason: &str| LoadError::Malformed {
        line: lineno,
        reason: reason.to_string(),
    };

    let mut fields = line.split_whitespace();
    let code = fields.next().ok_or_else(|| malformed("empty line"))?;
    let q = fields.next().ok_or_else(|| malformed("missing q coordinate"))?;
    let r = fields.next().ok_or_else(|| malformed("missing r coordinate"))?;
    if fields.next().is_some() {
        return Err(malformed("trailing fields"));
    }

    if code.chars().count() != 6 {
        return Err(malformed("terrain code must be exactly 6 letters"));
    }
    let tile = Tile::parse(code).map_err(|e| malformed(&e.to_string()))?;

    let q: i32 = q.parse().map_err(|_| malformed("bad q coordinate"))?;
    let r: i32 = r.parse().map_err(|_| malformed("bad r coordinate"))?;

    Ok((tile, Pos::new(q, r)))
}
