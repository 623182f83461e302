//! Chess positions.
//!
//! A [`Position`] is a [`QuadBitboard`] plus the transient state a
//! diagram alone does not show: the side to move, the castling
//! rights, the en-passant target, and the two clocks.
//!
//! Rights and en-passant target share one 64-bit `flags` word laid
//! out over board squares. A castling right is present while *both*
//! the king's and the corresponding rook's home-square bits are set,
//! which is what lets the apply step retire rights by simply clearing
//! the source and destination bits of every move. The en-passant
//! target is at most one bit on rank 3 or rank 6.
//!
//! Equality and hashing follow FIDE Article 9.2: two positions are
//! the same if the same player has the same moves available on the
//! same board — the clocks do not participate. Repetition counting
//! depends on this.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::attacks;
use crate::binary::{RANK_3, RANK_6};
use crate::model::{Color, Square};
use crate::quad::QuadBitboard;

/// White kingside castling right: home squares of king and h-rook.
pub const CASTLE_WHITE_KINGSIDE: u64 = 0x0000_0000_0000_0090;
/// White queenside castling right: home squares of king and a-rook.
pub const CASTLE_WHITE_QUEENSIDE: u64 = 0x0000_0000_0000_0011;
/// Black kingside castling right.
pub const CASTLE_BLACK_KINGSIDE: u64 = CASTLE_WHITE_KINGSIDE << 56;
/// Black queenside castling right.
pub const CASTLE_BLACK_QUEENSIDE: u64 = CASTLE_WHITE_QUEENSIDE << 56;

/// The ranks on which an en-passant target bit may stand.
pub const EN_PASSANT_RANKS: u64 = RANK_3 | RANK_6;

#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub qbb: QuadBitboard,
    pub color: Color,
    pub flags: u64,
    pub halfmove_clock: u32,
    pub move_number: u32,
}

/// Article 9.2 identity: board, mover and flags; never the clocks.
impl PartialEq for Position {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.qbb == other.qbb && self.color == other.color && self.flags == other.flags
    }
}

impl Eq for Position {}

impl Hash for Position {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qbb.hash(state);
        self.color.hash(state);
        self.flags.hash(state);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Position {
            qbb: QuadBitboard::startpos(),
            color: Color::WHITE,
            flags: CASTLE_WHITE_KINGSIDE
                | CASTLE_WHITE_QUEENSIDE
                | CASTLE_BLACK_KINGSIDE
                | CASTLE_BLACK_QUEENSIDE,
            halfmove_clock: 0,
            move_number: 1,
        }
    }

    /// Parse a FEN record, either the standard 6-field form or the
    /// abbreviated 4-field form with the clocks defaulting to 0
    /// and 1. Returns `None` on any parse failure.
    pub fn from_fen(fen: &str) -> Option<Self> {
        fen.parse().ok()
    }

    /// Render the position as a 6-field FEN record.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }

    /// Whether the given castling right is still held. The argument
    /// is one of the four `CASTLE_*` masks.
    #[inline]
    pub fn has_right(&self, right: u64) -> bool {
        self.flags & right == right
    }

    /// The en-passant target as a bitboard: a single bit on rank 3
    /// or 6, or zero.
    #[inline]
    pub fn en_passant(&self) -> u64 {
        self.flags & EN_PASSANT_RANKS
    }

    /// The en-passant target square, if a double push just happened.
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        match self.en_passant() {
            0 => None,
            mask => Some(Square::from_u8(mask.trailing_zeros() as u8)),
        }
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        attacks::in_check(self.color, &self.qbb)
    }

    /// Whether neither side retains mating material.
    #[inline]
    pub fn insufficient_material(&self) -> bool {
        self.qbb.insufficient_material()
    }
}

/// The most-repeated position of a game history.
///
/// Returns the `(count, position)` entry with the highest count under
/// Article 9.2 equality, or `None` for an empty history. Ties are
/// broken toward the smallest Zobrist key, which is deterministic for
/// a given history.
pub fn repetitions(history: &[Position]) -> Option<(usize, Position)> {
    let mut buckets: HashMap<Position, usize> = HashMap::with_capacity(history.len());
    for pos in history {
        *buckets.entry(*pos).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .max_by_key(|(pos, count)| (*count, std::cmp::Reverse(pos.zobrist())))
        .map(|(pos, count)| (count, pos))
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.qbb, f)?;

        f.write_char(' ')?;
        f.write_char(match self.color {
            Color::WHITE => 'w',
            Color::BLACK => 'b',
        })?;

        f.write_char(' ')?;
        let rights = [
            (CASTLE_WHITE_KINGSIDE, 'K'),
            (CASTLE_WHITE_QUEENSIDE, 'Q'),
            (CASTLE_BLACK_KINGSIDE, 'k'),
            (CASTLE_BLACK_QUEENSIDE, 'q'),
        ];
        if rights.iter().any(|&(mask, _)| self.has_right(mask)) {
            for (mask, letter) in rights {
                if self.has_right(mask) {
                    f.write_char(letter)?;
                }
            }
        } else {
            f.write_char('-')?;
        }

        f.write_char(' ')?;
        match self.en_passant_square() {
            Some(sq) => {
                let (file, rank) = sq.coords();
                f.write_str(crate::model::BoardFile::VARIANTS[file.ix()])?;
                f.write_str(crate::model::BoardRank::VARIANTS[rank.ix()])?;
            }
            None => f.write_char('-')?,
        }

        write!(f, " {} {}", self.halfmove_clock, self.move_number)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use chumsky::Parser;
        crate::notation::fen::fen()
            .parse(s)
            .into_result()
            .map_err(|errs| {
                errs.into_iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
    }
}
