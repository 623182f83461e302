//! Zobrist hashing of chess positions.
//!
//! Zobrist hashing pre-generates a random 64-bit value for every
//! mutually exclusive component of the game state — each piece on
//! each square, each castling right, each en-passant file, and black
//! to move — and combines the applicable ones with exclusive-or.
//! XOR forms an abelian group and every element is its own inverse,
//! so the key of a changed position differs from its predecessor by
//! exactly the values of the components that changed.
//!
//! The keys hash Article 9.2 identity: two positions that compare
//! equal under [`Position`] equality produce the same key, clocks
//! notwithstanding. The repetition detector leans on this, and any
//! transposition-table consumer downstream gets the same guarantee.
//!
//! The random values are generated by [`rand::rngs::SmallRng`]
//! seeded with the first 32 bytes of the ASCII representation of π,
//! so the tables are identical from run to run and build to build.

use std::sync::LazyLock;

use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};

use crate::biterate;
use crate::position::{
    Position, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};

/// The rng state used to generate all the random values in this
/// module. Seeded with the bytes `3.141592653589793238462643383279`.
///
/// Discards the first 1000 values just in case.
fn pi_rng() -> SmallRng {
    let mut res = SmallRng::from_seed(*b"3.141592653589793238462643383279");
    for _ in 0..1000 {
        res.next_u64();
    }
    res
}

/// The Zobrist value tables, one singleton for the whole process.
#[derive(Debug, Clone)]
pub struct ZobristTables {
    /// One board of values per nibble code, indexed by `code - 2`.
    pieces: [[u64; 64]; 12],
    /// One value per castling right, in K, Q, k, q order.
    rights: [u64; 4],
    /// One value per en-passant file.
    ep_files: [u64; 8],
    /// Added when black is to move.
    black_to_move: u64,
}

static ZOBRIST: LazyLock<ZobristTables> = LazyLock::new(ZobristTables::new);

impl ZobristTables {
    fn new() -> Self {
        let mut pi = pi_rng();

        let mut pieces = [[0; 64]; 12];
        for board in &mut pieces {
            pi.fill(&mut board[..]);
        }

        let mut rights = [0; 4];
        pi.fill(&mut rights[..]);

        let mut ep_files = [0; 8];
        pi.fill(&mut ep_files[..]);

        let black_to_move = pi.next_u64();

        ZobristTables {
            pieces,
            rights,
            ep_files,
            black_to_move,
        }
    }

    /// Reference the statically allocated singleton instance.
    pub fn static_table() -> &'static Self {
        &ZOBRIST
    }
}

impl Position {
    /// The Zobrist key of this position.
    ///
    /// Computed from scratch; incremental maintenance is left to
    /// consumers that keep their own running key.
    pub fn zobrist(&self) -> u64 {
        let tables = ZobristTables::static_table();
        let mut res = 0;

        biterate! {for sq in self.qbb.occupied(); {
            let code = self.qbb.nibble_at(sq);
            res ^= tables.pieces[code as usize - 2][sq.ix()];
        }}

        let rights = [
            CASTLE_WHITE_KINGSIDE,
            CASTLE_WHITE_QUEENSIDE,
            CASTLE_BLACK_KINGSIDE,
            CASTLE_BLACK_QUEENSIDE,
        ];
        for (mask, value) in rights.into_iter().zip(tables.rights) {
            if self.has_right(mask) {
                res ^= value;
            }
        }

        if let Some(sq) = self.en_passant_square() {
            res ^= tables.ep_files[sq.ix() & 0x7];
        }

        if self.color.is_black() {
            res ^= tables.black_to_move;
        }

        res
    }
}
