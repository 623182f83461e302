//! Precomputed attack tables and the attack probe.
//!
//! King, knight and pawn attacks depend only on the source square, so
//! they are computed once at first use into 64-entry tables. Sliding
//! attacks depend on occupancy and are computed on demand by the
//! obstruction-difference functions in [`binary`](crate::binary).
//!
//! The [`attacked_by`] probe asks the question the other way around:
//! instead of accumulating the attack sets of every enemy piece, it
//! places a "superpiece" on the square of interest and intersects
//! each of its attack sets with the enemy pieces that move that way.
//! Five table lookups and two slider evaluations answer "is this
//! square attacked" for any position.

use std::sync::LazyLock;

use crate::binary::{
    diagonal, east, ene, ese, nne, nnw, north, north_east, north_west, orthogonal, south,
    south_east, south_west, sse, ssw, west, wnw, wsw,
};
use crate::model::{Color, Square};
use crate::quad::QuadBitboard;

/// The eight one-step king moves from each square.
pub static KING_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| {
    table(|b| {
        north(b)
            | south(b)
            | east(b)
            | west(b)
            | north_east(b)
            | north_west(b)
            | south_east(b)
            | south_west(b)
    })
});

/// The eight knight jumps from each square.
pub static KNIGHT_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| {
    table(|b| nne(b) | ene(b) | ese(b) | sse(b) | ssw(b) | wsw(b) | wnw(b) | nnw(b))
});

/// The two diagonal capture targets of a white pawn on each square.
pub static WHITE_PAWN_ATTACKS: LazyLock<[u64; 64]> =
    LazyLock::new(|| table(|b| north_east(b) | north_west(b)));

/// The two diagonal capture targets of a black pawn on each square.
pub static BLACK_PAWN_ATTACKS: LazyLock<[u64; 64]> =
    LazyLock::new(|| table(|b| south_east(b) | south_west(b)));

fn table(attack: impl Fn(u64) -> u64) -> [u64; 64] {
    let mut res = [0; 64];
    for (ix, entry) in res.iter_mut().enumerate() {
        *entry = attack(1u64 << ix);
    }
    res
}

/// Whether `by` attacks the square `sq` in the given board and
/// occupancy.
///
/// The occupancy is a parameter rather than derived from the board so
/// that callers probing hypothetical positions (the castling path
/// check, for one) can pass an occupancy of their choosing.
#[inline]
pub fn attacked_by(by: Color, qbb: &QuadBitboard, occ: u64, sq: Square) -> bool {
    let them = match by {
        Color::WHITE => qbb.white(),
        Color::BLACK => qbb.black(),
    };

    // A pawn of `by` attacks sq exactly where a pawn of the other
    // color standing on sq would attack.
    let pawn_probe = match by {
        Color::WHITE => BLACK_PAWN_ATTACKS[sq.ix()],
        Color::BLACK => WHITE_PAWN_ATTACKS[sq.ix()],
    };

    let mut attackers = pawn_probe & qbb.pawns();
    attackers |= KNIGHT_ATTACKS[sq.ix()] & qbb.knights();
    attackers |= KING_ATTACKS[sq.ix()] & qbb.kings();
    attackers |= diagonal(sq, occ) & qbb.diagonal_sliders();
    attackers |= orthogonal(sq, occ) & qbb.orthogonal_sliders();

    attackers & them != 0
}

/// Whether the king of `color` is attacked on the given board.
#[inline]
pub fn in_check(color: Color, qbb: &QuadBitboard) -> bool {
    let king = match color {
        Color::WHITE => qbb.kings() & qbb.white(),
        Color::BLACK => qbb.kings() & qbb.black(),
    };
    let sq = Square::from_u8(king.trailing_zeros() as u8);
    attacked_by(color.opponent(), qbb, qbb.occupied(), sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Square::*;

    #[test]
    fn corner_tables() {
        assert_eq!(KNIGHT_ATTACKS[a1.ix()], b3.bit() | c2.bit());
        assert_eq!(KING_ATTACKS[a1.ix()], a2.bit() | b1.bit() | b2.bit());
        assert_eq!(KNIGHT_ATTACKS[h8.ix()], g6.bit() | f7.bit());
        assert_eq!(WHITE_PAWN_ATTACKS[a2.ix()], b3.bit());
        assert_eq!(WHITE_PAWN_ATTACKS[e4.ix()], d5.bit() | f5.bit());
        assert_eq!(BLACK_PAWN_ATTACKS[h7.ix()], g6.bit());
    }

    #[test]
    fn startpos_attack_probe() {
        let qbb = QuadBitboard::startpos();
        let occ = qbb.occupied();
        // e3 and h3 are covered by white pawns, e4 by nothing.
        assert!(attacked_by(Color::WHITE, &qbb, occ, e3));
        assert!(attacked_by(Color::WHITE, &qbb, occ, h3));
        assert!(!attacked_by(Color::WHITE, &qbb, occ, e4));
        // f6 is covered by the g8 knight and the e7/g7 pawns.
        assert!(attacked_by(Color::BLACK, &qbb, occ, f6));
        assert!(!attacked_by(Color::BLACK, &qbb, occ, f4));
        // Neither king starts in check.
        assert!(!in_check(Color::WHITE, &qbb));
        assert!(!in_check(Color::BLACK, &qbb));
    }
}
