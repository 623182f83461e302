//! Legal ply enumeration.
//!
//! Generation is the simple two-pass scheme: enumerate every
//! pseudo-legal ply piece type by piece type, then discard the ones
//! that leave the mover's king attacked. Pin detection never appears
//! anywhere; the check filter subsumes it.
//!
//! The order of the output is not part of the contract, but it is
//! deterministic for a given position: pawn pushes, pawn captures,
//! then knights, bishops, rooks, queens, king, castling, each in
//! bit-scan order, promotions fanned out queen first.

use crate::attacks::{attacked_by, KING_ATTACKS, KNIGHT_ATTACKS};
use crate::binary::{
    biterate, diagonal, north, north_east, north_west, orthogonal, south, south_east, south_west,
    RANK_1, RANK_4, RANK_5, RANK_8,
};
use crate::model::{Color, Ply, Promotion, Square};
use crate::moving::apply_to_board;
use crate::position::{
    Position, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};

/// No legal chess position has more plies than this; reserving it up
/// front keeps the generator to a single allocation per call.
pub const MAX_PLIES: usize = 218;

/// Every ply legal in the given position.
pub fn legal_plies(pos: &Position) -> Vec<Ply> {
    let mut buffer = Vec::with_capacity(MAX_PLIES);
    pseudo_legal(pos, &mut buffer);
    buffer.retain(|&ply| !leaves_king_attacked(pos, ply));
    buffer
}

/// The check filter: apply the ply to the board alone and ask
/// whether the mover's king ends up attacked.
fn leaves_king_attacked(pos: &Position, ply: Ply) -> bool {
    let qbb = apply_to_board(pos, ply);
    let king = qbb.kings() & qbb.by_color(pos.color);
    let sq = Square::from_u8(king.trailing_zeros() as u8);
    attacked_by(pos.color.opponent(), &qbb, qbb.occupied(), sq)
}

fn pseudo_legal(pos: &Position, buffer: &mut Vec<Ply>) {
    let qbb = &pos.qbb;
    let us = qbb.by_color(pos.color);
    let occ = qbb.occupied();
    let not_us = !us;

    match pos.color {
        Color::WHITE => white_pawn_plies(pos, buffer),
        Color::BLACK => black_pawn_plies(pos, buffer),
    }

    biterate! {for src in qbb.knights() & us; {
        targets(buffer, src, KNIGHT_ATTACKS[src.ix()] & not_us);
    }}

    biterate! {for src in qbb.bishops() & us; {
        targets(buffer, src, diagonal(src, occ) & not_us);
    }}

    biterate! {for src in qbb.rooks() & us; {
        targets(buffer, src, orthogonal(src, occ) & not_us);
    }}

    biterate! {for src in qbb.queens() & us; {
        targets(buffer, src, (orthogonal(src, occ) | diagonal(src, occ)) & not_us);
    }}

    biterate! {for src in qbb.kings() & us; {
        targets(buffer, src, KING_ATTACKS[src.ix()] & not_us);
    }}

    castling_plies(pos, occ, buffer);
}

#[inline]
fn targets(buffer: &mut Vec<Ply>, src: Square, mask: u64) {
    biterate! {for dst in mask; {
        buffer.push(Ply::new(src, dst));
    }}
}

/// Push one ply, or the four-way promotion fan when the destination
/// is on the given back rank.
#[inline]
fn pawn_ply(buffer: &mut Vec<Ply>, src: Square, dst: Square, back_rank: u64) {
    if dst.bit() & back_rank != 0 {
        for promo in [
            Promotion::QUEEN,
            Promotion::ROOK,
            Promotion::BISHOP,
            Promotion::KNIGHT,
        ] {
            buffer.push(Ply::new(src, dst).promote_to(promo.piece()));
        }
    } else {
        buffer.push(Ply::new(src, dst));
    }
}

fn white_pawn_plies(pos: &Position, buffer: &mut Vec<Ply>) {
    let qbb = &pos.qbb;
    let pawns = qbb.pawns() & qbb.white();
    let not_occ = !qbb.occupied();
    let back_rank = RANK_8;

    let single = north(pawns) & not_occ;
    biterate! {for dst in single; {
        pawn_ply(buffer, Square::from_u8(dst as u8 - 8), dst, back_rank);
    }}

    biterate! {for dst in north(single) & not_occ & RANK_4; {
        buffer.push(Ply::new(Square::from_u8(dst as u8 - 16), dst));
    }}

    let capture_targets = qbb.black() | pos.en_passant();
    biterate! {for dst in north_east(pawns) & capture_targets; {
        pawn_ply(buffer, Square::from_u8(dst as u8 - 9), dst, back_rank);
    }}
    biterate! {for dst in north_west(pawns) & capture_targets; {
        pawn_ply(buffer, Square::from_u8(dst as u8 - 7), dst, back_rank);
    }}
}

fn black_pawn_plies(pos: &Position, buffer: &mut Vec<Ply>) {
    let qbb = &pos.qbb;
    let pawns = qbb.pawns() & qbb.black();
    let not_occ = !qbb.occupied();
    let back_rank = RANK_1;

    let single = south(pawns) & not_occ;
    biterate! {for dst in single; {
        pawn_ply(buffer, Square::from_u8(dst as u8 + 8), dst, back_rank);
    }}

    biterate! {for dst in south(single) & not_occ & RANK_5; {
        buffer.push(Ply::new(Square::from_u8(dst as u8 + 16), dst));
    }}

    let capture_targets = qbb.white() | pos.en_passant();
    biterate! {for dst in south_west(pawns) & capture_targets; {
        pawn_ply(buffer, Square::from_u8(dst as u8 + 9), dst, back_rank);
    }}
    biterate! {for dst in south_east(pawns) & capture_targets; {
        pawn_ply(buffer, Square::from_u8(dst as u8 + 7), dst, back_rank);
    }}
}

/// Castling: the right must be held, the squares between king and
/// rook must be empty, and none of king-from, king-pass, king-to may
/// be attacked. The queenside rook-pass square (b1/b8) only needs to
/// be empty.
fn castling_plies(pos: &Position, occ: u64, buffer: &mut Vec<Ply>) {
    use Square::*;

    let qbb = &pos.qbb;
    let them = pos.color.opponent();

    let clear = |mask: u64| occ & mask == 0;
    let safe = |squares: [Square; 3]| {
        squares
            .into_iter()
            .all(|sq| !attacked_by(them, qbb, occ, sq))
    };

    match pos.color {
        Color::WHITE => {
            if pos.has_right(CASTLE_WHITE_KINGSIDE)
                && clear(f1.bit() | g1.bit())
                && safe([e1, f1, g1])
            {
                buffer.push(Ply::WHITE_KINGSIDE);
            }
            if pos.has_right(CASTLE_WHITE_QUEENSIDE)
                && clear(b1.bit() | c1.bit() | d1.bit())
                && safe([e1, d1, c1])
            {
                buffer.push(Ply::WHITE_QUEENSIDE);
            }
        }
        Color::BLACK => {
            if pos.has_right(CASTLE_BLACK_KINGSIDE)
                && clear(f8.bit() | g8.bit())
                && safe([e8, f8, g8])
            {
                buffer.push(Ply::BLACK_KINGSIDE);
            }
            if pos.has_right(CASTLE_BLACK_QUEENSIDE)
                && clear(b8.bit() | c8.bit() | d8.bit())
                && safe([e8, d8, c8])
            {
                buffer.push(Ply::BLACK_QUEENSIDE);
            }
        }
    }
}
