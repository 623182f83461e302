//! Forsyth-Edwards Notation.
//!
//! FEN is the standard textual snapshot of a chess position. Six
//! whitespace-separated fields:
//!
//! - the board, eight solidus-separated ranks from the 8th down,
//!   pieces as letters (uppercase white, lowercase black), runs of
//!   empty squares as digits 1–8,
//! - the active player, `w` or `b`,
//! - the castling rights, a subset of `KQkq` in that order, or `-`,
//! - the en-passant target square, or `-`,
//! - the half-move clock,
//! - the move number.
//!
//! The FEN of the standard starting position:
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
//! ```
//!
//! This parser also accepts the abbreviated 4-field form that drops
//! the two clocks, defaulting them to 0 and 1; perft suites are
//! habitually written that way.

use chumsky::prelude::*;

use crate::model::{BoardRank, Color, Square};
use crate::notation::Parsable;
use crate::position::{
    Position, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};
use crate::quad::QuadBitboard;

fn ws<'s>() -> impl Parser<'s, &'s str, (), extra::Err<Rich<'s, char>>> {
    text::whitespace().at_least(1)
}

/// One letter of the placement field, as a nibble code.
fn piece_code<'s>() -> impl Parser<'s, &'s str, u8, extra::Err<Rich<'s, char>>> {
    use crate::model::{Color::*, Piece::*};
    choice((
        just('P').to(QuadBitboard::code(WHITE, PAWN)),
        just('N').to(QuadBitboard::code(WHITE, KNIGHT)),
        just('B').to(QuadBitboard::code(WHITE, BISHOP)),
        just('R').to(QuadBitboard::code(WHITE, ROOK)),
        just('Q').to(QuadBitboard::code(WHITE, QUEEN)),
        just('K').to(QuadBitboard::code(WHITE, KING)),
        just('p').to(QuadBitboard::code(BLACK, PAWN)),
        just('n').to(QuadBitboard::code(BLACK, KNIGHT)),
        just('b').to(QuadBitboard::code(BLACK, BISHOP)),
        just('r').to(QuadBitboard::code(BLACK, ROOK)),
        just('q').to(QuadBitboard::code(BLACK, QUEEN)),
        just('k').to(QuadBitboard::code(BLACK, KING)),
    ))
    .labelled("one of PNBRQKpnbrqk")
    .boxed()
}

/// One rank of the placement field: piece letters and empty-square
/// runs adding up to exactly eight files, as nibble codes.
fn placement_rank<'s>() -> impl Parser<'s, &'s str, Vec<u8>, extra::Err<Rich<'s, char>>> {
    enum Item {
        Empty(usize),
        Code(u8),
    }

    choice((
        one_of('1'..='8').map(|c| Item::Empty(c as usize - '0' as usize)),
        piece_code().map(Item::Code),
    ))
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>()
    .try_map(|items, span| {
        let mut rank = Vec::with_capacity(8);
        for item in items {
            match item {
                Item::Empty(n) => rank.extend(std::iter::repeat(0).take(n)),
                Item::Code(code) => rank.push(code),
            }
        }
        if rank.len() == 8 {
            Ok(rank)
        } else {
            Err(Rich::custom(span, "rank does not span exactly 8 files"))
        }
    })
    .boxed()
}

/// The full placement field, ranks 8 down to 1.
pub fn placement<'s>() -> impl Parser<'s, &'s str, QuadBitboard, extra::Err<Rich<'s, char>>> {
    placement_rank()
        .separated_by(just('/'))
        .exactly(8)
        .collect::<Vec<_>>()
        .map(|ranks| {
            let mut qbb = QuadBitboard::empty();
            for (ix, rank) in ranks.iter().enumerate() {
                for (file, &code) in rank.iter().enumerate() {
                    if code != 0 {
                        let sq = Square::from_u8(((7 - ix) << 3 | file) as u8);
                        qbb ^= QuadBitboard::nibble(sq, code);
                    }
                }
            }
            qbb
        })
        .labelled("a piece placement field")
        .boxed()
}

fn side_to_move<'s>() -> impl Parser<'s, &'s str, Color, extra::Err<Rich<'s, char>>> {
    choice((just('w').to(Color::WHITE), just('b').to(Color::BLACK)))
        .labelled("w or b")
        .boxed()
}

/// The castling field, as the flags-word bits of the held rights.
fn castling<'s>() -> impl Parser<'s, &'s str, u64, extra::Err<Rich<'s, char>>> {
    let rights = group((
        just('K').or_not(),
        just('Q').or_not(),
        just('k').or_not(),
        just('q').or_not(),
    ))
    .try_map(|(wk, wq, bk, bq), span| {
        let mut flags = 0;
        if wk.is_some() {
            flags |= CASTLE_WHITE_KINGSIDE;
        }
        if wq.is_some() {
            flags |= CASTLE_WHITE_QUEENSIDE;
        }
        if bk.is_some() {
            flags |= CASTLE_BLACK_KINGSIDE;
        }
        if bq.is_some() {
            flags |= CASTLE_BLACK_QUEENSIDE;
        }
        if flags == 0 {
            Err(Rich::custom(span, "expected castling rights or -"))
        } else {
            Ok(flags)
        }
    });

    choice((just('-').to(0), rights))
        .labelled("a subset of KQkq, or -")
        .boxed()
}

/// The en-passant field, as the flags-word bit of the target square.
fn en_passant<'s>() -> impl Parser<'s, &'s str, u64, extra::Err<Rich<'s, char>>> {
    let target = Square::parser().try_map(|sq, span| match sq.coords().1 {
        BoardRank::_3 | BoardRank::_6 => Ok(sq.bit()),
        _ => Err(Rich::custom(span, "en-passant target not on rank 3 or 6")),
    });

    choice((just('-').to(0), target))
        .labelled("an en-passant square, or -")
        .boxed()
}

fn clock<'s>() -> impl Parser<'s, &'s str, u32, extra::Err<Rich<'s, char>>> {
    text::int(10)
        .try_map(|i: &str, span| {
            u32::from_str_radix(i, 10)
                .map_err(|_| Rich::custom(span, format!("unable to parse {i} as a clock value")))
        })
        .labelled("an integer")
        .boxed()
}

/// A FEN record, 6-field or abbreviated 4-field.
pub fn fen<'s>() -> impl Parser<'s, &'s str, Position, extra::Err<Rich<'s, char>>> {
    group((
        placement().then_ignore(ws()),
        side_to_move().then_ignore(ws()),
        castling().then_ignore(ws()),
        en_passant(),
        ws().ignore_then(clock())
            .then_ignore(ws())
            .then(clock().try_map(|n, span| {
                if n > 0 {
                    Ok(n)
                } else {
                    Err(Rich::custom(span, "move numbers start at 1"))
                }
            }))
            .or_not(),
    ))
    .map(|(qbb, color, rights, ep, clocks)| {
        let (halfmove_clock, move_number) = clocks.unwrap_or((0, 1));
        Position {
            qbb,
            color,
            flags: rights | ep,
            halfmove_clock,
            move_number,
        }
    })
    .boxed()
}

impl Parsable for Position {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>> {
        fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_parses_the_startpos() {
        let qbb = placement()
            .then_ignore(end())
            .parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
            .into_result()
            .expect("startpos placement");
        assert_eq!(qbb, QuadBitboard::startpos());
    }

    #[test]
    fn placement_display_roundtrips() {
        let fields = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "8/8/8/8/8/8/8/8",
        ];
        for field in fields {
            let qbb: QuadBitboard = field.parse().expect(field);
            assert_eq!(qbb.to_string(), field);
        }
    }

    #[test]
    fn short_and_overlong_ranks_are_rejected() {
        assert!("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
            .parse::<QuadBitboard>()
            .is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR"
            .parse::<QuadBitboard>()
            .is_err());
        assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"
            .parse::<QuadBitboard>()
            .is_err());
        assert!("44/8/8/8/8/8/8/8".parse::<QuadBitboard>().is_ok());
        assert!("62/8/8/8/8/8/8/8".parse::<QuadBitboard>().is_ok());
    }

    #[test]
    fn castling_field_accepts_ordered_subsets() {
        let castle = |s: &str| {
            castling()
                .then_ignore(end())
                .parse(s)
                .into_result()
                .map_err(|_| ())
        };
        assert_eq!(castle("-"), Ok(0));
        assert_eq!(
            castle("KQkq"),
            Ok(CASTLE_WHITE_KINGSIDE
                | CASTLE_WHITE_QUEENSIDE
                | CASTLE_BLACK_KINGSIDE
                | CASTLE_BLACK_QUEENSIDE)
        );
        assert_eq!(castle("Kq"), Ok(CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_QUEENSIDE));
        assert_eq!(castle("kq"), Ok(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE));
        assert!(castle("qK").is_err());
        assert!(castle("").is_err());
        assert!(castle("KK").is_err());
    }
}
