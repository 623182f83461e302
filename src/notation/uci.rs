//! UCI coordinate ply notation.
//!
//! Four or five lowercase characters: source square, destination
//! square, optional promotion letter (`q`, `r`, `b`, `n`). Castling
//! arrives in two dialects: the king's two-square move (`e1g1`) or
//! the Lichess-style king-takes-own-rook form (`e1h1`). Both are
//! accepted; the rook form is rewritten to the king form before
//! validation.

use chumsky::prelude::*;

use crate::model::{Piece, Ply, Promotion, Square};
use crate::movegen::legal_plies;
use crate::notation::Parsable;
use crate::position::Position;

fn promotion<'s>() -> impl Parser<'s, &'s str, Promotion, extra::Err<Rich<'s, char>>> {
    choice((
        just('n').to(Promotion::KNIGHT),
        just('b').to(Promotion::BISHOP),
        just('r').to(Promotion::ROOK),
        just('q').to(Promotion::QUEEN),
    ))
    .labelled("a promotion letter n, b, r or q")
    .boxed()
}

impl Parsable for Ply {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>> {
        group((Square::parser(), Square::parser(), promotion().or_not()))
            .map(|(source, target, promo)| {
                let ply = Ply::new(source, target);
                match promo {
                    Some(promo) => ply.promote_to(promo.piece()),
                    None => ply,
                }
            })
            .labelled("a UCI ply")
            .boxed()
    }
}

/// Parse a UCI ply and validate it against the position.
///
/// An unparseable string, and a parseable ply that is not legal in
/// `pos`, both come back as `None`. A ply that fails validation but
/// reads as the king capturing its own rook on a castling square is
/// given a second chance as the corresponding castling ply.
pub fn ply_from_uci(pos: &Position, uci: &str) -> Option<Ply> {
    use Square::*;

    let ply = Ply::parser().parse(uci).into_result().ok()?;
    let legal = legal_plies(pos);
    if legal.contains(&ply) {
        return Some(ply);
    }

    if pos.qbb.piece_at(ply.source()) != Some(Piece::KING) {
        return None;
    }

    let alias = match (ply.source(), ply.target()) {
        (e1, h1) => Ply::WHITE_KINGSIDE,
        (e1, a1) => Ply::WHITE_QUEENSIDE,
        (e8, h8) => Ply::BLACK_KINGSIDE,
        (e8, a8) => Ply::BLACK_QUEENSIDE,
        _ => return None,
    };

    legal.contains(&alias).then_some(alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_plies_roundtrip() {
        let pos = Position::startpos();
        let ply = ply_from_uci(&pos, "e2e4").expect("e2e4 is legal");
        assert_eq!(ply, Ply::new(Square::e2, Square::e4));
        assert_eq!(ply.to_uci(), "e2e4");
    }

    #[test]
    fn promotions_roundtrip() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        for uci in ["a7a8q", "a7a8r", "a7a8b", "a7a8n"] {
            let ply = ply_from_uci(&pos, uci).expect(uci);
            assert_eq!(ply.to_uci(), uci);
        }
    }

    #[test]
    fn illegal_and_unparseable_input_is_absent() {
        let pos = Position::startpos();
        assert_eq!(ply_from_uci(&pos, "e2e5"), None);
        assert_eq!(ply_from_uci(&pos, "e7e5"), None);
        assert_eq!(ply_from_uci(&pos, "e2"), None);
        assert_eq!(ply_from_uci(&pos, "x1y2"), None);
        assert_eq!(ply_from_uci(&pos, "e2e4qq"), None);
        assert_eq!(ply_from_uci(&pos, ""), None);
    }

    #[test]
    fn king_takes_own_rook_is_castling() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(ply_from_uci(&pos, "e1h1"), Some(Ply::WHITE_KINGSIDE));
        assert_eq!(ply_from_uci(&pos, "e1a1"), Some(Ply::WHITE_QUEENSIDE));
        assert_eq!(ply_from_uci(&pos, "e1g1"), Some(Ply::WHITE_KINGSIDE));

        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        assert_eq!(ply_from_uci(&pos, "e8h8"), Some(Ply::BLACK_KINGSIDE));
        assert_eq!(ply_from_uci(&pos, "e8a8"), Some(Ply::BLACK_QUEENSIDE));
    }

    #[test]
    fn the_alias_rescue_needs_a_king_on_the_source() {
        // A rook on e1 sliding to h1 is not a castling attempt.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R1KR w - - 0 1").unwrap();
        assert_eq!(
            ply_from_uci(&pos, "e1h1"),
            None,
            "rook e1h1 would capture its own rook"
        );
    }
}
