//! The vocabulary of chess.
//!
//! This module contains the enums modeling the values of chess —
//! squares, files, ranks, colors and pieces — together with the
//! packed 16-bit [`Ply`] that the rest of the crate traffics in.
//!
//! Everything here is `Copy`, fits in a register, and converts to
//! an array index through an `ix` method rather than bare `as` casts
//! scattered over the codebase.

use strum::{EnumIs, EnumIter, VariantArray, VariantNames};

/// Representation of the squares on a chessboard.
///
/// This enum uses the convention of numbering squares starting with
/// a1 = 0 and then counting up over the files first, b1 = 1, c1 = 2,
/// ... and then the ranks, a2 = 8, a3 = 16, ... ending with h8 = 63.
///
/// This is the so-called file-major little-endian layout: for a given
/// square index, bit `i` of a bitboard is file `i mod 8` of rank
/// `i div 8`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantNames, EnumIter)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Use this square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// The single-bit bitboard of this square.
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self as u8
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x3F) }
    }

    /// Split a square into file and rank.
    #[inline]
    pub fn coords(self) -> (BoardFile, BoardRank) {
        (
            BoardFile::from_u8(self as u8),
            BoardRank::from_u8((self as u8 & 0x38) >> 3),
        )
    }

    /// Reassemble a square from file and rank.
    #[inline]
    pub fn from_coords(f: BoardFile, r: BoardRank) -> Self {
        Self::from_u8(f as u8 | (r as u8) << 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BoardRank {
    _1 = 0,
    _2 = 1,
    _3 = 2,
    _4 = 3,
    _5 = 4,
    _6 = 5,
    _7 = 6,
    _8 = 7,
}

impl BoardRank {
    pub const VARIANTS: &'static [&'static str] = &["1", "2", "3", "4", "5", "6", "7", "8"];

    /// Use this rank as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BoardFile {
    a_ = 0,
    b_ = 1,
    c_ = 2,
    d_ = 3,
    e_ = 4,
    f_ = 5,
    g_ = 6,
    h_ = 7,
}

impl BoardFile {
    pub const VARIANTS: &'static [&'static str] = &["a", "b", "c", "d", "e", "f", "g", "h"];

    /// Use this file as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        unsafe { std::mem::transmute::<u8, Self>(ix & 0x7) }
    }
}

/// Representation of the color of a player or piece.
///
/// White is 0 and black is 1 because the two are used extensively
/// for indexing arrays of the form `[<white value>, <black value>]`,
/// and because the low bit of a [`QuadBitboard`](crate::quad::QuadBitboard)
/// nibble carries exactly this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[repr(u8)]
pub enum Color {
    WHITE = 0,
    BLACK = 1,
}

impl Color {
    /// Opposing color. An involution.
    #[inline]
    pub fn opponent(self) -> Self {
        unsafe { std::mem::transmute(self as u8 ^ 1) }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Representation of the six piece types.
///
/// The discriminant values start at 1 so that the nibble code of a
/// colored piece is `2 * piece + color` with 0 left over to mean an
/// empty square. Totally ordered, pawns first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum Piece {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl Piece {
    /// Use as an array index: one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    /// Recover a piece from its discriminant, if valid.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        if (1..=6).contains(&v) {
            Some(unsafe { std::mem::transmute::<u8, Self>(v) })
        } else {
            None
        }
    }
}

/// Representation of the pieces a pawn may promote to, that is,
/// neither pawns nor kings.
///
/// The exclusion at type level is a convenient guarantee: a [`Ply`]
/// holding a `Promotion` can never claim to promote to a pawn or a
/// king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum Promotion {
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
}

impl Promotion {
    /// See [`Piece::ix`].
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }

    /// The piece this promotion produces.
    #[inline]
    pub fn piece(self) -> Piece {
        unsafe { std::mem::transmute(self) }
    }

    /// Recover a promotion from a [`Piece::ix`] value, if valid.
    #[inline]
    fn from_ix(ix: u16) -> Option<Self> {
        if (1..=4).contains(&ix) {
            Some(unsafe { std::mem::transmute::<u8, Self>(ix as u8 + 1) })
        } else {
            None
        }
    }
}

/// A single half-move, packed into 16 bits.
///
/// - bits 0–5: destination square
/// - bits 6–11: source square
/// - bits 12–14: promotion piece index (0 for none)
///
/// Castling is represented as the king's two-square move (e1g1,
/// e1c1, e8g8, e8c8); en-passant captures as the capturing pawn's
/// source and target with no promotion bits set. A `Ply` carries no
/// reference to the position it was generated for, so exchanging a
/// ply between positions is meaningful only to the extent the caller
/// makes it so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ply(pub u16);

impl Ply {
    pub const WHITE_KINGSIDE: Ply = Ply::new(Square::e1, Square::g1);
    pub const WHITE_QUEENSIDE: Ply = Ply::new(Square::e1, Square::c1);
    pub const BLACK_KINGSIDE: Ply = Ply::new(Square::e8, Square::g8);
    pub const BLACK_QUEENSIDE: Ply = Ply::new(Square::e8, Square::c8);

    /// Pack a plain move with no promotion.
    #[inline]
    pub const fn new(source: Square, target: Square) -> Self {
        Ply((source as u16) << 6 | target as u16)
    }

    /// Source square, bits 6–11.
    #[inline]
    pub fn source(self) -> Square {
        Square::from_u8((self.0 >> 6) as u8)
    }

    /// Destination square, bits 0–5.
    #[inline]
    pub fn target(self) -> Square {
        Square::from_u8(self.0 as u8)
    }

    /// Promotion piece, bits 12–14.
    #[inline]
    pub fn promotion(self) -> Option<Promotion> {
        Promotion::from_ix(self.0 >> 12 & 0x7)
    }

    /// Overwrite the promotion bits.
    ///
    /// Asking to promote to a pawn or a king leaves the ply
    /// unchanged: those bit patterns are expressible but invalid, so
    /// the constructor refuses to produce them.
    #[inline]
    pub fn promote_to(self, piece: Piece) -> Self {
        match piece {
            Piece::PAWN | Piece::KING => self,
            _ => Ply(self.0 & 0x0FFF | (piece.ix() as u16) << 12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn square_roundtrips_through_coords() {
        for sq in Square::iter() {
            let (f, r) = sq.coords();
            assert_eq!(Square::from_coords(f, r), sq);
        }
    }

    #[test]
    fn ply_packs_and_unpacks() {
        let ply = Ply::new(Square::e2, Square::e4);
        assert_eq!(ply.source(), Square::e2);
        assert_eq!(ply.target(), Square::e4);
        assert_eq!(ply.promotion(), None);

        let promo = Ply::new(Square::e7, Square::e8).promote_to(Piece::QUEEN);
        assert_eq!(promo.source(), Square::e7);
        assert_eq!(promo.target(), Square::e8);
        assert_eq!(promo.promotion(), Some(Promotion::QUEEN));
    }

    #[test]
    fn pawn_and_king_promotions_are_refused() {
        let ply = Ply::new(Square::e7, Square::e8);
        assert_eq!(ply.promote_to(Piece::PAWN), ply);
        assert_eq!(ply.promote_to(Piece::KING), ply);
        let queened = ply.promote_to(Piece::QUEEN);
        assert_eq!(queened.promote_to(Piece::PAWN), queened);
    }
}
