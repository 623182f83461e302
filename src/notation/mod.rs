//! Textual notations.
//!
//! All parsing in this crate goes through [`chumsky`] combinators.
//! Each parsable value implements [`Parsable`], individual field
//! parsers are labelled for error reporting, and the public seams
//! (`Position::from_fen`, [`uci::ply_from_uci`]) collapse rich parse
//! errors into plain absence, which is all a caller of the core can
//! act on anyway.
//!
//! Kept deliberately small: FEN, UCI coordinate plies, and EPD perft
//! suites. Standard algebraic notation and PGN are adapters that
//! belong to other crates.

pub mod epd;
pub mod fen;
pub mod square;
pub mod uci;

use std::fmt::{self, Display};

use chumsky::{error::Rich, extra, Parser};
use strum::VariantNames;

use crate::model::{BoardFile, BoardRank, Ply, Square};

/// A value with a canonical text form.
pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>>;
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

impl Display for BoardFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

impl Display for BoardRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::VARIANTS[self.ix()])
    }
}

/// Renders the ply in UCI coordinate form: 4 characters, or 5 with
/// the lowercased promotion letter.
impl Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(promo) = self.promotion() {
            f.write_str(["n", "b", "r", "q"][promo.ix() - 1])?;
        }
        Ok(())
    }
}

impl Ply {
    /// The UCI coordinate form of this ply.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}
