use chumsky::prelude::*;

use crate::model::{BoardFile, BoardRank, Square};
use crate::notation::Parsable;

impl Parsable for BoardFile {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>> {
        one_of('a'..='h')
            .map(|c| Self::from_u8(c as u8 - b'a'))
            .labelled("a file letter a ... h")
            .boxed()
    }
}

impl Parsable for BoardRank {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>> {
        one_of('1'..='8')
            .map(|c| Self::from_u8(c as u8 - b'1'))
            .labelled("a rank number 1 ... 8")
            .boxed()
    }
}

impl Parsable for Square {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, extra::Err<Rich<'s, char>>> {
        group((BoardFile::parser(), BoardRank::parser()))
            .map(|(f, r)| Self::from_coords(f, r))
            .labelled("a board square a1 ... h8")
            .boxed()
    }
}

#[test]
fn every_square_parses_back_to_itself() {
    use strum::IntoEnumIterator;
    for sq in Square::iter() {
        let text = sq.to_string();
        assert_eq!(
            Square::parser()
                .then_ignore(end())
                .parse(&text)
                .into_result()
                .unwrap_or_else(|_| panic!("unable to parse {sq}")),
            sq
        );
    }
}
