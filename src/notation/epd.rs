//! EPD perft suites.
//!
//! Each line of a suite carries a FEN prefix followed by one or more
//! `;D<depth> <nodes>` operations asserting the perft node count at
//! that depth:
//!
//! ```text
//! 4k3/8/8/8/8/8/8/4K2R w K - ;D1 15 ;D2 66 ;D3 1197 ;D4 7059
//! ```
//!
//! The FEN prefix may be the 4-field form (as above) or carry the
//! clocks as well; both parse through the same [`fen`] parser.

use chumsky::prelude::*;

use crate::notation::fen::fen;
use crate::position::Position;

/// One suite line: a position and its expected node counts by depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteCase {
    pub position: Position,
    pub checks: Vec<(u32, u64)>,
}

fn node_count<'s>() -> impl Parser<'s, &'s str, u64, extra::Err<Rich<'s, char>>> {
    text::int(10)
        .try_map(|i: &str, span| {
            u64::from_str_radix(i, 10)
                .map_err(|_| Rich::custom(span, format!("unable to parse {i} as a node count")))
        })
        .labelled("a node count")
        .boxed()
}

fn depth<'s>() -> impl Parser<'s, &'s str, u32, extra::Err<Rich<'s, char>>> {
    text::int(10)
        .try_map(|i: &str, span| {
            u32::from_str_radix(i, 10)
                .map_err(|_| Rich::custom(span, format!("unable to parse {i} as a depth")))
        })
        .labelled("a depth")
        .boxed()
}

/// A `;D<depth> <nodes>` operation.
fn check<'s>() -> impl Parser<'s, &'s str, (u32, u64), extra::Err<Rich<'s, char>>> {
    just(";D")
        .ignore_then(depth())
        .then_ignore(text::whitespace().at_least(1))
        .then(node_count())
        .labelled("a ;D<depth> <nodes> operation")
        .boxed()
}

/// A full suite line.
pub fn suite_line<'s>() -> impl Parser<'s, &'s str, SuiteCase, extra::Err<Rich<'s, char>>> {
    fen()
        .then(
            check()
                .padded()
                .repeated()
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(|(position, checks)| SuiteCase { position, checks })
        .boxed()
}

/// Parse a whole suite file, one case per non-empty line.
///
/// A malformed line is fatal: the suite is the test input, so there
/// is nothing sensible to do but report where it broke.
pub fn parse_suite(text: &str) -> Result<Vec<SuiteCase>, String> {
    let mut cases = Vec::new();
    for (ix, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let case = suite_line()
            .parse(line)
            .into_result()
            .map_err(|errs| format!("suite line {}: {}", ix + 1, errs[0]))?;
        cases.push(case);
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_standard_suite_line_parses() {
        let case = suite_line()
            .parse("4k3/8/8/8/8/8/8/4K2R w K - ;D1 15 ;D2 66 ;D3 1197")
            .into_result()
            .expect("suite line");
        assert_eq!(case.checks, vec![(1, 15), (2, 66), (3, 1197)]);
        assert_eq!(case.position.to_fen(), "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    }

    #[test]
    fn six_field_prefixes_parse_too() {
        let case = suite_line()
            .parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ;D1 20 ;D2 400")
            .into_result()
            .expect("suite line");
        assert_eq!(case.position, Position::startpos());
        assert_eq!(case.checks.len(), 2);
    }

    #[test]
    fn files_split_into_cases() {
        let text = "\
4k3/8/8/8/8/8/8/4K2R w K - ;D1 15

8/8/8/8/8/8/8/KQk5 w - - ;D1 21 ;D2 43
";
        let cases = parse_suite(text).expect("suite");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].checks, vec![(1, 21), (2, 43)]);
    }

    #[test]
    fn malformed_lines_are_fatal() {
        assert!(parse_suite("this is not a suite").is_err());
        assert!(parse_suite("4k3/8/8/8/8/8/8/4K2R w K -").is_err());
        assert!(parse_suite("4k3/8/8/8/8/8/8/4K2R w K - ;D1").is_err());
        let err = parse_suite("4k3/8/8/8/8/8/8/4K2R w K - ;Dx 15").unwrap_err();
        assert!(err.contains("line 1"), "{err}");
    }
}
