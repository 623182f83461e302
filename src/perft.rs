//! The perft driver.
//!
//! Perft counts the leaf nodes of the game tree at a fixed depth.
//! It is the standard correctness oracle for move generation — the
//! reference node counts for a handful of positions are known to the
//! last digit — and doubles as a throughput benchmark.
//!
//! Node counts form a commutative monoid under addition, so subtree
//! sums may combine in any order. That makes the parallel split
//! trivial: at [`PARALLEL_DEPTH`] and above, the subtrees of a node
//! fan out across rayon's work-stealing pool; below it the per-ply
//! work is too small to amortize scheduling and recursion stays
//! sequential. Positions are immutable values, so subtree workers
//! share nothing.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::model::Ply;
use crate::movegen::legal_plies;
use crate::moving::unsafe_do_ply;
use crate::notation::epd::SuiteCase;
use crate::position::Position;

/// Subtrees at this depth and above are evaluated in parallel.
pub const PARALLEL_DEPTH: u32 = 4;

/// The number of leaf nodes at `depth` below `pos`.
///
/// Depth 0 is one node (the position itself), depth 1 the number of
/// legal plies, and depth n the sum over every legal ply of the
/// count at n - 1 in the successor.
pub fn perft(depth: u32, pos: &Position) -> u64 {
    match depth {
        0 => 1,
        1 => legal_plies(pos).len() as u64,
        d if d >= PARALLEL_DEPTH => legal_plies(pos)
            .par_iter()
            .map(|&ply| perft(d - 1, &unsafe_do_ply(pos, ply)))
            .sum(),
        d => legal_plies(pos)
            .iter()
            .map(|&ply| perft(d - 1, &unsafe_do_ply(pos, ply)))
            .sum(),
    }
}

/// The per-root-ply breakdown of [`perft`], in generation order.
///
/// The sum of the second components equals `perft(depth, pos)`; the
/// breakdown is the usual tool for bisecting a node-count mismatch
/// against another engine.
pub fn perft_divide(depth: u32, pos: &Position) -> Vec<(Ply, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_plies(pos)
        .into_par_iter()
        .map(|ply| (ply, perft(depth - 1, &unsafe_do_ply(pos, ply))))
        .collect()
}

/// A timed perft run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl PerftResult {
    pub fn nodes_per_second(&self) -> f64 {
        self.nodes as f64 / self.elapsed.as_secs_f64()
    }
}

/// Run [`perft`] and time it.
pub fn perft_timed(depth: u32, pos: &Position) -> PerftResult {
    let started = Instant::now();
    let nodes = perft(depth, pos);
    PerftResult {
        depth,
        nodes,
        elapsed: started.elapsed(),
    }
}

/// The outcome of one suite line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Every depth matched; `nodes` is their sum.
    Ok { nodes: u64 },
    /// The first mismatching depth, with both counts.
    Fail {
        depth: u32,
        expected: u64,
        actual: u64,
    },
}

/// The outcome of a suite run.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    /// One entry per evaluated line, FEN first. On failure this ends
    /// with the failing line; later lines were never evaluated.
    pub lines: Vec<(String, LineOutcome)>,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.lines
            .iter()
            .all(|(_, outcome)| matches!(outcome, LineOutcome::Ok { .. }))
    }

    pub fn nodes_per_second(&self) -> f64 {
        self.nodes as f64 / self.elapsed.as_secs_f64()
    }
}

/// Run every assertion of a parsed EPD suite.
///
/// Lines are evaluated in order and the run short-circuits at the
/// first failing line; the report keeps the OK prefix accumulated up
/// to that point.
pub fn run_suite(cases: &[SuiteCase]) -> SuiteReport {
    let started = Instant::now();
    let mut lines = Vec::with_capacity(cases.len());
    let mut total = 0;

    'cases: for case in cases {
        let fen = case.position.to_fen();
        let mut nodes = 0;

        for &(depth, expected) in &case.checks {
            let result = perft_timed(depth, &case.position);
            log::debug!(
                "{fen}: D{depth} {} nodes in {:.2?}",
                result.nodes,
                result.elapsed
            );
            nodes += result.nodes;
            total += result.nodes;

            if result.nodes != expected {
                log::error!(
                    "{fen}: D{depth} expected {expected} nodes, counted {}",
                    result.nodes
                );
                lines.push((
                    fen,
                    LineOutcome::Fail {
                        depth,
                        expected,
                        actual: result.nodes,
                    },
                ));
                break 'cases;
            }
        }

        log::info!("{fen}: ok, {nodes} nodes");
        lines.push((fen, LineOutcome::Ok { nodes }));
    }

    SuiteReport {
        lines,
        nodes: total,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const TALKCHESS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).expect(fen)
    }

    #[test]
    fn depth_zero_is_one_node_everywhere() {
        for fen in [KIWIPETE, ENDGAME, TALKCHESS] {
            assert_eq!(perft(0, &pos(fen)), 1);
        }
        assert_eq!(perft(0, &Position::startpos()), 1);
    }

    #[test]
    fn depth_one_is_the_ply_count() {
        for fen in [KIWIPETE, ENDGAME, TALKCHESS] {
            let p = pos(fen);
            assert_eq!(perft(1, &p), legal_plies(&p).len() as u64);
        }
    }

    #[test]
    fn perft_is_the_sum_of_its_subtrees() {
        let p = pos(KIWIPETE);
        let by_hand: u64 = legal_plies(&p)
            .into_iter()
            .map(|ply| perft(2, &unsafe_do_ply(&p, ply)))
            .sum();
        assert_eq!(perft(3, &p), by_hand);
        assert_eq!(
            perft_divide(3, &p).into_iter().map(|(_, n)| n).sum::<u64>(),
            perft(3, &p)
        );
    }

    #[test]
    fn startpos_shallow_counts() {
        let p = Position::startpos();
        assert_eq!(perft(1, &p), 20);
        assert_eq!(perft(2, &p), 400);
        assert_eq!(perft(3, &p), 8_902);
        assert_eq!(perft(4, &p), 197_281);
    }

    #[test]
    #[ignore = "slow; run with --release"]
    fn startpos_deep_counts() {
        let p = Position::startpos();
        assert_eq!(perft(5, &p), 4_865_609);
        assert_eq!(perft(6, &p), 119_060_324);
    }

    #[test]
    fn kiwipete_shallow_counts() {
        let p = pos(KIWIPETE);
        assert_eq!(perft(1, &p), 48);
        assert_eq!(perft(2, &p), 2_039);
        assert_eq!(perft(3, &p), 97_862);
    }

    #[test]
    #[ignore = "slow; run with --release"]
    fn kiwipete_deep_counts() {
        let p = pos(KIWIPETE);
        assert_eq!(perft(4, &p), 4_085_603);
        assert_eq!(perft(5, &p), 193_690_690);
    }

    #[test]
    fn endgame_shallow_counts() {
        let p = pos(ENDGAME);
        assert_eq!(perft(1, &p), 14);
        assert_eq!(perft(2, &p), 191);
        assert_eq!(perft(3, &p), 2_812);
        assert_eq!(perft(4, &p), 43_238);
    }

    #[test]
    #[ignore = "slow; run with --release"]
    fn endgame_deep_counts() {
        let p = pos(ENDGAME);
        assert_eq!(perft(5, &p), 674_624);
        assert_eq!(perft(6, &p), 11_030_083);
    }

    #[test]
    fn talkchess_shallow_counts() {
        let p = pos(TALKCHESS);
        assert_eq!(perft(1, &p), 6);
        assert_eq!(perft(2, &p), 264);
        assert_eq!(perft(3, &p), 9_467);
    }

    #[test]
    #[ignore = "slow; run with --release"]
    fn talkchess_deep_counts() {
        let p = pos(TALKCHESS);
        assert_eq!(perft(4, &p), 422_333);
        assert_eq!(perft(5, &p), 15_833_292);
    }

    #[test]
    fn suite_runs_report_per_line() {
        let cases = crate::notation::epd::parse_suite(
            "4k3/8/8/8/8/8/8/4K2R w K - ;D1 15 ;D2 66\n\
             4k2r/8/8/8/8/8/8/4K3 b k - ;D1 15 ;D2 66\n",
        )
        .unwrap();
        let report = run_suite(&cases);
        assert!(report.passed());
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.nodes, 2 * (15 + 66));
    }

    #[test]
    fn suite_failures_short_circuit() {
        let cases = crate::notation::epd::parse_suite(
            "4k3/8/8/8/8/8/8/4K2R w K - ;D1 15\n\
             4k3/8/8/8/8/8/8/4K2R w K - ;D1 99\n\
             4k3/8/8/8/8/8/8/4K2R w K - ;D1 15\n",
        )
        .unwrap();
        let report = run_suite(&cases);
        assert!(!report.passed());
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].1, LineOutcome::Ok { nodes: 15 });
        assert_eq!(
            report.lines[1].1,
            LineOutcome::Fail {
                depth: 1,
                expected: 99,
                actual: 15
            }
        );
    }
}
