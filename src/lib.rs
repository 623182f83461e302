//! # quadrille
//!
//! A chess position representation and legal move generator built on
//! a quad-bitboard encoding, with the perft harness that keeps it
//! honest.
//!
//! The board lives in four parallel 64-bit words holding a 4-bit
//! piece nibble per square (see [`quad::QuadBitboard`]); a
//! [`Position`] adds the side to move, the castling and en-passant
//! flags, and the two clocks. Applying a [`Ply`] produces a new
//! position — everything is an immutable value, nothing is shared
//! mutably, and perft exploits exactly that to fan subtrees out
//! across threads.
//!
//! ```
//! use quadrille::{legal_plies, perft, unsafe_do_ply, Position};
//!
//! let start = Position::startpos();
//! assert_eq!(legal_plies(&start).len(), 20);
//! assert_eq!(perft(3, &start), 8_902);
//!
//! let ply = quadrille::ply_from_uci(&start, "e2e4").unwrap();
//! let next = unsafe_do_ply(&start, ply);
//! assert_eq!(next.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! ```
//!
//! Text adapters beyond FEN, UCI coordinate plies and EPD perft
//! suites — SAN, PGN, the UCI protocol proper — are out of scope, as
//! are search and evaluation.

pub mod attacks;
pub mod binary;
pub mod model;
pub mod movegen;
pub mod moving;
pub mod notation;
pub mod perft;
pub mod position;
pub mod quad;
pub mod zobrist;

pub use model::{BoardFile, BoardRank, Color, Piece, Ply, Promotion, Square};
pub use movegen::legal_plies;
pub use moving::{do_ply, unsafe_do_ply, IllegalPly};
pub use notation::epd::{parse_suite, SuiteCase};
pub use notation::uci::ply_from_uci;
pub use perft::{perft, perft_divide, run_suite, PerftResult, SuiteReport};
pub use position::{repetitions, Position};
pub use quad::QuadBitboard;
