//! Grid automata engines and the pattern formats used to seed them.
//!
//! - [`DenseLife`]: fixed-size toroidal Game of Life with retained neighbor counts
//! - [`SparseLife`]: unbounded Game of Life storing only live cells
//! - [`SmoothLife`]: continuous two-radius kernel variant with stagnation reseed
//! - [`CaveGen`]: majority-vote cave generator

pub mod enc;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod pos;

pub use enc::{CoordinateList, PatternDecoder, RunLengthEncoded};
pub use engine::{Automaton, CaveGen, DenseLife, Rule, SmoothLife, SparseLife};
pub use error::{DecodeError, PatternError};
pub use pattern::{Pattern, PatternMatrix};
pub use pos::Pos2;
