//! Error types for pattern loading and the command line driver.

use thiserror::Error;

/// Errors produced while decoding an RLE pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No line starting with `x` was found.
    #[error("missing `x = .., y = ..` header line")]
    MissingHeader,

    /// The header line holds fewer than two integers.
    #[error("header line does not declare width and height: {line:?}")]
    MissingDimensions {
        /// The header line as read.
        line: String,
    },

    /// A run count could not be read as a decimal number.
    #[error("invalid run count: {count:?}")]
    InvalidCount {
        /// The digits of the run count.
        count: String,
    },

    /// A run ended in a character other than `b`, `o`, `$` or `!`.
    #[error("unknown run tag {tag:?}")]
    UnknownTag {
        /// The offending character.
        tag: char,
    },

    /// A run wrote outside the declared bounding box.
    #[error("cell ({x}, {y}) lies outside the declared {width}x{height} pattern")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The data ended with a count that has no tag.
    #[error("run count {count:?} is not followed by a tag")]
    DanglingCount {
        /// The trailing digits.
        count: String,
    },

    /// The header declares more cells than a pattern may hold.
    #[error("declared {width}x{height} pattern exceeds {max} cells")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// The data ended without `!`.
    #[error("pattern data is not terminated by `!`")]
    MissingTerminator,
}

/// Errors produced while loading a coordinate list pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A row is not exactly two comma separated integers.
    #[error("line {line}: expected `x,y`, found {content:?}")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
        /// The row as read.
        content: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the command line driver.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Options(#[from] getopts::Fail),

    /// An option was given a value it cannot take.
    #[error("invalid value {value:?} for option --{name}")]
    InvalidOption {
        name: &'static str,
        value: String,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
