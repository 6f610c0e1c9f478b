use thiserror::Error;

/// Errors raised by algorithm entry points.
///
/// Infeasible outcomes (no exact change, search miss, no path) are ordinary
/// results and never appear here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two parallel input lists differ in length.
    #[error("{left} has {left_len} entries but {right} has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// A weight matrix row does not match the number of rows.
    #[error("matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A weight matrix cell holds NaN.
    #[error("matrix cell ({row}, {col}) is not a number")]
    NotANumber { row: usize, col: usize },

    /// A vertex index is outside `0..vertices`.
    #[error("vertex {vertex} is out of range for a graph with {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },

    /// An item weight of zero makes the value/weight ratio undefined.
    #[error("item {index} has zero weight")]
    ZeroWeight { index: usize },

    /// A coin denomination of zero can never reduce the remaining amount.
    #[error("coin denomination at position {index} is zero")]
    ZeroCoin { index: usize },

    /// An activity that ends before it starts.
    #[error("activity {index} ends at {end} before it starts at {start}")]
    ReversedInterval { index: usize, start: i64, end: i64 },

    /// The requested Fibonacci number does not fit in a `u64`.
    #[error("F({n}) overflows a 64-bit result (largest supported n is {max})")]
    FibonacciOverflow { n: u32, max: u32 },

    /// A character being encoded has no code in the current Huffman tree.
    #[error("character {ch:?} has no code in the current tree")]
    UnknownSymbol { ch: char },

    /// A bit string contains something other than `0` or `1`.
    #[error("invalid bit {bit:?} at position {position}")]
    InvalidBit { bit: char, position: usize },

    /// A bit string cannot be decoded against the given tree.
    #[error("bit string does not decode against this tree at position {position}")]
    InvalidCode { position: usize },

    /// Two methods that must agree produced different answers.
    #[error("{check}: {first} disagrees with {second}")]
    Inconsistent {
        check: &'static str,
        first: String,
        second: String,
    },
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::LengthMismatch`] when two parallel lists differ in length.
pub(crate) fn ensure_same_len(
    left: &'static str,
    left_len: usize,
    right: &'static str,
    right_len: usize,
) -> Result<()> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            left,
            left_len,
            right,
            right_len,
        })
    }
}
