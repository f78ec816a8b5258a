//! Error type shared by the engine modules.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grid is empty")]
    EmptyGrid,

    #[error("grid row {row} has length {len}, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("symbol '{}' not found in grid", .0.escape_ascii())]
    SymbolNotFound(u8),

    #[error("count overflowed u64")]
    Overflow,
}
