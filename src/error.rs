//! Error types for seqio

use thiserror::Error;

/// Result type alias for seqio operations
pub type Result<T> = std::result::Result<T, SeqioError>;

/// Error types that can occur in seqio
#[derive(Debug, Error)]
pub enum SeqioError {
    /// I/O error, including compression-stream corruption
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Open mode outside {read, write}, or an operation issued against a
    /// handle opened in the other mode
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// Invalid argument (e.g. k-mer window exceeding the record length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Substring bounds outside the record length
    #[error("Range {start}..{end} out of bounds for sequence of length {len}")]
    OutOfRange {
        /// Requested start position
        start: usize,
        /// Requested end position (exclusive)
        end: usize,
        /// Actual sequence length
        len: usize,
    },

    /// Malformed record (bad marker, truncated body, wrong format requested)
    #[error("Invalid record format at line {line}: {msg}")]
    InvalidFormat {
        /// Line number where the error was detected
        line: usize,
        /// Error message
        msg: String,
    },

    /// FASTQ sequence/quality length mismatch, on read or write
    #[error("Sequence length ({sequence}) != quality length ({quality})")]
    LengthMismatch {
        /// Sequence length
        sequence: usize,
        /// Quality length
        quality: usize,
    },

    /// Sequence byte outside the configured valid-character set
    #[error("Invalid sequence character {byte:#04x} at line {line}")]
    InvalidCharacter {
        /// Offending byte
        byte: u8,
        /// Line number where the byte was found
        line: usize,
    },

    /// Operation the underlying resource cannot perform (e.g. reset on stdin)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Operation attempted after `close()`
    #[error("Operation on closed handle: {0}")]
    ClosedHandle(String),
}
