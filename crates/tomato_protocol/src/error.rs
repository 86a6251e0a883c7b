//! # Protocol Error Types
//!
//! All errors that can occur while reading or writing a packet.

use thiserror::Error;

/// Errors raised by the wire layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload ended before a field could be read.
    #[error("truncated packet: need {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the field being read.
        needed: usize,
        /// Bytes left in the payload.
        remaining: usize,
    },

    /// The frame's leading type byte is not part of the catalogue.
    #[error("unknown packet type: {0}")]
    UnknownPacketType(u8),

    /// A string field did not hold valid UTF-8.
    #[error("string field is not valid utf-8")]
    InvalidUtf8,

    /// The packet decoded fully but bytes were left over.
    #[error("{0} trailing bytes after packet body")]
    TrailingBytes(usize),

    /// A string or array is too long for its `u16` length prefix.
    #[error("length {0} does not fit a u16 prefix")]
    LengthOverflow(usize),
}

/// Result type for wire operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
