//! # Packet Writer
//!
//! Mirror of [`PacketReader`](crate::PacketReader): appends fields in wire
//! order. Used for the outbound requests and to build capture fixtures.

use crate::error::{ProtocolError, ProtocolResult};
use crate::reader::Record;

/// Packet writer - appends fields to a growable buffer.
///
/// Designed to be reused across packets via [`PacketWriter::reset`].
#[derive(Debug, Default)]
pub struct PacketWriter {
    buffer: Vec<u8>,
}

impl PacketWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Resets the writer for reuse, keeping its allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns a slice of the written data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a boolean as one byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes a u16 in big-endian format.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an i16 in big-endian format.
    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a u32 in big-endian format.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an i32 in big-endian format.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a f32 in big-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    /// Writes a `u16` length or count prefix.
    fn write_len(&mut self, len: usize) -> ProtocolResult<()> {
        let len = u16::try_from(len).map_err(|_| ProtocolError::LengthOverflow(len))?;
        self.write_u16(len);
        Ok(())
    }

    /// Writes a `u16`-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthOverflow`] for strings over 65535 bytes.
    pub fn write_string(&mut self, value: &str) -> ProtocolResult<()> {
        self.write_len(value.len())?;
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes a `u16`-prefixed array, encoding each element with `write_one`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthOverflow`] for arrays over 65535 items,
    /// or whatever `write_one` returns.
    pub fn write_array<T>(
        &mut self,
        items: &[T],
        mut write_one: impl FnMut(&mut Self, &T) -> ProtocolResult<()>,
    ) -> ProtocolResult<()> {
        self.write_len(items.len())?;
        for item in items {
            write_one(self, item)?;
        }
        Ok(())
    }

    /// Writes a `u16`-prefixed array of records.
    ///
    /// # Errors
    ///
    /// See [`PacketWriter::write_array`].
    pub fn write_records<T: Record>(&mut self, items: &[T]) -> ProtocolResult<()> {
        self.write_array(items, |w, item| item.write(w))
    }
}
