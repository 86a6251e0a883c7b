//! # Packet Reader
//!
//! Sequential typed reads over a packet payload.
//!
//! ## Design
//!
//! - Borrowed buffer, no copies until a field is materialized
//! - Every read checks the remaining length first
//! - Integers are big-endian, strings and arrays carry a `u16` prefix

use crate::error::{ProtocolError, ProtocolResult};

/// A fixed-layout record that can be read from and written to the wire.
pub trait Record: Sized {
    /// Reads one record at the cursor.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] when the payload is truncated or malformed.
    fn read(reader: &mut PacketReader<'_>) -> ProtocolResult<Self>;

    /// Appends this record to the writer.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthOverflow`] when a nested string or
    /// array cannot be length-prefixed.
    fn write(&self, writer: &mut crate::PacketWriter) -> ProtocolResult<()>;
}

/// Packet reader - reads fields from a payload buffer.
pub struct PacketReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> PacketReader<'a> {
    /// Creates a new reader over a payload.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns the current read offset.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Takes the next `N` bytes.
    #[inline]
    fn take<const N: usize>(&mut self) -> ProtocolResult<[u8; N]> {
        let bytes = self.take_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Takes the next `len` bytes as a slice.
    fn take_slice(&mut self, len: usize) -> ProtocolResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(ProtocolError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> ProtocolResult<u8> {
        self.take::<1>().map(|b| b[0])
    }

    /// Reads a boolean (any non-zero byte is `true`).
    #[inline]
    pub fn read_bool(&mut self) -> ProtocolResult<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Reads a u16 in big-endian format.
    #[inline]
    pub fn read_u16(&mut self) -> ProtocolResult<u16> {
        self.take().map(u16::from_be_bytes)
    }

    /// Reads an i16 in big-endian format.
    #[inline]
    pub fn read_i16(&mut self) -> ProtocolResult<i16> {
        self.take().map(i16::from_be_bytes)
    }

    /// Reads a u32 in big-endian format.
    #[inline]
    pub fn read_u32(&mut self) -> ProtocolResult<u32> {
        self.take().map(u32::from_be_bytes)
    }

    /// Reads an i32 in big-endian format.
    #[inline]
    pub fn read_i32(&mut self) -> ProtocolResult<i32> {
        self.take().map(i32::from_be_bytes)
    }

    /// Reads a f32 in big-endian format.
    #[inline]
    pub fn read_f32(&mut self) -> ProtocolResult<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reads a `u16`-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> ProtocolResult<String> {
        let len = usize::from(self.read_u16()?);
        let bytes = self.take_slice(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Reads a `u16`-prefixed array, decoding each element with `read_one`.
    pub fn read_array<T>(
        &mut self,
        mut read_one: impl FnMut(&mut Self) -> ProtocolResult<T>,
    ) -> ProtocolResult<Vec<T>> {
        let count = usize::from(self.read_u16()?);
        // Cap the preallocation by what the payload could possibly hold.
        let mut out = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            out.push(read_one(self)?);
        }
        Ok(out)
    }

    /// Reads a `u16`-prefixed array of records.
    pub fn read_records<T: Record>(&mut self) -> ProtocolResult<Vec<T>> {
        self.read_array(T::read)
    }

    /// Fails if any bytes are left unread.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TrailingBytes`] with the leftover count.
    pub fn finish(&self) -> ProtocolResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(ProtocolError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian_integers() {
        let data = [0x01, 0x02, 0xFF, 0xFE, 0x00, 0x00, 0x01, 0x00];
        let mut reader = PacketReader::new(&data);

        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_i32().unwrap(), 256);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_truncated_read_reports_sizes() {
        let data = [0x00, 0x01];
        let mut reader = PacketReader::new(&data);

        let err = reader.read_i32().unwrap_err();
        assert_eq!(err, ProtocolError::Truncated { needed: 4, remaining: 2 });
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_string_and_array() {
        let data = [0x00, 0x02, b'o', b'k', 0x00, 0x02, 0x07, 0x09];
        let mut reader = PacketReader::new(&data);

        assert_eq!(reader.read_string().unwrap(), "ok");
        let bytes = reader.read_array(PacketReader::read_u8).unwrap();
        assert_eq!(bytes, vec![7, 9]);
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0x00, 0x01, 0xFF];
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_string().unwrap_err(), ProtocolError::InvalidUtf8);
    }

    #[test]
    fn test_array_count_larger_than_payload() {
        // Claims 60000 elements but carries one.
        let data = [0xEA, 0x60, 0x01];
        let mut reader = PacketReader::new(&data);
        assert!(matches!(
            reader.read_array(PacketReader::read_u8),
            Err(ProtocolError::Truncated { .. })
        ));
    }

    #[test]
    fn test_finish_reports_trailing() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = PacketReader::new(&data);
        reader.read_u8().unwrap();
        assert_eq!(reader.finish().unwrap_err(), ProtocolError::TrailingBytes(2));
    }
}
