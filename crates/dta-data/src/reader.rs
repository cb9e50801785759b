//! Sequential little-endian reader over an in-memory buffer.

use crate::error::DecodeError;

/// Position-tracking cursor.
///
/// Sub-readers carved out with [`Reader::sub_reader`] remember where they
/// start in the enclosing buffer, so [`Reader::position`] and every error
/// offset are absolute within the container.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn eof(&self, wanted: usize) -> DecodeError {
        DecodeError::UnexpectedEof {
            offset: self.position(),
            wanted,
            remaining: self.remaining(),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(self.eof(n));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Four raw bytes, as used for section and sub-section tags.
    pub fn read_tag(&mut self) -> Result<[u8; 4], DecodeError> {
        self.read_array()
    }

    /// `n` bytes decoded one byte per character (Latin-1).
    pub fn read_text(&mut self, n: usize) -> Result<String, DecodeError> {
        Ok(self.read_bytes(n)?.iter().map(|&b| char::from(b)).collect())
    }

    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.data.get(self.pos).copied().ok_or_else(|| self.eof(1))
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            return Err(self.eof(n));
        }
        self.pos += n;
        Ok(())
    }

    /// Consume everything that is left.
    pub fn skip_rest(&mut self) {
        self.pos = self.data.len();
    }

    /// Consume the next `n` bytes and return a reader confined to them.
    pub fn sub_reader(&mut self, n: usize) -> Result<Reader<'a>, DecodeError> {
        let base = self.position();
        let data = self.read_bytes(n)?;
        Ok(Reader { data, pos: 0, base })
    }
}

/// Latin-1 text with trailing NULs removed.
pub(crate) fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}
