//! Big-endian field conversion and a bounds-checked reader over a byte slice.

use super::FormatError;

/// Conversion between native integers and their big-endian wire bytes.
pub trait BigEndian: Sized {
    /// Wire representation.
    type Bytes;

    fn to_big_endian(self) -> Self::Bytes;
    fn from_big_endian(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_big_endian {
    ($($ty:ty => $n:literal),* $(,)?) => {
        $(
            impl BigEndian for $ty {
                type Bytes = [u8; $n];

                #[inline]
                fn to_big_endian(self) -> [u8; $n] {
                    self.to_be_bytes()
                }

                #[inline]
                fn from_big_endian(bytes: [u8; $n]) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_big_endian!(u16 => 2, i16 => 2, u32 => 4);

/// Cursor over a borrowed buffer. Every read either consumes exactly the
/// requested bytes or fails with [`FormatError::Truncated`] and leaves the
/// cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Start reading at `position` within `data`.
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            position: position.min(data.len()),
        }
    }

    /// Absolute offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Fail unless at least `needed` bytes remain.
    pub fn ensure(&self, needed: usize) -> Result<(), FormatError> {
        if self.remaining() < needed {
            return Err(FormatError::Truncated {
                offset: self.position,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Borrow the next `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(len)?;
        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        Ok(u16::from_big_endian(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, FormatError> {
        Ok(i16::from_big_endian(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        Ok(u32::from_big_endian(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_wire_order() {
        assert_eq!(0x0102u16.to_big_endian(), [0x01, 0x02]);
        assert_eq!(u16::from_big_endian([0x01, 0x02]), 0x0102);
    }

    #[test]
    fn test_u32_wire_order() {
        assert_eq!(0x0102_0304u32.to_big_endian(), [1, 2, 3, 4]);
        assert_eq!(u32::from_big_endian([1, 2, 3, 4]), 0x0102_0304);
    }

    #[test]
    fn test_negative_i16() {
        assert_eq!((-1i16).to_big_endian(), [0xFF, 0xFF]);
        assert_eq!(i16::from_big_endian([0xFF, 0xFF]), -1);
        assert_eq!(i16::from_big_endian([0x80, 0x00]), i16::MIN);
    }

    #[test]
    fn test_reader_sequence() {
        let data = [0x12, 0x34, 0xFF, 0xFE, 0x07, 0, 0, 1, 0];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.read_u32().unwrap(), 0x0000_0100);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_truncated_keeps_position() {
        let data = [1, 2, 3];
        let mut r = ByteReader::at(&data, 2);
        let err = r.read_u16().unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                offset: 2,
                needed: 2,
                available: 1
            }
        );
        assert_eq!(r.position(), 2);
        assert_eq!(r.read_u8().unwrap(), 3);
    }
}
