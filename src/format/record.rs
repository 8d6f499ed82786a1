//! Per-format record layouts and their codecs.

use std::io::Write;

use super::byte_order::{BigEndian, ByteReader};
use super::{FormatError, FormatTag, IldaError};

/// Point status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(pub u8);

impl Status {
    /// Beam off for this point and the segment ending at it.
    pub const BLANKED: u8 = 0x40;
    /// Final point of the frame.
    pub const LAST_POINT: u8 = 0x80;

    pub const fn visible() -> Self {
        Status(0)
    }

    pub const fn blanked() -> Self {
        Status(Self::BLANKED)
    }

    pub fn is_blanked(self) -> bool {
        self.0 & Self::BLANKED != 0
    }

    pub fn is_last_point(self) -> bool {
        self.0 & Self::LAST_POINT != 0
    }
}

/// 8-bit RGB triple; also a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise mean, rounded down.
    pub fn midpoint(self, other: Rgb) -> Rgb {
        let mid = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2) as u8;
        Rgb {
            r: mid(self.r, other.r),
            g: mid(self.g, other.g),
            b: mid(self.b, other.b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexedPoint3D {
    pub position: [i16; 3],
    pub status: Status,
    pub color_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexedPoint2D {
    pub position: [i16; 2],
    pub status: Status,
    pub color_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrueColorPoint3D {
    pub position: [i16; 3],
    pub status: Status,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrueColorPoint2D {
    pub position: [i16; 2],
    pub status: Status,
    pub color: Rgb,
}

/// Records of one section, one variant per format tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    Coords3D(Vec<IndexedPoint3D>),
    Coords2D(Vec<IndexedPoint2D>),
    ColorPalette(Vec<Rgb>),
    Coords3DTrueColor(Vec<TrueColorPoint3D>),
    Coords2DTrueColor(Vec<TrueColorPoint2D>),
}

impl Records {
    /// Empty record list of the given format.
    pub fn empty(format: FormatTag) -> Self {
        match format {
            FormatTag::Coords3D => Records::Coords3D(Vec::new()),
            FormatTag::Coords2D => Records::Coords2D(Vec::new()),
            FormatTag::ColorPalette => Records::ColorPalette(Vec::new()),
            FormatTag::Coords3DTrueColor => Records::Coords3DTrueColor(Vec::new()),
            FormatTag::Coords2DTrueColor => Records::Coords2DTrueColor(Vec::new()),
        }
    }

    pub fn format(&self) -> FormatTag {
        match self {
            Records::Coords3D(_) => FormatTag::Coords3D,
            Records::Coords2D(_) => FormatTag::Coords2D,
            Records::ColorPalette(_) => FormatTag::ColorPalette,
            Records::Coords3DTrueColor(_) => FormatTag::Coords3DTrueColor,
            Records::Coords2DTrueColor(_) => FormatTag::Coords2DTrueColor,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Coords3D(v) => v.len(),
            Records::Coords2D(v) => v.len(),
            Records::ColorPalette(v) => v.len(),
            Records::Coords3DTrueColor(v) => v.len(),
            Records::Coords2DTrueColor(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.format().record_size()
    }

    /// Read exactly `count` records of `format`.
    ///
    /// The whole payload is bounds-checked up front, so a truncated section
    /// fails before any record is produced.
    pub fn read_from(
        format: FormatTag,
        count: u16,
        r: &mut ByteReader<'_>,
    ) -> Result<Self, FormatError> {
        let count = count as usize;
        r.ensure(count * format.record_size())?;

        Ok(match format {
            FormatTag::Coords3D => Records::Coords3D(read_many(count, r)?),
            FormatTag::Coords2D => Records::Coords2D(read_many(count, r)?),
            FormatTag::ColorPalette => Records::ColorPalette(read_many(count, r)?),
            FormatTag::Coords3DTrueColor => Records::Coords3DTrueColor(read_many(count, r)?),
            FormatTag::Coords2DTrueColor => Records::Coords2DTrueColor(read_many(count, r)?),
        })
    }

    /// Write all records in wire order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), IldaError> {
        let mut buf = Vec::with_capacity(self.byte_len());
        match self {
            Records::Coords3D(v) => write_many(v, &mut buf),
            Records::Coords2D(v) => write_many(v, &mut buf),
            Records::ColorPalette(v) => write_many(v, &mut buf),
            Records::Coords3DTrueColor(v) => write_many(v, &mut buf),
            Records::Coords2DTrueColor(v) => write_many(v, &mut buf),
        }
        w.write_all(&buf)?;
        Ok(())
    }
}

/// A fixed-size record with a big-endian wire layout.
trait WireRecord: Sized {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError>;
    fn write(&self, buf: &mut Vec<u8>);
}

impl WireRecord for Rgb {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        let [red, green, blue] = r.read_array::<3>()?;
        Ok(Rgb::new(red, green, blue))
    }

    fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&[self.r, self.g, self.b]);
    }
}

impl WireRecord for IndexedPoint3D {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            position: [r.read_i16()?, r.read_i16()?, r.read_i16()?],
            status: Status(r.read_u8()?),
            color_index: r.read_u8()?,
        })
    }

    fn write(&self, buf: &mut Vec<u8>) {
        put_position(buf, &self.position);
        buf.push(self.status.0);
        buf.push(self.color_index);
    }
}

impl WireRecord for IndexedPoint2D {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            position: [r.read_i16()?, r.read_i16()?],
            status: Status(r.read_u8()?),
            color_index: r.read_u8()?,
        })
    }

    fn write(&self, buf: &mut Vec<u8>) {
        put_position(buf, &self.position);
        buf.push(self.status.0);
        buf.push(self.color_index);
    }
}

impl WireRecord for TrueColorPoint3D {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            position: [r.read_i16()?, r.read_i16()?, r.read_i16()?],
            status: Status(r.read_u8()?),
            color: Rgb::read(r)?,
        })
    }

    fn write(&self, buf: &mut Vec<u8>) {
        put_position(buf, &self.position);
        buf.push(self.status.0);
        self.color.write(buf);
    }
}

impl WireRecord for TrueColorPoint2D {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            position: [r.read_i16()?, r.read_i16()?],
            status: Status(r.read_u8()?),
            color: Rgb::read(r)?,
        })
    }

    fn write(&self, buf: &mut Vec<u8>) {
        put_position(buf, &self.position);
        buf.push(self.status.0);
        self.color.write(buf);
    }
}

fn read_many<T: WireRecord>(count: usize, r: &mut ByteReader<'_>) -> Result<Vec<T>, FormatError> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(T::read(r)?);
    }
    Ok(out)
}

fn write_many<T: WireRecord>(records: &[T], buf: &mut Vec<u8>) {
    for record in records {
        record.write(buf);
    }
}

fn put_position(buf: &mut Vec<u8>, position: &[i16]) {
    for &axis in position {
        buf.extend_from_slice(&axis.to_big_endian());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(records: &Records) -> Vec<u8> {
        let mut buf = Vec::new();
        records.write_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_true_color_3d_layout() {
        let records = Records::Coords3DTrueColor(vec![TrueColorPoint3D {
            position: [-1, 0x0102, i16::MIN],
            status: Status::blanked(),
            color: Rgb::new(10, 20, 30),
        }]);
        let bytes = encode(&records);
        assert_eq!(
            bytes,
            vec![0xFF, 0xFF, 0x01, 0x02, 0x80, 0x00, 0x40, 10, 20, 30]
        );

        let decoded =
            Records::read_from(FormatTag::Coords3DTrueColor, 1, &mut ByteReader::new(&bytes))
                .unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_true_color_2d_layout() {
        let records = Records::Coords2DTrueColor(vec![
            TrueColorPoint2D {
                position: [-32000, 32000],
                status: Status::visible(),
                color: Rgb::new(255, 0, 128),
            },
            TrueColorPoint2D {
                position: [0, -1],
                status: Status(Status::LAST_POINT),
                color: Rgb::BLACK,
            },
        ]);
        let bytes = encode(&records);
        assert_eq!(bytes.len(), 2 * FormatTag::Coords2DTrueColor.record_size());
        assert_eq!(&bytes[8..16], &[0, 0, 0xFF, 0xFF, 0x80, 0, 0, 0]);

        let decoded =
            Records::read_from(FormatTag::Coords2DTrueColor, 2, &mut ByteReader::new(&bytes))
                .unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_indexed_layouts() {
        let records = Records::Coords3D(vec![IndexedPoint3D {
            position: [1, -2, 3],
            status: Status(0xC0),
            color_index: 7,
        }]);
        let bytes = encode(&records);
        assert_eq!(bytes, vec![0, 1, 0xFF, 0xFE, 0, 3, 0xC0, 7]);
        assert_eq!(
            Records::read_from(FormatTag::Coords3D, 1, &mut ByteReader::new(&bytes)).unwrap(),
            records
        );

        let records = Records::Coords2D(vec![IndexedPoint2D {
            position: [300, -300],
            status: Status::visible(),
            color_index: 63,
        }]);
        let bytes = encode(&records);
        assert_eq!(bytes, vec![0x01, 0x2C, 0xFE, 0xD4, 0, 63]);
        assert_eq!(
            Records::read_from(FormatTag::Coords2D, 1, &mut ByteReader::new(&bytes)).unwrap(),
            records
        );
    }

    #[test]
    fn test_palette_decodes_real_entries() {
        let bytes = [255, 0, 0, 0, 255, 0, 0, 0, 255];
        let decoded =
            Records::read_from(FormatTag::ColorPalette, 3, &mut ByteReader::new(&bytes)).unwrap();
        assert_eq!(
            decoded,
            Records::ColorPalette(vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255)
            ])
        );
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = [0u8; 15];
        let mut r = ByteReader::new(&bytes);
        let err = Records::read_from(FormatTag::Coords2DTrueColor, 2, &mut r).unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                offset: 0,
                needed: 16,
                available: 15
            }
        );
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_empty_records() {
        for format in [
            FormatTag::Coords3D,
            FormatTag::Coords2D,
            FormatTag::ColorPalette,
            FormatTag::Coords3DTrueColor,
            FormatTag::Coords2DTrueColor,
        ] {
            let records = Records::empty(format);
            assert_eq!(records.format(), format);
            assert!(records.is_empty());
            assert!(encode(&records).is_empty());
        }
    }

    #[test]
    fn test_status_bits() {
        assert!(Status::blanked().is_blanked());
        assert!(!Status::visible().is_blanked());
        assert!(Status(0xC0).is_last_point());
        assert!(!Status(0x3F).is_blanked());
    }

    #[test]
    fn test_rgb_midpoint() {
        assert_eq!(
            Rgb::new(255, 0, 10).midpoint(Rgb::new(255, 255, 11)),
            Rgb::new(255, 127, 10)
        );
    }
}
