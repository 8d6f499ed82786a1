//! The fixed 32-byte section header.

use std::io::Write;

use super::byte_order::{BigEndian, ByteReader};
use super::{FormatError, IldaError};

/// Magic bytes opening every ILDA section.
pub const ILDA_MAGIC: &[u8; 4] = b"ILDA";

/// Width of the name and company name fields.
pub const NAME_LEN: usize = 8;

/// Record layout of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FormatTag {
    /// 3D coordinates with a palette index.
    Coords3D = 0,
    /// 2D coordinates with a palette index.
    Coords2D = 1,
    /// Color palette entries.
    ColorPalette = 2,
    /// 3D coordinates with inline RGB.
    Coords3DTrueColor = 4,
    /// 2D coordinates with inline RGB.
    Coords2DTrueColor = 5,
}

impl FormatTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(FormatTag::Coords3D),
            1 => Some(FormatTag::Coords2D),
            2 => Some(FormatTag::ColorPalette),
            4 => Some(FormatTag::Coords3DTrueColor),
            5 => Some(FormatTag::Coords2DTrueColor),
            _ => None,
        }
    }

    /// Size of one record on the wire.
    pub fn record_size(self) -> usize {
        match self {
            FormatTag::Coords3D => 8,
            FormatTag::Coords2D => 6,
            FormatTag::ColorPalette => 3,
            FormatTag::Coords3DTrueColor => 10,
            FormatTag::Coords2DTrueColor => 8,
        }
    }
}

impl TryFrom<u8> for FormatTag {
    type Error = FormatError;

    fn try_from(v: u8) -> Result<Self, FormatError> {
        FormatTag::from_u8(v).ok_or(FormatError::UnknownFormat(v))
    }
}

/// Header preceding the records of one section.
///
/// The two reserved regions (bytes 4..7 and byte 31) are not stored: they
/// are ignored on read and always written as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub format: FormatTag,
    /// Frame or palette name, at most 8 Latin-1 characters.
    pub name: String,
    /// Company name, at most 8 Latin-1 characters.
    pub company_name: String,
    pub record_count: u16,
    pub frame_number: u16,
    /// Frames in the animation; identical for every section of it.
    pub total_frames: u16,
    pub projector_number: u8,
}

impl SectionHeader {
    /// Size of header in bytes.
    /// Magic(4) + Reserved(3) + Format(1) + Name(8) + Company(8) +
    /// Records(2) + Frame(2) + Total(2) + Projector(1) + Reserved(1) = 32
    pub const SIZE: usize = 32;

    /// Total wire size of the section this header introduces.
    pub fn section_size(&self) -> usize {
        Self::SIZE + self.record_count as usize * self.format.record_size()
    }

    /// Serialize into the fixed 32-byte layout.
    pub fn to_bytes(&self) -> Result<[u8; Self::SIZE], FormatError> {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(ILDA_MAGIC);
        bytes[7] = self.format as u8;
        bytes[8..16].copy_from_slice(&encode_name("name", &self.name)?);
        bytes[16..24].copy_from_slice(&encode_name("company_name", &self.company_name)?);
        bytes[24..26].copy_from_slice(&self.record_count.to_big_endian());
        bytes[26..28].copy_from_slice(&self.frame_number.to_big_endian());
        bytes[28..30].copy_from_slice(&self.total_frames.to_big_endian());
        bytes[30] = self.projector_number;
        Ok(bytes)
    }

    /// Write header to output. Nothing is written if a field is invalid.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), IldaError> {
        let bytes = self.to_bytes()?;
        w.write_all(&bytes)?;
        Ok(())
    }

    /// Read header from the cursor, consuming exactly 32 bytes on success.
    pub fn read_from(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        let start = r.clone();
        let result = Self::read_fields(r);
        if result.is_err() {
            *r = start;
        }
        result
    }

    fn read_fields(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        r.ensure(ILDA_MAGIC.len())?;
        let magic: [u8; 4] = r.read_array()?;
        if &magic != ILDA_MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }
        r.ensure(Self::SIZE - ILDA_MAGIC.len())?;

        let _reserved: [u8; 3] = r.read_array()?;
        let format = FormatTag::try_from(r.read_u8()?)?;
        let name = decode_name(&r.read_array::<NAME_LEN>()?);
        let company_name = decode_name(&r.read_array::<NAME_LEN>()?);
        let record_count = r.read_u16()?;
        let frame_number = r.read_u16()?;
        let total_frames = r.read_u16()?;
        let projector_number = r.read_u8()?;
        let _reserved = r.read_u8()?;

        Ok(Self {
            format,
            name,
            company_name,
            record_count,
            frame_number,
            total_frames,
            projector_number,
        })
    }
}

/// Decode a header from the start of `bytes`.
pub fn decode_header(bytes: &[u8]) -> Result<SectionHeader, FormatError> {
    SectionHeader::read_from(&mut ByteReader::new(bytes))
}

/// Encode a header; always exactly [`SectionHeader::SIZE`] bytes on success.
pub fn encode_header<W: Write>(header: &SectionHeader, w: &mut W) -> Result<(), IldaError> {
    header.write_to(w)
}

/// Fixed-width field up to the first NUL, one char per byte.
fn decode_name(raw: &[u8; NAME_LEN]) -> String {
    raw.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

fn encode_name(field: &'static str, value: &str) -> Result<[u8; NAME_LEN], FormatError> {
    let len = value.chars().count();
    if len > NAME_LEN {
        return Err(FormatError::FieldTooLong { field, len });
    }
    // NUL terminates the field on read
    if value.contains('\0') {
        return Err(FormatError::FieldContainsNul { field });
    }
    let mut out = [0u8; NAME_LEN];
    for (slot, c) in out.iter_mut().zip(value.chars()) {
        *slot = u8::try_from(u32::from(c)).map_err(|_| FormatError::FieldNotLatin1 { field })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> SectionHeader {
        SectionHeader {
            format: FormatTag::Coords2DTrueColor,
            name: "intro".to_string(),
            company_name: "lasers".to_string(),
            record_count: 12,
            frame_number: 0x0102,
            total_frames: 300,
            projector_number: 1,
        }
    }

    #[test]
    fn test_header_roundtrip() {
        let header = sample_header();

        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), SectionHeader::SIZE);

        let decoded = decode_header(&buf).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_wire_layout() {
        let bytes = sample_header().to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"ILDA");
        assert_eq!(&bytes[4..7], &[0, 0, 0]);
        assert_eq!(bytes[7], 5);
        assert_eq!(&bytes[8..16], b"intro\0\0\0");
        assert_eq!(&bytes[16..24], b"lasers\0\0");
        assert_eq!(&bytes[24..26], &[0, 12]);
        assert_eq!(&bytes[26..28], &[0x01, 0x02]);
        assert_eq!(&bytes[28..30], &[0x01, 0x2C]);
        assert_eq!(bytes[30], 1);
        assert_eq!(bytes[31], 0);
    }

    #[test]
    fn test_header_fixed_width_for_any_name_length() {
        for len in 0..=NAME_LEN {
            let mut header = sample_header();
            header.name = "x".repeat(len);
            header.company_name = "y".repeat(NAME_LEN - len);
            let mut buf = Vec::new();
            encode_header(&header, &mut buf).unwrap();
            assert_eq!(buf.len(), SectionHeader::SIZE, "name length {}", len);
        }
    }

    #[test]
    fn test_full_width_name_without_terminator() {
        let mut header = sample_header();
        header.name = "ABCDEFGH".to_string();
        let bytes = header.to_bytes().unwrap();
        assert_eq!(&bytes[8..16], b"ABCDEFGH");
        assert_eq!(decode_header(&bytes).unwrap().name, "ABCDEFGH");
    }

    #[test]
    fn test_name_truncated_at_embedded_nul() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[8..16].copy_from_slice(b"ab\0cdefg");
        assert_eq!(decode_header(&bytes).unwrap().name, "ab");
    }

    #[test]
    fn test_reserved_bytes_ignored_on_read() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[4] = 0xAA;
        bytes[6] = 0x55;
        bytes[31] = 0xFF;
        let decoded = decode_header(&bytes).unwrap();

        let reencoded = decoded.to_bytes().unwrap();
        assert_eq!(&reencoded[4..7], &[0, 0, 0]);
        assert_eq!(reencoded[31], 0);
    }

    #[test]
    fn test_name_too_long_rejected() {
        let mut header = sample_header();
        header.company_name = "overlong!".to_string();
        let mut buf = Vec::new();
        let err = header.write_to(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            IldaError::Format(FormatError::FieldTooLong {
                field: "company_name",
                len: 9
            })
        ));
        assert!(buf.is_empty(), "no partial header may be written");
    }

    #[test]
    fn test_non_latin1_name_rejected() {
        let mut header = sample_header();
        header.name = "λaser".to_string();
        assert_eq!(
            header.to_bytes().unwrap_err(),
            FormatError::FieldNotLatin1 { field: "name" }
        );
    }

    #[test]
    fn test_embedded_nul_rejected() {
        let mut header = sample_header();
        header.name = "ab\0cd".to_string();
        let mut buf = Vec::new();
        let err = header.write_to(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            IldaError::Format(FormatError::FieldContainsNul { field: "name" })
        ));
        assert!(buf.is_empty());

        let mut header = sample_header();
        header.company_name = "\0".to_string();
        assert_eq!(
            header.to_bytes().unwrap_err(),
            FormatError::FieldContainsNul {
                field: "company_name"
            }
        );
    }

    #[test]
    fn test_latin1_name_roundtrip() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[8] = 0xE9;
        let decoded = decode_header(&bytes).unwrap();
        assert_eq!(decoded.name.chars().next(), Some('é'));
        assert_eq!(decoded.to_bytes().unwrap()[8], 0xE9);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[0..4].copy_from_slice(b"ILDB");
        assert_eq!(
            decode_header(&bytes).unwrap_err(),
            FormatError::BadMagic { found: *b"ILDB" }
        );
    }

    #[test]
    fn test_unknown_format() {
        let mut bytes = sample_header().to_bytes().unwrap();
        bytes[7] = 3;
        assert_eq!(
            decode_header(&bytes).unwrap_err(),
            FormatError::UnknownFormat(3)
        );
    }

    #[test]
    fn test_truncated_header() {
        let bytes = sample_header().to_bytes().unwrap();
        let mut r = ByteReader::new(&bytes[..20]);
        let err = SectionHeader::read_from(&mut r).unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                offset: 4,
                needed: 28,
                available: 16
            }
        );
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_format_tag_codes() {
        for code in 0..=255u8 {
            match FormatTag::from_u8(code) {
                Some(tag) => assert_eq!(tag as u8, code),
                None => assert!(matches!(code, 3 | 6..=255)),
            }
        }
        assert_eq!(FormatTag::Coords3DTrueColor.record_size(), 10);
        assert_eq!(FormatTag::Coords2DTrueColor.record_size(), 8);
    }

    #[test]
    fn test_section_size() {
        let header = sample_header();
        assert_eq!(header.section_size(), 32 + 12 * 8);
    }
}
