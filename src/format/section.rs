//! A section: one header followed by its records.

use std::io::Write;

use super::byte_order::ByteReader;
use super::{FormatError, FormatTag, IldaError, Records, SectionHeader};

/// Header plus records. `records.len() == header.record_count` and
/// `records.format() == header.format` for every section built through
/// [`Section::new`] or decoded from bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: SectionHeader,
    pub records: Records,
}

/// Descriptive header fields; count and format come from the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionInfo {
    pub name: String,
    pub company_name: String,
    pub frame_number: u16,
    pub total_frames: u16,
    pub projector_number: u8,
}

impl Section {
    /// Build a section whose header agrees with `records`.
    pub fn new(info: SectionInfo, records: Records) -> Result<Self, FormatError> {
        let record_count =
            u16::try_from(records.len()).map_err(|_| FormatError::TooManyRecords(records.len()))?;
        Ok(Self {
            header: SectionHeader {
                format: records.format(),
                name: info.name,
                company_name: info.company_name,
                record_count,
                frame_number: info.frame_number,
                total_frames: info.total_frames,
                projector_number: info.projector_number,
            },
            records,
        })
    }

    pub fn format(&self) -> FormatTag {
        self.header.format
    }

    /// Zero-record section, the conventional end-of-animation marker.
    pub fn is_terminator(&self) -> bool {
        self.header.record_count == 0
    }

    /// Wire size of this section.
    pub fn byte_len(&self) -> usize {
        SectionHeader::SIZE + self.records.byte_len()
    }

    /// Check that the header describes the records.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.records.format() != self.header.format {
            return Err(FormatError::FormatMismatch {
                declared: self.header.format,
                actual: self.records.format(),
            });
        }
        if self.records.len() != self.header.record_count as usize {
            return Err(FormatError::RecordCountMismatch {
                declared: self.header.record_count,
                actual: self.records.len(),
            });
        }
        Ok(())
    }

    /// Decode one section at the cursor. On failure the cursor is left at
    /// the start of the section.
    pub fn read_from(r: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        let start = r.clone();
        let header = SectionHeader::read_from(r)?;
        match Records::read_from(header.format, header.record_count, r) {
            Ok(records) => Ok(Self { header, records }),
            Err(e) => {
                *r = start;
                Err(e)
            }
        }
    }

    /// Encode header and records. Nothing is written for an invalid section.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), IldaError> {
        self.validate()?;
        let header = self.header.to_bytes()?;
        w.write_all(&header)?;
        self.records.write_to(w)
    }
}
