//! Section discovery and whole-buffer encode/decode.

use std::fmt;

use crate::format::{ByteReader, FormatError, ILDA_MAGIC, IldaError, Section};

/// A section that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionError {
    /// Byte offset where the failed section starts.
    pub offset: usize,
    pub error: FormatError,
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.error.kind(), self.offset)
    }
}

/// Outcome of decoding a buffer: everything recoverable plus what failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Successfully decoded sections, in file order.
    pub sections: Vec<Section>,
    /// Per-section failures, in file order.
    pub errors: Vec<SectionError>,
    /// Every offset where the magic bytes occur.
    pub candidates: Vec<usize>,
}

impl DecodeReport {
    /// True if no section failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sections attempted, successful or not.
    pub fn attempted(&self) -> usize {
        self.sections.len() + self.errors.len()
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decoded {}/{} sections",
            self.sections.len(),
            self.attempted()
        )?;
        if !self.errors.is_empty() {
            write!(f, ", {} failed: ", self.errors.len())?;
            for (i, err) in self.errors.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", err)?;
            }
        }
        Ok(())
    }
}

/// Offsets of every occurrence of the magic bytes, at any alignment.
pub fn scan_magic(bytes: &[u8]) -> Vec<usize> {
    bytes
        .windows(ILDA_MAGIC.len())
        .enumerate()
        .filter(|(_, w)| *w == ILDA_MAGIC)
        .map(|(i, _)| i)
        .collect()
}

/// Decode every section that can be recovered from `bytes`.
///
/// Sections are walked by their declared sizes starting at offset 0. When a
/// section fails to decode (or the bytes at the cursor are not a section),
/// the failure is recorded and decoding resumes at the next magic
/// occurrence after the failing offset.
pub fn decode_file(bytes: &[u8]) -> DecodeReport {
    let candidates = scan_magic(bytes);
    log::debug!(
        "Scanning {} bytes, {} magic candidates",
        bytes.len(),
        candidates.len()
    );

    let mut sections = Vec::new();
    let mut errors = Vec::new();
    let mut reader = ByteReader::new(bytes);

    while reader.remaining() > 0 {
        let offset = reader.position();
        match Section::read_from(&mut reader) {
            Ok(section) => {
                log::debug!(
                    "Section {} at offset {}: {:?}, {} records",
                    sections.len(),
                    offset,
                    section.format(),
                    section.header.record_count
                );
                sections.push(section);
            }
            Err(error) => {
                log::warn!("Skipping section at offset {}: {}", offset, error);
                errors.push(SectionError { offset, error });
                let next = candidates
                    .iter()
                    .copied()
                    .find(|&c| c > offset)
                    .unwrap_or(bytes.len());
                reader = ByteReader::at(bytes, next);
            }
        }
    }

    DecodeReport {
        sections,
        errors,
        candidates,
    }
}

/// Encode sections in order. Stops at the first invalid section.
pub fn encode_file(sections: &[Section]) -> Result<Vec<u8>, IldaError> {
    let total: usize = sections.iter().map(Section::byte_len).sum();
    let mut out = Vec::with_capacity(total);
    for (index, section) in sections.iter().enumerate() {
        section.write_to(&mut out).map_err(|e| match e {
            IldaError::Format(source) => IldaError::Encode { index, source },
            other => other,
        })?;
    }
    Ok(out)
}
