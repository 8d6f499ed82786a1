//! Error types for ILDA decoding and encoding.

use std::io;

use super::FormatTag;

/// Violations of the ILDA wire layout, or of the section invariants the
/// encoder relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid ILDA magic bytes: {found:02x?}")]
    BadMagic { found: [u8; 4] },
    #[error("Unknown format code {0}")]
    UnknownFormat(u8),
    #[error("Field `{field}` is {len} bytes, at most 8 fit in the header")]
    FieldTooLong { field: &'static str, len: usize },
    #[error("Field `{field}` contains characters outside Latin-1")]
    FieldNotLatin1 { field: &'static str },
    #[error("Field `{field}` contains an embedded NUL")]
    FieldContainsNul { field: &'static str },
    #[error("Truncated data at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Unsupported format {0:?} for this operation")]
    UnsupportedFormat(FormatTag),
    #[error("Section holds {0} records, at most 65535 fit in the header")]
    TooManyRecords(usize),
    #[error("Header declares {declared} records but section holds {actual}")]
    RecordCountMismatch { declared: u16, actual: usize },
    #[error("Header declares format {declared:?} but records are {actual:?}")]
    FormatMismatch {
        declared: FormatTag,
        actual: FormatTag,
    },
    #[error("Frame index {0} leaves no room for a total frame count")]
    FrameIndexOverflow(u16),
}

impl FormatError {
    /// Short label used in decode summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::BadMagic { .. } => "bad magic",
            FormatError::UnknownFormat(_) => "unknown format",
            FormatError::FieldTooLong { .. } => "field too long",
            FormatError::FieldNotLatin1 { .. } => "field not latin-1",
            FormatError::FieldContainsNul { .. } => "field contains nul",
            FormatError::Truncated { .. } => "truncated",
            FormatError::UnsupportedFormat(_) => "unsupported format",
            FormatError::TooManyRecords(_) => "too many records",
            FormatError::RecordCountMismatch { .. } => "record count mismatch",
            FormatError::FormatMismatch { .. } => "format mismatch",
            FormatError::FrameIndexOverflow(_) => "frame index overflow",
        }
    }
}

/// Top-level error for file-level operations.
#[derive(Debug, thiserror::Error)]
pub enum IldaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("Failed to encode section {index}: {source}")]
    Encode {
        index: usize,
        #[source]
        source: FormatError,
    },
    #[error("Background load thread panicked")]
    LoadPanicked,
}
