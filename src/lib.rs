//! ILDA Image Data Transfer Format codec.
//!
//! This crate reads and writes ILDA laser show files and converts sparse
//! point animations into playable section sequences.
//!
//! # Architecture
//!
//! - `format`: Wire layout (headers, records, sections) and byte order
//! - `file`: Section scanning with partial recovery, file encode/decode, disk I/O
//! - `animation`: Point animation to section conversion, preview strokes
//! - `schema`: Converter configuration and JSON animation documents
//!
//! # Example
//!
//! ```rust,no_run
//! use ilda_codec::{
//!     animation::SectionConverter,
//!     file::{IldaFile, decode_file},
//!     schema::{AnimationPoint, ConverterConfig},
//! };
//!
//! let mut converter = SectionConverter::new(ConverterConfig::default())?;
//! converter.set_frame(0, vec![AnimationPoint::new(0, 0, (65535.0, 0.0, 0.0))]);
//! converter.set_frame(10, Vec::new());
//!
//! let file = converter.to_file()?;
//! let bytes = file.to_bytes()?;
//!
//! let report = decode_file(&bytes);
//! println!("{}", report);
//! assert_eq!(IldaFile::from(report), file);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod file;
pub mod format;
pub mod schema;

// Re-export commonly used types
pub use animation::SectionConverter;
pub use file::{DecodeReport, IldaFile, decode_file, encode_file};
pub use format::{FormatError, FormatTag, IldaError, Records, Section, SectionHeader};
pub use schema::{AnimationDocument, AnimationPoint, ConverterConfig};
