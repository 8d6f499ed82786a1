//! ILDA Image Data Transfer Format: wire layout and per-section codecs.
//!
//! # File Format
//!
//! A file is a plain concatenation of sections with no outer container.
//! All multi-byte integers are big-endian.
//!
//! ```text
//! Header (32 bytes):
//!   Magic: "ILDA" (4 bytes)
//!   Reserved: 3 bytes (zero)
//!   Format code: u8 (0, 1, 2, 4 or 5)
//!   Name: 8 bytes (NUL padded)
//!   Company name: 8 bytes (NUL padded)
//!   Record count: u16
//!   Frame number: u16
//!   Total frames: u16
//!   Projector number: u8
//!   Reserved: 1 byte (zero)
//!
//! Records (record count * record size):
//!   0  3D indexed:     x, y, z: i16, status: u8, color index: u8   (8 bytes)
//!   1  2D indexed:     x, y: i16, status: u8, color index: u8      (6 bytes)
//!   2  Palette:        r, g, b: u8                                 (3 bytes)
//!   4  3D true color:  x, y, z: i16, status: u8, r, g, b: u8       (10 bytes)
//!   5  2D true color:  x, y: i16, status: u8, r, g, b: u8          (8 bytes)
//! ```

pub mod byte_order;
mod error;
mod header;
mod record;
mod section;

pub use byte_order::{BigEndian, ByteReader};
pub use error::{FormatError, IldaError};
pub use header::{FormatTag, ILDA_MAGIC, NAME_LEN, SectionHeader, decode_header, encode_header};
pub use record::{
    IndexedPoint2D, IndexedPoint3D, Records, Rgb, Status, TrueColorPoint2D, TrueColorPoint3D,
};
pub use section::{Section, SectionInfo};
