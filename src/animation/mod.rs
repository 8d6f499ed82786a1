//! Point animations in and out of ILDA sections.
//!
//! [`SectionConverter`] turns sparse authored frames into a section list
//! ready for [`crate::file::encode_file`]; [`preview`] turns decoded
//! true-color sections back into drawable strokes.

mod converter;
pub mod preview;

pub use converter::{SectionConverter, scale_intensity};
pub use preview::{SectionSummary, Stroke, strokes};
