//! Drawable geometry for previewing decoded frames.
//!
//! Rendering itself happens elsewhere; this only turns a section into the
//! dots and lines a preview should draw.

use std::fmt;

use crate::format::{FormatError, Records, Rgb, Section, Status};

/// A visible primitive in ILDA coordinate space. 2D points have `z == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Unblanked point.
    Dot { at: [i16; 3], color: Rgb },
    /// Beam path between two unblanked consecutive points.
    Line {
        from: [i16; 3],
        to: [i16; 3],
        color: Rgb,
    },
}

/// Dots and lines for a true-color section.
///
/// Every unblanked point is a dot. A line joins consecutive points when both
/// are unblanked, colored with the mean of their colors. Indexed and palette
/// sections carry no inline color and are rejected.
pub fn strokes(section: &Section) -> Result<Vec<Stroke>, FormatError> {
    let points: Vec<([i16; 3], Status, Rgb)> = match &section.records {
        Records::Coords3DTrueColor(v) => v.iter().map(|p| (p.position, p.status, p.color)).collect(),
        Records::Coords2DTrueColor(v) => v
            .iter()
            .map(|p| ([p.position[0], p.position[1], 0], p.status, p.color))
            .collect(),
        other => return Err(FormatError::UnsupportedFormat(other.format())),
    };

    let mut out = Vec::new();
    for pair in points.windows(2) {
        let (from, from_status, from_color) = pair[0];
        let (to, to_status, to_color) = pair[1];
        if from_status.is_blanked() {
            continue;
        }
        out.push(Stroke::Dot {
            at: from,
            color: from_color,
        });
        if !to_status.is_blanked() {
            out.push(Stroke::Line {
                from,
                to,
                color: from_color.midpoint(to_color),
            });
        }
    }
    if let Some(&(at, status, color)) = points.last()
        && !status.is_blanked()
    {
        out.push(Stroke::Dot { at, color });
    }
    Ok(out)
}

/// Header overview of one section within a file.
#[derive(Debug, Clone, Copy)]
pub struct SectionSummary<'a> {
    pub index: usize,
    pub section: &'a Section,
}

impl fmt::Display for SectionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.section.header;
        writeln!(f, "index              : {}", self.index)?;
        writeln!(f, "format             : {:?}", h.format)?;
        writeln!(f, "frame name         : {}", h.name)?;
        writeln!(f, "company name       : {}", h.company_name)?;
        writeln!(f, "number_of_records  : {}", h.record_count)?;
        writeln!(f, "frame number       : {}", h.frame_number)?;
        write!(f, "total frames       : {}", h.total_frames)
    }
}
