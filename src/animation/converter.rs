//! Converter from sparse point animations to ILDA section lists.

use std::collections::BTreeMap;

use crate::file::IldaFile;
use crate::format::{FormatError, Records, Rgb, Section, SectionInfo, Status, TrueColorPoint2D};
use crate::schema::{AnimationDocument, AnimationPoint, ConfigError, ConverterConfig};

/// Builds a playable section sequence from frames keyed by index.
///
/// Usage:
/// ```ignore
/// let mut converter = SectionConverter::new(ConverterConfig::default())?;
/// converter.set_frame(0, points_a);
/// converter.set_frame(12, points_b);
/// converter.to_file()?.save("show.ild")?;
/// ```
///
/// The output is, in order:
/// - a setup section at frame 0 holding one blanked point at the origin,
/// - one section per frame in `0..max_frame`, where frames without points
///   repeat the records of the previous section,
/// - a zero-record terminator at `max_frame`.
///
/// Points stored at `max_frame` itself are not emitted; that index only
/// marks where the terminator goes.
///
/// The config is validated on construction and cannot change afterwards.
/// `Default` uses [`ConverterConfig::default`], which is always valid.
#[derive(Debug, Clone, Default)]
pub struct SectionConverter {
    config: ConverterConfig,
    frames: BTreeMap<u16, Vec<AnimationPoint>>,
}

impl SectionConverter {
    pub fn new(config: ConverterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            frames: BTreeMap::new(),
        })
    }

    /// Converter pre-filled with every frame of a document.
    pub fn from_document(doc: AnimationDocument) -> Result<Self, ConfigError> {
        doc.config.validate()?;
        Ok(Self {
            config: doc.config,
            frames: doc.frames,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Store the points of a frame, replacing any previous ones.
    pub fn set_frame(&mut self, frame: u16, points: Vec<AnimationPoint>) {
        self.frames.insert(frame, points);
    }

    /// Remove a frame so it becomes a hold frame again.
    pub fn clear_frame(&mut self, frame: u16) -> Option<Vec<AnimationPoint>> {
        self.frames.remove(&frame)
    }

    /// Largest frame index stored, 0 if none.
    pub fn max_frame(&self) -> u16 {
        self.frames.keys().next_back().copied().unwrap_or(0)
    }

    /// Build the section sequence.
    pub fn to_sections(&self) -> Result<Vec<Section>, FormatError> {
        let max_frame = self.max_frame();
        let total_frames = max_frame
            .checked_add(1)
            .ok_or(FormatError::FrameIndexOverflow(max_frame))?;
        let info = |frame_number: u16| SectionInfo {
            name: self.config.name.clone(),
            company_name: self.config.company_name.clone(),
            frame_number,
            total_frames,
            projector_number: self.config.projector_number,
        };

        let mut sections = Vec::with_capacity(max_frame as usize + 2);
        let mut previous = Records::Coords2DTrueColor(vec![TrueColorPoint2D {
            position: [0, 0],
            status: Status::blanked(),
            color: Rgb::BLACK,
        }]);
        sections.push(Section::new(info(0), previous.clone())?);

        for frame in 0..max_frame {
            if let Some(points) = self.frames.get(&frame) {
                previous = Records::Coords2DTrueColor(
                    points.iter().map(|p| self.convert_point(p)).collect(),
                );
            }
            sections.push(Section::new(info(frame), previous.clone())?);
        }

        sections.push(Section::new(
            info(max_frame),
            Records::Coords2DTrueColor(Vec::new()),
        )?);

        log::debug!(
            "Converted {} authored frames into {} sections ({} total frames)",
            self.frames.len(),
            sections.len(),
            total_frames
        );
        Ok(sections)
    }

    /// Build the section sequence as a file.
    pub fn to_file(&self) -> Result<IldaFile, FormatError> {
        Ok(IldaFile::new(self.to_sections()?))
    }

    fn convert_point(&self, p: &AnimationPoint) -> TrueColorPoint2D {
        let (r, g, b) = p.intensity;
        TrueColorPoint2D {
            position: [p.position.0, p.position.1],
            status: Status::visible(),
            color: Rgb::new(
                scale_intensity(r, self.config.max_intensity),
                scale_intensity(g, self.config.max_intensity),
                scale_intensity(b, self.config.max_intensity),
            ),
        }
    }
}

/// Map `0..=max` onto `0..=255`, rounding and clamping.
pub fn scale_intensity(value: f32, max: f32) -> u8 {
    let scaled = (value / max * 255.0).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}
