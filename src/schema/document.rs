//! Sparse point animations as read from JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConverterConfig;

/// One laser point of an authored frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPoint {
    /// Position in ILDA coordinate space.
    pub position: (i16, i16),
    /// Red, green, blue on the scale `0..=max_intensity`.
    pub intensity: (f32, f32, f32),
}

impl AnimationPoint {
    pub fn new(x: i16, y: i16, intensity: (f32, f32, f32)) -> Self {
        Self {
            position: (x, y),
            intensity,
        }
    }
}

/// Converter input: config plus frames keyed by frame index.
///
/// Frames need not be contiguous; gaps become hold frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationDocument {
    #[serde(default)]
    pub config: ConverterConfig,
    pub frames: BTreeMap<u16, Vec<AnimationPoint>>,
}

impl AnimationDocument {
    /// Small two-frame square used by the CLI's `--example`.
    pub fn example() -> Self {
        let full = super::DEFAULT_MAX_INTENSITY;
        let square = |color: (f32, f32, f32)| {
            vec![
                AnimationPoint::new(-8000, -8000, (0.0, 0.0, 0.0)),
                AnimationPoint::new(8000, -8000, color),
                AnimationPoint::new(8000, 8000, color),
                AnimationPoint::new(-8000, 8000, color),
                AnimationPoint::new(-8000, -8000, color),
            ]
        };

        let mut frames = BTreeMap::new();
        frames.insert(0, square((full, 0.0, 0.0)));
        frames.insert(10, square((0.0, full, 0.0)));
        frames.insert(20, Vec::new());

        Self {
            config: ConverterConfig::default(),
            frames,
        }
    }
}
