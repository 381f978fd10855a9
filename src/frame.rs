use image::{imageops, RgbaImage};

use crate::geometry::ContentSize;

/// Quarter-turn orientation applied to every content frame before selection
/// and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Half,
    CounterClockwise90,
}

impl Rotation {
    pub const fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Half => 180,
            Self::CounterClockwise90 => 270,
        }
    }

    /// Accepts any multiple of 90, wrapping at 360.
    pub const fn from_degrees(degrees: u32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(match (degrees / 90) % 4 {
            0 => Self::None,
            1 => Self::Clockwise90,
            2 => Self::Half,
            _ => Self::CounterClockwise90,
        })
    }

    pub const fn rotate_right(self) -> Self {
        match self {
            Self::None => Self::Clockwise90,
            Self::Clockwise90 => Self::Half,
            Self::Half => Self::CounterClockwise90,
            Self::CounterClockwise90 => Self::None,
        }
    }

    pub const fn rotate_left(self) -> Self {
        match self {
            Self::None => Self::CounterClockwise90,
            Self::Clockwise90 => Self::None,
            Self::Half => Self::Clockwise90,
            Self::CounterClockwise90 => Self::Half,
        }
    }

    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Clockwise90 | Self::CounterClockwise90)
    }

    /// Content extent after rotating a `source`-sized frame. Feed this to
    /// `RectangleEditor::on_content_changed` whenever the rotation changes.
    pub const fn oriented(self, source: ContentSize) -> ContentSize {
        if self.swaps_axes() {
            ContentSize::new(source.height, source.width)
        } else {
            source
        }
    }

    pub fn apply(self, frame: &RgbaImage) -> RgbaImage {
        match self {
            Self::None => frame.clone(),
            Self::Clockwise90 => imageops::rotate90(frame),
            Self::Half => imageops::rotate180(frame),
            Self::CounterClockwise90 => imageops::rotate270(frame),
        }
    }
}
