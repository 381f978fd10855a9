//! Turning the final selection into per-segment output.
//!
//! The primary rectangle and each replica become one numbered segment. Every
//! source frame is rotated, cropped to the segment and scaled back to the
//! segment size when the frame turned out smaller than the selection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{imageops, RgbaImage};
use thiserror::Error;

use crate::editor::RectangleEditor;
use crate::frame::Rotation;
use crate::geometry::Rectangle;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no selection rectangle")]
    NoSelection,
    #[error("output path {0:?} has no file name")]
    InvalidOutputPath(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSegment {
    /// Zero-based position in export order; the primary rectangle is 0.
    pub index: usize,
    pub rect: Rectangle,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    rotation: Rotation,
    segments: Vec<ExportSegment>,
}

impl ExportPlan {
    pub fn new(rects: &[Rectangle], output: &Path, rotation: Rotation) -> ExportResult<Self> {
        if rects.is_empty() {
            return Err(ExportError::NoSelection);
        }
        let segments = rects
            .iter()
            .enumerate()
            .map(|(index, rect)| {
                Ok(ExportSegment {
                    index,
                    rect: *rect,
                    path: segment_path(output, index, rects.len())?,
                })
            })
            .collect::<ExportResult<Vec<_>>>()?;

        tracing::debug!(
            segments = segments.len(),
            rotation = rotation.degrees(),
            ?output,
            "export plan ready"
        );
        Ok(Self { rotation, segments })
    }

    /// Plans the editor's primary rectangle followed by its replicas.
    pub fn from_editor(
        editor: &RectangleEditor,
        output: &Path,
        rotation: Rotation,
    ) -> ExportResult<Self> {
        Self::new(&editor.all_rectangles(), output, rotation)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn segments(&self) -> &[ExportSegment] {
        &self.segments
    }

    /// Frames to process across all segments, for progress reporting.
    pub fn total_work(&self, frames_per_segment: u64) -> u64 {
        let segments = u64::try_from(self.segments.len()).unwrap_or(u64::MAX);
        frames_per_segment.saturating_mul(segments)
    }

    /// Output frame for `segment` from one source frame, or `None` when the
    /// crop falls entirely outside it.
    pub fn render_frame(&self, segment: &ExportSegment, source: &RgbaImage) -> Option<RgbaImage> {
        let oriented = self.rotation.apply(source);
        crop_frame(&oriented, segment.rect)
    }

    /// Writes one still image per segment, creating parent directories as
    /// needed. The image format follows each path's extension.
    pub fn save_still(&self, source: &RgbaImage) -> ExportResult<Vec<PathBuf>> {
        let oriented = self.rotation.apply(source);
        let mut written = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let Some(cropped) = crop_frame(&oriented, segment.rect) else {
                tracing::warn!(
                    index = segment.index,
                    rect = ?segment.rect,
                    "segment outside frame; skipped"
                );
                continue;
            };
            if let Some(parent) = segment
                .path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                fs::create_dir_all(parent)?;
            }
            cropped.save(&segment.path)?;
            written.push(segment.path.clone());
        }
        Ok(written)
    }
}

/// `output` itself for a single segment; otherwise
/// `<stem>_segment_<index + 1><.ext>` beside it.
pub fn segment_path(output: &Path, index: usize, total: usize) -> ExportResult<PathBuf> {
    let stem = output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ExportError::InvalidOutputPath(output.to_path_buf()))?;
    if total <= 1 {
        return Ok(output.to_path_buf());
    }

    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    let file_name = format!("{stem}_segment_{}{extension}", index + 1);
    Ok(output.with_file_name(file_name))
}

/// Crops `rect` out of `frame`, clamping it to the frame first. The result
/// is always `rect`-sized; a crop clipped by a smaller frame is scaled back up.
pub fn crop_frame(frame: &RgbaImage, rect: Rectangle) -> Option<RgbaImage> {
    let (frame_width, frame_height) = frame.dimensions();
    if frame_width == 0 || frame_height == 0 || rect.width == 0 || rect.height == 0 {
        return None;
    }

    let x = clamp_origin(rect.x, frame_width);
    let y = clamp_origin(rect.y, frame_height);
    let width = rect.width.min(frame_width - x);
    let height = rect.height.min(frame_height - y);
    if width == 0 || height == 0 {
        return None;
    }

    let cropped = imageops::crop_imm(frame, x, y, width, height).to_image();
    if cropped.dimensions() == (rect.width, rect.height) {
        return Some(cropped);
    }
    Some(imageops::resize(
        &cropped,
        rect.width,
        rect.height,
        imageops::FilterType::Triangle,
    ))
}

fn clamp_origin(value: i32, extent: u32) -> u32 {
    u32::try_from(value.max(0))
        .unwrap_or(0)
        .min(extent.saturating_sub(1))
}

/// Frame counter across every segment of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    completed: u64,
    total: u64,
}

impl ExportProgress {
    pub const fn new(total: u64) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn for_plan(plan: &ExportPlan, frames_per_segment: u64) -> Self {
        Self::new(plan.total_work(frames_per_segment))
    }

    pub fn advance(&mut self, frames: u64) {
        self.completed = self.completed.saturating_add(frames).min(self.total);
    }

    pub const fn completed(&self) -> u64 {
        self.completed
    }

    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }

    pub const fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}
