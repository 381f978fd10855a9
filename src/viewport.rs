//! Letterbox mapping between content pixels and display-surface pixels.
//!
//! Content is scaled uniformly to fit the surface and centered, so a single
//! scale factor and a per-axis offset describe the whole mapping.

use crate::geometry::{
    ContentPoint, ContentSize, DisplayPoint, DisplayRect, GeometryResult, Rectangle, SurfaceSize,
};

/// Affine map with `display = content * scale + offset` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Inverse map without rounding or clamping.
    pub fn unmap(&self, point: DisplayPoint) -> (f64, f64) {
        (
            (point.x - self.offset_x) / self.scale_x,
            (point.y - self.offset_y) / self.scale_y,
        )
    }

    pub fn map(&self, x: f64, y: f64) -> DisplayPoint {
        DisplayPoint::new(
            x * self.scale_x + self.offset_x,
            y * self.scale_y + self.offset_y,
        )
    }

    /// Converts a display-space length along x into content pixels.
    pub fn content_delta_x(&self, delta: f64) -> i32 {
        (delta / self.scale_x).round() as i32
    }

    pub fn content_delta_y(&self, delta: f64) -> i32 {
        (delta / self.scale_y).round() as i32
    }
}

pub fn recompute(content: ContentSize, surface: SurfaceSize) -> GeometryResult<Transform> {
    let content = content.validate()?;
    let surface = surface.validate()?;

    let content_width = f64::from(content.width);
    let content_height = f64::from(content.height);
    let surface_width = f64::from(surface.width);
    let surface_height = f64::from(surface.height);

    let scale = (surface_width / content_width).min(surface_height / content_height);
    Ok(Transform {
        scale_x: scale,
        scale_y: scale,
        offset_x: (surface_width - content_width * scale) / 2.0,
        offset_y: (surface_height - content_height * scale) / 2.0,
    })
}

/// Inverse-maps a display point and clamps it into `[0, width] x [0, height]`.
///
/// The upper bound is inclusive because the result names a boundary between
/// pixels, not a pixel index.
pub fn to_content(
    point: DisplayPoint,
    transform: &Transform,
    content: ContentSize,
) -> ContentPoint {
    let (x, y) = transform.unmap(point);
    let x = clamp_axis(x, content.width_i32());
    let y = clamp_axis(y, content.height_i32());
    ContentPoint::new(x, y)
}

fn clamp_axis(value: f64, extent: i32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(extent) {
        extent
    } else {
        rounded as i32
    }
}

pub fn to_display(point: ContentPoint, transform: &Transform) -> DisplayPoint {
    transform.map(f64::from(point.x), f64::from(point.y))
}

pub fn project(rect: Rectangle, transform: &Transform) -> DisplayRect {
    DisplayRect::from_corners(
        to_display(rect.top_left(), transform),
        to_display(rect.bottom_right(), transform),
    )
}

/// The area the letterboxed content occupies on the surface.
pub fn content_area(transform: &Transform, content: ContentSize) -> DisplayRect {
    DisplayRect::from_corners(
        transform.map(0.0, 0.0),
        transform.map(f64::from(content.width), f64::from(content.height)),
    )
}

pub fn clamp_to_area(point: DisplayPoint, area: DisplayRect) -> DisplayPoint {
    DisplayPoint::new(
        point.x.clamp(area.left(), area.right()),
        point.y.clamp(area.top(), area.bottom()),
    )
}

/// Content and surface extents together with their current transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    content: ContentSize,
    surface: SurfaceSize,
    transform: Transform,
}

impl CoordinateMapper {
    pub fn new(content: ContentSize, surface: SurfaceSize) -> GeometryResult<Self> {
        let transform = recompute(content, surface)?;
        Ok(Self {
            content,
            surface,
            transform,
        })
    }

    pub fn content(&self) -> ContentSize {
        self.content
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn to_content(&self, point: DisplayPoint) -> ContentPoint {
        to_content(point, &self.transform, self.content)
    }

    pub fn to_display(&self, point: ContentPoint) -> DisplayPoint {
        to_display(point, &self.transform)
    }

    pub fn project(&self, rect: Rectangle) -> DisplayRect {
        project(rect, &self.transform)
    }

    pub fn content_area(&self) -> DisplayRect {
        content_area(&self.transform, self.content)
    }

    pub fn clamp_to_content_area(&self, point: DisplayPoint) -> DisplayPoint {
        clamp_to_area(point, self.content_area())
    }

    /// Carries a display point expressed under `previous` over to this mapping.
    pub fn remap(&self, point: DisplayPoint, previous: &Transform) -> DisplayPoint {
        let (x, y) = previous.unmap(point);
        self.transform.map(x, y)
    }
}
