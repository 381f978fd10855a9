//! Content-space rectangle math for the draw, move and resize gestures.
//!
//! Every function takes the state captured at press time plus the pointer
//! offset since then, so repeated drags never accumulate rounding drift.

use super::constraint::{apply_aspect, apply_fixed_size, Anchoring, Constraint, Span};
use super::handle::{Axis, Handle};
use crate::geometry::{ContentPoint, ContentSize, Rectangle};

/// Rectangle spanned by a freehand drag from `anchor` to `end`.
///
/// A drag that has not moved yet still yields a 1x1 rectangle at the anchor.
pub fn drawn_rectangle(
    anchor: ContentPoint,
    end: ContentPoint,
    constraint: Option<Constraint>,
    content: ContentSize,
) -> Rectangle {
    let delta_x = end.x.saturating_sub(anchor.x);
    let delta_y = end.y.saturating_sub(anchor.y);
    let anchoring = Anchoring {
        horizontal: Span::from_drag(anchor.x, delta_x, content.width_i32()),
        vertical: Span::from_drag(anchor.y, delta_y, content.height_i32()),
    };

    match constraint {
        Some(Constraint::FixedSize { width, height }) => {
            apply_fixed_size(width, height, anchoring, content)
        }
        Some(Constraint::AspectRatio { num, den }) => {
            let axis = if delta_x.unsigned_abs() > delta_y.unsigned_abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let candidate = Rectangle::new(0, 0, delta_x.unsigned_abs(), delta_y.unsigned_abs());
            apply_aspect(candidate, num, den, axis, anchoring, content)
        }
        None => {
            let width = delta_x.unsigned_abs().clamp(1, anchoring.horizontal.room.max(1));
            let height = delta_y.unsigned_abs().clamp(1, anchoring.vertical.room.max(1));
            Rectangle::new(
                anchoring.horizontal.place(width),
                anchoring.vertical.place(height),
                width,
                height,
            )
        }
    }
}

/// Shifts `origin` by the delta and stops it at the content border without
/// changing its size.
pub fn moved_rectangle(
    origin: Rectangle,
    delta_x: i32,
    delta_y: i32,
    content: ContentSize,
) -> Rectangle {
    let limit_x = content.width_i32().saturating_sub(origin.width_i32()).max(0);
    let limit_y = content.height_i32().saturating_sub(origin.height_i32()).max(0);
    Rectangle::new(
        origin.x.saturating_add(delta_x).clamp(0, limit_x),
        origin.y.saturating_add(delta_y).clamp(0, limit_y),
        origin.width,
        origin.height,
    )
}

/// Drags the edges `handle` controls by the delta, then applies the active
/// constraint with the opposite edges held in place.
///
/// `axis` picks the driving side for aspect locks on corner handles; edge
/// handles always drive their own axis.
pub fn resized_rectangle(
    origin: Rectangle,
    handle: Handle,
    (delta_x, delta_y): (i32, i32),
    axis: Axis,
    constraint: Option<Constraint>,
    content: ContentSize,
) -> Rectangle {
    let edges = handle.edges();
    let content_w = content.width_i32();
    let content_h = content.height_i32();

    let mut left = origin.x;
    let mut top = origin.y;
    let mut right = origin.right();
    let mut bottom = origin.bottom();

    if edges.left {
        left = left.saturating_add(delta_x).clamp(0, right - 1);
    }
    if edges.right {
        right = right.saturating_add(delta_x).clamp(left + 1, content_w);
    }
    if edges.top {
        top = top.saturating_add(delta_y).clamp(0, bottom - 1);
    }
    if edges.bottom {
        bottom = bottom.saturating_add(delta_y).clamp(top + 1, content_h);
    }

    let candidate = Rectangle::from_edges(left, top, right, bottom).unwrap_or(origin);
    let Some(constraint) = constraint else {
        return candidate;
    };

    let anchoring = Anchoring {
        horizontal: if edges.left {
            Span::backward(origin.right(), to_room(origin.right()))
        } else {
            Span::forward(origin.x, to_room(content_w - origin.x))
        },
        vertical: if edges.top {
            Span::backward(origin.bottom(), to_room(origin.bottom()))
        } else {
            Span::forward(origin.y, to_room(content_h - origin.y))
        },
    };
    let axis = handle.driving_axis().unwrap_or(axis);

    match constraint {
        Constraint::FixedSize { width, height } => {
            apply_fixed_size(width, height, anchoring, content)
        }
        Constraint::AspectRatio { num, den } => {
            apply_aspect(candidate, num, den, axis, anchoring, content)
        }
    }
}

fn to_room(value: i32) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(0)
}
