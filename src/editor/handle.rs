use crate::geometry::{DisplayPoint, DisplayRect};

/// Display-space hit radius for resize handles, in surface pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Move,
    ResizeTL,
    ResizeTR,
    ResizeBL,
    ResizeBR,
    ResizeT,
    ResizeB,
    ResizeL,
    ResizeR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which edges of the rectangle a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleEdges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl HandleEdges {
    const fn new(left: bool, top: bool, right: bool, bottom: bool) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn drives_horizontal(self) -> bool {
        self.left || self.right
    }

    pub const fn drives_vertical(self) -> bool {
        self.top || self.bottom
    }
}

/// Pointer shape a host should show while hovering or dragging a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    ResizeNwSe,
    ResizeNeSw,
    ResizeVertical,
    ResizeHorizontal,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Self::Move,
        Self::ResizeTL,
        Self::ResizeTR,
        Self::ResizeBL,
        Self::ResizeBR,
        Self::ResizeT,
        Self::ResizeB,
        Self::ResizeL,
        Self::ResizeR,
    ];

    pub const fn edges(self) -> HandleEdges {
        match self {
            Self::Move => HandleEdges::new(true, true, true, true),
            Self::ResizeTL => HandleEdges::new(true, true, false, false),
            Self::ResizeTR => HandleEdges::new(false, true, true, false),
            Self::ResizeBL => HandleEdges::new(true, false, false, true),
            Self::ResizeBR => HandleEdges::new(false, false, true, true),
            Self::ResizeT => HandleEdges::new(false, true, false, false),
            Self::ResizeB => HandleEdges::new(false, false, false, true),
            Self::ResizeL => HandleEdges::new(true, false, false, false),
            Self::ResizeR => HandleEdges::new(false, false, true, false),
        }
    }

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::ResizeTL | Self::ResizeTR | Self::ResizeBL | Self::ResizeBR
        )
    }

    /// The axis an edge handle drives. Corners and `Move` have none fixed;
    /// for corners the larger pointer delta decides at drag time.
    pub const fn driving_axis(self) -> Option<Axis> {
        match self {
            Self::ResizeT | Self::ResizeB => Some(Axis::Vertical),
            Self::ResizeL | Self::ResizeR => Some(Axis::Horizontal),
            _ => None,
        }
    }

    pub const fn cursor(self) -> CursorHint {
        match self {
            Self::Move => CursorHint::Move,
            Self::ResizeTL | Self::ResizeBR => CursorHint::ResizeNwSe,
            Self::ResizeTR | Self::ResizeBL => CursorHint::ResizeNeSw,
            Self::ResizeT | Self::ResizeB => CursorHint::ResizeVertical,
            Self::ResizeL | Self::ResizeR => CursorHint::ResizeHorizontal,
        }
    }
}

fn corner_points(rect: DisplayRect) -> [(Handle, DisplayPoint); 4] {
    [
        (
            Handle::ResizeTL,
            DisplayPoint::new(rect.left(), rect.top()),
        ),
        (
            Handle::ResizeTR,
            DisplayPoint::new(rect.right(), rect.top()),
        ),
        (
            Handle::ResizeBL,
            DisplayPoint::new(rect.left(), rect.bottom()),
        ),
        (
            Handle::ResizeBR,
            DisplayPoint::new(rect.right(), rect.bottom()),
        ),
    ]
}

/// Anchor points for drawing the four corner and four edge-midpoint handles.
pub fn handle_points(rect: DisplayRect) -> [(Handle, DisplayPoint); 8] {
    let [tl, tr, bl, br] = corner_points(rect);
    let center = rect.center();
    [
        tl,
        tr,
        bl,
        br,
        (Handle::ResizeT, DisplayPoint::new(center.x, rect.top())),
        (Handle::ResizeB, DisplayPoint::new(center.x, rect.bottom())),
        (Handle::ResizeL, DisplayPoint::new(rect.left(), center.y)),
        (Handle::ResizeR, DisplayPoint::new(rect.right(), center.y)),
    ]
}

/// Classifies `point` against `rect`: corners first, then edges, then the
/// interior.
pub fn locate(point: DisplayPoint, rect: DisplayRect, tolerance: f64) -> Option<Handle> {
    let near = |a: f64, b: f64| (a - b).abs() <= tolerance;

    for (handle, corner) in corner_points(rect) {
        if near(point.x, corner.x) && near(point.y, corner.y) {
            return Some(handle);
        }
    }

    let within_x = point.x >= rect.left() && point.x <= rect.right();
    let within_y = point.y >= rect.top() && point.y <= rect.bottom();
    if near(point.y, rect.top()) && within_x {
        return Some(Handle::ResizeT);
    }
    if near(point.y, rect.bottom()) && within_x {
        return Some(Handle::ResizeB);
    }
    if near(point.x, rect.left()) && within_y {
        return Some(Handle::ResizeL);
    }
    if near(point.x, rect.right()) && within_y {
        return Some(Handle::ResizeR);
    }

    if rect.contains(point) {
        return Some(Handle::Move);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> DisplayRect {
        DisplayRect::new(100.0, 100.0, 200.0, 100.0)
    }

    #[test]
    fn point_near_top_and_left_resolves_to_top_left_corner() {
        let handle = locate(DisplayPoint::new(105.0, 104.0), rect(), HANDLE_HIT_TOLERANCE);
        assert_eq!(handle, Some(Handle::ResizeTL));
        let outside = locate(DisplayPoint::new(92.0, 93.0), rect(), HANDLE_HIT_TOLERANCE);
        assert_eq!(outside, Some(Handle::ResizeTL));
    }

    #[test]
    fn every_corner_wins_over_its_edges() {
        let cases = [
            (DisplayPoint::new(298.0, 102.0), Handle::ResizeTR),
            (DisplayPoint::new(102.0, 198.0), Handle::ResizeBL),
            (DisplayPoint::new(298.0, 198.0), Handle::ResizeBR),
        ];
        for (point, expected) in cases {
            assert_eq!(locate(point, rect(), HANDLE_HIT_TOLERANCE), Some(expected));
        }
    }

    #[test]
    fn edges_resolve_between_corners() {
        let cases = [
            (DisplayPoint::new(200.0, 95.0), Handle::ResizeT),
            (DisplayPoint::new(200.0, 207.0), Handle::ResizeB),
            (DisplayPoint::new(104.0, 150.0), Handle::ResizeL),
            (DisplayPoint::new(300.0, 150.0), Handle::ResizeR),
        ];
        for (point, expected) in cases {
            assert_eq!(locate(point, rect(), HANDLE_HIT_TOLERANCE), Some(expected));
        }
    }

    #[test]
    fn interior_moves_and_far_points_miss() {
        assert_eq!(
            locate(DisplayPoint::new(200.0, 150.0), rect(), HANDLE_HIT_TOLERANCE),
            Some(Handle::Move)
        );
        assert_eq!(
            locate(DisplayPoint::new(200.0, 250.0), rect(), HANDLE_HIT_TOLERANCE),
            None
        );
        assert_eq!(
            locate(DisplayPoint::new(50.0, 150.0), rect(), HANDLE_HIT_TOLERANCE),
            None
        );
    }

    #[test]
    fn edge_handles_need_the_pointer_inside_the_span() {
        // Beyond the right end of the top edge and outside the corner zone.
        assert_eq!(
            locate(DisplayPoint::new(315.0, 100.0), rect(), HANDLE_HIT_TOLERANCE),
            None
        );
    }

    #[test]
    fn edge_table_matches_handle_names() {
        let tl = Handle::ResizeTL.edges();
        assert!(tl.left && tl.top && !tl.right && !tl.bottom);
        let r = Handle::ResizeR.edges();
        assert!(r.drives_horizontal() && !r.drives_vertical());
        assert_eq!(Handle::ResizeB.driving_axis(), Some(Axis::Vertical));
        assert_eq!(Handle::ResizeBR.driving_axis(), None);
        for handle in Handle::ALL {
            assert_eq!(handle.is_corner(), {
                let edges = handle.edges();
                handle != Handle::Move && edges.drives_horizontal() && edges.drives_vertical()
            });
        }
    }

    #[test]
    fn handle_points_cover_corners_and_midpoints() {
        let points = handle_points(rect());
        assert_eq!(points[0], (Handle::ResizeTL, DisplayPoint::new(100.0, 100.0)));
        assert_eq!(points[4], (Handle::ResizeT, DisplayPoint::new(200.0, 100.0)));
        assert_eq!(points[7], (Handle::ResizeR, DisplayPoint::new(300.0, 150.0)));
    }

    #[test]
    fn cursor_hints_follow_handle_direction() {
        assert_eq!(Handle::ResizeTL.cursor(), CursorHint::ResizeNwSe);
        assert_eq!(Handle::ResizeBL.cursor(), CursorHint::ResizeNeSw);
        assert_eq!(Handle::ResizeL.cursor(), CursorHint::ResizeHorizontal);
        assert_eq!(Handle::Move.cursor(), CursorHint::Move);
    }
}
