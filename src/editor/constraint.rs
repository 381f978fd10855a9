use thiserror::Error;

use super::handle::Axis;
use crate::geometry::{ContentSize, Rectangle};

pub type ConstraintResult<T> = std::result::Result<T, ConstraintError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("invalid constraint {0:?}: every term must be at least 1")]
    InvalidConstraint(Constraint),
    #[error("custom ratio {num}:{den} out of range: terms must be within 1..=1000")]
    CustomRatioOutOfRange { num: u32, den: u32 },
}

/// Largest term a custom ratio may use.
pub const MAX_CUSTOM_TERM: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    AspectRatio { num: u32, den: u32 },
    FixedSize { width: u32, height: u32 },
}

impl Constraint {
    pub const fn aspect(num: u32, den: u32) -> Self {
        Self::AspectRatio { num, den }
    }

    pub const fn fixed_size(width: u32, height: u32) -> Self {
        Self::FixedSize { width, height }
    }

    pub fn validate(self) -> ConstraintResult<Self> {
        let valid = match self {
            Self::AspectRatio { num, den } => num >= 1 && den >= 1,
            Self::FixedSize { width, height } => width >= 1 && height >= 1,
        };
        if valid {
            Ok(self)
        } else {
            Err(ConstraintError::InvalidConstraint(self))
        }
    }

    /// Combines separately tracked locks into the one that governs editing.
    /// A fixed size wins over an aspect ratio.
    pub fn precedence(aspect: Option<(u32, u32)>, fixed: Option<(u32, u32)>) -> Option<Self> {
        fixed
            .map(|(width, height)| Self::fixed_size(width, height))
            .or_else(|| aspect.map(|(num, den)| Self::aspect(num, den)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectPreset {
    Free,
    #[serde(rename = "16:9")]
    Ratio16x9,
    #[serde(rename = "4:3")]
    Ratio4x3,
    #[serde(rename = "1:1")]
    Ratio1x1,
    #[serde(rename = "21:9")]
    Ratio21x9,
    #[serde(rename = "9:16")]
    Ratio9x16,
    #[serde(rename = "3:4")]
    Ratio3x4,
    Custom {
        num: u32,
        den: u32,
    },
}

impl AspectPreset {
    /// The fixed-ratio choices; `Custom` carries its own terms.
    pub const NAMED: [AspectPreset; 7] = [
        Self::Free,
        Self::Ratio16x9,
        Self::Ratio4x3,
        Self::Ratio1x1,
        Self::Ratio21x9,
        Self::Ratio9x16,
        Self::Ratio3x4,
    ];

    /// A custom ratio with both terms in `1..=MAX_CUSTOM_TERM`.
    pub fn custom(num: u32, den: u32) -> ConstraintResult<Self> {
        Self::Custom { num, den }.validate()
    }

    pub fn validate(self) -> ConstraintResult<Self> {
        match self {
            Self::Custom { num, den }
                if !(1..=MAX_CUSTOM_TERM).contains(&num)
                    || !(1..=MAX_CUSTOM_TERM).contains(&den) =>
            {
                Err(ConstraintError::CustomRatioOutOfRange { num, den })
            }
            preset => Ok(preset),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Ratio16x9 => "16:9",
            Self::Ratio4x3 => "4:3",
            Self::Ratio1x1 => "1:1",
            Self::Ratio21x9 => "21:9",
            Self::Ratio9x16 => "9:16",
            Self::Ratio3x4 => "3:4",
            Self::Custom { .. } => "Custom",
        }
    }

    pub const fn ratio(self) -> Option<(u32, u32)> {
        match self {
            Self::Free => None,
            Self::Ratio16x9 => Some((16, 9)),
            Self::Ratio4x3 => Some((4, 3)),
            Self::Ratio1x1 => Some((1, 1)),
            Self::Ratio21x9 => Some((21, 9)),
            Self::Ratio9x16 => Some((9, 16)),
            Self::Ratio3x4 => Some((3, 4)),
            Self::Custom { num, den } => Some((num, den)),
        }
    }

    pub fn constraint(self) -> Option<Constraint> {
        self.ratio().map(|(num, den)| Constraint::aspect(num, den))
    }
}

/// Room on one axis, measured from the edge that stays put toward the side
/// the rectangle grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub anchor: i32,
    pub forward: bool,
    pub room: u32,
}

impl Span {
    pub const fn forward(anchor: i32, room: u32) -> Self {
        Self {
            anchor,
            forward: true,
            room,
        }
    }

    pub const fn backward(anchor: i32, room: u32) -> Self {
        Self {
            anchor,
            forward: false,
            room,
        }
    }

    /// Span for a freehand drag that started at `anchor` and has moved
    /// `delta` so far, inside `[0, extent]`. A drag pinned against a border
    /// turns toward the side that still has room.
    pub fn from_drag(anchor: i32, delta: i32, extent: i32) -> Self {
        let anchor = anchor.clamp(0, extent);
        let forward = if delta < 0 { anchor == 0 } else { anchor < extent };
        if forward {
            Self::forward(anchor, to_u32(extent - anchor))
        } else {
            Self::backward(anchor, to_u32(anchor))
        }
    }

    /// Start coordinate of a run of `length` pixels laid out along this span.
    pub fn place(&self, length: u32) -> i32 {
        if self.forward {
            self.anchor
        } else {
            self.anchor.saturating_sub(to_i32(length))
        }
    }
}

/// Where a constrained rectangle is pinned on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchoring {
    pub horizontal: Span,
    pub vertical: Span,
}

/// Recomputes the non-driving side of `candidate` so `width / height` is
/// exactly `num / den`.
///
/// Both sides become the same multiple of the reduced ratio, the largest
/// one that does not exceed the driving side and still fits the room on
/// both axes. When the room left at the anchor is smaller than one reduced
/// unit, a single unit is used and shifted inside `content`. Ratios whose
/// reduced terms do not fit the content at all fall back to nearest-pixel
/// rounding from whichever side lands closer to the ratio.
pub fn apply_aspect(
    candidate: Rectangle,
    num: u32,
    den: u32,
    axis: Axis,
    anchoring: Anchoring,
    content: ContentSize,
) -> Rectangle {
    let driving = match axis {
        Axis::Horizontal => candidate.width,
        Axis::Vertical => candidate.height,
    };
    let room_w = anchoring.horizontal.room.clamp(1, content.width.max(1));
    let room_h = anchoring.vertical.room.clamp(1, content.height.max(1));
    let (width, height) = aspect_extent(
        driving,
        (num.max(1), den.max(1)),
        axis,
        (room_w, room_h),
        content,
    );
    place_within(width, height, anchoring, content)
}

fn aspect_extent(
    driving: u32,
    (num, den): (u32, u32),
    axis: Axis,
    (room_w, room_h): (u32, u32),
    content: ContentSize,
) -> (u32, u32) {
    let divisor = gcd(num, den);
    let (unit_w, unit_h) = (num / divisor, den / divisor);

    if unit_w <= room_w && unit_h <= room_h {
        let wanted = match axis {
            Axis::Horizontal => driving / unit_w,
            Axis::Vertical => driving / unit_h,
        };
        let most = (room_w / unit_w).min(room_h / unit_h);
        let multiple = wanted.clamp(1, most);
        return (multiple * unit_w, multiple * unit_h);
    }
    if unit_w <= content.width && unit_h <= content.height {
        return (unit_w, unit_h);
    }

    let driving = driving.max(1);
    let (wanted_w, wanted_h) = match axis {
        Axis::Horizontal => (driving, round_ratio_dimension(driving, unit_h, unit_w)),
        Axis::Vertical => (round_ratio_dimension(driving, unit_w, unit_h), driving),
    };
    let width_first = {
        let width = wanted_w.clamp(1, room_w);
        (width, round_ratio_dimension(width, unit_h, unit_w).clamp(1, room_h))
    };
    let height_first = {
        let height = wanted_h.clamp(1, room_h);
        (round_ratio_dimension(height, unit_w, unit_h).clamp(1, room_w), height)
    };
    let target = f64::from(unit_w) / f64::from(unit_h);
    let miss = |(width, height): (u32, u32)| (f64::from(width) / f64::from(height) - target).abs();
    if miss(height_first) < miss(width_first) {
        height_first
    } else {
        width_first
    }
}

/// Forces `size` onto a rectangle pinned by `anchoring`, then shifts it
/// (never shrinks it) inside `content`. A size larger than the content is
/// reduced to the content extent.
pub fn apply_fixed_size(
    width: u32,
    height: u32,
    anchoring: Anchoring,
    content: ContentSize,
) -> Rectangle {
    let width = width.clamp(1, content.width.max(1));
    let height = height.clamp(1, content.height.max(1));
    place_within(width, height, anchoring, content)
}

fn place_within(width: u32, height: u32, anchoring: Anchoring, content: ContentSize) -> Rectangle {
    let max_x = content.width_i32().saturating_sub(to_i32(width)).max(0);
    let max_y = content.height_i32().saturating_sub(to_i32(height)).max(0);
    Rectangle::new(
        anchoring.horizontal.place(width).clamp(0, max_x),
        anchoring.vertical.place(height).clamp(0, max_y),
        width,
        height,
    )
}

fn round_ratio_dimension(base: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let denominator = u64::from(denominator);
    let scaled = (u64::from(base) * u64::from(numerator) + denominator / 2) / denominator;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

fn to_u32(value: i32) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(0)
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_anchoring(x: i32, y: i32, room_w: u32, room_h: u32) -> Anchoring {
        Anchoring {
            horizontal: Span::forward(x, room_w),
            vertical: Span::forward(y, room_h),
        }
    }

    #[test]
    fn validate_rejects_zero_terms() {
        assert!(Constraint::aspect(16, 9).validate().is_ok());
        assert_eq!(
            Constraint::aspect(16, 0).validate(),
            Err(ConstraintError::InvalidConstraint(Constraint::aspect(16, 0)))
        );
        assert!(Constraint::fixed_size(0, 240).validate().is_err());
        assert!(Constraint::fixed_size(320, 240).validate().is_ok());
    }

    #[test]
    fn fixed_size_takes_precedence_over_aspect() {
        assert_eq!(
            Constraint::precedence(Some((16, 9)), Some((320, 240))),
            Some(Constraint::fixed_size(320, 240))
        );
        assert_eq!(
            Constraint::precedence(Some((4, 3)), None),
            Some(Constraint::aspect(4, 3))
        );
        assert_eq!(Constraint::precedence(None, None), None);
    }

    #[test]
    fn width_driven_aspect_keeps_exact_ratio() {
        let rect = apply_aspect(
            Rectangle::new(10, 10, 300, 7),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(10, 10, 1000, 1000),
            ContentSize::new(1010, 1010),
        );
        assert_eq!(rect, Rectangle::new(10, 10, 288, 162));
        assert_eq!(rect.width * 9, rect.height * 16);
    }

    #[test]
    fn height_driven_aspect_keeps_exact_ratio() {
        let rect = apply_aspect(
            Rectangle::new(0, 0, 5, 90),
            16,
            9,
            Axis::Vertical,
            forward_anchoring(0, 0, 1000, 1000),
            ContentSize::new(1000, 1000),
        );
        assert_eq!(rect, Rectangle::new(0, 0, 160, 90));
    }

    #[test]
    fn aspect_shrinks_to_the_available_room() {
        let rect = apply_aspect(
            Rectangle::new(0, 0, 900, 10),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(0, 0, 1000, 100),
            ContentSize::new(1000, 100),
        );
        assert_eq!(rect, Rectangle::new(0, 0, 176, 99));
    }

    #[test]
    fn aspect_places_backward_spans_against_their_anchor() {
        let anchoring = Anchoring {
            horizontal: Span::backward(200, 200),
            vertical: Span::backward(100, 100),
        };
        let rect = apply_aspect(
            Rectangle::new(0, 0, 40, 40),
            4,
            3,
            Axis::Horizontal,
            anchoring,
            ContentSize::new(200, 100),
        );
        assert_eq!(rect, Rectangle::new(160, 70, 40, 30));
    }

    #[test]
    fn tiny_drags_still_produce_one_ratio_unit() {
        let rect = apply_aspect(
            Rectangle::new(0, 0, 1, 1),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(0, 0, 100, 100),
            ContentSize::new(100, 100),
        );
        assert_eq!((rect.width, rect.height), (16, 9));
    }

    #[test]
    fn cramped_anchor_shifts_one_unit_inside_content() {
        let rect = apply_aspect(
            Rectangle::new(0, 0, 3, 3),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(1915, 1075, 5, 5),
            ContentSize::new(1920, 1080),
        );
        assert_eq!(rect, Rectangle::new(1904, 1071, 16, 9));
    }

    #[test]
    fn unusual_ratios_fall_back_to_rounding_within_room() {
        let rect = apply_aspect(
            Rectangle::new(0, 0, 50, 1),
            1921,
            1079,
            Axis::Horizontal,
            forward_anchoring(0, 0, 400, 300),
            ContentSize::new(400, 300),
        );
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 28);
    }

    fn assert_within_ratio_tolerance(rect: Rectangle, num: u32, den: u32) {
        let ratio = f64::from(rect.width) / f64::from(rect.height);
        let tolerance = 1.0 / f64::from(rect.width.max(rect.height));
        let miss = (ratio - f64::from(num) / f64::from(den)).abs();
        assert!(miss < tolerance, "{rect:?} misses {num}:{den} by {miss}");
    }

    #[test]
    fn content_smaller_than_one_unit_rounds_from_the_closer_side() {
        let short = ContentSize::new(10, 5);
        let rect = apply_aspect(
            Rectangle::new(0, 0, 10, 1),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(0, 0, 10, 5),
            short,
        );
        assert_eq!(rect, Rectangle::new(0, 0, 9, 5));
        assert_within_ratio_tolerance(rect, 16, 9);

        let narrow = ContentSize::new(15, 100);
        let rect = apply_aspect(
            Rectangle::new(0, 0, 15, 1),
            16,
            9,
            Axis::Horizontal,
            forward_anchoring(0, 0, 15, 100),
            narrow,
        );
        assert_eq!(rect, Rectangle::new(0, 0, 14, 8));
        assert_within_ratio_tolerance(rect, 16, 9);
        assert!(rect.fits_within(narrow));
    }

    #[test]
    fn fixed_size_shifts_into_content_instead_of_shrinking() {
        let content = ContentSize::new(1000, 500);
        let rect = apply_fixed_size(320, 240, forward_anchoring(900, 400, 100, 100), content);
        assert_eq!(rect, Rectangle::new(680, 260, 320, 240));

        let anchoring = Anchoring {
            horizontal: Span::backward(100, 100),
            vertical: Span::forward(0, 500),
        };
        let rect = apply_fixed_size(320, 240, anchoring, content);
        assert_eq!(rect, Rectangle::new(0, 0, 320, 240));
    }

    #[test]
    fn fixed_size_larger_than_content_is_reduced() {
        let rect = apply_fixed_size(
            320,
            240,
            forward_anchoring(0, 0, 200, 100),
            ContentSize::new(200, 100),
        );
        assert_eq!(rect, Rectangle::new(0, 0, 200, 100));
    }

    #[test]
    fn span_from_drag_turns_at_borders() {
        assert_eq!(Span::from_drag(40, 5, 100), Span::forward(40, 60));
        assert_eq!(Span::from_drag(40, -5, 100), Span::backward(40, 40));
        assert_eq!(Span::from_drag(100, 0, 100), Span::backward(100, 100));
        assert_eq!(Span::from_drag(0, -3, 100), Span::forward(0, 100));
    }

    #[test]
    fn preset_labels_and_ratios() {
        assert_eq!(AspectPreset::Ratio21x9.label(), "21:9");
        assert_eq!(AspectPreset::Ratio3x4.ratio(), Some((3, 4)));
        assert_eq!(AspectPreset::Free.ratio(), None);
        assert_eq!(AspectPreset::Free.constraint(), None);
        for (i, a) in AspectPreset::NAMED.iter().enumerate() {
            for (j, b) in AspectPreset::NAMED.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "NAMED has duplicate at indices {i} and {j}");
                }
            }
        }
    }

    #[test]
    fn custom_preset_accepts_terms_up_to_the_limit() {
        let preset = AspectPreset::custom(5, 4).expect("5:4 should be accepted");
        assert_eq!(preset.label(), "Custom");
        assert_eq!(preset.constraint(), Some(Constraint::aspect(5, 4)));
        assert!(AspectPreset::custom(1, MAX_CUSTOM_TERM).is_ok());

        assert_eq!(
            AspectPreset::custom(0, 9),
            Err(ConstraintError::CustomRatioOutOfRange { num: 0, den: 9 })
        );
        assert!(AspectPreset::custom(16, MAX_CUSTOM_TERM + 1).is_err());
        assert!(AspectPreset::Custom { num: 2000, den: 1 }.validate().is_err());
    }

    #[test]
    fn custom_preset_reads_from_json() {
        let preset: AspectPreset = serde_json::from_str(r#"{"custom": {"num": 3, "den": 2}}"#)
            .expect("custom preset should parse");
        assert_eq!(preset, AspectPreset::Custom { num: 3, den: 2 });
        let named: AspectPreset =
            serde_json::from_str(r#""21:9""#).expect("named preset should parse");
        assert_eq!(named, AspectPreset::Ratio21x9);
    }
}
