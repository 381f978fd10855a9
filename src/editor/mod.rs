//! Interactive editing of one selection rectangle over letterboxed content.

pub mod adjust;
pub mod constraint;
pub mod handle;
pub mod replica;

pub use constraint::{AspectPreset, Constraint, ConstraintError, ConstraintResult, MAX_CUSTOM_TERM};
pub use handle::{handle_points, locate, Axis, CursorHint, Handle, HANDLE_HIT_TOLERANCE};
pub use replica::DEFAULT_MAX_REPLICA_COUNT;

use crate::geometry::{
    ContentPoint, ContentSize, DisplayPoint, DisplayRect, GeometryResult, Rectangle, SurfaceSize,
};
use crate::state::{InteractionEvent, InteractionMode, ModeMachine};
use crate::viewport::CoordinateMapper;

/// Tunables an editor is built with; see `config` for where they come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub handle_tolerance: f64,
    pub max_replica_count: u32,
    pub default_preset: AspectPreset,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            max_replica_count: DEFAULT_MAX_REPLICA_COUNT,
            default_preset: AspectPreset::Free,
        }
    }
}

/// State captured at press time. Every drag update is computed from it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Draw { anchor: ContentPoint },
    Adjust { origin: Rectangle, press: DisplayPoint },
}

#[derive(Debug)]
pub struct RectangleEditor {
    settings: EditorSettings,
    content: Option<ContentSize>,
    surface: Option<SurfaceSize>,
    mapper: Option<CoordinateMapper>,
    machine: ModeMachine,
    gesture: Option<Gesture>,
    constraint: Option<Constraint>,
    preset: Option<AspectPreset>,
    rectangle: Option<Rectangle>,
    replica_count: u32,
    replicas: Vec<Rectangle>,
}

impl Default for RectangleEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RectangleEditor {
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let handle_tolerance = if settings.handle_tolerance.is_finite() {
            settings.handle_tolerance.max(0.0)
        } else {
            HANDLE_HIT_TOLERANCE
        };
        let settings = EditorSettings {
            handle_tolerance,
            max_replica_count: settings.max_replica_count.max(1),
            default_preset: settings.default_preset,
        };
        let mut editor = Self {
            settings,
            content: None,
            surface: None,
            mapper: None,
            machine: ModeMachine::new(),
            gesture: None,
            constraint: None,
            preset: None,
            rectangle: None,
            replica_count: 1,
            replicas: Vec::new(),
        };
        if let Err(err) = editor.apply_preset(settings.default_preset) {
            tracing::warn!(preset = ?settings.default_preset, %err, "default preset rejected");
        }
        editor
    }

    pub fn settings(&self) -> EditorSettings {
        self.settings
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.mapper.as_ref()
    }

    pub fn mode(&self) -> InteractionMode {
        self.machine.mode()
    }

    pub fn constraint(&self) -> Option<Constraint> {
        self.constraint
    }

    /// The preset last applied, if the active constraint came from one.
    pub fn preset(&self) -> Option<AspectPreset> {
        self.preset
    }

    pub fn replica_count(&self) -> u32 {
        self.replica_count
    }

    pub fn current_rectangle(&self) -> Option<Rectangle> {
        self.rectangle
    }

    pub fn replica_rectangles(&self) -> &[Rectangle] {
        &self.replicas
    }

    /// The primary rectangle followed by its replicas, in export order.
    pub fn all_rectangles(&self) -> Vec<Rectangle> {
        self.rectangle
            .into_iter()
            .chain(self.replicas.iter().copied())
            .collect()
    }

    /// Display projection of the primary rectangle under the current mapping.
    pub fn display_rectangle(&self) -> Option<DisplayRect> {
        let mapper = self.mapper.as_ref()?;
        self.rectangle.map(|rect| mapper.project(rect))
    }

    pub fn replica_display_rectangles(&self) -> Vec<DisplayRect> {
        let Some(mapper) = self.mapper.as_ref() else {
            return Vec::new();
        };
        self.replicas
            .iter()
            .map(|rect| mapper.project(*rect))
            .collect()
    }

    /// New content discards the selection. Invalid dimensions are rejected
    /// and leave every piece of state as it was.
    pub fn on_content_changed(&mut self, width: u32, height: u32) -> GeometryResult<()> {
        let content = ContentSize::new(width, height)
            .validate()
            .inspect_err(|err| tracing::warn!(%err, "content size rejected"))?;
        let mapper = self
            .surface
            .map(|surface| CoordinateMapper::new(content, surface))
            .transpose()?;

        self.content = Some(content);
        self.mapper = mapper;
        self.clear();
        tracing::debug!(width, height, "content changed; selection discarded");
        Ok(())
    }

    /// Recomputes the mapping. The content-space rectangle is untouched; a
    /// press point captured mid-gesture is carried over to the new mapping.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) -> GeometryResult<()> {
        let surface = SurfaceSize::new(width, height)
            .validate()
            .inspect_err(|err| tracing::warn!(%err, "surface size rejected"))?;
        let mapper = self
            .content
            .map(|content| CoordinateMapper::new(content, surface))
            .transpose()?;

        if let (Some(previous), Some(next), Some(Gesture::Adjust { press, .. })) =
            (self.mapper, mapper, self.gesture.as_mut())
        {
            *press = next.remap(*press, previous.transform());
        }
        self.surface = Some(surface);
        self.mapper = mapper;
        tracing::trace!(width, height, "surface resized");
        Ok(())
    }

    /// Starts a gesture. A press on the rectangle adjusts it; a press
    /// anywhere else starts drawing a replacement, which is returned at once.
    pub fn press(&mut self, point: DisplayPoint) -> Option<Rectangle> {
        let Some(mapper) = self.mapper else {
            tracing::debug!("press ignored: no content or surface yet");
            return None;
        };

        match self.hover(point) {
            Some(handle) => {
                let origin = self.rectangle?;
                self.machine
                    .transition(InteractionEvent::PressOnHandle(handle))
                    .ok()?;
                self.gesture = Some(Gesture::Adjust {
                    origin,
                    press: mapper.clamp_to_content_area(point),
                });
                None
            }
            None => {
                self.machine
                    .transition(InteractionEvent::PressOutside)
                    .ok()?;
                let anchor = mapper.to_content(point);
                self.gesture = Some(Gesture::Draw { anchor });
                self.commit(adjust::drawn_rectangle(
                    anchor,
                    anchor,
                    self.constraint,
                    mapper.content(),
                ))
            }
        }
    }

    /// Pointer motion during a gesture. Motion while idle is hover only and
    /// changes nothing.
    pub fn drag(&mut self, point: DisplayPoint) -> Option<Rectangle> {
        let mapper = self.mapper?;
        let gesture = self.gesture?;
        self.machine.transition(InteractionEvent::Move).ok()?;

        let next = match gesture {
            Gesture::Draw { anchor } => adjust::drawn_rectangle(
                anchor,
                mapper.to_content(point),
                self.constraint,
                mapper.content(),
            ),
            Gesture::Adjust { origin, press } => {
                let handle = self.machine.mode().handle()?;
                self.adjusted(&mapper, handle, origin, press, point)
            }
        };
        self.commit(next)
    }

    /// Ends the gesture and returns the committed rectangle. Releasing while
    /// idle is a no-op.
    pub fn release(&mut self) -> Option<Rectangle> {
        let was_gesture = self.machine.mode().is_gesture();
        self.machine.transition(InteractionEvent::Release).ok()?;
        self.gesture = None;
        if !was_gesture {
            return None;
        }
        if let Some(rect) = self.rectangle {
            tracing::debug!(
                x = rect.x,
                y = rect.y,
                width = rect.width,
                height = rect.height,
                "selection committed"
            );
        }
        self.rectangle
    }

    /// Activates `constraint`, replacing any other. The selection is
    /// discarded; an invalid constraint is rejected and the previous one
    /// stays in force.
    pub fn set_constraint(&mut self, constraint: Constraint) -> ConstraintResult<()> {
        let constraint = constraint
            .validate()
            .inspect_err(|err| tracing::warn!(%err, "constraint rejected"))?;
        self.constraint = Some(constraint);
        self.preset = None;
        self.clear();
        tracing::debug!(?constraint, "constraint changed; selection discarded");
        Ok(())
    }

    pub fn clear_constraint(&mut self) {
        self.constraint = None;
        self.preset = None;
        self.clear();
        tracing::debug!("constraint cleared; selection discarded");
    }

    /// Switches to an aspect preset. A custom preset with a term outside
    /// `1..=MAX_CUSTOM_TERM` is rejected and leaves everything as it was.
    pub fn apply_preset(&mut self, preset: AspectPreset) -> ConstraintResult<()> {
        let preset = preset
            .validate()
            .inspect_err(|err| tracing::warn!(%err, "preset rejected"))?;
        match preset.constraint() {
            Some(constraint) => self.set_constraint(constraint)?,
            None => self.clear_constraint(),
        }
        self.preset = Some(preset);
        Ok(())
    }

    /// Sets the replica count N, clamped to `1..=max_replica_count`.
    pub fn set_replica_count(&mut self, count: u32) {
        self.replica_count = count.clamp(1, self.settings.max_replica_count);
        self.regenerate_replicas();
        tracing::debug!(count = self.replica_count, "replica count changed");
    }

    /// Drops the selection and any gesture in progress.
    pub fn clear(&mut self) {
        let _ = self.machine.transition(InteractionEvent::Reset);
        self.gesture = None;
        self.rectangle = None;
        self.replicas.clear();
    }

    /// The handle under `point`, if a rectangle exists.
    pub fn hover(&self, point: DisplayPoint) -> Option<Handle> {
        let rect = self.display_rectangle()?;
        handle::locate(point, rect, self.settings.handle_tolerance)
    }

    pub fn cursor_at(&self, point: DisplayPoint) -> CursorHint {
        match self.machine.mode() {
            InteractionMode::Adjusting(handle) => handle.cursor(),
            InteractionMode::Drawing => CursorHint::Default,
            InteractionMode::Idle => self.hover(point).map_or(CursorHint::Default, Handle::cursor),
        }
    }

    fn adjusted(
        &self,
        mapper: &CoordinateMapper,
        handle: Handle,
        origin: Rectangle,
        press: DisplayPoint,
        point: DisplayPoint,
    ) -> Rectangle {
        let current = mapper.clamp_to_content_area(point);
        let display_dx = current.x - press.x;
        let display_dy = current.y - press.y;
        let transform = mapper.transform();
        let delta_x = transform.content_delta_x(display_dx);
        let delta_y = transform.content_delta_y(display_dy);

        if handle == Handle::Move {
            return adjust::moved_rectangle(origin, delta_x, delta_y, mapper.content());
        }
        let axis = if display_dx.abs() > display_dy.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        adjust::resized_rectangle(
            origin,
            handle,
            (delta_x, delta_y),
            axis,
            self.constraint,
            mapper.content(),
        )
    }

    fn commit(&mut self, rect: Rectangle) -> Option<Rectangle> {
        debug_assert!(self.content.is_some_and(|content| rect.fits_within(content)));
        self.rectangle = Some(rect);
        self.regenerate_replicas();
        tracing::trace!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            replicas = self.replicas.len(),
            "selection updated"
        );
        Some(rect)
    }

    fn regenerate_replicas(&mut self) {
        self.replicas = match (self.rectangle, self.content) {
            (Some(rect), Some(content)) => replica::generate(rect, content, self.replica_count),
            _ => Vec::new(),
        };
    }
}
