use super::model::InteractionMode;
use crate::editor::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// Pointer pressed on one of the current rectangle's handles.
    PressOnHandle(Handle),
    /// Pointer pressed away from any handle; starts a new rectangle.
    PressOutside,
    Move,
    Release,
    /// External reset: constraint change, new content, or clear.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: InteractionMode,
    pub event: InteractionEvent,
    pub to: InteractionMode,
}

impl ModeTransition {
    pub const fn new(from: InteractionMode, event: InteractionEvent, to: InteractionMode) -> Self {
        Self { from, event, to }
    }
}
