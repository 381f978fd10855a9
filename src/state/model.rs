use crate::editor::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing,
    Adjusting(Handle),
}

impl InteractionMode {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_gesture(self) -> bool {
        !self.is_idle()
    }

    pub const fn handle(self) -> Option<Handle> {
        match self {
            Self::Adjusting(handle) => Some(handle),
            _ => None,
        }
    }
}
