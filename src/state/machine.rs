use super::error::{StateError, StateResult};
use super::{InteractionEvent, InteractionMode, ModeTransition};

#[derive(Debug, Default)]
pub struct ModeMachine {
    mode: InteractionMode,
    last_transition: Option<ModeTransition>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn last_transition(&self) -> Option<ModeTransition> {
        self.last_transition
    }

    pub fn can_transition(&self, event: InteractionEvent) -> bool {
        self.next_mode(event).is_some()
    }

    pub fn next_mode(&self, event: InteractionEvent) -> Option<InteractionMode> {
        use InteractionEvent::*;
        use InteractionMode::*;
        match (self.mode, event) {
            (_, Reset) => Some(Idle),
            (Idle, PressOnHandle(handle)) => Some(Adjusting(handle)),
            (Idle, PressOutside) => Some(Drawing),
            (Idle, Release) => Some(Idle),
            (Drawing, Move) => Some(Drawing),
            (Adjusting(handle), Move) => Some(Adjusting(handle)),
            (Drawing, Release) | (Adjusting(_), Release) => Some(Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: InteractionEvent) -> StateResult<InteractionMode> {
        let next = self.next_mode(event).ok_or_else(|| {
            let from = self.mode;
            tracing::warn!(?from, ?event, "invalid interaction transition requested");
            StateError::InvalidTransition { from, event }
        })?;

        if next != self.mode {
            tracing::debug!(
                from = ?self.mode,
                ?event,
                to = ?next,
                "interaction mode changed"
            );
        }
        self.last_transition = Some(ModeTransition::new(self.mode, event, next));
        self.mode = next;
        Ok(self.mode)
    }
}

impl std::fmt::Display for ModeMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InteractionMode::{:?}", self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Handle;

    #[test]
    fn gestures_start_only_from_idle() {
        let mut machine = ModeMachine::new();
        assert!(machine.can_transition(InteractionEvent::PressOutside));
        assert!(!machine.can_transition(InteractionEvent::Move));

        machine
            .transition(InteractionEvent::PressOutside)
            .expect("idle -> drawing should transition");
        assert_eq!(machine.mode(), InteractionMode::Drawing);
        assert!(!machine.can_transition(InteractionEvent::PressOnHandle(Handle::Move)));
        assert!(!machine.can_transition(InteractionEvent::PressOutside));
        assert!(machine.can_transition(InteractionEvent::Move));
    }

    #[test]
    fn release_returns_to_idle_and_is_a_no_op_when_idle() {
        let mut machine = ModeMachine::new();
        machine
            .transition(InteractionEvent::PressOnHandle(Handle::ResizeBR))
            .expect("idle -> adjusting should transition");
        assert_eq!(machine.mode(), InteractionMode::Adjusting(Handle::ResizeBR));
        machine
            .transition(InteractionEvent::Move)
            .expect("adjusting accepts moves");
        machine
            .transition(InteractionEvent::Release)
            .expect("adjusting -> idle should transition");
        assert_eq!(machine.mode(), InteractionMode::Idle);

        machine
            .transition(InteractionEvent::Release)
            .expect("release while idle is accepted");
        assert_eq!(machine.mode(), InteractionMode::Idle);
        assert_eq!(
            machine.last_transition(),
            Some(ModeTransition::new(
                InteractionMode::Idle,
                InteractionEvent::Release,
                InteractionMode::Idle
            ))
        );
    }

    #[test]
    fn reset_interrupts_any_gesture() {
        let mut machine = ModeMachine::new();
        machine
            .transition(InteractionEvent::PressOutside)
            .expect("idle -> drawing should transition");
        machine
            .transition(InteractionEvent::Reset)
            .expect("reset is always accepted");
        assert_eq!(machine.mode(), InteractionMode::Idle);
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_state() {
        let mut machine = ModeMachine::new();
        let err = machine
            .transition(InteractionEvent::Move)
            .expect_err("idle -> move should fail");
        assert!(matches!(
            err,
            StateError::InvalidTransition {
                from: InteractionMode::Idle,
                event: InteractionEvent::Move
            }
        ));
        assert_eq!(machine.mode(), InteractionMode::Idle);
        assert!(machine.last_transition().is_none());
    }
}
