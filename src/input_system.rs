use crate::face::FaceCommand;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

/// Actions the demo can perform
///
/// Decouples SDL2 key handling from what the scene does with it.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoAction {
    // === Message ===
    AdvanceMessage,
    RestartScript,

    // === Face placement ===
    Face(FaceCommand),

    // === HUD ===
    ToggleVariableWindow,
    CycleAlignment,
    ToggleVariableIcon,
    GainGold(i64),
    GainTokens(i32),

    // === System ===
    Quit,
}

/// Input context determines which actions are available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// No message is open - HUD keys and script restart
    Map,
    /// A message is open - confirm advances it
    Message,
}

/// InputSystem turns SDL2 events into DemoActions
///
/// Face placement keys work in both contexts so side and flip changes can be
/// tried while a message is on screen.
pub struct InputSystem {
    /// Current input context
    pub context: InputContext,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Map,
        }
    }

    /// Call before poll_events() each frame
    pub fn update_context(&mut self, message_open: bool) {
        self.context = if message_open {
            InputContext::Message
        } else {
            InputContext::Map
        };
    }

    /// Polls all pending SDL2 events
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<DemoAction> {
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(DemoAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(action) = self.action_for_key(key) {
                        actions.push(action);
                    }
                }
                _ => {}
            }
        }

        actions
    }

    /// Maps a key press to an action in the current context
    pub fn action_for_key(&self, key: Keycode) -> Option<DemoAction> {
        let face_command = match key {
            Keycode::L => Some(FaceCommand::ShowOnLeft),
            Keycode::R => Some(FaceCommand::ShowOnRight),
            Keycode::T => Some(FaceCommand::ToggleSide),
            Keycode::Num1 => Some(FaceCommand::FlipOn),
            Keycode::Num2 => Some(FaceCommand::FlipOff),
            Keycode::Num3 => Some(FaceCommand::FlipAutoLeft),
            Keycode::Num4 => Some(FaceCommand::FlipAutoRight),
            _ => None,
        };
        if let Some(command) = face_command {
            return Some(DemoAction::Face(command));
        }

        match (self.context, key) {
            (_, Keycode::Escape) => Some(DemoAction::Quit),
            (InputContext::Message, Keycode::Return | Keycode::Space) => {
                Some(DemoAction::AdvanceMessage)
            }
            (InputContext::Map, Keycode::F5) => Some(DemoAction::RestartScript),
            (InputContext::Map, Keycode::V) => Some(DemoAction::ToggleVariableWindow),
            (InputContext::Map, Keycode::A) => Some(DemoAction::CycleAlignment),
            (InputContext::Map, Keycode::I) => Some(DemoAction::ToggleVariableIcon),
            (InputContext::Map, Keycode::G) => Some(DemoAction::GainGold(10)),
            (InputContext::Map, Keycode::K) => Some(DemoAction::GainTokens(1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_system_creation() {
        let input = InputSystem::new();
        assert_eq!(input.context, InputContext::Map);
    }

    #[test]
    fn test_context_switching() {
        let mut input = InputSystem::new();
        input.update_context(true);
        assert_eq!(input.context, InputContext::Message);
        input.update_context(false);
        assert_eq!(input.context, InputContext::Map);
    }

    #[test]
    fn test_face_keys_work_in_every_context() {
        let mut input = InputSystem::new();
        for open in [false, true] {
            input.update_context(open);
            assert_eq!(
                input.action_for_key(Keycode::R),
                Some(DemoAction::Face(FaceCommand::ShowOnRight))
            );
            assert_eq!(
                input.action_for_key(Keycode::Num4),
                Some(DemoAction::Face(FaceCommand::FlipAutoRight))
            );
        }
    }

    #[test]
    fn test_context_filters_keys() {
        let mut input = InputSystem::new();
        assert_eq!(input.action_for_key(Keycode::Return), None);
        assert_eq!(input.action_for_key(Keycode::G), Some(DemoAction::GainGold(10)));

        input.update_context(true);
        assert_eq!(input.action_for_key(Keycode::Return), Some(DemoAction::AdvanceMessage));
        assert_eq!(input.action_for_key(Keycode::G), None);
        assert_eq!(input.action_for_key(Keycode::Escape), Some(DemoAction::Quit));
    }
}
