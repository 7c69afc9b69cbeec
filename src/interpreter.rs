//! Event interpreter
//!
//! Runs a list of event commands against the map scene. Messages block the
//! interpreter until the message window is idle again; plugin command lines are
//! parsed and routed immediately. Bad plugin commands are logged and skipped.

use crate::face::FaceCommand;
use crate::gui::{CommandError, Message, VariableCommand};
use crate::scene::MapScene;

/// A parsed plugin command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluginCommand {
    Face(FaceCommand),
    VariableDisplay(VariableCommand),
}

impl PluginCommand {
    /// Parses `Name arg1 arg2 ...`
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| CommandError::UnknownCommand(String::new()))?;
        let args: Vec<&str> = parts.collect();

        if name == "VariableDisplay" {
            return Ok(PluginCommand::VariableDisplay(VariableCommand::parse(&args)?));
        }

        FaceCommand::parse(name)
            .map(PluginCommand::Face)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventCommand {
    ShowMessage(Message),
    Plugin(String),
    ChangeGold(i64),
    ChangeVariable { id: u32, delta: i32 },
}

pub struct Interpreter {
    commands: Vec<EventCommand>,
    index: usize,
}

impl Interpreter {
    pub fn new(commands: Vec<EventCommand>) -> Self {
        Interpreter { commands, index: 0 }
    }

    pub fn is_running(&self) -> bool {
        self.index < self.commands.len()
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }

    /// Executes commands until one has to wait for the message window
    pub fn update(&mut self, scene: &mut MapScene) {
        while !scene.message_window.is_busy() {
            let Some(command) = self.commands.get(self.index) else {
                return;
            };
            self.index += 1;

            match command {
                EventCommand::ShowMessage(message) => {
                    scene.show_message(message.clone());
                }
                EventCommand::Plugin(line) => match PluginCommand::parse(line) {
                    Ok(plugin_command) => scene.dispatch(plugin_command),
                    Err(e) => log::warn!("Skipping plugin command '{}': {}", line, e),
                },
                EventCommand::ChangeGold(amount) => scene.values.gain_gold(*amount),
                EventCommand::ChangeVariable { id, delta } => {
                    scene.values.add_to_variable(*id, *delta)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;
    use crate::face::DisplaySide;
    use crate::game_state::GameValues;
    use crate::gui::Alignment;
    use crate::gui::message_window::MessageState;

    fn scene() -> MapScene {
        MapScene::new(&PluginConfig::default(), GameValues::new(), 816, 624)
    }

    #[test]
    fn test_parse_plugin_commands() {
        assert_eq!(
            PluginCommand::parse("ShowFaceOnRight"),
            Ok(PluginCommand::Face(FaceCommand::ShowOnRight))
        );
        assert_eq!(
            PluginCommand::parse("  FaceFlipImage_ON "),
            Ok(PluginCommand::Face(FaceCommand::FlipOn))
        );
        assert_eq!(
            PluginCommand::parse("VariableDisplay align center"),
            Ok(PluginCommand::VariableDisplay(VariableCommand::Align(Alignment::Center)))
        );
        assert_eq!(
            PluginCommand::parse("Teleport 3 4"),
            Err(CommandError::UnknownCommand("Teleport".to_string()))
        );
        assert!(PluginCommand::parse("").is_err());
    }

    #[test]
    fn test_message_blocks_until_closed() {
        let mut scene = scene();
        let mut interpreter = Interpreter::new(vec![
            EventCommand::ShowMessage(Message::new("Hi")),
            EventCommand::Plugin("ShowFaceOnRight".to_string()),
            EventCommand::ChangeGold(100),
        ]);

        interpreter.update(&mut scene);
        assert_eq!(scene.message_window.state(), MessageState::Typing);
        assert_eq!(scene.message_window.policy().side(), DisplaySide::Left);

        // Finish typing, then close
        scene.message_window.advance();
        interpreter.update(&mut scene);
        assert_eq!(scene.values.gold(), 0);
        scene.message_window.advance();

        interpreter.update(&mut scene);
        assert_eq!(scene.message_window.policy().side(), DisplaySide::Right);
        assert_eq!(scene.values.gold(), 100);
        assert!(!interpreter.is_running());
    }

    #[test]
    fn test_bad_commands_are_skipped() {
        let mut scene = scene();
        let mut interpreter = Interpreter::new(vec![
            EventCommand::Plugin("VariableDisplay x wide".to_string()),
            EventCommand::Plugin("NoSuchCommand".to_string()),
            EventCommand::Plugin("VariableDisplay open".to_string()),
            EventCommand::ChangeVariable { id: 1, delta: 4 },
        ]);

        interpreter.update(&mut scene);
        assert!(scene.variable_window.is_open());
        assert_eq!(scene.values.variable(1), 4);
        assert!(!interpreter.is_running());

        interpreter.restart();
        assert!(interpreter.is_running());
    }
}
