//! Map scene
//!
//! Owns every screen-space window plus the game values they display, and routes
//! plugin commands to the window they belong to.

use crate::config::PluginConfig;
use crate::game_state::GameValues;
use crate::gui::{CurrencyWindow, Message, MessageWindow, VariableWindow, WindowSurface};
use crate::interpreter::PluginCommand;
use crate::title;
use sdl2::pixels::Color;

pub struct MapScene {
    pub message_window: MessageWindow,
    pub currency_window: CurrencyWindow,
    pub variable_window: VariableWindow,
    pub values: GameValues,
    background_map_id: u32,
    screen_width: u32,
}

impl MapScene {
    pub fn new(config: &PluginConfig, values: GameValues, screen_width: u32, screen_height: u32) -> Self {
        let background_map_id =
            title::background_map_id(values.highest_title_progress(), config.title.map_id);
        log::info!("Background map: {}", background_map_id);

        let mut currency_window =
            CurrencyWindow::new(config.currency.clone(), screen_width, screen_height);
        currency_window.refresh(&values);

        MapScene {
            message_window: MessageWindow::new(
                config.face.policy(),
                config.face.sheet_layout(),
                config.message.clone(),
                screen_height,
            ),
            currency_window,
            variable_window: VariableWindow::new(&config.variable_display),
            values,
            background_map_id,
            screen_width,
        }
    }

    pub fn background_map_id(&self) -> u32 {
        self.background_map_id
    }

    pub fn show_message(&mut self, message: Message) {
        self.message_window.push(message);
    }

    pub fn dispatch(&mut self, command: PluginCommand) {
        match command {
            PluginCommand::Face(face_command) => {
                self.message_window.handle_face_command(face_command)
            }
            PluginCommand::VariableDisplay(variable_command) => {
                self.variable_window.apply(variable_command, &self.values)
            }
        }
    }

    /// Per-frame update: type message text and refresh HUD values
    pub fn update(&mut self) {
        self.message_window.update();
        self.currency_window.refresh(&self.values);
        if self.variable_window.is_open() {
            self.variable_window.refresh(&self.values);
        }
    }

    pub fn render<S: WindowSurface>(&self, surface: &mut S) -> Result<(), String> {
        let label = format!("MAP {}", self.background_map_id);
        let label_x = self.screen_width as i32 / 2 - crate::text::text_width(&label, 2) as i32 / 2;
        surface.draw_text(&label, label_x, 12, Color::RGB(200, 220, 200), 2)?;

        self.currency_window.render(surface)?;
        self.variable_window.render(surface)?;
        self.message_window.render(surface)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{DisplaySide, FaceCommand};
    use crate::gui::VariableCommand;
    use crate::gui::surface::testing::RecordingSurface;

    #[test]
    fn test_background_map_follows_progress() {
        let config = PluginConfig::default();
        let scene = MapScene::new(&config, GameValues::new(), 816, 624);
        assert_eq!(scene.background_map_id(), 1);

        let mut values = GameValues::new();
        values.record_title_progress(6);
        let scene = MapScene::new(&config, values, 816, 624);
        assert_eq!(scene.background_map_id(), 6);
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut scene = MapScene::new(&PluginConfig::default(), GameValues::new(), 816, 624);

        scene.dispatch(PluginCommand::Face(FaceCommand::ShowOnRight));
        assert_eq!(scene.message_window.policy().side(), DisplaySide::Right);

        scene.dispatch(PluginCommand::VariableDisplay(VariableCommand::Open));
        assert!(scene.variable_window.is_open());
    }

    #[test]
    fn test_update_refreshes_open_variable_window() {
        let mut scene = MapScene::new(&PluginConfig::default(), GameValues::new(), 816, 624);
        scene.dispatch(PluginCommand::VariableDisplay(VariableCommand::Open));
        scene.values.set_variable(1, 8);
        scene.update();

        let mut surface = RecordingSurface::default();
        scene.render(&mut surface).unwrap();
        let shown: Vec<String> = surface
            .texts()
            .iter()
            .filter_map(|c| match c {
                crate::gui::surface::testing::DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        // Map label, gold, tokens, variable window
        assert_eq!(shown, vec!["MAP 1", "0", "8", "8"]);
    }
}
