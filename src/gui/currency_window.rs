//! Currency HUD window
//!
//! Shows party gold and a token count (read from a game variable), each next to
//! its icon. The window refreshes from [`GameValues`] every frame and is
//! frameless by default.

use super::surface::{ICON_SIZE, WindowStyle, WindowSurface};
use super::{STANDARD_PADDING, fitting_height};
use crate::config::CurrencyConfig;
use crate::game_state::GameValues;
use crate::text::GLYPH_HEIGHT;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Horizontal offset of the value text from its icon
const VALUE_OFFSET_X: i32 = 50;

/// Vertical distance between the gold row and the token row
const ROW_SPACING: i32 = 50;

const TEXT_SCALE: u32 = 3;

/// Resolves the configured width against the screen
///
/// Anything narrower than the screen is used as is; the screen width or more
/// means "full width".
pub fn window_width(requested: u32, screen_width: u32) -> u32 {
    requested.min(screen_width)
}

/// Resolves the configured height against the screen
///
/// `screen_height + 1` is a sentinel for "fit two and a half lines".
pub fn window_height(requested: u32, screen_height: u32) -> u32 {
    if requested < screen_height {
        requested
    } else if requested == screen_height + 1 {
        fitting_height(2.5)
    } else {
        screen_height
    }
}

pub struct CurrencyWindow {
    config: CurrencyConfig,
    style: WindowStyle,
    frame: Rect,
    gold: u32,
    tokens: i32,
    text_color: Color,
}

impl CurrencyWindow {
    /// Creates the window at the top-left of the screen
    pub fn new(config: CurrencyConfig, screen_width: u32, screen_height: u32) -> Self {
        let width = window_width(config.window_width, screen_width);
        let height = window_height(config.window_height, screen_height);
        let style = WindowStyle::default().with_opacity(config.opacity);

        CurrencyWindow {
            config,
            style,
            frame: Rect::new(0, 0, width, height),
            gold: 0,
            tokens: 0,
            text_color: Color::RGB(255, 255, 255),
        }
    }

    /// Reads current gold and token values
    pub fn refresh(&mut self, values: &GameValues) {
        self.gold = values.gold();
        self.tokens = values.variable(self.config.token_variable);
    }

    pub fn render<S: WindowSurface>(&self, surface: &mut S) -> Result<(), String> {
        surface.draw_frame(self.frame, &self.style)?;

        let origin_x = self.frame.x() + STANDARD_PADDING as i32;
        let origin_y = self.frame.y() + STANDARD_PADDING as i32;
        let text_offset_y = (ICON_SIZE as i32 - (GLYPH_HEIGHT * TEXT_SCALE) as i32) / 2;

        let rows = [
            (self.config.gold_icon, self.gold.to_string()),
            (self.config.token_icon, self.tokens.to_string()),
        ];
        for (row, (icon, value)) in rows.iter().enumerate() {
            let y = origin_y + row as i32 * ROW_SPACING;
            surface.draw_icon(*icon, origin_x, y)?;
            surface.draw_text(
                value,
                origin_x + VALUE_OFFSET_X,
                y + text_offset_y,
                self.text_color,
                TEXT_SCALE,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::surface::testing::{DrawCall, RecordingSurface};

    #[test]
    fn test_window_width() {
        assert_eq!(window_width(400, 816), 400);
        assert_eq!(window_width(0, 816), 0);
        assert_eq!(window_width(816, 816), 816);
        assert_eq!(window_width(2000, 816), 816);
    }

    #[test]
    fn test_window_height() {
        assert_eq!(window_height(300, 624), 300);
        assert_eq!(window_height(624, 624), 624);
        // 2.5 lines of 36 plus 18 padding on each side
        assert_eq!(window_height(625, 624), 126);
        assert_eq!(window_height(900, 624), 624);
    }

    #[test]
    fn test_refresh_and_render() {
        let mut values = GameValues::new();
        values.gain_gold(1250);
        values.set_variable(1, 7);

        let mut window = CurrencyWindow::new(CurrencyConfig::default(), 816, 624);
        window.refresh(&values);

        let mut surface = RecordingSurface::default();
        window.render(&mut surface).unwrap();

        // Opacity 0: no frame, just icons and values
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Icon { index: 313, x: 18, y: 18 },
                DrawCall::Text { text: "1250".to_string(), x: 68, y: 23 },
                DrawCall::Icon { index: 314, x: 18, y: 68 },
                DrawCall::Text { text: "7".to_string(), x: 68, y: 73 },
            ]
        );
    }

    #[test]
    fn test_token_variable_is_configurable() {
        let mut values = GameValues::new();
        values.set_variable(1, 3);
        values.set_variable(9, 42);

        let config = CurrencyConfig {
            token_variable: 9,
            opacity: 255,
            ..Default::default()
        };
        let mut window = CurrencyWindow::new(config, 816, 624);
        window.refresh(&values);

        let mut surface = RecordingSurface::default();
        window.render(&mut surface).unwrap();
        assert_eq!(surface.calls[0], DrawCall::Frame(Rect::new(0, 0, 400, 300)));
        assert!(surface.calls.contains(&DrawCall::Text { text: "42".to_string(), x: 68, y: 73 }));
    }
}
