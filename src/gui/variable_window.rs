//! Variable HUD window
//!
//! A one-line window showing the value of a game variable, optionally with an
//! icon. Position, size, variable, icon and alignment can all be changed at run
//! time through `VariableDisplay` plugin commands:
//!
//! ```text
//! VariableDisplay x 576
//! VariableDisplay id 3
//! VariableDisplay iDraw true
//! VariableDisplay align left
//! VariableDisplay open
//! ```

use super::error::CommandError;
use super::surface::{ICON_SIZE, WindowStyle, WindowSurface};
use super::{LINE_HEIGHT, STANDARD_PADDING, TEXT_PADDING, fitting_height};
use crate::config::VariableDisplayConfig;
use crate::game_state::GameValues;
use crate::text::{GLYPH_HEIGHT, text_width};
use serde::{Deserialize, Serialize};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

const TEXT_SCALE: u32 = 3;

/// Horizontal alignment of the window's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    #[default]
    Right,
}

impl Alignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// Next alignment in left, center, right order
    pub fn cycled(self) -> Self {
        match self {
            Alignment::Left => Alignment::Center,
            Alignment::Center => Alignment::Right,
            Alignment::Right => Alignment::Left,
        }
    }

    /// X of a `width`-wide run aligned inside `[x, x + area_width]`
    fn place(self, x: i32, area_width: u32, width: u32) -> i32 {
        let slack = area_width as i32 - width as i32;
        match self {
            Alignment::Left => x,
            Alignment::Center => x + slack / 2,
            Alignment::Right => x + slack,
        }
    }
}

/// A `VariableDisplay` subcommand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableCommand {
    X(i32),
    Y(i32),
    Width(u32),
    VariableId(u32),
    DrawIcon(bool),
    IconIndex(u32),
    Align(Alignment),
    Open,
    Close,
}

fn parse_arg<T: std::str::FromStr>(subcommand: &str, value: Option<&&str>) -> Result<T, CommandError> {
    let value = value.ok_or_else(|| CommandError::MissingArgument(subcommand.to_string()))?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        subcommand: subcommand.to_string(),
        value: value.to_string(),
    })
}

impl VariableCommand {
    /// Parses the arguments following `VariableDisplay`
    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        let subcommand = *args
            .first()
            .ok_or_else(|| CommandError::MissingArgument("VariableDisplay".to_string()))?;
        let value = args.get(1);

        let command = match subcommand {
            "x" => VariableCommand::X(parse_arg(subcommand, value)?),
            "y" => VariableCommand::Y(parse_arg(subcommand, value)?),
            "width" => VariableCommand::Width(parse_arg(subcommand, value)?),
            "id" => VariableCommand::VariableId(parse_arg(subcommand, value)?),
            "iDraw" => VariableCommand::DrawIcon(parse_arg(subcommand, value)?),
            "iIndex" => VariableCommand::IconIndex(parse_arg(subcommand, value)?),
            "align" | "Align" => {
                let raw: String = parse_arg(subcommand, value)?;
                let alignment = Alignment::parse(&raw).ok_or(CommandError::InvalidArgument {
                    subcommand: subcommand.to_string(),
                    value: raw,
                })?;
                VariableCommand::Align(alignment)
            }
            "open" => VariableCommand::Open,
            "close" => VariableCommand::Close,
            other => return Err(CommandError::UnknownCommand(format!("VariableDisplay {}", other))),
        };
        Ok(command)
    }
}

pub struct VariableWindow {
    x: i32,
    y: i32,
    width: u32,
    variable_id: u32,
    draw_icon: bool,
    icon_index: u32,
    alignment: Alignment,
    open: bool,
    value: i32,
    style: WindowStyle,
    text_color: Color,
}

impl VariableWindow {
    /// Creates the window closed
    pub fn new(config: &VariableDisplayConfig) -> Self {
        VariableWindow {
            x: config.x,
            y: config.y,
            width: config.width,
            variable_id: config.variable_id,
            draw_icon: config.draw_icon,
            icon_index: config.icon_index,
            alignment: config.alignment,
            open: false,
            value: 0,
            style: WindowStyle::default(),
            text_color: Color::RGB(255, 255, 255),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn draw_icon(&self) -> bool {
        self.draw_icon
    }

    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, fitting_height(1.0))
    }

    fn contents_width(&self) -> u32 {
        self.width.saturating_sub(STANDARD_PADDING * 2)
    }

    pub fn refresh(&mut self, values: &GameValues) {
        self.value = values.variable(self.variable_id);
    }

    pub fn apply(&mut self, command: VariableCommand, values: &GameValues) {
        match command {
            VariableCommand::X(x) => self.x = x,
            VariableCommand::Y(y) => self.y = y,
            VariableCommand::Width(width) => self.width = width,
            VariableCommand::VariableId(id) => self.variable_id = id,
            VariableCommand::DrawIcon(draw) => self.draw_icon = draw,
            VariableCommand::IconIndex(index) => self.icon_index = index,
            VariableCommand::Align(alignment) => self.alignment = alignment,
            VariableCommand::Open => {
                self.refresh(values);
                self.open = true;
            }
            VariableCommand::Close => self.open = false,
        }
    }

    pub fn render<S: WindowSurface>(&self, surface: &mut S) -> Result<(), String> {
        if !self.open {
            return Ok(());
        }

        let frame = self.frame();
        surface.draw_frame(frame, &self.style)?;

        let origin_x = frame.x() + STANDARD_PADDING as i32;
        let origin_y = frame.y() + STANDARD_PADDING as i32;
        let contents_width = self.contents_width();

        if self.draw_icon {
            let icon_x = match self.alignment {
                Alignment::Right => contents_width as i32 - ICON_SIZE as i32,
                _ => 0,
            };
            let icon_y = (LINE_HEIGHT as i32 - ICON_SIZE as i32) / 2;
            surface.draw_icon(self.icon_index, origin_x + icon_x, origin_y + icon_y)?;
        }

        // Text shifts away from the icon; right-aligned text shifts left
        let icon_space = if self.draw_icon {
            (ICON_SIZE + TEXT_PADDING) as i32
        } else {
            0
        };
        let shift = match self.alignment {
            Alignment::Right => -icon_space,
            _ => icon_space,
        };

        let text = self.value.to_string();
        let text_x = self.alignment.place(shift, contents_width, text_width(&text, TEXT_SCALE));
        let text_y = (LINE_HEIGHT as i32 - (GLYPH_HEIGHT * TEXT_SCALE) as i32) / 2;
        surface.draw_text(
            &text,
            origin_x + text_x,
            origin_y + text_y,
            self.text_color,
            TEXT_SCALE,
        )?;

        Ok(())
    }
}
