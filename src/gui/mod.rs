//! Screen-Space GUI System
//!
//! Windows that render at fixed screen positions: the message window with its
//! face portrait and the HUD windows drawn over the map.
//!
//! # Architecture
//!
//! Screen-space windows:
//! - Use screen coordinates (pixels from the top-left corner)
//! - Lay out their contents inside a padded frame
//! - Draw through the [`WindowSurface`] trait, never the SDL2 canvas directly
//!
//! # Available Components
//!
//! - [`MessageWindow`] - Paged message text with a face portrait
//! - [`CurrencyWindow`] - Gold and token counters
//! - [`VariableWindow`] - A single game variable's value

pub mod currency_window;
pub mod error;
pub mod message_window;
pub mod surface;
pub mod variable_window;

pub use currency_window::CurrencyWindow;
pub use error::CommandError;
pub use message_window::{Message, MessageWindow};
pub use surface::{FaceAtlas, SdlSurface, WindowSurface};
pub use variable_window::{Alignment, VariableCommand, VariableWindow};

/// Padding between a window's frame and its contents
pub const STANDARD_PADDING: u32 = 18;

/// Height of one line of window text
pub const LINE_HEIGHT: u32 = 36;

/// Gap between an icon and the text beside it
pub const TEXT_PADDING: u32 = 6;

/// Window height that fits `lines` lines of text plus padding
pub fn fitting_height(lines: f32) -> u32 {
    (lines * LINE_HEIGHT as f32) as u32 + STANDARD_PADDING * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_height() {
        assert_eq!(fitting_height(1.0), 72);
        assert_eq!(fitting_height(2.5), 126);
        assert_eq!(fitting_height(4.0), 180);
    }
}
