//! Face placement policy for message windows
//!
//! Decides which edge of the message window a face portrait is anchored to and
//! whether the portrait is mirrored. The message window owns one policy and asks
//! it on every redraw; triggers (inline escape codes and host commands) mutate it.
//!
//! # Example
//!
//! ```rust
//! use crate::face::{DisplaySide, FacePlacement, FacePlacementPolicy, FlipMode};
//!
//! let mut policy = FacePlacementPolicy::new(DisplaySide::Left, FlipMode::AutoLeft);
//! policy.set_side(DisplaySide::Right);
//!
//! let placement = policy.compute_draw_rect(816, 12, 144);
//! assert_eq!(placement.x, 648);
//! assert!(!placement.mirrored);
//! ```

use super::commands::FaceCommand;
use super::sheet::FaceImageRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal space reserved for a left-side face before message text starts
pub const DEFAULT_RESERVED_WIDTH: i32 = 168;

/// Which edge of the message window the face is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySide {
    #[default]
    Left,
    Right,
}

impl DisplaySide {
    /// Returns the opposite side
    pub fn toggled(self) -> Self {
        match self {
            DisplaySide::Left => DisplaySide::Right,
            DisplaySide::Right => DisplaySide::Left,
        }
    }
}

/// How the mirror flag is derived
///
/// `Always` and `Never` pin the flag. The auto modes derive it from the
/// current side every time the side changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipMode {
    Always,
    Never,
    #[default]
    AutoLeft,
    AutoRight,
}

impl FlipMode {
    /// Config spelling of this mode (`always`, `never`, `auto-left`, `auto-right`)
    pub fn as_param(&self) -> &'static str {
        match self {
            FlipMode::Always => "always",
            FlipMode::Never => "never",
            FlipMode::AutoLeft => "auto-left",
            FlipMode::AutoRight => "auto-right",
        }
    }

    /// Mirror flag this mode produces for a face on `side`
    fn flips_on(self, side: DisplaySide) -> bool {
        match self {
            FlipMode::Always => true,
            FlipMode::Never => false,
            FlipMode::AutoLeft => side == DisplaySide::Left,
            FlipMode::AutoRight => side == DisplaySide::Right,
        }
    }
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Returned when a flip mode string is not one of the four config spellings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlipMode(pub String);

impl fmt::Display for UnknownFlipMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown face flip mode: {}", self.0)
    }
}

impl std::error::Error for UnknownFlipMode {}

impl FromStr for FlipMode {
    type Err = UnknownFlipMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(FlipMode::Always),
            "never" => Ok(FlipMode::Never),
            "auto-left" => Ok(FlipMode::AutoLeft),
            "auto-right" => Ok(FlipMode::AutoRight),
            other => Err(UnknownFlipMode(other.to_string())),
        }
    }
}

/// Where and how a face is drawn, relative to the window's contents origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPlacement {
    pub x: i32,
    pub y: i32,
    pub mirrored: bool,
}

/// The queries a message window needs from a face policy
///
/// Message windows are generic over this trait so hosts can supply their own
/// placement rules without touching the window.
pub trait FacePlacement {
    /// Face position and mirror flag for a window of the given geometry
    fn compute_draw_rect(&self, window_width: u32, window_padding: u32, face_width: u32)
        -> DrawPlacement;

    /// X where message text starts on a new line
    fn text_start_x(&self, face: Option<&FaceImageRef>) -> i32;

    /// Width available to text before it wraps
    fn wordwrap_width(&self, contents_width: u32, face_width: u32) -> u32;

    /// Mutates placement state in response to a trigger
    fn apply_command(&mut self, command: FaceCommand);
}

/// Side/flip state for the message face
#[derive(Debug, Clone, PartialEq)]
pub struct FacePlacementPolicy {
    side: DisplaySide,
    flip_mode: FlipMode,
    flip_enabled: bool,
    reserved_width: i32,
}

impl FacePlacementPolicy {
    /// Creates a policy with the default reserved text indent
    pub fn new(side: DisplaySide, flip_mode: FlipMode) -> Self {
        Self::with_reserved_width(side, flip_mode, DEFAULT_RESERVED_WIDTH)
    }

    /// Creates a policy with a custom reserved text indent
    pub fn with_reserved_width(side: DisplaySide, flip_mode: FlipMode, reserved_width: i32) -> Self {
        FacePlacementPolicy {
            side,
            flip_mode,
            flip_enabled: flip_mode.flips_on(side),
            reserved_width,
        }
    }

    pub fn side(&self) -> DisplaySide {
        self.side
    }

    pub fn flip_mode(&self) -> FlipMode {
        self.flip_mode
    }

    pub fn flip_enabled(&self) -> bool {
        self.flip_enabled
    }

    pub fn set_side(&mut self, side: DisplaySide) {
        self.side = side;
        self.refresh_flip();
    }

    pub fn toggle_side(&mut self) {
        self.side = self.side.toggled();
        self.refresh_flip();
    }

    /// Switches flip mode, deriving the flag from the side as it is right now
    pub fn set_flip_mode(&mut self, mode: FlipMode) {
        self.flip_mode = mode;
        self.refresh_flip();
    }

    /// Applies a flip mode given in its config spelling
    ///
    /// Unrecognized values leave the policy untouched. Returns whether the
    /// value was applied.
    pub fn set_flip_mode_param(&mut self, value: &str) -> bool {
        match value.parse::<FlipMode>() {
            Ok(mode) => {
                self.set_flip_mode(mode);
                true
            }
            Err(e) => {
                log::debug!("{}; keeping {}", e, self.flip_mode);
                false
            }
        }
    }

    fn refresh_flip(&mut self) {
        self.flip_enabled = self.flip_mode.flips_on(self.side);
    }
}

impl Default for FacePlacementPolicy {
    fn default() -> Self {
        Self::new(DisplaySide::default(), FlipMode::default())
    }
}

impl FacePlacement for FacePlacementPolicy {
    fn compute_draw_rect(
        &self,
        window_width: u32,
        window_padding: u32,
        face_width: u32,
    ) -> DrawPlacement {
        let x = match self.side {
            DisplaySide::Left => 0,
            DisplaySide::Right => {
                window_width as i32 - 2 * window_padding as i32 - face_width as i32
            }
        };

        DrawPlacement {
            x,
            y: 0,
            mirrored: self.flip_enabled,
        }
    }

    fn text_start_x(&self, face: Option<&FaceImageRef>) -> i32 {
        let has_face = face.is_some_and(|f| !f.is_empty());
        if !has_face || self.side == DisplaySide::Right {
            0
        } else {
            self.reserved_width
        }
    }

    fn wordwrap_width(&self, contents_width: u32, face_width: u32) -> u32 {
        match self.side {
            DisplaySide::Left => contents_width,
            DisplaySide::Right => contents_width.saturating_sub(face_width),
        }
    }

    fn apply_command(&mut self, command: FaceCommand) {
        match command {
            FaceCommand::ShowOnRight => self.set_side(DisplaySide::Right),
            FaceCommand::ShowOnLeft => self.set_side(DisplaySide::Left),
            FaceCommand::ToggleSide => self.toggle_side(),
            FaceCommand::FlipOn => self.set_flip_mode(FlipMode::Always),
            FaceCommand::FlipOff => self.set_flip_mode(FlipMode::Never),
            FaceCommand::FlipAutoLeft => self.set_flip_mode(FlipMode::AutoLeft),
            FaceCommand::FlipAutoRight => self.set_flip_mode(FlipMode::AutoRight),
        }
    }
}
