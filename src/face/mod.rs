//! Message Face Placement
//!
//! Side selection and horizontal flipping for the face portrait shown next to
//! message text.
//!
//! - `policy`: side/flip state and the placement queries
//! - `commands`: named commands and inline escape codes that mutate the state
//! - `sheet`: face sprite sheet addressing

pub mod commands;
pub mod policy;
pub mod sheet;

pub use commands::{EscapeCode, FaceCommand};
pub use policy::{DisplaySide, FacePlacement, FacePlacementPolicy, FlipMode};
pub use sheet::{FaceImageRef, FaceSheetLayout};
