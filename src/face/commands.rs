//! Triggers that change face placement
//!
//! Two inbound paths exist: named commands issued by the event interpreter and
//! escape codes embedded in message text. Both resolve to a [`FaceCommand`].

/// A single face placement state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCommand {
    ShowOnRight,
    ShowOnLeft,
    ToggleSide,
    FlipOn,
    FlipOff,
    FlipAutoLeft,
    FlipAutoRight,
}

impl FaceCommand {
    /// Resolves a command name, including the short and legacy spellings
    pub fn parse(name: &str) -> Option<Self> {
        let command = match name.trim() {
            "ShowFaceOnRight" => FaceCommand::ShowOnRight,
            "ShowFaceOnLeft" => FaceCommand::ShowOnLeft,
            "ShowFaceSideToggle" => FaceCommand::ToggleSide,
            "FaceFlipOn" | "FlipOn" | "FaceFlipImage_ON" => FaceCommand::FlipOn,
            "FaceFlipOff" | "FlipOff" | "FaceFlipImage_OFF" => FaceCommand::FlipOff,
            "FaceFlipAutoLeft" | "FlipAutoLeft" | "FaceFlipImage_AUTO_Left" => {
                FaceCommand::FlipAutoLeft
            }
            "FaceFlipAutoRight" | "FlipAutoRight" | "FaceFlipImage_AUTO_Right" => {
                FaceCommand::FlipAutoRight
            }
            _ => return None,
        };
        Some(command)
    }

    /// Canonical command name
    pub fn name(&self) -> &'static str {
        match self {
            FaceCommand::ShowOnRight => "ShowFaceOnRight",
            FaceCommand::ShowOnLeft => "ShowFaceOnLeft",
            FaceCommand::ToggleSide => "ShowFaceSideToggle",
            FaceCommand::FlipOn => "FaceFlipOn",
            FaceCommand::FlipOff => "FaceFlipOff",
            FaceCommand::FlipAutoLeft => "FaceFlipAutoLeft",
            FaceCommand::FlipAutoRight => "FaceFlipAutoRight",
        }
    }
}

/// Face escape codes recognised inside message text (`\SFL`, `\SFR`, `\SFT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeCode {
    SideLeft,
    SideRight,
    SideToggle,
}

impl EscapeCode {
    /// Matches an escape code name without its leading backslash
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "SFL" => Some(EscapeCode::SideLeft),
            "SFR" => Some(EscapeCode::SideRight),
            "SFT" => Some(EscapeCode::SideToggle),
            _ => None,
        }
    }
}

impl From<EscapeCode> for FaceCommand {
    fn from(code: EscapeCode) -> Self {
        match code {
            EscapeCode::SideLeft => FaceCommand::ShowOnLeft,
            EscapeCode::SideRight => FaceCommand::ShowOnRight,
            EscapeCode::SideToggle => FaceCommand::ToggleSide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        let all = [
            FaceCommand::ShowOnRight,
            FaceCommand::ShowOnLeft,
            FaceCommand::ToggleSide,
            FaceCommand::FlipOn,
            FaceCommand::FlipOff,
            FaceCommand::FlipAutoLeft,
            FaceCommand::FlipAutoRight,
        ];
        for command in all {
            assert_eq!(FaceCommand::parse(command.name()), Some(command));
        }
    }

    #[test]
    fn test_parse_short_and_legacy_names() {
        assert_eq!(FaceCommand::parse("FlipOn"), Some(FaceCommand::FlipOn));
        assert_eq!(FaceCommand::parse("FlipAutoRight"), Some(FaceCommand::FlipAutoRight));
        assert_eq!(FaceCommand::parse("FaceFlipImage_OFF"), Some(FaceCommand::FlipOff));
        assert_eq!(
            FaceCommand::parse("FaceFlipImage_AUTO_Left"),
            Some(FaceCommand::FlipAutoLeft)
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(FaceCommand::parse("ShowFaceOnTop"), None);
        assert_eq!(FaceCommand::parse("showfaceonright"), None);
    }

    #[test]
    fn test_escape_codes() {
        assert_eq!(EscapeCode::parse("SFR"), Some(EscapeCode::SideRight));
        assert_eq!(EscapeCode::parse("sfl"), Some(EscapeCode::SideLeft));
        assert_eq!(EscapeCode::parse("Sft"), Some(EscapeCode::SideToggle));
        assert_eq!(EscapeCode::parse("C"), None);

        assert_eq!(FaceCommand::from(EscapeCode::SideToggle), FaceCommand::ToggleSide);
        assert_eq!(FaceCommand::from(EscapeCode::SideRight), FaceCommand::ShowOnRight);
    }
}
