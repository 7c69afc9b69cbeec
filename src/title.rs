//! Title screen background selection
//!
//! The title screen shows a map behind its menu. Once the player has made
//! progress, the furthest map reached replaces the configured one.

/// Map to load behind the title screen
pub fn background_map_id(highest_progress: u32, configured_map_id: u32) -> u32 {
    if highest_progress > 0 {
        highest_progress
    } else {
        configured_map_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_uses_configured_map() {
        assert_eq!(background_map_id(0, 1), 1);
        assert_eq!(background_map_id(0, 12), 12);
    }

    #[test]
    fn test_progress_overrides_configured_map() {
        assert_eq!(background_map_id(5, 1), 5);
    }
}
