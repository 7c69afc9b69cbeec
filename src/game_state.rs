//! Game values read by HUD windows
//!
//! Party gold, numbered game variables and title-screen progress. Windows only
//! read from here; the demo loop and event script write.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GameValues {
    gold: u32,
    variables: HashMap<u32, i32>,
    highest_title_progress: u32,
}

impl GameValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn gain_gold(&mut self, amount: i64) {
        self.gold = (self.gold as i64 + amount).clamp(0, u32::MAX as i64) as u32;
    }

    /// Unset variables read as 0
    pub fn variable(&self, id: u32) -> i32 {
        self.variables.get(&id).copied().unwrap_or(0)
    }

    pub fn set_variable(&mut self, id: u32, value: i32) {
        self.variables.insert(id, value);
    }

    pub fn add_to_variable(&mut self, id: u32, delta: i32) {
        let value = self.variable(id).saturating_add(delta);
        self.set_variable(id, value);
    }

    /// Map id of the furthest point reached (0 = none)
    pub fn highest_title_progress(&self) -> u32 {
        self.highest_title_progress
    }

    /// Records progress; lower values never replace a higher one
    pub fn record_title_progress(&mut self, map_id: u32) {
        self.highest_title_progress = self.highest_title_progress.max(map_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_clamps() {
        let mut values = GameValues::new();
        values.gain_gold(150);
        assert_eq!(values.gold(), 150);
        values.gain_gold(-500);
        assert_eq!(values.gold(), 0);
    }

    #[test]
    fn test_variables_default_to_zero() {
        let mut values = GameValues::new();
        assert_eq!(values.variable(7), 0);
        values.add_to_variable(7, 3);
        values.add_to_variable(7, 2);
        assert_eq!(values.variable(7), 5);
        values.set_variable(7, -1);
        assert_eq!(values.variable(7), -1);
    }

    #[test]
    fn test_title_progress_only_increases() {
        let mut values = GameValues::new();
        values.record_title_progress(4);
        values.record_title_progress(2);
        assert_eq!(values.highest_title_progress(), 4);
    }
}
