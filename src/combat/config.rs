use crate::combat::{
    Point, Rect,
    constants::{PANEL_HEIGHT, SCREEN_HEIGHT},
};
#[cfg(feature = "serde")]
use crate::error::GameError;

/// All the timings, that decide the pace of a battle. The defaults match a
/// game running at 60 frames per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Frames the enemies wait after the player has acted
    pub player_cooldown: u32,
    /// Frames to wait after an enemy attacked, if another turn follows
    pub enemy_cooldown: u32,
    /// Frames the player waits after the only enemy of a round attacked
    pub solo_enemy_cooldown: u32,
    /// The clickable area of the potion button
    pub potion_button: Rect,
}

impl Default for CombatConfig {
    fn default() -> Self {
        let button_center =
            Point::new(120, SCREEN_HEIGHT - PANEL_HEIGHT / 4);
        CombatConfig {
            player_cooldown: 90,
            enemy_cooldown: 90,
            solo_enemy_cooldown: 60,
            potion_button: Rect::centered(button_center, 55, 55),
        }
    }
}

#[cfg(feature = "serde")]
impl CombatConfig {
    /// Parses a config from json. Missing fields keep their default value
    ///
    /// # Errors
    /// Returns `InvalidConfig`, if the json is malformed
    pub fn from_json(json: &str) -> Result<CombatConfig, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}
