use log::debug;

use crate::combat::CombatConfig;

/// Whose turn it is. Enemies are identified by their slot in the battle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    #[default]
    Player,
    Enemy(usize),
}

/// Decides whose turn it is and when that turn may be taken. Every turn is
/// followed by a cooldown, so that only one action resolves per cooldown
/// window and the animations have time to play out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TurnScheduler {
    current: Turn,
    action_cooldown: u32,
}

impl TurnScheduler {
    /// A scheduler, where the player may act immediately
    #[must_use]
    pub fn new() -> TurnScheduler {
        TurnScheduler::default()
    }

    /// A scheduler, where `turn` may act after `cooldown` frames
    #[must_use]
    pub fn starting_with(turn: Turn, cooldown: u32) -> TurnScheduler {
        TurnScheduler {
            current: turn,
            action_cooldown: cooldown,
        }
    }

    #[must_use]
    pub fn current(&self) -> Turn {
        self.current
    }

    /// The amount of frames until the current turn may act
    #[must_use]
    pub fn action_cooldown(&self) -> u32 {
        self.action_cooldown
    }

    /// Counts the cooldown down by one frame. Returns true, if the current
    /// turn may be taken in this frame. If the turn is not completed, this
    /// will keep returning true every frame
    pub fn tick(&mut self) -> bool {
        self.action_cooldown = self.action_cooldown.saturating_sub(1);
        self.action_cooldown == 0
    }

    /// Hands the turn to the next fighter after the current one has acted.
    /// `enemy_count` is the amount of enemy slots in the battle, dead or
    /// alive
    pub fn end_turn(&mut self, enemy_count: usize, config: &CombatConfig) {
        let (next, cooldown) = match self.current {
            Turn::Player => (Turn::Enemy(0), config.player_cooldown),
            Turn::Enemy(0) if enemy_count > 1 => {
                (Turn::Enemy(1), config.enemy_cooldown)
            }
            Turn::Enemy(0) => (Turn::Player, config.solo_enemy_cooldown),
            Turn::Enemy(_) => (Turn::Player, config.enemy_cooldown),
        };
        debug!(
            "Turn passes from {:?} to {next:?} in {cooldown} frames",
            self.current
        );
        self.current = next;
        self.action_cooldown = cooldown;
    }
}
