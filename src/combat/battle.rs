use fastrand::Rng;
use log::{debug, info};

use crate::{
    combat::{
        Colour, CombatConfig, DisplayEvent, DisplayText, Fighter, FrameCounts,
        FrameInput, Turn, TurnScheduler,
        constants::{HIT_DELAY_FRAMES, MAX_ENEMIES},
    },
    error::GameError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Every enemy is dead and has finished dying
    Victory,
    /// The player is dead and has finished dying
    Defeat,
}

/// A single round of combat between the player and one or two enemies
#[derive(Debug, Clone)]
pub struct Battle {
    player: Fighter,
    enemies: Vec<Fighter>,
    scheduler: TurnScheduler,
    config: CombatConfig,
    frame: u64,
    rng: Rng,
}

impl Battle {
    /// Starts a battle. The player gets the first turn and may act
    /// immediately
    ///
    /// # Errors
    /// Returns `NoEnemies` or `TooManyEnemies`, if the amount of enemies can
    /// not be scheduled and `WrongSide`, if a fighter is on the wrong side
    pub fn new(
        player: Fighter,
        enemies: Vec<Fighter>,
        config: CombatConfig,
        seed: u64,
    ) -> Result<Battle, GameError> {
        if enemies.is_empty() {
            return Err(GameError::NoEnemies);
        }
        if enemies.len() > MAX_ENEMIES {
            return Err(GameError::TooManyEnemies(enemies.len()));
        }
        if !player.is_player() {
            return Err(GameError::WrongSide(player.name));
        }
        if let Some(enemy) = enemies.iter().find(|a| a.is_player()) {
            return Err(GameError::WrongSide(enemy.name.clone()));
        }
        Ok(Battle {
            player,
            enemies,
            scheduler: TurnScheduler::new(),
            config,
            frame: 0,
            rng: Rng::with_seed(seed),
        })
    }

    #[must_use]
    pub fn player(&self) -> &Fighter {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Fighter {
        &mut self.player
    }

    #[must_use]
    pub fn enemies(&self) -> &[Fighter] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Fighter] {
        &mut self.enemies
    }

    #[must_use]
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// The amount of frames simulated so far
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether hp alone already decides the battle. No more turns are taken
    /// after this point, only the remaining animations play out
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !self.player.is_alive() || self.enemies.iter().all(|a| !a.is_alive())
    }

    /// The result of the battle, once the losing side has finished its death
    /// animation
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if self.player.is_finished() {
            return Some(Outcome::Defeat);
        }
        if self.enemies.iter().all(Fighter::is_finished) {
            return Some(Outcome::Victory);
        }
        None
    }

    /// Ends the battle and hands the player back to the caller
    #[must_use]
    pub fn into_player(self) -> Fighter {
        self.player
    }

    /// Simulates one frame. The turn (if any) is resolved first, then every
    /// fighter advances its animation. Returns all text, that should be
    /// displayed because of this frame
    pub fn tick(
        &mut self,
        input: &FrameInput,
        frames: &dyn FrameCounts,
    ) -> Vec<DisplayEvent> {
        let mut events = Vec::new();
        self.frame += 1;

        if !self.is_decided()
            && self.scheduler.tick()
            && self.execute_turn(input, &mut events)
        {
            self.scheduler.end_turn(self.enemies.len(), &self.config);
        }

        self.player.update_animation(frames, &mut events);
        for enemy in &mut self.enemies {
            enemy.update_animation(frames, &mut events);
        }
        events
    }

    /// Takes the turn of whoever is up. Returns true, if the turn has been
    /// completed
    fn execute_turn(
        &mut self,
        input: &FrameInput,
        events: &mut Vec<DisplayEvent>,
    ) -> bool {
        match self.scheduler.current() {
            Turn::Player => self.player_turn(input, events),
            Turn::Enemy(slot) => {
                self.enemy_turn(slot, events);
                true
            }
        }
    }

    /// The index of the enemy under the cursor, if any. Enemies, that are
    /// already doomed by a pending hit can not be targeted anymore
    #[must_use]
    pub fn enemy_at(&self, input: &FrameInput) -> Option<usize> {
        self.enemies.iter().position(|enemy| {
            enemy.projected_hp() > 0
                && enemy.hitbox().is_some_and(|a| a.contains(input.cursor))
        })
    }

    fn player_turn(
        &mut self,
        input: &FrameInput,
        events: &mut Vec<DisplayEvent>,
    ) -> bool {
        if !input.clicked {
            return false;
        }

        if let Some(target) = self.enemy_at(input) {
            self.player_attack(target, events);
            return true;
        }

        if !self.config.potion_button.contains(input.cursor) {
            return false;
        }
        let Some(amount) = self.player.heal(&mut self.rng) else {
            return false;
        };
        events.push(DisplayEvent::above(
            &self.player,
            DisplayText::Heal(amount),
            Colour::GREEN,
            0,
        ));
        true
    }

    fn player_attack(
        &mut self,
        target: usize,
        events: &mut Vec<DisplayEvent>,
    ) {
        let Some(enemy) = self.enemies.get_mut(target) else {
            return;
        };
        let was_standing = enemy.projected_hp() > 0;
        let damage = self.player.attack(&mut self.rng, events);
        enemy.take_damage(damage);

        // The hit lands later, but whether it finishes the enemy is already
        // known. Only the blow, that finishes it can find a potion
        if was_standing
            && enemy.projected_hp() == 0
            && self.player.try_potion_drop(&mut self.rng)
        {
            info!("{} found a potion", self.player.name);
            events.push(DisplayEvent::above(
                &self.player,
                DisplayText::PotionPickup,
                Colour::GOLD,
                HIT_DELAY_FRAMES,
            ));
        }
    }

    fn enemy_turn(&mut self, slot: usize, events: &mut Vec<DisplayEvent>) {
        let Some(enemy) = self.enemies.get_mut(slot) else {
            return;
        };
        if !enemy.is_alive() {
            debug!("{} is dead and skips its turn", enemy.name);
            return;
        }
        let damage = enemy.attack(&mut self.rng, events);
        self.player.take_damage(damage);
    }
}
