use fastrand::Rng;
use log::{debug, info};
use strum::EnumCount;

use crate::{
    combat::{
        Action, Battle, CombatConfig, DisplayEvent, EnemyKind, EnemyType,
        Fighter, FrameCounts, FrameInput, Outcome, Point, RoleData,
        constants::{GROUND_Y, SCREEN_WIDTH},
        create_boss, create_character, create_enemy,
    },
    error::GameError,
};

/// The amount of levels, that have to be cleared to win
pub const LEVEL_COUNT: u32 = 3;

pub const PLAYER_TARGET_X: i32 = 100;
pub const PLAYER_WALK_SPEED: i32 = 5;

/// Enemies start just off screen and walk left to their slot
pub const ENEMY_START_X: i32 = SCREEN_WIDTH + 10;
pub const ENEMY_TARGET_X: i32 = 700;
/// The distance between the two enemy slots
pub const ENEMY_SPACING: i32 = 130;
pub const ENEMY_WALK_SPEED: i32 = 20;
/// Bosses are larger and stand closer to the player
pub const BOSS_TARGET_X: i32 = 540;

/// Below this hp ratio (in percent) the autopilot prefers healing
const AUTOPILOT_HEAL_BELOW: u32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CampaignState {
    #[default]
    InProgress,
    /// The boss of the last level has been defeated
    Won,
    /// The player has died
    Lost,
}

/// A full run through all levels with one character. Hp and potions carry
/// over from one round to the next.
///
/// A round consists of a walk-in, where everyone moves to their position,
/// followed by the actual battle. Both are driven through [`Campaign::tick`]
#[derive(Debug, Clone)]
pub struct Campaign {
    /// The player between rounds. While a round is fought, the battle owns
    /// the player
    player: Option<Fighter>,
    battle: Option<Battle>,
    level: u32,
    round: u32,
    /// Enemies left in this level, boss included. `None` until the first
    /// round of a level decides the budget
    remaining: Option<u32>,
    config: CombatConfig,
    rng: Rng,
    state: CampaignState,
}

impl Campaign {
    /// Starts a campaign with the character at `character_index` of the
    /// selection screen
    ///
    /// # Errors
    /// Returns `InvalidCharacter`, if the index does not name a character
    pub fn new(
        character_index: usize,
        seed: u64,
    ) -> Result<Campaign, GameError> {
        Campaign::with_config(character_index, CombatConfig::default(), seed)
    }

    /// # Errors
    /// Returns `InvalidCharacter`, if the index does not name a character
    pub fn with_config(
        character_index: usize,
        config: CombatConfig,
        seed: u64,
    ) -> Result<Campaign, GameError> {
        let player = create_character(character_index)?;
        info!("Starting a campaign as {}", player.name);
        Ok(Campaign {
            player: Some(player),
            battle: None,
            level: 1,
            round: 1,
            remaining: None,
            config,
            rng: Rng::with_seed(seed),
            state: CampaignState::InProgress,
        })
    }

    #[must_use]
    pub fn state(&self) -> CampaignState {
        self.state
    }

    /// The current level, starting at 1
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The current round. Rounds are counted across all levels
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The enemies still to be fought in this level, if the level has
    /// already started
    #[must_use]
    pub fn remaining_enemies(&self) -> Option<u32> {
        self.remaining
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// The player, regardless of whether a round is being fought
    #[must_use]
    pub fn player(&self) -> Option<&Fighter> {
        match &self.battle {
            Some(battle) => Some(battle.player()),
            None => self.player.as_ref(),
        }
    }

    #[must_use]
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn battle_mut(&mut self) -> Option<&mut Battle> {
        self.battle.as_mut()
    }

    /// Spawns the enemies of the next round and lets everyone walk in.
    ///
    /// The first round of a level fixes the amount of enemies in that
    /// level to the current round number. Every round takes one or two of
    /// them, until only the boss is left
    ///
    /// # Errors
    /// Returns `CampaignOver`, if the campaign has been decided, or
    /// `RoundInProgress`, if the previous round has not been finished
    pub fn start_round(&mut self) -> Result<&mut Battle, GameError> {
        if self.state != CampaignState::InProgress {
            return Err(GameError::CampaignOver);
        }
        if self.battle.is_some() || self.player.is_none() {
            return Err(GameError::RoundInProgress);
        }

        let remaining = *self.remaining.get_or_insert(self.round);
        let mut enemies = if remaining <= 1 {
            self.remaining = Some(0);
            let index = usize::try_from(self.level - 1)
                .map_err(|_| GameError::InvalidBoss(usize::MAX))?;
            vec![create_boss(index)?]
        } else {
            let count = self.rng.u32(1..=2).min(remaining - 1);
            self.remaining = Some(remaining - count);
            (0..count)
                .map(|_| create_enemy(self.rng.usize(0..EnemyType::COUNT)))
                .collect::<Result<Vec<_>, _>>()?
        };
        let Some(mut player) = self.player.take() else {
            return Err(GameError::RoundInProgress);
        };

        info!(
            "Level {} round {}: {} faces {}",
            self.level,
            self.round,
            player.name,
            enemies
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(" & ")
        );

        player.set_position(0, GROUND_Y);
        player.walk(PLAYER_TARGET_X);
        let mut slot_x = ENEMY_TARGET_X;
        for enemy in &mut enemies {
            let target = if is_boss(enemy) { BOSS_TARGET_X } else { slot_x };
            let start_x = target + ENEMY_START_X - ENEMY_TARGET_X;
            enemy.set_position(start_x, GROUND_Y);
            enemy.walk(target);
            slot_x -= ENEMY_SPACING;
        }

        let seed = self.rng.u64(..);
        let battle = Battle::new(player, enemies, self.config, seed)?;
        Ok(self.battle.insert(battle))
    }

    /// Whether anyone in the current round is still walking to their
    /// position
    #[must_use]
    pub fn is_walking_in(&self) -> bool {
        self.battle.as_ref().is_some_and(|battle| {
            battle.player().action() == Action::Walk
                || battle.enemies().iter().any(|a| a.action() == Action::Walk)
        })
    }

    /// Simulates one frame of the current round. Input is ignored, until
    /// everyone has walked in
    ///
    /// # Errors
    /// Returns `NoRoundInProgress`, if no round has been started
    pub fn tick(
        &mut self,
        input: &FrameInput,
        frames: &dyn FrameCounts,
    ) -> Result<Vec<DisplayEvent>, GameError> {
        let walking = self.is_walking_in();
        let battle =
            self.battle.as_mut().ok_or(GameError::NoRoundInProgress)?;
        if !walking {
            return Ok(battle.tick(input, frames));
        }

        let mut events = Vec::new();
        let player = battle.player_mut();
        player.update_walk_pos(PLAYER_TARGET_X, PLAYER_WALK_SPEED);
        player.update_animation(frames, &mut events);

        let mut slot_x = ENEMY_TARGET_X;
        for enemy in battle.enemies_mut() {
            let target = if is_boss(enemy) { BOSS_TARGET_X } else { slot_x };
            enemy.update_walk_pos(target, ENEMY_WALK_SPEED);
            enemy.update_animation(frames, &mut events);
            slot_x -= ENEMY_SPACING;
        }
        Ok(events)
    }

    /// Ends the current round and advances the campaign. Surviving fighters
    /// go back to idle, while hp and potions stay as they are
    ///
    /// # Errors
    /// Returns `NoRoundInProgress`, if there is no round, or
    /// `RoundInProgress`, if the round has not been decided yet
    pub fn finish_round(&mut self) -> Result<CampaignState, GameError> {
        let battle =
            self.battle.as_ref().ok_or(GameError::NoRoundInProgress)?;
        let outcome = battle.outcome().ok_or(GameError::RoundInProgress)?;
        let mut player = self
            .battle
            .take()
            .map(Battle::into_player)
            .ok_or(GameError::NoRoundInProgress)?;

        match outcome {
            Outcome::Defeat => {
                info!("{} has fallen in round {}", player.name, self.round);
                self.state = CampaignState::Lost;
            }
            Outcome::Victory => {
                player.reset_for_round();
                debug!(
                    "{} won round {} with {} hp and {} potions",
                    player.name,
                    self.round,
                    player.hp(),
                    player.potions()
                );
                self.round += 1;
                if self.remaining == Some(0) {
                    info!("Level {} cleared", self.level);
                    self.remaining = None;
                    if self.level >= LEVEL_COUNT {
                        info!("{} has won the campaign", player.name);
                        self.state = CampaignState::Won;
                    } else {
                        self.level += 1;
                    }
                }
            }
        }
        self.player = Some(player);
        Ok(self.state)
    }

    /// Plays the next round with [`autopilot`] as the input source
    ///
    /// # Errors
    /// Returns anything [`Campaign::start_round`] returns and
    /// `RoundInProgress`, if the round was not decided within `max_frames`
    pub fn autoplay_round(
        &mut self,
        frames: &dyn FrameCounts,
        max_frames: u64,
    ) -> Result<CampaignState, GameError> {
        self.start_round()?;
        for _ in 0..max_frames {
            let input = match &self.battle {
                Some(battle) if battle.outcome().is_none() => {
                    autopilot(battle)
                }
                _ => break,
            };
            self.tick(&input, frames)?;
        }
        self.finish_round()
    }
}

fn is_boss(fighter: &Fighter) -> bool {
    matches!(
        fighter.role,
        RoleData::Enemy {
            kind: EnemyKind::Boss
        }
    )
}

/// A simple input source for headless play. Drinks a potion when low on hp
/// and otherwise clicks the first enemy still standing
#[must_use]
pub fn autopilot(battle: &Battle) -> FrameInput {
    let player = battle.player();
    if player.can_heal()
        && player.hp() * 100 < player.max_hp() * AUTOPILOT_HEAL_BELOW
    {
        let button = battle.config().potion_button;
        return FrameInput::click(Point::new(
            button.x + button.width / 2,
            button.y + button.height / 2,
        ));
    }
    battle
        .enemies()
        .iter()
        .filter(|a| a.projected_hp() > 0)
        .find_map(Fighter::hitbox)
        .map_or_else(FrameInput::idle, |hitbox| {
            FrameInput::click(Point::new(
                hitbox.x + hitbox.width / 2,
                hitbox.y + hitbox.height / 2,
            ))
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::combat::{AnimationRegistry, FrameCounts};

    fn walk_in(campaign: &mut Campaign, registry: &dyn FrameCounts) -> u32 {
        let mut frames = 0;
        while campaign.is_walking_in() {
            campaign.tick(&FrameInput::idle(), registry).unwrap();
            frames += 1;
            assert!(frames < 1000, "walk-in never finished");
        }
        frames
    }

    /// Kills every enemy of the next round and plays out the animations
    fn win_round(
        campaign: &mut Campaign,
        registry: &dyn FrameCounts,
    ) -> CampaignState {
        let battle = campaign.start_round().unwrap();
        for enemy in battle.enemies_mut() {
            enemy.take_damage(10_000);
        }
        for _ in 0..1000 {
            if campaign.battle().unwrap().outcome().is_some() {
                break;
            }
            campaign.tick(&FrameInput::idle(), registry).unwrap();
        }
        campaign.finish_round().unwrap()
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            Campaign::new(9, 1).unwrap_err(),
            GameError::InvalidCharacter(9)
        );
    }

    #[test]
    fn test_first_level_is_only_the_boss() {
        let mut campaign = Campaign::new(0, 1).unwrap();
        let battle = campaign.start_round().unwrap();
        assert_eq!(battle.enemies().len(), 1);
        assert_eq!(battle.enemies()[0].name, "Bringer of Death");
        assert!(is_boss(&battle.enemies()[0]));
        assert_eq!(campaign.remaining_enemies(), Some(0));
    }

    #[test]
    fn test_round_bookkeeping_errors() {
        let mut campaign = Campaign::new(1, 2).unwrap();
        assert_eq!(
            campaign.finish_round().unwrap_err(),
            GameError::NoRoundInProgress
        );
        assert_eq!(
            campaign.tick(&FrameInput::idle(), &AnimationRegistry::default()),
            Err(GameError::NoRoundInProgress)
        );
        campaign.start_round().unwrap();
        assert_eq!(
            campaign.start_round().unwrap_err(),
            GameError::RoundInProgress
        );
        assert_eq!(
            campaign.finish_round().unwrap_err(),
            GameError::RoundInProgress
        );
        // The failed finish must not lose the round
        assert!(campaign.battle().is_some());
    }

    #[test]
    fn test_walk_in() {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(0, 3).unwrap();
        campaign.start_round().unwrap();
        assert!(campaign.is_walking_in());
        assert_eq!(campaign.player().unwrap().x_pos, 0);

        // Clicks during the walk-in are ignored
        let boss = &campaign.battle().unwrap().enemies()[0];
        let hitbox = boss.hitbox().unwrap();
        let click = FrameInput::click(Point::new(
            hitbox.x + hitbox.width / 2,
            hitbox.y + hitbox.height / 2,
        ));
        campaign.tick(&click, &registry).unwrap();
        assert_eq!(campaign.player().unwrap().action(), Action::Walk);
        assert_eq!(campaign.battle().unwrap().frame(), 0);

        let frames = walk_in(&mut campaign, &registry);
        assert_eq!(frames + 1, 20);
        let battle = campaign.battle().unwrap();
        assert_eq!(battle.player().x_pos, PLAYER_TARGET_X);
        assert_eq!(battle.player().action(), Action::Idle);
        assert_eq!(battle.enemies()[0].x_pos, BOSS_TARGET_X);
        assert_eq!(battle.enemies()[0].action(), Action::Idle);
    }

    #[test]
    fn test_victory_advances_the_level() {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(3, 4).unwrap();
        campaign.start_round().unwrap();
        walk_in(&mut campaign, &registry);
        campaign
            .battle_mut()
            .unwrap()
            .player_mut()
            .take_damage(40);
        campaign.battle_mut().unwrap().enemies_mut()[0].take_damage(10_000);
        for _ in 0..200 {
            campaign.tick(&FrameInput::idle(), &registry).unwrap();
        }

        assert_eq!(campaign.finish_round(), Ok(CampaignState::InProgress));
        assert_eq!(campaign.level(), 2);
        assert_eq!(campaign.round(), 2);
        let player = campaign.player().unwrap();
        assert_eq!(player.hp(), 90);
        assert_eq!(player.potions(), 3);
        assert_eq!(player.action(), Action::Idle);
    }

    #[test]
    fn test_normal_enemies_before_the_boss() {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(0, 5).unwrap();
        win_round(&mut campaign, &registry);

        // Round 2 allows two enemies in level 2, one of them is the boss
        let battle = campaign.start_round().unwrap();
        assert_eq!(battle.enemies().len(), 1);
        assert!(!is_boss(&battle.enemies()[0]));
        assert_eq!(battle.enemies()[0].x_pos, ENEMY_START_X);
        assert_eq!(campaign.remaining_enemies(), Some(1));
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(42)]
    fn test_campaign_can_be_won(#[case] seed: u64) {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(2, seed).unwrap();
        let mut bosses = Vec::new();
        for _ in 0..20 {
            let state = win_round(&mut campaign, &registry);
            if campaign.remaining_enemies().is_none() {
                bosses.push(campaign.round() - 1);
            }
            if state == CampaignState::Won {
                break;
            }
        }
        assert_eq!(campaign.state(), CampaignState::Won);
        assert_eq!(campaign.level(), LEVEL_COUNT);
        assert_eq!(bosses.len(), 3);
        assert_eq!(bosses[0], 1);
        assert_eq!(bosses[1], 3);
        assert_eq!(
            campaign.start_round().unwrap_err(),
            GameError::CampaignOver
        );
    }

    #[test]
    fn test_defeat_ends_the_campaign() {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(4, 6).unwrap();
        campaign.start_round().unwrap();
        campaign
            .battle_mut()
            .unwrap()
            .player_mut()
            .take_damage(10_000);
        for _ in 0..200 {
            campaign.tick(&FrameInput::idle(), &registry).unwrap();
        }
        assert_eq!(campaign.finish_round(), Ok(CampaignState::Lost));
        assert!(!campaign.player().unwrap().is_alive());
        assert_eq!(
            campaign.start_round().unwrap_err(),
            GameError::CampaignOver
        );
    }

    #[test]
    fn test_autopilot_targets_the_living() {
        let mut campaign = Campaign::new(0, 8).unwrap();
        let battle = campaign.start_round().unwrap();
        let input = autopilot(battle);
        assert!(input.clicked);
        assert_eq!(battle.enemy_at(&input), Some(0));

        battle.enemies_mut()[0].take_damage(10_000);
        battle.enemies_mut()[0].apply_damage(&mut Vec::new());
        assert_eq!(autopilot(battle), FrameInput::idle());
    }

    #[test]
    fn test_autopilot_heals_when_low() {
        let mut campaign = Campaign::new(0, 9).unwrap();
        let battle = campaign.start_round().unwrap();
        battle.player_mut().take_damage(80);
        battle.player_mut().apply_damage(&mut Vec::new());
        let input = autopilot(battle);
        assert!(battle.config().potion_button.contains(input.cursor));
    }

    #[test]
    fn test_autoplay_round() {
        let registry = AnimationRegistry::with_defaults();
        let mut campaign = Campaign::new(3, 10).unwrap();
        let state = campaign.autoplay_round(&registry, 50_000).unwrap();
        assert_ne!(state, CampaignState::Won);
        assert!(campaign.battle().is_none());
        let player = campaign.player().unwrap();
        assert_eq!(state == CampaignState::Lost, !player.is_alive());
    }
}
