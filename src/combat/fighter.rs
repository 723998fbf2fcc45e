use fastrand::Rng;
use log::{debug, trace};

use crate::combat::{
    Action, Colour, DisplayEvent, DisplayText, FrameCounts, Point, Rect,
    animation::resolve_frame_count,
    constants::{GROUND_Y, HIT_DELAY_FRAMES},
    damage::{roll_attack, roll_chance, roll_heal},
};

/// Damage, that has been dealt to a fighter, but is still waiting for the
/// attack animation to play before it is taken from the hp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHit {
    pub damage: u32,
    pub frames_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyKind {
    Normal,
    Boss,
}

impl EnemyKind {
    /// The (width, height) of the area, that can be clicked to target an
    /// enemy of this kind
    #[must_use]
    pub fn hitbox_size(self) -> (i32, i32) {
        match self {
            EnemyKind::Normal => (90, 130),
            EnemyKind::Boss => (150, 210),
        }
    }
}

/// Everything, that only one side of the fight has
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleData {
    Player {
        /// Chance in percent to deal double damage
        double_chance: u8,
        /// Chance in percent to find a potion after finishing off an enemy
        potion_chance: u8,
        potions: u32,
    },
    Enemy {
        kind: EnemyKind,
    },
}

#[derive(Debug, Clone)]
pub struct Fighter {
    pub name: String,
    pub strength: i32,
    /// Chance in percent to deal a critical hit
    pub crit_chance: u8,
    pub x_pos: i32,
    pub y_pos: i32,
    pub role: RoleData,

    animation_key: String,
    max_hp: u32,
    hp: u32,
    action: Action,
    pending_hit: Option<PendingHit>,

    animation_timer: u32,
    current_frame_index: u32,
    death_animation_timer: u32,
    death_animation_done: bool,
}

impl Fighter {
    fn new(
        name: &str,
        max_hp: u32,
        strength: i32,
        crit_chance: u8,
        role: RoleData,
    ) -> Fighter {
        Fighter {
            name: name.to_string(),
            max_hp,
            strength,
            crit_chance,
            x_pos: 0,
            y_pos: GROUND_Y,
            role,
            animation_key: name.to_lowercase(),
            hp: max_hp,
            action: Action::Idle,
            pending_hit: None,
            animation_timer: 0,
            current_frame_index: 0,
            death_animation_timer: 0,
            death_animation_done: false,
        }
    }

    #[must_use]
    pub fn new_player(
        name: &str,
        max_hp: u32,
        strength: i32,
        crit_chance: u8,
        double_chance: u8,
        potion_chance: u8,
        potions: u32,
    ) -> Fighter {
        let role = RoleData::Player {
            double_chance,
            potion_chance,
            potions,
        };
        Fighter::new(name, max_hp, strength, crit_chance, role)
    }

    #[must_use]
    pub fn new_enemy(
        name: &str,
        max_hp: u32,
        strength: i32,
        crit_chance: u8,
        kind: EnemyKind,
    ) -> Fighter {
        let role = RoleData::Enemy { kind };
        Fighter::new(name, max_hp, strength, crit_chance, role)
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.role, RoleData::Player { .. })
    }

    /// Dead and done playing the death animation. Nothing will ever change
    /// about this fighter anymore
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.is_alive() && self.death_animation_done
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// The key this fighter is looked up with in the animation registry
    #[must_use]
    pub fn animation_key(&self) -> &str {
        &self.animation_key
    }

    #[must_use]
    pub fn potions(&self) -> u32 {
        match self.role {
            RoleData::Player { potions, .. } => potions,
            RoleData::Enemy { .. } => 0,
        }
    }

    #[must_use]
    pub fn pending_hit(&self) -> Option<PendingHit> {
        self.pending_hit
    }

    /// The damage, that has been received, but not yet taken from the hp
    #[must_use]
    pub fn delayed_damage(&self) -> u32 {
        self.pending_hit.map_or(0, |a| a.damage)
    }

    /// The amount of frames until the delayed damage is applied
    #[must_use]
    pub fn delay_counter(&self) -> u32 {
        self.pending_hit.map_or(0, |a| a.frames_left)
    }

    /// The hp this fighter will have, once all pending damage is applied
    #[must_use]
    pub fn projected_hp(&self) -> u32 {
        self.hp.saturating_sub(self.delayed_damage())
    }

    #[must_use]
    pub fn animation_timer(&self) -> u32 {
        self.animation_timer
    }

    #[must_use]
    pub fn current_frame_index(&self) -> u32 {
        self.current_frame_index
    }

    #[must_use]
    pub fn death_animation_done(&self) -> bool {
        self.death_animation_done
    }

    pub fn set_position(&mut self, x_pos: i32, y_pos: i32) {
        self.x_pos = x_pos;
        self.y_pos = y_pos;
    }

    /// The clickable area of an enemy. Players can not be targeted
    #[must_use]
    pub fn hitbox(&self) -> Option<Rect> {
        let RoleData::Enemy { kind } = self.role else {
            return None;
        };
        let (width, height) = kind.hitbox_size();
        let center = Point::new(self.x_pos, self.y_pos - height / 2);
        Some(Rect::centered(center, width, height))
    }

    /// Rolls the damage of an attack and starts the matching animation. The
    /// damage is not dealt here, the caller has to hand it to the target via
    /// [`Fighter::take_damage`]
    pub fn attack(
        &mut self,
        rng: &mut Rng,
        events: &mut Vec<DisplayEvent>,
    ) -> u32 {
        if !self.is_alive() {
            debug!("{} is dead and can not attack", self.name);
            return 0;
        }
        let double_chance = match self.role {
            RoleData::Player { double_chance, .. } => double_chance,
            RoleData::Enemy { .. } => 0,
        };
        let roll =
            roll_attack(self.strength, self.crit_chance, double_chance, rng);

        self.action = if roll.double_hit {
            Action::Special
        } else {
            Action::Attack
        };
        self.animation_timer = 0;

        if roll.critical {
            events.push(DisplayEvent::above(
                self,
                DisplayText::Critical,
                Colour::BLUE,
                0,
            ));
        }
        debug!("{} attacks: {roll:?}", self.name);
        roll.damage
    }

    /// Registers a hit. The hp only changes after [`HIT_DELAY_FRAMES`] calls
    /// to [`Fighter::update_animation`]. A hit, that arrives while another
    /// one is still pending is added to it and restarts the delay
    pub fn take_damage(&mut self, damage: u32) {
        if !self.is_alive() {
            debug!("{} is already dead. Ignoring {damage} damage", self.name);
            return;
        }
        let hit = self.pending_hit.get_or_insert(PendingHit {
            damage: 0,
            frames_left: HIT_DELAY_FRAMES,
        });
        hit.damage += damage;
        hit.frames_left = HIT_DELAY_FRAMES;
    }

    /// Commits the pending hit to the hp and starts the hurt, or death
    /// animation
    pub fn apply_damage(&mut self, events: &mut Vec<DisplayEvent>) {
        let Some(hit) = self.pending_hit.take() else {
            return;
        };
        self.hp = self.hp.saturating_sub(hit.damage);
        self.action = if self.is_alive() {
            Action::Hurt
        } else {
            self.death_animation_timer = 0;
            Action::Death
        };
        self.animation_timer = 0;

        debug!(
            "{} takes {} damage ({}/{} hp left)",
            self.name, hit.damage, self.hp, self.max_hp
        );
        events.push(DisplayEvent::above(
            self,
            DisplayText::Damage(hit.damage),
            Colour::RED,
            0,
        ));
    }

    /// Whether drinking a potion right now would do anything
    #[must_use]
    pub fn can_heal(&self) -> bool {
        self.potions() > 0 && self.is_alive() && self.hp < self.max_hp
    }

    /// Drinks a potion and returns the amount of hp restored. Does nothing
    /// and returns `None`, if the fighter has no potions or is at full hp
    pub fn heal(&mut self, rng: &mut Rng) -> Option<u32> {
        if !self.can_heal() {
            debug!("{} can not heal right now", self.name);
            return None;
        }
        let amount = roll_heal(rng);
        self.hp = (self.hp + amount).min(self.max_hp);
        if let RoleData::Player { potions, .. } = &mut self.role {
            *potions -= 1;
        }
        debug!("{} heals for {amount} ({} hp)", self.name, self.hp);
        Some(amount)
    }

    /// Rolls for a potion drop after an enemy was finished off. Returns true,
    /// if a potion was found
    pub fn try_potion_drop(&mut self, rng: &mut Rng) -> bool {
        let RoleData::Player {
            potion_chance,
            potions,
            ..
        } = &mut self.role
        else {
            return false;
        };
        if !roll_chance(*potion_chance, rng) {
            return false;
        }
        *potions += 1;
        true
    }

    /// Advances the animation by one frame. While a hit is pending, the
    /// frame only counts down the hit delay and applies the damage once it
    /// runs out
    pub fn update_animation(
        &mut self,
        frames: &dyn FrameCounts,
        events: &mut Vec<DisplayEvent>,
    ) {
        if let Some(hit) = self.pending_hit.as_mut() {
            hit.frames_left = hit.frames_left.saturating_sub(1);
            if hit.frames_left == 0 {
                self.apply_damage(events);
            }
            return;
        }

        let frame_count =
            resolve_frame_count(frames, &self.animation_key, self.action);

        if self.action == Action::Death {
            self.update_death_animation(frame_count);
        } else {
            self.update_regular_animation(frame_count);
        }
    }

    fn update_death_animation(&mut self, frame_count: u32) {
        if self.death_animation_done {
            return;
        }
        self.death_animation_timer += 1;
        if self.death_animation_timer >= frame_count {
            trace!("{} finished dying", self.name);
            self.death_animation_done = true;
        }
    }

    fn update_regular_animation(&mut self, frame_count: u32) {
        self.animation_timer += 1;
        if self.animation_timer < frame_count {
            return;
        }
        self.animation_timer = 0;
        self.current_frame_index =
            (self.current_frame_index + 1) % frame_count;
        if self.action != Action::Walk {
            if self.action != Action::Idle {
                trace!("{} is done with {}", self.name, self.action);
            }
            self.action = Action::Idle;
        }
    }

    /// Starts walking towards `target_x`. Players walk to the right, enemies
    /// to the left. If the fighter is already there, nothing happens
    pub fn walk(&mut self, target_x: i32) {
        let needs_to_move = if self.is_player() {
            self.x_pos < target_x
        } else {
            self.x_pos > target_x
        };
        if needs_to_move {
            self.action = Action::Walk;
            self.animation_timer = 0;
        }
    }

    /// Moves a walking fighter `speed` closer to `target_x`, without ever
    /// overshooting it. Stops walking once the target has been reached
    pub fn update_walk_pos(&mut self, target_x: i32, speed: i32) {
        if self.action != Action::Walk {
            return;
        }
        let arrived = if self.is_player() {
            self.x_pos = (self.x_pos + speed).min(target_x);
            self.x_pos >= target_x
        } else {
            self.x_pos = (self.x_pos - speed).max(target_x);
            self.x_pos <= target_x
        };
        if arrived {
            self.action = Action::Idle;
            self.animation_timer = 0;
        }
    }

    /// Puts a fighter, that survived a round back into a neutral state for
    /// the next one. Hp and potions carry over
    pub fn reset_for_round(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.action = Action::Idle;
        self.animation_timer = 0;
        self.current_frame_index = 0;
    }
}
