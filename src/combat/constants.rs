//! Fixed rules of the combat model. Tunable timings live in
//! [`CombatConfig`](crate::combat::CombatConfig) instead

/// The amount of frames between a hit being registered and the hp actually
/// changing, so that the attack animation can play first
pub const HIT_DELAY_FRAMES: u32 = 10;

/// The maximum amount an attack or heal may deviate from its base value in
/// either direction
pub const ROLL_VARIANCE: i32 = 5;

/// The base amount of hp a single potion restores
pub const HEAL_BASE: i32 = 30;

/// Damage multiplier applied on a critical hit
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Damage multiplier applied when a double hit lands
pub const DOUBLE_HIT_MULTIPLIER: f64 = 2.0;

/// How far above an actor floating text is spawned
pub const TEXT_OFFSET: i32 = 60;

/// The amount of enemies a single battle can schedule turns for
pub const MAX_ENEMIES: usize = 2;

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 550;
pub const PANEL_HEIGHT: i32 = 150;

/// The y position the feet of every actor stand on
pub const GROUND_Y: i32 = SCREEN_HEIGHT - PANEL_HEIGHT - 20;
