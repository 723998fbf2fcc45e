use std::collections::HashMap;

use enum_map::{Enum, EnumMap, enum_map};
use log::warn;
use strum::{AsRefStr, Display, EnumIter};

/// The state an actor is currently animating. Everything except `Idle`,
/// `Walk` and `Death` is a one shot animation, that returns to `Idle` after
/// it has played once
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Enum,
    EnumIter,
    AsRefStr,
    Display,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    #[default]
    Idle,
    Attack,
    Special,
    Hurt,
    Death,
    Walk,
}

impl Action {
    /// Whether this animation plays once and then falls back to idle
    #[must_use]
    pub fn is_one_shot(self) -> bool {
        matches!(self, Action::Attack | Action::Special | Action::Hurt)
    }
}

/// The amount of frames every animation of a single actor has. A value of 0
/// means the actor has no such animation
pub type AnimationSet = EnumMap<Action, u32>;

/// Anything that knows how long the animations of an actor are. The combat
/// core only ever needs the frame count, never the frames themselves
pub trait FrameCounts {
    /// The amount of frames of `action` for the actor with the animation
    /// key `key`, if there is such an animation. Keys are case insensitive
    fn frame_count(&self, key: &str, action: Action) -> Option<u32>;
}

/// Frame counts for all known actors, keyed by their lowercased name
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRegistry {
    sets: HashMap<String, AnimationSet>,
}

impl AnimationRegistry {
    /// Registers (or replaces) the animations of an actor
    pub fn insert(&mut self, name: &str, set: AnimationSet) {
        self.sets.insert(name.to_lowercase(), set);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnimationSet> {
        self.sets.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The frame counts of every character, enemy and boss on the roster
    #[must_use]
    pub fn with_defaults() -> AnimationRegistry {
        let mut res = AnimationRegistry::default();
        let defaults = [
            ("warrior", [10, 4, 5, 3, 9, 8]),
            ("rogue", [8, 4, 4, 4, 6, 8]),
            ("berserker", [10, 7, 8, 3, 7, 8]),
            ("brute", [11, 7, 7, 4, 11, 8]),
            ("huntress", [10, 6, 6, 3, 10, 8]),
            ("golem", [8, 11, 11, 4, 13, 10]),
            ("wizard", [6, 8, 8, 4, 7, 8]),
            ("bringer of death", [8, 10, 10, 3, 10, 8]),
            ("necromancer", [8, 13, 13, 5, 10, 8]),
            ("demon king", [6, 15, 15, 5, 22, 12]),
        ];
        for (name, [idle, attack, special, hurt, death, walk]) in defaults {
            res.insert(
                name,
                enum_map! {
                    Action::Idle => idle,
                    Action::Attack => attack,
                    Action::Special => special,
                    Action::Hurt => hurt,
                    Action::Death => death,
                    Action::Walk => walk,
                },
            );
        }
        res
    }
}

impl FrameCounts for AnimationRegistry {
    fn frame_count(&self, key: &str, action: Action) -> Option<u32> {
        self.get(key)
            .map(|set| set[action])
            .filter(|count| *count > 0)
    }
}

/// Looks up the frame count of an animation. If the actor has no such
/// animation, a warning is emitted and the idle animation is used instead.
/// Never returns 0, so the result can safely be used as a modulus
pub(crate) fn resolve_frame_count(
    frames: &dyn FrameCounts,
    key: &str,
    action: Action,
) -> u32 {
    if let Some(count) = frames.frame_count(key, action) {
        return count;
    }
    warn!("No {action} animation for {key}. Falling back to idle");
    frames.frame_count(key, Action::Idle).unwrap_or(1).max(1)
}
