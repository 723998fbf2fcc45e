use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use strum::{EnumCount, EnumIter};

use crate::{
    combat::{EnemyKind, Fighter},
    error::GameError,
};

/// The base values of a playable character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharacterStats {
    pub name: &'static str,
    pub max_hp: u32,
    pub strength: i32,
    pub crit_chance: u8,
    pub double_chance: u8,
    pub potion_chance: u8,
    pub potions: u32,
}

/// The base values of an enemy or boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnemyStats {
    pub name: &'static str,
    pub max_hp: u32,
    pub strength: i32,
    pub crit_chance: u8,
}

/// The characters, that can be picked on the selection screen
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, EnumIter, EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Warrior = 0,
    Rogue,
    Berserker,
    Brute,
    Huntress,
}

#[allow(clippy::enum_glob_use)]
impl CharacterKind {
    #[must_use]
    pub fn stats(self) -> CharacterStats {
        use CharacterKind::*;
        let (name, max_hp, strength, crit, double, potion_chance) = match self
        {
            Warrior => ("Warrior", 100, 20, 2, 2, 50),
            Rogue => ("Rogue", 85, 15, 10, 2, 55),
            Berserker => ("Berserker", 75, 30, 5, 10, 60),
            Brute => ("Brute", 130, 15, 2, 2, 50),
            Huntress => ("Huntress", 85, 10, 10, 25, 45),
        };
        CharacterStats {
            name,
            max_hp,
            strength,
            crit_chance: crit,
            double_chance: double,
            potion_chance,
            potions: 3,
        }
    }

    /// A fresh fighter with full hp and the starting potions
    #[must_use]
    pub fn create(self) -> Fighter {
        let s = self.stats();
        Fighter::new_player(
            s.name,
            s.max_hp,
            s.strength,
            s.crit_chance,
            s.double_chance,
            s.potion_chance,
            s.potions,
        )
    }
}

/// The normal enemies, that make up the waves before a boss
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, EnumIter, EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyType {
    Golem = 0,
    Wizard,
}

impl EnemyType {
    #[must_use]
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyType::Golem => EnemyStats {
                name: "Golem",
                max_hp: 85,
                strength: 15,
                crit_chance: 10,
            },
            EnemyType::Wizard => EnemyStats {
                name: "Wizard",
                max_hp: 75,
                strength: 30,
                crit_chance: 5,
            },
        }
    }

    #[must_use]
    pub fn create(self) -> Fighter {
        let s = self.stats();
        Fighter::new_enemy(
            s.name,
            s.max_hp,
            s.strength,
            s.crit_chance,
            EnemyKind::Normal,
        )
    }
}

/// The boss at the end of every level. The discriminant is the level - 1.
/// Only the Bringer of Death has a stat row of its own in the enemy table,
/// the later bosses are tuned to scale the fight from there
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, EnumIter, EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossType {
    Bringer = 0,
    Necromancer,
    DemonKing,
}

impl BossType {
    #[must_use]
    pub fn stats(self) -> EnemyStats {
        let (name, max_hp, strength, crit_chance) = match self {
            BossType::Bringer => ("Bringer of Death", 100, 20, 2),
            BossType::Necromancer => ("Necromancer", 180, 25, 8),
            BossType::DemonKing => ("Demon King", 220, 28, 10),
        };
        EnemyStats {
            name,
            max_hp,
            strength,
            crit_chance,
        }
    }

    #[must_use]
    pub fn create(self) -> Fighter {
        let s = self.stats();
        Fighter::new_enemy(
            s.name,
            s.max_hp,
            s.strength,
            s.crit_chance,
            EnemyKind::Boss,
        )
    }
}

/// Creates the character at `index` of the selection screen
///
/// # Errors
/// Returns `InvalidCharacter`, if there is no character with that index
pub fn create_character(index: usize) -> Result<Fighter, GameError> {
    CharacterKind::from_usize(index)
        .map(CharacterKind::create)
        .ok_or(GameError::InvalidCharacter(index))
}

/// # Errors
/// Returns `InvalidEnemy`, if there is no enemy with that index
pub fn create_enemy(index: usize) -> Result<Fighter, GameError> {
    EnemyType::from_usize(index)
        .map(EnemyType::create)
        .ok_or(GameError::InvalidEnemy(index))
}

/// # Errors
/// Returns `InvalidBoss`, if there is no boss with that index
pub fn create_boss(index: usize) -> Result<Fighter, GameError> {
    BossType::from_usize(index)
        .map(BossType::create)
        .ok_or(GameError::InvalidBoss(index))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::combat::{Action, AnimationRegistry, FrameCounts};

    #[rstest]
    #[case(0, "Warrior", 100)]
    #[case(1, "Rogue", 85)]
    #[case(2, "Berserker", 75)]
    #[case(3, "Brute", 130)]
    #[case(4, "Huntress", 85)]
    fn test_create_character(
        #[case] index: usize,
        #[case] name: &str,
        #[case] hp: u32,
    ) {
        let fighter = create_character(index).unwrap();
        assert_eq!(fighter.name, name);
        assert_eq!(fighter.hp(), hp);
        assert_eq!(fighter.potions(), 3);
        assert!(fighter.is_player());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            create_character(CharacterKind::COUNT).unwrap_err(),
            GameError::InvalidCharacter(5)
        );
        assert_eq!(
            create_enemy(EnemyType::COUNT).unwrap_err(),
            GameError::InvalidEnemy(2)
        );
        assert_eq!(create_boss(17).unwrap_err(), GameError::InvalidBoss(17));
    }

    #[rstest]
    #[case(EnemyType::Golem, 85, 15, 10)]
    #[case(EnemyType::Wizard, 75, 30, 5)]
    fn test_enemy_stats(
        #[case] kind: EnemyType,
        #[case] hp: u32,
        #[case] strength: i32,
        #[case] crit: u8,
    ) {
        let stats = kind.stats();
        assert_eq!(
            (stats.max_hp, stats.strength, stats.crit_chance),
            (hp, strength, crit)
        );
    }

    #[test]
    fn test_boss_difficulty_rises() {
        let bosses: Vec<_> = BossType::iter().map(BossType::stats).collect();
        assert_eq!(bosses[0].name, "Bringer of Death");
        assert_eq!(bosses[0].max_hp, 100);
        assert!(bosses.windows(2).all(|a| a[0].max_hp < a[1].max_hp));
    }

    #[test]
    fn test_bosses_are_bosses() {
        for index in 0..BossType::COUNT {
            let boss = create_boss(index).unwrap();
            assert!(!boss.is_player());
            assert!(matches!(
                boss.role,
                crate::combat::RoleData::Enemy {
                    kind: EnemyKind::Boss
                }
            ));
        }
        assert!(create_enemy(0).unwrap().hitbox().is_some());
    }

    #[test]
    fn test_everyone_has_animations() {
        let registry = AnimationRegistry::with_defaults();
        let fighters = CharacterKind::iter()
            .map(CharacterKind::create)
            .chain(EnemyType::iter().map(EnemyType::create))
            .chain(BossType::iter().map(BossType::create));
        for fighter in fighters {
            for action in Action::iter() {
                assert!(
                    registry
                        .frame_count(fighter.animation_key(), action)
                        .is_some(),
                    "{} is missing {action}",
                    fighter.name
                );
            }
        }
    }
}
