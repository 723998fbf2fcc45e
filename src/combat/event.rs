use std::fmt::Display;

use crate::combat::{Fighter, constants::TEXT_OFFSET};

/// An RGB colour for floating text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colour(pub u8, pub u8, pub u8);

impl Colour {
    pub const RED: Colour = Colour(255, 0, 0);
    pub const GREEN: Colour = Colour(0, 255, 0);
    pub const BLUE: Colour = Colour(0, 0, 255);
    pub const GOLD: Colour = Colour(255, 215, 0);
}

/// What a piece of floating text says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayText {
    /// Damage that has just been subtracted from someones hp
    Damage(u32),
    /// The amount of hp a potion has restored
    Heal(u32),
    Critical,
    PotionPickup,
}

impl Display for DisplayText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayText::Damage(amount) | DisplayText::Heal(amount) => {
                write!(f, "{amount}")
            }
            DisplayText::Critical => f.write_str("Critical hit!"),
            DisplayText::PotionPickup => f.write_str("+1 Potion"),
        }
    }
}

/// A request for the presentation layer to show some text above an actor.
/// The combat core never renders anything itself. It only collects these
/// and hands them out after every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayEvent {
    pub x: i32,
    pub y: i32,
    pub text: DisplayText,
    pub colour: Colour,
    /// The amount of frames the text should stay hidden before it appears
    pub delay: u32,
}

impl DisplayEvent {
    /// Creates an event, that shows the text right above the given actor
    #[must_use]
    pub fn above(
        actor: &Fighter,
        text: DisplayText,
        colour: Colour,
        delay: u32,
    ) -> DisplayEvent {
        DisplayEvent {
            x: actor.x_pos,
            y: actor.y_pos - TEXT_OFFSET,
            text,
            colour,
            delay,
        }
    }
}
