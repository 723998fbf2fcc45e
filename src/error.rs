use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The character selection index does not name a playable character.
    /// The value is the index, that was requested
    #[error("Invalid character index: {0}")]
    InvalidCharacter(usize),
    /// There is no normal enemy with this index
    #[error("Invalid enemy index: {0}")]
    InvalidEnemy(usize),
    /// There is no boss with this index. Bosses are indexed by level - 1
    #[error("Invalid boss index: {0}")]
    InvalidBoss(usize),
    /// A battle can only schedule turns for up to two enemies at a time
    #[error("A battle supports at most 2 enemies, but {0} were given")]
    TooManyEnemies(usize),
    /// A battle without anyone to fight can never end
    #[error("A battle needs at least one enemy")]
    NoEnemies,
    /// The player was given as an enemy, or an enemy as the player. The
    /// value is the name of the misplaced fighter
    #[error("{0} can not fight on this side")]
    WrongSide(String),
    /// The campaign has already been won or lost, so there is no next round
    #[error("The campaign is already over")]
    CampaignOver,
    /// A new round was requested, while the current one is still fought
    #[error("The current round has not been finished yet")]
    RoundInProgress,
    /// There is no round, that could be finished
    #[error("There is no round in progress")]
    NoRoundInProgress,
    /// The provided configuration could not be parsed
    #[cfg(feature = "serde")]
    #[error("Invalid combat configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GameError {
    fn from(value: serde_json::Error) -> Self {
        GameError::InvalidConfig(value.to_string())
    }
}
