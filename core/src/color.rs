use serde::{Deserialize, Serialize};

/// Secret identity of a single card on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamColor {
    Red,
    Blue,
    Neutral,
    Assassin,
}

impl TeamColor {
    pub const ALL: [TeamColor; 4] = [Self::Red, Self::Blue, Self::Neutral, Self::Assassin];

    pub const fn team(self) -> Option<Team> {
        match self {
            Self::Red => Some(Team::Red),
            Self::Blue => Some(Team::Blue),
            Self::Neutral | Self::Assassin => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Neutral => "neutral",
            Self::Assassin => "assassin",
        }
    }
}

impl Default for TeamColor {
    fn default() -> Self {
        Self::Neutral
    }
}

/// One of the two guessing teams.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const fn color(self) -> TeamColor {
        match self {
            Self::Red => TeamColor::Red,
            Self::Blue => TeamColor::Blue,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}
