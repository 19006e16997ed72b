use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    RedWins,
    BlueWins,
    AssassinHit,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub const fn winner(self) -> Option<Team> {
        match self {
            Self::RedWins => Some(Team::Red),
            Self::BlueWins => Some(Team::Blue),
            Self::Ongoing | Self::AssassinHit => None,
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ongoing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed(TeamColor),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed(_) => true,
        }
    }
}

/// Which cards of a round have been turned over, and what that means for the score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRevealState")]
pub struct RevealState {
    assignment: BoardAssignment,
    revealed: Array2<bool>,
    remaining_red: CellCount,
    remaining_blue: CellCount,
    status: GameStatus,
}

/// Wire form of [`RevealState`], replayed against its assignment on the way in.
#[derive(Deserialize)]
struct UncheckedRevealState {
    assignment: BoardAssignment,
    revealed: Array2<bool>,
    remaining_red: CellCount,
    remaining_blue: CellCount,
    status: GameStatus,
}

impl TryFrom<UncheckedRevealState> for RevealState {
    type Error = GameError;

    fn try_from(unchecked: UncheckedRevealState) -> Result<Self> {
        let size = usize::from(unchecked.assignment.size());
        if unchecked.revealed.dim() != (size, size) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut state = Self::new(unchecked.assignment);
        state.revealed = unchecked.revealed;
        let hidden = |state: &Self, color| {
            state
                .assignment
                .iter()
                .filter(|&(coords, c)| c == color && !state.is_revealed(coords))
                .count()
        };
        let red_left = hidden(&state, TeamColor::Red);
        let blue_left = hidden(&state, TeamColor::Blue);
        let assassin_found = hidden(&state, TeamColor::Assassin)
            < usize::from(state.assignment.count(TeamColor::Assassin));

        let status_fits = match unchecked.status {
            GameStatus::Ongoing => red_left > 0 && blue_left > 0 && !assassin_found,
            GameStatus::RedWins => red_left == 0,
            GameStatus::BlueWins => blue_left == 0,
            GameStatus::AssassinHit => assassin_found,
        };
        if usize::from(unchecked.remaining_red) != red_left
            || usize::from(unchecked.remaining_blue) != blue_left
            || !status_fits
        {
            return Err(GameError::InvalidColorCounts);
        }

        state.remaining_red = unchecked.remaining_red;
        state.remaining_blue = unchecked.remaining_blue;
        state.status = unchecked.status;
        Ok(state)
    }
}

impl RevealState {
    pub fn new(assignment: BoardAssignment) -> Self {
        let size = usize::from(assignment.size());
        Self {
            remaining_red: assignment.count(TeamColor::Red),
            remaining_blue: assignment.count(TeamColor::Blue),
            revealed: Array2::default((size, size)),
            status: Default::default(),
            assignment,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn remaining_red(&self) -> CellCount {
        self.remaining_red
    }

    pub fn remaining_blue(&self) -> CellCount {
        self.remaining_blue
    }

    pub fn remaining(&self, team: Team) -> CellCount {
        match team {
            Team::Red => self.remaining_red,
            Team::Blue => self.remaining_blue,
        }
    }

    pub fn assignment(&self) -> &BoardAssignment {
        &self.assignment
    }

    pub fn size(&self) -> Coord {
        self.assignment.size()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    /// Color of the cell if it has been turned over.
    pub fn visible_color(&self, coords: Coord2) -> Option<TeamColor> {
        self.is_revealed(coords).then(|| self.assignment.color_at(coords))
    }

    pub fn revealed_count(&self) -> CellCount {
        // bounded by the cell count, which fits a `CellCount`
        self.revealed.iter().filter(|&&r| r).count() as CellCount
    }

    /// Turns over the card at `coords`.
    ///
    /// Cards keep flipping after the game ended so the board always shows what was picked, but the first result
    /// sticks.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.assignment.validate_coords(coords)?;

        if self.is_revealed(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        let color = self.assignment.color_at(coords);
        match color {
            TeamColor::Assassin => self.end_game(GameStatus::AssassinHit),
            TeamColor::Red => {
                self.remaining_red = self.remaining_red.saturating_sub(1);
                if self.remaining_red == 0 {
                    self.end_game(GameStatus::RedWins);
                }
            }
            TeamColor::Blue => {
                self.remaining_blue = self.remaining_blue.saturating_sub(1);
                if self.remaining_blue == 0 {
                    self.end_game(GameStatus::BlueWins);
                }
            }
            TeamColor::Neutral => {}
        }

        self.revealed[coords.to_nd_index()] = true;
        log::debug!("revealed {:?} at {:?}, status {:?}", color, coords, self.status);
        Ok(RevealOutcome::Revealed(color))
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
    }
}
