#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use color::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use raster::*;
pub use round::*;
pub use types::*;
pub use words::*;

mod color;
mod engine;
mod error;
mod generator;
mod raster;
mod round;
mod types;
mod words;

/// Card counts for one board, before the double agent is handed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub agents: CellCount,
    pub neutrals: CellCount,
    pub assassins: CellCount,
}

impl BoardConfig {
    /// Standard 5x5 table: 8 agents per team plus one double agent, 7 neutrals, 1 assassin.
    pub const fn classic() -> Self {
        Self {
            size: 5,
            agents: 8,
            neutrals: 7,
            assassins: 1,
        }
    }

    pub fn validate(self) -> Result<Self> {
        let dealt = self
            .agents
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| n.checked_add(self.neutrals))
            .and_then(|n| n.checked_add(self.assassins));
        if self.size == 0 || dealt != Some(self.total_cells()) {
            return Err(GameError::InvalidConfig);
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// How many cards of `color` a board holds when `double_agent` gets the extra card.
    pub const fn count_for(&self, color: TeamColor, double_agent: Team) -> CellCount {
        match (color, double_agent) {
            (TeamColor::Red, Team::Red) | (TeamColor::Blue, Team::Blue) => self.agents + 1,
            (TeamColor::Red, Team::Blue) | (TeamColor::Blue, Team::Red) => self.agents,
            (TeamColor::Neutral, _) => self.neutrals,
            (TeamColor::Assassin, _) => self.assassins,
        }
    }

    /// The full multiset of colors for a board, grouped by color.
    pub fn color_multiset(&self, double_agent: Team) -> Vec<TeamColor> {
        let mut colors = Vec::with_capacity(self.total_cells().into());
        for color in TeamColor::ALL {
            let count = self.count_for(color, double_agent);
            colors.extend(core::iter::repeat_n(color, count.into()));
        }
        colors
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// The secret key of a round: which color hides under every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedAssignment")]
pub struct BoardAssignment {
    config: BoardConfig,
    colors: Array2<TeamColor>,
    double_agent: Team,
}

/// Wire form of [`BoardAssignment`], checked again on the way in.
#[derive(Deserialize)]
struct UncheckedAssignment {
    config: BoardConfig,
    colors: Array2<TeamColor>,
    double_agent: Team,
}

impl TryFrom<UncheckedAssignment> for BoardAssignment {
    type Error = GameError;

    fn try_from(unchecked: UncheckedAssignment) -> Result<Self> {
        let assignment = Self::from_colors(unchecked.config, unchecked.colors)?;
        if assignment.double_agent != unchecked.double_agent {
            return Err(GameError::InvalidColorCounts);
        }
        Ok(assignment)
    }
}

impl BoardAssignment {
    /// Builds an assignment from colors laid out row-major, checking them against `config`.
    pub fn from_row_major(config: BoardConfig, colors: Vec<TeamColor>) -> Result<Self> {
        let size = usize::from(config.validate()?.size);
        let colors =
            Array2::from_shape_vec((size, size), colors).map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_colors(config, colors)
    }

    pub fn from_colors(config: BoardConfig, colors: Array2<TeamColor>) -> Result<Self> {
        let config = config.validate()?;
        let size = usize::from(config.size);
        if colors.dim() != (size, size) {
            return Err(GameError::InvalidBoardShape);
        }

        let count = |color| colors.iter().filter(|&&c| c == color).count();
        let double_agent = if count(TeamColor::Red) > count(TeamColor::Blue) {
            Team::Red
        } else {
            Team::Blue
        };
        let matches_config = TeamColor::ALL
            .into_iter()
            .all(|color| count(color) == usize::from(config.count_for(color, double_agent)));
        if !matches_config {
            return Err(GameError::InvalidColorCounts);
        }

        Ok(Self {
            config,
            colors,
            double_agent,
        })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        // shape is checked square on construction and its side came from a `Coord`
        self.colors.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn double_agent(&self) -> Team {
        self.double_agent
    }

    pub fn color_at(&self, coords: Coord2) -> TeamColor {
        self[coords]
    }

    pub fn count(&self, color: TeamColor) -> CellCount {
        // bounded by the cell count, which fits a `CellCount`
        self.colors.iter().filter(|&&c| c == color).count() as CellCount
    }

    /// Cells with their colors in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, TeamColor)> + '_ {
        iter_coords(self.size()).map(|coords| (coords, self[coords]))
    }

    pub fn colors(&self) -> &Array2<TeamColor> {
        &self.colors
    }
}

impl Index<Coord2> for BoardAssignment {
    type Output = TeamColor;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.colors[(row as usize, col as usize)]
    }
}
