use std::io::{self, BufRead, Write};

use codenames_core::{Coord, Coord2, GameError, GameStatus, RevealState, TeamColor, WordBoard};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type `help` for usage")]
    Unknown(String),
    #[error("Rows and columns are numbered from 1")]
    ZeroCoordinate,
}

impl Command {
    /// Parses a line of player input: `<row> <col>` counting from 1, or a word command.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" | "show" => return Ok(Self::Show),
            "h" | "help" | "?" => return Ok(Self::Help),
            "q" | "quit" | "exit" => return Ok(Self::Quit),
            _ => {}
        }

        let unknown = || CommandError::Unknown(line.to_owned());
        let mut parts = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty());
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(unknown());
        };
        let row: Coord = row.parse().map_err(|_| unknown())?;
        let col: Coord = col.parse().map_err(|_| unknown())?;

        match (row.checked_sub(1), col.checked_sub(1)) {
            (Some(row), Some(col)) => Ok(Self::Reveal((row, col))),
            _ => Err(CommandError::ZeroCoordinate),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Unchanged,
    Help,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionStyle {
    /// Minimum width of a word cell in characters.
    pub cell_width: usize,
    /// Paint revealed cards with ANSI colors.
    pub ansi: bool,
}

impl Default for SessionStyle {
    fn default() -> Self {
        Self {
            cell_width: 14,
            ansi: true,
        }
    }
}

const HELP: &str =
    "Type `<row> <col>` (from 1) to turn a card over, `show` to redraw, `quit` to end the round.";

/// Terminal table of the round: the words everyone sees, colored as they get picked.
pub struct Session {
    words: WordBoard,
    state: RevealState,
    style: SessionStyle,
}

impl Session {
    pub fn new(words: WordBoard, state: RevealState, style: SessionStyle) -> Self {
        Self {
            words,
            state,
            style,
        }
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) -> codenames_core::Result<Flow> {
        Ok(match command {
            Command::Reveal(coords) => {
                let was_finished = self.state.is_finished();
                let outcome = self.state.reveal(coords)?;
                if !was_finished && self.state.is_finished() {
                    log::info!("round over: {:?}", self.state.status());
                }
                if outcome.has_update() {
                    Flow::Redraw
                } else {
                    Flow::Unchanged
                }
            }
            Command::Show => Flow::Redraw,
            Command::Help => Flow::Help,
            Command::Quit => Flow::Quit,
        })
    }

    /// Reads commands until the players quit or the input ends.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.render(&mut out)?;
        writeln!(out, "{HELP}")?;

        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(command) => self.dispatch(command),
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };
            match flow {
                Ok(Flow::Redraw) => self.render(&mut out)?,
                Ok(Flow::Unchanged) => writeln!(out, "That card is already turned over")?,
                Ok(Flow::Help) => writeln!(out, "{HELP}")?,
                Ok(Flow::Quit) => break,
                Err(GameError::InvalidCoords) => {
                    let size = self.state.size();
                    writeln!(out, "The board only has {size} rows and {size} columns")?;
                }
                Err(err) => writeln!(out, "{err}")?,
            }
            out.flush()?;
        }

        Ok(())
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let width = self.style.cell_width.max(self.words.longest_word() + 2);
        let size = self.state.size();

        write!(out, "   ")?;
        for col in 1..=size {
            write!(out, " {col:^width$} ")?;
        }
        writeln!(out)?;

        for row in 0..size {
            write!(out, "{:>2} ", row + 1)?;
            for col in 0..size {
                let word = self.words.word_at((row, col));
                match self.state.visible_color((row, col)) {
                    None => write!(out, "[{word:^width$}]")?,
                    Some(color) => {
                        let text = format!("{} {word}", tag(color));
                        write!(out, "{}", self.paint(color, &format!("<{text:^width$}>")))?;
                    }
                }
            }
            writeln!(out)?;
        }

        writeln!(out)?;
        let red = format!("Red: {}", self.state.remaining_red());
        let blue = format!("Blue: {}", self.state.remaining_blue());
        writeln!(
            out,
            "{}    {}    {}",
            self.paint(TeamColor::Red, &red),
            self.paint(TeamColor::Blue, &blue),
            status_message(self.state.status())
        )
    }

    fn paint(&self, color: TeamColor, text: &str) -> String {
        if self.style.ansi {
            format!("{}{text}{ANSI_RESET}", ansi(color))
        } else {
            text.to_owned()
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";

const fn ansi(color: TeamColor) -> &'static str {
    match color {
        TeamColor::Red => "\x1b[1;31m",
        TeamColor::Blue => "\x1b[1;34m",
        TeamColor::Neutral => "\x1b[1;32m",
        TeamColor::Assassin => "\x1b[1;7m",
    }
}

const fn tag(color: TeamColor) -> char {
    match color {
        TeamColor::Red => 'R',
        TeamColor::Blue => 'B',
        TeamColor::Neutral => 'N',
        TeamColor::Assassin => 'X',
    }
}

pub fn status_message(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "",
        GameStatus::RedWins => "Red wins!",
        GameStatus::BlueWins => "Blue wins!",
        GameStatus::AssassinHit => "Assassin! Game over.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codenames_core::{BoardAssignment, BoardConfig, Team};

    fn session() -> Session {
        let config = BoardConfig::classic();
        let assignment =
            BoardAssignment::from_row_major(config, config.color_multiset(Team::Red)).unwrap();
        let words =
            WordBoard::from_row_major(5, (0..25).map(|i| format!("w{i:02}")).collect()).unwrap();
        let style = SessionStyle {
            cell_width: 8,
            ansi: false,
        };
        Session::new(words, RevealState::new(assignment), style)
    }

    fn play(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_accepts_one_based_coordinates() {
        assert_eq!(Command::parse("1 1"), Ok(Command::Reveal((0, 0))));
        assert_eq!(Command::parse(" 5,3\n"), Ok(Command::Reveal((4, 2))));
        assert_eq!(Command::parse("Q"), Ok(Command::Quit));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("0 2"), Err(CommandError::ZeroCoordinate));
        assert!(matches!(
            Command::parse("1 2 3"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            Command::parse("a b"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn dispatch_reveals_once() {
        let mut session = session();

        assert_eq!(session.dispatch(Command::Reveal((0, 0))), Ok(Flow::Redraw));
        assert_eq!(session.dispatch(Command::Reveal((0, 0))), Ok(Flow::Unchanged));
        assert_eq!(session.state().remaining_red(), 8);
        assert_eq!(
            session.dispatch(Command::Reveal((7, 0))),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn render_shows_words_and_revealed_tags() {
        let mut session = session();
        session.dispatch(Command::Reveal((4, 4))).unwrap();

        let mut out = Vec::new();
        session.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("[  w00   ]"));
        assert!(text.contains("< X w24  >"));
        assert!(text.contains("Red: 9    Blue: 8    Assassin! Game over."));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn ansi_style_colors_revealed_cards_and_counters() {
        let mut session = session();
        session.style.ansi = true;
        session.dispatch(Command::Reveal((0, 0))).unwrap();

        let mut out = Vec::new();
        session.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\x1b[1;31m< R w00  >\x1b[0m"));
        assert!(text.contains("[  w01   ]"));
        assert!(text.contains("\x1b[1;31mRed: 8\x1b[0m"));
        assert!(text.contains("\x1b[1;34mBlue: 8\x1b[0m"));
    }

    #[test]
    fn scripted_round_ends_with_red_win() {
        let mut session = session();
        let input = "1 1\n1 2\n1 3\n1 4\n1 5\n2 1\n2 2\n2 3\nnonsense\n2 4\n5 5\n";

        let output = play(&mut session, input);

        assert!(output.contains("Unknown command \"nonsense\""));
        assert!(output.contains("Red: 0    Blue: 8    Red wins!"));
        assert_eq!(session.state().status(), GameStatus::RedWins);
        // the assassin still flips after the game is over
        assert!(session.state().is_revealed((4, 4)));
        assert!(!output.ends_with("Assassin! Game over.\n"));
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = session();
        let output = play(&mut session, "9 9\nquit\n1 1\n");

        assert!(output.contains("The board only has 5 rows and 5 columns"));
        assert_eq!(session.state().revealed_count(), 0);
    }
}
