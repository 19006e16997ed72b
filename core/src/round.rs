use alloc::string::String;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything dealt for one round: the secret key, the words on the table and the history to persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub seed: u64,
    pub assignment: BoardAssignment,
    pub words: WordBoard,
    pub history: WordHistory,
}

impl Round {
    /// Deals a round reproducibly from `seed`.
    pub fn deal(
        config: BoardConfig,
        corpus: &[String],
        history: &WordHistory,
        seed: u64,
    ) -> Result<Self> {
        let assignment = RandomAssignmentGenerator::new(seed).generate(config)?;

        // independent stream so the words do not correlate with the colors
        let mut rng = SmallRng::seed_from_u64(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15);
        let (words, history) = select_words(corpus, history, &mut rng, config.size)?;

        log::debug!(
            "dealt round {seed:#x}: {} red, {} blue, {} words in history",
            assignment.count(TeamColor::Red),
            assignment.count(TeamColor::Blue),
            history.len()
        );

        Ok(Self {
            seed,
            assignment,
            words,
            history,
        })
    }

    /// The part of the round worth keeping next to the spymaster image.
    pub fn key(&self) -> RoundKey<'_> {
        RoundKey {
            seed: self.seed,
            assignment: &self.assignment,
            words: &self.words,
        }
    }

    /// Starts the reveal bookkeeping for this round.
    pub fn start(&self) -> RevealState {
        RevealState::new(self.assignment.clone())
    }
}

/// Seed, colors and words of a round, leaving out the history of earlier rounds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RoundKey<'a> {
    pub seed: u64,
    pub assignment: &'a BoardAssignment,
    pub words: &'a WordBoard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn corpus() -> Vec<String> {
        (0..60).map(|i| format!("w{i:02}")).collect()
    }

    #[test]
    fn deal_is_reproducible() {
        let corpus = corpus();
        let a = Round::deal(BoardConfig::classic(), &corpus, &WordHistory::new(), 5).unwrap();
        let b = Round::deal(BoardConfig::classic(), &corpus, &WordHistory::new(), 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_rounds_avoid_repeats() {
        let corpus = corpus();
        let first = Round::deal(BoardConfig::classic(), &corpus, &WordHistory::new(), 1).unwrap();
        let second = Round::deal(BoardConfig::classic(), &corpus, &first.history, 2).unwrap();

        assert!(second.words.iter().all(|w| !first.words.iter().any(|f| f == w)));
        assert_eq!(second.history.len(), 50);

        // only ten unused words remain, so the third round starts a fresh deck
        let third = Round::deal(BoardConfig::classic(), &corpus, &second.history, 3).unwrap();
        assert_eq!(third.history.len(), 25);
    }

    #[test]
    fn started_round_counts_the_dealt_cards() {
        let round =
            Round::deal(BoardConfig::classic(), &corpus(), &WordHistory::new(), 11).unwrap();
        let state = round.start();

        assert_eq!(state.status(), GameStatus::Ongoing);
        assert_eq!(state.remaining(round.assignment.double_agent()), 9);
        assert_eq!(state.remaining(round.assignment.double_agent().other()), 8);
    }

    #[test]
    fn round_survives_serialization() {
        let round = Round::deal(BoardConfig::classic(), &corpus(), &WordHistory::new(), 8).unwrap();
        let json = serde_json::to_value(&round).unwrap();
        assert_eq!(json["seed"], 8);
        let restored: Round = serde_json::from_value(json).unwrap();
        assert_eq!(restored, round);
    }

    #[test]
    fn key_leaves_out_history() {
        let corpus = corpus();
        let first = Round::deal(BoardConfig::classic(), &corpus, &WordHistory::new(), 1).unwrap();
        let round = Round::deal(BoardConfig::classic(), &corpus, &first.history, 2).unwrap();

        let json = serde_json::to_value(round.key()).unwrap();

        assert_eq!(json["seed"], 2);
        assert!(json.get("history").is_none());
        assert_eq!(json["words"], serde_json::to_value(&round.words).unwrap());
        let assignment: BoardAssignment =
            serde_json::from_value(json["assignment"].clone()).unwrap();
        assert_eq!(assignment, round.assignment);
    }
}
