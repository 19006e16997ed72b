use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Words dealt in earlier rounds, oldest first, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordHistory {
    words: Vec<String>,
}

impl WordHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first occurrence of every word.
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        let mut history = Self::new();
        history.extend(words);
        history
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn extend(&mut self, words: impl IntoIterator<Item = String>) {
        let mut seen: BTreeSet<String> = self.words.iter().cloned().collect();
        for word in words {
            if seen.insert(word.clone()) {
                self.words.push(word);
            } else {
                log::warn!("word {:?} is already in the history, skipping", word);
            }
        }
    }
}

/// The words shown to the players, one per cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBoard {
    words: Array2<String>,
}

impl WordBoard {
    pub fn from_row_major(size: Coord, words: Vec<String>) -> Result<Self> {
        let size = usize::from(size);
        let words =
            Array2::from_shape_vec((size, size), words).map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { words })
    }

    pub fn size(&self) -> Coord {
        // built from a `Coord` side in `from_row_major`
        self.words.dim().0 as Coord
    }

    pub fn word_at(&self, coords: Coord2) -> &str {
        &self[coords]
    }

    /// Words in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Length in chars of the longest word on the board.
    pub fn longest_word(&self) -> usize {
        self.iter().map(|w| w.chars().count()).max().unwrap_or(0)
    }
}

impl Index<Coord2> for WordBoard {
    type Output = String;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.words[(row as usize, col as usize)]
    }
}

/// Deals `size * size` words from `corpus`, skipping the words in `history`.
///
/// When the corpus no longer holds enough unused words for a whole board the history is dropped and every word is
/// eligible again. The returned history has the newly dealt words appended.
pub fn select_words(
    corpus: &[String],
    history: &WordHistory,
    rng: &mut SmallRng,
    size: Coord,
) -> Result<(WordBoard, WordHistory)> {
    let count = usize::from(mult(size, size));

    let history = if corpus.len().saturating_sub(history.len()) < count {
        if !history.is_empty() {
            log::warn!(
                "only {} of {} words left unused, reshuffling the whole deck",
                corpus.len().saturating_sub(history.len()),
                corpus.len()
            );
        }
        WordHistory::new()
    } else {
        history.clone()
    };

    let used: BTreeSet<&str> = history.words().iter().map(String::as_str).collect();
    let mut seen = BTreeSet::new();
    let mut candidates: Vec<&String> = corpus
        .iter()
        .filter(|word| !used.contains(word.as_str()))
        .filter(|word| seen.insert(word.as_str()))
        .collect();
    log::debug!("{} candidate words for {} cells", candidates.len(), count);

    if candidates.len() < count {
        return Err(GameError::InsufficientWords {
            available: candidates.len(),
            required: count,
        });
    }

    candidates.shuffle(rng);
    let dealt: Vec<String> = candidates.into_iter().take(count).cloned().collect();

    let mut history = history;
    history.extend(dealt.iter().cloned());
    let board = WordBoard::from_row_major(size, dealt)?;
    Ok((board, history))
}
