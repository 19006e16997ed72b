use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use codenames_core::{KeyImage, RoundKey, WordHistory};
use thiserror::Error;

/// Word list shipped with the game, inside the data folder.
pub const CORPUS_FILE: &str = "codenames.csv";

/// Words dealt in previous rounds, inside the data folder.
pub const HISTORY_FILE: &str = "used_names.csv";

const DELIMITER: u8 = b';';
const WORD_COLUMN: usize = 1;
const HEADER: [&str; 2] = ["Nr", "Name"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("{}: row at line {line} has no word column", path.display())]
    MalformedRow { path: PathBuf, line: u64 },
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn csv(path: &Path) -> impl FnOnce(csv::Error) -> Self + '_ {
        move |source| Self::Csv {
            path: path.to_owned(),
            source,
        }
    }

    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Reads the word column of a `;` separated table, skipping its header row.
pub fn read_words(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(StoreError::MissingFile(path.to_owned()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(StoreError::csv(path))?;

    let mut words = Vec::new();
    for record in reader.records() {
        let record = record.map_err(StoreError::csv(path))?;
        match record.get(WORD_COLUMN).map(str::trim) {
            Some(word) if !word.is_empty() => words.push(word.to_owned()),
            _ => {
                return Err(StoreError::MalformedRow {
                    path: path.to_owned(),
                    line: record.position().map_or(0, |pos| pos.line()),
                });
            }
        }
    }

    log::debug!("read {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Loads the history if there is one; a missing file just means nothing was played yet.
pub fn read_history(path: &Path) -> Result<WordHistory> {
    match read_words(path) {
        Ok(words) => Ok(WordHistory::from_words(words)),
        Err(StoreError::MissingFile(_)) => {
            log::info!("no history at {}, starting fresh", path.display());
            Ok(WordHistory::new())
        }
        Err(err) => Err(err),
    }
}

/// Rewrites the whole history file, numbering the words from 1.
pub fn write_history(path: &Path, history: &WordHistory) -> Result<()> {
    create_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .map_err(StoreError::csv(path))?;

    writer.write_record(HEADER).map_err(StoreError::csv(path))?;
    for (i, word) in history.words().iter().enumerate() {
        let nr = (i + 1).to_string();
        writer
            .write_record([nr.as_str(), word.as_str()])
            .map_err(StoreError::csv(path))?;
    }
    writer.flush().map_err(StoreError::io(path))?;

    log::debug!("wrote {} words to {}", history.len(), path.display());
    Ok(())
}

pub fn write_key_image(path: &Path, key: &KeyImage) -> Result<()> {
    create_parent(path)?;
    image::save_buffer_with_format(
        path,
        &key.pixels,
        key.width,
        key.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|source| StoreError::Image {
        path: path.to_owned(),
        source,
    })
}

/// Dumps the key of a round as pretty JSON, for checking it after the fact.
pub fn write_round_key(path: &Path, key: &RoundKey) -> Result<()> {
    create_parent(path)?;
    let json = serde_json::to_string_pretty(key).map_err(|source| StoreError::Json {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, json).map_err(StoreError::io(path))
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(StoreError::io(parent))
        }
        _ => Ok(()),
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_owned();
    };
    match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest),
        None => {
            log::warn!("cannot expand {}, no home directory", path.display());
            path.to_owned()
        }
    }
}
