use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use codenames_core::{BoardConfig, KeyLayout, Palette, Round, WordHistory, render_key};

use session::{Session, SessionStyle};
use store::{CORPUS_FILE, HISTORY_FILE};

mod session;
mod store;

/// Deals a Codenames table: writes the spymaster key as an image and plays the word grid in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Minimum width of a word cell, raise it to make the table easier to read for the other players
    #[arg(short, long, default_value_t = 14)]
    font_size: usize,

    /// Folder holding the word list (codenames.csv) and the list of used words (used_names.csv)
    #[arg(short, long, default_value = "dat")]
    data_path: PathBuf,

    /// Folder to save the spymaster key in, ideally a synced cloud folder shared with the other players
    #[arg(short, long, default_value = "~/Dropbox/CoronaCodenames")]
    cloud_path: PathBuf,

    /// Number put in the key's file name, helps when playing several rounds in a row
    #[arg(short, long, default_value_t = 0)]
    round: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Neither read nor update the list of used words
    #[arg(long)]
    no_history: bool,

    /// Also save the round key as JSON next to the image
    #[arg(long)]
    key_json: bool,

    /// Do not color revealed cards
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("{:?}", args);

    let data_path = store::expand_home(&args.data_path);
    let corpus_path = data_path.join(CORPUS_FILE);
    let history_path = data_path.join(HISTORY_FILE);

    let corpus = store::read_words(&corpus_path).context("could not load the word list")?;
    let history = if args.no_history {
        WordHistory::new()
    } else {
        store::read_history(&history_path).context("could not load the used words")?
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");
    let round = Round::deal(BoardConfig::classic(), &corpus, &history, seed)
        .context("could not deal a board")?;

    let key_path =
        store::expand_home(&args.cloud_path).join(format!("spymaster_key_v{}.png", args.round));
    let key = render_key(&round.assignment, KeyLayout::default(), &Palette::default());
    store::write_key_image(&key_path, &key).context("could not save the spymaster key")?;
    println!("Spymaster key saved to {}", key_path.display());

    if args.key_json {
        store::write_round_key(&key_path.with_extension("json"), &round.key())
            .context("could not save the round key")?;
    }

    if !args.no_history {
        store::write_history(&history_path, &round.history)
            .context("could not update the used words")?;
    }

    let style = SessionStyle {
        cell_width: args.font_size,
        ansi: !args.plain,
    };
    let mut session = Session::new(round.words.clone(), round.start(), style);
    session
        .run(io::stdin().lock(), io::stdout().lock())
        .context("terminal i/o failed")?;

    log::info!("round finished with {:?}", session.state().status());
    Ok(())
}
