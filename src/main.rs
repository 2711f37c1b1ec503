//! Wordle Elimination - CLI
//!
//! Narrows word-guessing games from annotated guesses and ranks next guesses
//! by frequency, novelty and expected elimination.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wordle_elimination::{
    cache::{JsonFileStore, MemoCache},
    config::SolverConfig,
    core::{Alphabet, Word, WordList, answer},
    output::{print_cross, print_eliminations, print_feedback, print_game_summary, print_scores},
    solver::{CandidatePool, Game, eliminate_across_games},
    wordlists::{load_from_file, most_common_length, playable},
};

#[derive(Parser)]
#[command(
    name = "wordle_elimination",
    about = "Constraint narrowing and elimination ranking for word guessing games",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list file, one word per line
    #[arg(short = 'w', long, global = true, default_value = "words.txt")]
    words: PathBuf,

    /// Word length to play (default: the most common length in the list)
    #[arg(short = 'l', long, global = true)]
    length: Option<usize>,

    /// Characters a word may use
    #[arg(short = 'a', long, global = true)]
    alphabet: Option<String>,

    /// Persist elimination scores to this JSON file
    #[arg(short = 'c', long, global = true)]
    cache: Option<PathBuf>,

    /// Shrink candidate pools as the option count grows
    #[arg(long, global = true)]
    slow: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the options left after the given guesses
    Options {
        /// Annotated guesses, e.g. `(C)RAnE`
        guesses: Vec<String>,
    },

    /// Annotate a guess against a known solution
    Answer {
        /// The hidden word
        solution: String,

        /// The guessed word
        guess: String,
    },

    /// Play against a random hidden word
    Practice {
        /// Plain guessed words, in order
        guesses: Vec<String>,

        /// Seed for picking the hidden word
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rank options by positional frequency, or any word by novelty
    Score {
        /// Annotated guesses
        guesses: Vec<String>,

        /// Rank the whole list by novelty instead
        #[arg(short, long)]
        novelty: bool,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Rank guesses by expected elimination over the options
    Elim {
        /// Annotated guesses
        guesses: Vec<String>,

        /// Where candidate guesses come from
        #[arg(short, long, value_enum, default_value = "universe")]
        pool: Pool,

        /// Cap on candidate guesses (auto-sized when omitted)
        #[arg(long)]
        limit: Option<usize>,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Rank guesses by elimination across several games at once
    Cross {
        /// One game per value: comma-separated annotated guesses
        #[arg(short, long = "game", required = true)]
        games: Vec<String>,

        /// Where candidate guesses come from
        #[arg(short, long, value_enum, default_value = "solutions")]
        pool: Pool,

        /// Cap on candidate guesses
        #[arg(long)]
        limit: Option<usize>,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Pool {
    Universe,
    Solutions,
    Options,
}

impl From<Pool> for CandidatePool {
    fn from(pool: Pool) -> Self {
        match pool {
            Pool::Universe => Self::Universe,
            Pool::Solutions => Self::Solutions,
            Pool::Options => Self::Options,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let alphabet = match &cli.alphabet {
        Some(chars) => Alphabet::new(chars).context("invalid alphabet")?,
        None => Alphabet::latin(),
    };
    let mut config = SolverConfig::default();
    config.auto_limit.slow = cli.slow;

    match &cli.command {
        Commands::Answer { solution, guess } => {
            let solution = Word::new(solution.as_str())?;
            let guess = Word::new(guess.as_str())?;
            print_feedback(&answer(&solution, &guess)?);
        }
        Commands::Practice { guesses, seed } => {
            let mut game = Game::new(alphabet, load_words(&cli, alphabet)?)?.with_config(config);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_os_rng(),
            };
            game.start_practice(&[], &mut rng)?;
            for guess in guesses {
                let feedback = game
                    .submit_guess(guess)
                    .with_context(|| format!("rejected guess {guess}"))?;
                print_feedback(&feedback);
            }
            match (game.is_solved()?, game.solution()) {
                (true, Some(solution)) => {
                    println!("Solved: {}", solution.text().bright_green().bold());
                }
                _ => print_game_summary(game.guesses(), &game.options()?, &game.possibilities()?),
            }
        }
        Commands::Options { guesses } => {
            let game = new_game(load_words(&cli, alphabet)?, alphabet, config, guesses)?;
            print_game_summary(game.guesses(), &game.options()?, &game.possibilities()?);
        }
        Commands::Score {
            guesses,
            novelty,
            top,
        } => {
            let game = new_game(load_words(&cli, alphabet)?, alphabet, config, guesses)?;
            let ranked = if *novelty {
                game.best_novelty(&[])?
            } else {
                game.best_options()?
            };
            print_scores(&ranked, *top);
        }
        Commands::Elim {
            guesses,
            pool,
            limit,
            top,
        } => {
            let cache = open_cache(cli.cache.as_deref())?;
            let game = new_game(load_words(&cli, alphabet)?, alphabet, config, guesses)?;
            let options = game.options()?.len();
            let limit = limit.unwrap_or_else(|| game.config().auto_limit.limit_for(options));
            let candidates = CandidatePool::from(*pool).candidates(&[&game], Some(limit))?;

            let spinner = spinner(format!("Scoring {} guesses", candidates.len()));
            let ranked = game.best_elimination(&candidates, cache.clone())?;
            spinner.finish_and_clear();

            print_eliminations(&ranked, options, *top);
            flush_cache(cache.as_deref())?;
        }
        Commands::Cross {
            games,
            pool,
            limit,
            top,
        } => {
            let cache = open_cache(cli.cache.as_deref())?;
            let words = load_words(&cli, alphabet)?;
            let games = games
                .iter()
                .map(|played| {
                    let guesses: Vec<String> = played
                        .split(',')
                        .map(str::trim)
                        .filter(|g| !g.is_empty())
                        .map(String::from)
                        .collect();
                    new_game(words.clone(), alphabet, config.clone(), &guesses)
                })
                .collect::<Result<Vec<_>>>()?;
            let refs: Vec<&Game> = games.iter().collect();
            let candidates = CandidatePool::from(*pool).candidates(&refs, *limit)?;
            let keyed: Vec<(usize, &Game)> = refs
                .iter()
                .copied()
                .enumerate()
                .map(|(i, game)| (i + 1, game))
                .collect();
            let keys: Vec<usize> = keyed.iter().map(|(k, _)| *k).collect();

            let spinner = spinner(format!(
                "Scoring {} guesses over {} games",
                candidates.len(),
                keys.len()
            ));
            let ranked = eliminate_across_games(&keyed, &candidates, cache.clone())?;
            spinner.finish_and_clear();

            print_cross(&ranked, &keys, *top);
            flush_cache(cache.as_deref())?;
        }
    }

    Ok(())
}

fn load_words(cli: &Cli, alphabet: Alphabet) -> Result<WordList> {
    let all = load_from_file(&cli.words, None)
        .with_context(|| format!("failed to load word list {}", cli.words.display()))?;
    let Some(length) = cli.length.or_else(|| most_common_length(&all)) else {
        bail!("word list {} has no usable words", cli.words.display());
    };
    let words = playable(&all, length, alphabet);
    if words.is_empty() {
        bail!(
            "word list {} has no {length}-letter words in the alphabet",
            cli.words.display()
        );
    }
    Ok(words)
}

fn new_game(
    words: WordList,
    alphabet: Alphabet,
    config: SolverConfig,
    guesses: &[String],
) -> Result<Game> {
    let mut game = Game::new(alphabet, words)?.with_config(config);
    for guess in guesses {
        game.submit_guess(guess)
            .with_context(|| format!("rejected guess {guess}"))?;
    }
    Ok(game)
}

fn open_cache(path: Option<&Path>) -> Result<Option<Arc<MemoCache>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let store = JsonFileStore::open(path)
        .with_context(|| format!("failed to open cache {}", path.display()))?;
    Ok(Some(Arc::new(MemoCache::new(Box::new(store)))))
}

fn flush_cache(cache: Option<&MemoCache>) -> Result<()> {
    if let Some(cache) = cache {
        cache.flush().context("failed to write cache")?;
    }
    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
