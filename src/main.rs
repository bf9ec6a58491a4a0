//! TypeRacer
//!
//! Terminal typing game. `play` runs the interactive game; `simulate`
//! runs a scripted typist headless and verifies the session replays to
//! the same state.

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use typeracer::{
    bot::{play_session, TypistConfig},
    config::{GameSettings, DEFAULT_FREQUENCY, DEFAULT_TEMPO},
    dictionary::{find_dictionary_dir, Dictionary, DICT_DIR_ENV},
    game::{state::PlayField, stats::SessionSummary, tick::replay_session},
    terminal::{run_session, show_menu, show_summary, Outcome, SessionEnd, Terminal},
    TICK_INTERVAL_MS, VERSION,
};

#[derive(Parser)]
#[command(name = "typeracer")]
#[command(about = "Type the words before they cross the screen")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default); flags pre-fill the settings menu
    Play(PlayArgs),

    /// Run a scripted typist without a terminal and verify replay
    Simulate(SimulateArgs),
}

#[derive(Args, Clone, Default)]
struct DictionaryArgs {
    /// Dictionary file, or name of a dictionary in the dictionary directory
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Dictionary directory (overrides TR_DIC)
    #[arg(long)]
    dict_dir: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct RateArgs {
    /// Ticks between movement steps (50-500)
    #[arg(short, long, default_value_t = DEFAULT_TEMPO)]
    tempo: u32,

    /// Ticks between spawn attempts (50-500)
    #[arg(short, long, default_value_t = DEFAULT_FREQUENCY)]
    frequency: u32,
}

impl Default for RateArgs {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

#[derive(Args, Clone, Default)]
struct PlayArgs {
    /// Level seed; 0 or absent picks one from the clock
    #[arg(short, long)]
    seed: Option<u32>,

    #[command(flatten)]
    rates: RateArgs,

    #[command(flatten)]
    dict: DictionaryArgs,

    /// Write logs to this file (the terminal is busy during play)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct SimulateArgs {
    /// Level seed
    #[arg(short, long, default_value_t = 1)]
    seed: u32,

    #[command(flatten)]
    rates: RateArgs,

    #[command(flatten)]
    dict: DictionaryArgs,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 200_000)]
    ticks: u64,

    /// Play field width in columns
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Number of lanes
    #[arg(long, default_value_t = 22)]
    lanes: u16,

    /// Typist accuracy in percent
    #[arg(long, default_value_t = 95)]
    accuracy: u32,

    /// Ticks between typist keystrokes
    #[arg(long, default_value_t = 40)]
    key_interval: u64,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Dictionary directory from the arguments, `TR_DIC` or the default places.
fn dictionary_dir(args: &DictionaryArgs) -> Result<PathBuf> {
    match &args.dict_dir {
        Some(dir) => Ok(dir.clone()),
        None => {
            let env_dir = env::var_os(DICT_DIR_ENV).map(PathBuf::from);
            Ok(find_dictionary_dir(env_dir.as_deref())?)
        }
    }
}

/// Load the dictionary the settings select.
fn load_dictionary(settings: &GameSettings, dict_dir: &Path) -> Result<Dictionary> {
    let path = settings.resolve_dictionary(dict_dir)?;
    Dictionary::load(&path).with_context(|| format!("loading dictionary {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => play(args),
        Command::Simulate(args) => simulate(args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    info!("TypeRacer v{}", VERSION);

    let defaults = GameSettings {
        seed: args.seed.unwrap_or(0),
        tempo: args.rates.tempo,
        frequency: args.rates.frequency,
        dictionary: args.dict.dictionary.clone(),
    };
    let dict_dir = dictionary_dir(&args.dict)?;
    let (dictionaries, selected) = defaults.dictionary_choices(&dict_dir)?;

    let mut term = Terminal::enter()?;

    // Each pass starts at the settings menu, pre-filled from the command line.
    loop {
        let Some(settings) = show_menu(&mut term, &defaults, &dictionaries, selected)? else {
            return Ok(());
        };
        let dictionary = load_dictionary(&settings, &dict_dir)?;
        let mut params = settings.session_params(Utc::now());
        info!(
            "Settings: seed {}, tempo {}, frequency {}, {} words",
            params.seed(),
            params.tempo(),
            params.frequency(),
            dictionary.len()
        );

        loop {
            let state = match run_session(&mut term, params, &dictionary)? {
                SessionEnd::Interrupted => return Ok(()),
                SessionEnd::Finished(state) => state,
            };

            let summary = SessionSummary::from_state(&state, Utc::now());
            info!(
                "Score {} | {} words | {} | accuracy {} | hash {}",
                summary.stats.score,
                summary.stats.words_completed,
                summary.stats.elapsed_display(),
                summary.stats.accuracy_display(),
                summary.state_hash
            );

            match show_summary(&mut term, &summary)? {
                Outcome::NewGame => break,
                Outcome::Replay => params = params.with_seed(state.initial_seed()),
                Outcome::Exit => return Ok(()),
            }
        }
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    info!("TypeRacer v{} (simulation)", VERSION);

    let settings = GameSettings {
        seed: args.seed,
        tempo: args.rates.tempo,
        frequency: args.rates.frequency,
        dictionary: args.dict.dictionary.clone(),
    };
    let dictionary = load_dictionary(&settings, &dictionary_dir(&args.dict)?)?;

    let started_at = Utc::now();
    let params = settings.session_params(started_at);
    let field = PlayField::new(args.width, args.lanes);
    let config = TypistConfig {
        key_interval: args.key_interval,
        error_percent: 100u32.saturating_sub(args.accuracy.min(100)),
        seed: params.seed(),
    };

    info!(
        "Seed {} | tempo {} | frequency {} | {} lanes x {} columns | {} words",
        params.seed(),
        params.tempo(),
        params.frequency(),
        field.lanes(),
        field.width(),
        dictionary.len()
    );

    let (played, script) = play_session(params, field, &dictionary, config, args.ticks, started_at);
    info!(
        "Played {} ticks, {} keystrokes, phase {:?}",
        played.tick,
        script.len(),
        played.phase
    );

    // Simulated time, as if each tick had taken its real-time slot.
    let elapsed_ms = played.tick.saturating_mul(TICK_INTERVAL_MS);
    let elapsed = Duration::milliseconds(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
    let finished_at = started_at
        .checked_add_signed(elapsed)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let summary = SessionSummary::from_state(&played, finished_at);

    info!("=== Verifying Determinism ===");
    let (replayed, events) = replay_session(params, field, &dictionary, &script, args.ticks, started_at);
    let replay_hash = hex::encode(replayed.compute_hash());
    info!("Final State Hash:  {}", summary.state_hash);
    info!("Replay State Hash: {} ({} events)", replay_hash, events.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        info!(
            "Score {} | {} words | {} | {} CPS | {} WPM | accuracy {}",
            summary.stats.score,
            summary.stats.words_completed,
            summary.stats.elapsed_display(),
            summary.stats.cps,
            summary.stats.wpm,
            summary.stats.accuracy_display()
        );
    }

    if replay_hash != summary.state_hash {
        warn!("DETERMINISM FAILURE: Hashes differ!");
        bail!("replay diverged from the recorded session");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
