//! Duel CLI
//!
//! Sets up an RL vs LLM game and plays it out in the terminal.

use anyhow::{Context, Result};
use arena::{
    resolve_seed, start_screen, DuelConfig, Frame, GameLoop, Players, Renderer, Seat, Seating,
    StartChoice, StdinEvents, TerminalRenderer,
};
use chess_core::{Board, Game};
use clap::{Args, Parser, Subcommand};
use llm_engine::LlmAgent;
use rand::Rng;
use rl_engine::{load_or_train, Policy, RlAgent, Trainer};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "duel", version, about = "Watch an RL agent and an LLM agent play chess")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Config file (default: ./duel.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game (the default)
    Play(PlayArgs),
    /// Train the RL model and exit
    Train(TrainArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct PlayArgs {
    /// Who plays White
    #[arg(long, value_enum)]
    white: Option<Seat>,

    /// Random seed; anything but digits picks one at random
    #[arg(long)]
    seed: Option<String>,

    /// Write a JSON game report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit when the game ends instead of waiting for q
    #[arg(long)]
    exit_on_game_over: bool,

    /// Pause between moves in milliseconds
    #[arg(long)]
    move_delay_ms: Option<u64>,

    /// Think budget per move in milliseconds
    #[arg(long)]
    move_time_ms: Option<u64>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct TrainArgs {
    /// Total environment steps
    #[arg(long)]
    timesteps: Option<u64>,

    /// Steps between checkpoints
    #[arg(long)]
    checkpoint_freq: Option<u64>,

    /// Seed for exploration
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DuelConfig::load_or_default(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Play(cli.play)) {
        Command::Play(args) => play(config, args),
        Command::Train(args) => train(config, args),
    }
}

/// Load the configured policy, training the tabular one first if needed.
fn build_policy(
    config: &DuelConfig,
    seating: Seating,
    seed: u64,
    renderer: &mut dyn Renderer,
) -> Result<Box<dyn Policy>> {
    #[cfg(feature = "onnx")]
    if let Some(path) = &config.rl.onnx_model {
        info!("Loading ONNX policy from {}", path.display());
        return Ok(Box::new(rl_engine::OnnxPolicy::load(path)?));
    }
    #[cfg(not(feature = "onnx"))]
    if config.rl.onnx_model.is_some() {
        tracing::warn!("built without the `onnx` feature, using the tabular model instead");
    }

    let paths = config.rl.model_paths();
    if !paths.model_exists() {
        let board = Board::default();
        renderer.update(&Frame {
            board: &board,
            seating,
            rl_status: "Training RL agent...",
            llm_status: "Waiting for RL agent...",
            history: &[],
            elapsed: Duration::ZERO,
            last_move: None,
        })?;
    }
    let policy = load_or_train(&config.rl.training, config.rl.action_mapping, &paths, seed)?;
    Ok(Box::new(policy))
}

fn play(mut config: DuelConfig, args: PlayArgs) -> Result<()> {
    let white = args.white.or(config.game.white);
    let seed_text = args.seed.clone().or_else(|| config.game.seed.clone());

    let choice = match (white, seed_text.clone()) {
        (Some(white), Some(seed_text)) => StartChoice { white, seed_text },
        _ => {
            let mut input = io::stdin().lock();
            let mut output = io::stdout();
            match start_screen(&mut input, &mut output, white, seed_text)? {
                Some(choice) => choice,
                None => {
                    println!("Game cancelled");
                    return Ok(());
                }
            }
        }
    };

    let seed = resolve_seed(Some(&choice.seed_text), &mut rand::thread_rng());
    println!("Random seed: {seed}");
    info!(seed, white = %choice.white, "starting duel");

    if let Some(ms) = args.move_delay_ms {
        config.game.move_delay_ms = ms;
    }
    if args.move_time_ms.is_some() {
        config.game.move_time_ms = args.move_time_ms;
    }
    if args.exit_on_game_over {
        config.game.exit_on_game_over = true;
    }
    if args.fen.is_some() {
        config.game.start_fen = args.fen.clone();
    }

    let seating = Seating::new(choice.white);
    let mut renderer = TerminalRenderer::stdout();

    let policy = build_policy(&config, seating, seed, &mut renderer)?;
    let rl = RlAgent::new(policy, config.rl.action_mapping).with_seed(seed);
    let llm = LlmAgent::from_config(config.llm.clone()).with_seed(seed.wrapping_add(1));

    let game = match &config.game.start_fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let mut game_loop = GameLoop::with_game(
        config.game.loop_config(),
        seating,
        Players {
            rl: Box::new(rl),
            llm: Box::new(llm),
        },
        seed,
        game,
    );
    let mut events = StdinEvents::spawn();
    let report = game_loop.run(&mut renderer, &mut events)?;

    print!("{}", report.generate_summary());
    if let Some(path) = &args.report {
        report
            .save(path)
            .with_context(|| format!("saving game report to {}", path.display()))?;
        info!("Game report saved to {}", path.display());
    }

    println!("Game finished!");
    Ok(())
}

fn train(config: DuelConfig, args: TrainArgs) -> Result<()> {
    let mut training = config.rl.training.clone();
    if let Some(n) = args.timesteps {
        training.total_timesteps = n;
    }
    if let Some(n) = args.checkpoint_freq {
        training.checkpoint_freq = n;
    }

    let seed = args
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(1..=1_000_000));
    info!(seed, timesteps = training.total_timesteps, "training RL agent");

    let paths = config.rl.model_paths();
    let mut trainer =
        Trainer::resume_or_new(training, config.rl.action_mapping, &paths, seed)?;
    let stats = trainer.train(&paths)?;

    println!(
        "Trained {} steps over {} episodes (white {}, black {}, draws {})",
        stats.timesteps, stats.episodes, stats.white_wins, stats.black_wins, stats.draws
    );
    println!("Model saved to {}", paths.model.display());
    Ok(())
}
