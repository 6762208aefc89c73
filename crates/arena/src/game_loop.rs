//! Game loop for an RL vs LLM duel

use chess_core::{
    color_name, move_to_uci, uci_target, Color, Decision, Game, GameResult, Move, MoveChooser,
    Square, ThinkLimits,
};
use heuristic_engine::HeuristicChooser;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::ArenaError;
use crate::events::{EventSource, UiEvent};
use crate::render::{Frame, Renderer};
use crate::report::GameReport;
use crate::seat::{Seat, Seating};

/// Configuration for a duel
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Pause after every ply so moves can be followed
    pub move_delay: Duration,
    /// Maximum time per move (None = no limit)
    pub move_time: Option<Duration>,
    /// Return as soon as the game ends instead of waiting for quit
    pub exit_on_game_over: bool,
    /// How often to check for quit once the game is over
    pub idle_poll: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            move_delay: Duration::from_millis(1000),
            move_time: None,
            exit_on_game_over: false,
            idle_poll: Duration::from_millis(100),
        }
    }
}

impl LoopConfig {
    /// Fresh limits for one move (each move gets its own clock).
    fn think_limits(&self) -> ThinkLimits {
        ThinkLimits::from_budget(self.move_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Thinking(Color),
    MoveApplied,
    GameOver(GameResult),
}

/// The two seats at the board.
pub struct Players {
    pub rl: Box<dyn MoveChooser>,
    pub llm: Box<dyn MoveChooser>,
}

impl Players {
    fn get_mut(&mut self, seat: Seat) -> &mut dyn MoveChooser {
        match seat {
            Seat::Rl => self.rl.as_mut(),
            Seat::Llm => self.llm.as_mut(),
        }
    }
}

/// End-of-game banner shown in both panels.
pub fn end_message(result: GameResult) -> String {
    match result.winner() {
        Some(color) => format!("Game over: {} wins!", color_name(color)),
        None => "Game over: It's a draw!".to_string(),
    }
}

/// Drives a single game between two seats.
pub struct GameLoop {
    config: LoopConfig,
    seating: Seating,
    players: Players,
    game: Game,
    state: LoopState,
    history: Vec<String>,
    rl_status: String,
    llm_status: String,
    last_move: Option<(Square, Square)>,
    /// Replaces moves the loop will not accept
    fallback: HeuristicChooser,
    fallbacks: u32,
    seed: u64,
    started: Instant,
}

impl GameLoop {
    pub fn new(config: LoopConfig, seating: Seating, players: Players, seed: u64) -> Self {
        Self::with_game(config, seating, players, seed, Game::new())
    }

    /// Start from an arbitrary position.
    pub fn with_game(
        config: LoopConfig,
        seating: Seating,
        mut players: Players,
        seed: u64,
        game: Game,
    ) -> Self {
        players.rl.new_game();
        players.llm.new_game();
        Self {
            config,
            seating,
            players,
            game,
            state: LoopState::AwaitingInput,
            history: Vec::new(),
            rl_status: "RL agent ready".to_string(),
            llm_status: "LLM agent ready".to_string(),
            last_move: None,
            fallback: HeuristicChooser::with_seed(seed.wrapping_add(2)),
            fallbacks: 0,
            seed,
            started: Instant::now(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn status(&self, seat: Seat) -> &str {
        match seat {
            Seat::Rl => &self.rl_status,
            Seat::Llm => &self.llm_status,
        }
    }

    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    fn set_status(&mut self, seat: Seat, text: String) {
        match seat {
            Seat::Rl => self.rl_status = text,
            Seat::Llm => self.llm_status = text,
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) -> Result<(), ArenaError> {
        let frame = Frame {
            board: self.game.board(),
            seating: self.seating,
            rl_status: &self.rl_status,
            llm_status: &self.llm_status,
            history: &self.history,
            elapsed: self.started.elapsed(),
            last_move: self.last_move,
        };
        renderer.update(&frame).map_err(ArenaError::Render)
    }

    /// The chooser's move if the loop accepts it, otherwise a heuristic one.
    fn validate(&mut self, seat: Seat, decision: &Decision) -> Option<Move> {
        match decision.best_move {
            Some(mv) if self.game.is_legal(mv) => Some(mv),
            other => {
                warn!(
                    %seat,
                    proposed = ?other,
                    fen = %self.game.fen(),
                    "rejected move, playing a heuristic move instead"
                );
                self.fallbacks += 1;
                self.fallback.pick(self.game.board())
            }
        }
    }

    fn finish(&mut self, renderer: &mut dyn Renderer) -> Result<LoopState, ArenaError> {
        let outcome = self.game.outcome();
        let result = GameResult::from(outcome);
        let message = end_message(result);

        match outcome {
            Some(o) => info!(result = result.as_str(), termination = %o.termination, "{message}"),
            None => info!(result = result.as_str(), "{message}"),
        }
        self.rl_status = message.clone();
        self.llm_status = message;
        self.state = LoopState::GameOver(result);
        self.render(renderer)?;
        Ok(self.state)
    }

    /// Play one ply. Does nothing once the game is over.
    pub fn step(&mut self, renderer: &mut dyn Renderer) -> Result<LoopState, ArenaError> {
        if let LoopState::GameOver(_) = self.state {
            return Ok(self.state);
        }
        if self.game.is_game_over() {
            return self.finish(renderer);
        }

        let color = self.game.side_to_move();
        let seat = self.seating.seat_for(color);
        let other = seat.other();

        self.state = LoopState::Thinking(color);
        info!("{seat} player's turn ({})", color_name(color));
        self.set_status(seat, "Thinking...".to_string());
        self.set_status(other, format!("Waiting for {seat} move..."));
        self.render(renderer)?;

        let limits = self.config.think_limits();
        limits.start();
        let decision = self.players.get_mut(seat).get_action(&self.game, &limits);
        debug!(
            %seat,
            origin = ?decision.origin,
            stopped = decision.stopped,
            elapsed_ms = limits.elapsed().as_millis() as u64,
            "decision"
        );

        let Some(mv) = self.validate(seat, &decision) else {
            // Only reachable when the side to move has no legal moves
            return self.finish(renderer);
        };

        let board = self.game.board();
        let uci = move_to_uci(board, mv);
        self.last_move = Some((mv.from, uci_target(board, mv)));
        self.game.push(mv)?;
        self.history.push(format!("{seat}: {uci}"));

        self.state = LoopState::MoveApplied;
        self.set_status(seat, format!("Chosen move: {uci}"));
        self.set_status(other, format!("{seat} moved"));
        self.render(renderer)?;

        if self.game.is_game_over() {
            info!("Game over after {}'s move", color_name(color));
            return self.finish(renderer);
        }

        self.state = LoopState::AwaitingInput;
        Ok(self.state)
    }

    /// Play until the game ends and the user quits (or quits early).
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        events: &mut dyn EventSource,
    ) -> Result<GameReport, ArenaError> {
        self.started = Instant::now();
        self.render(renderer)?;

        // Leave the ready screen up for one move delay
        if !self.config.move_delay.is_zero() {
            if let Some(UiEvent::Quit) = events.wait(self.config.move_delay) {
                info!("Quit requested");
                return Ok(self.report());
            }
        }

        loop {
            if let Some(UiEvent::Quit) = events.poll() {
                info!("Quit requested");
                break;
            }

            if let LoopState::GameOver(_) = self.state {
                if self.config.exit_on_game_over {
                    break;
                }
                match events.wait(self.config.idle_poll) {
                    Some(UiEvent::Quit) | Some(UiEvent::InputClosed) => break,
                    None => continue,
                }
            }

            let state = self.step(renderer)?;
            if state == LoopState::AwaitingInput && !self.config.move_delay.is_zero() {
                if let Some(UiEvent::Quit) = events.wait(self.config.move_delay) {
                    info!("Quit requested");
                    break;
                }
            }
        }

        Ok(self.report())
    }

    pub fn report(&self) -> GameReport {
        let outcome = self.game.outcome();
        GameReport {
            seed: self.seed,
            seating: self.seating,
            result: GameResult::from(outcome).as_str().to_string(),
            termination: outcome.map(|o| o.termination.to_string()),
            moves: self.game.moves().to_vec(),
            history: self.history.clone(),
            start_fen: self.game.start_fen().to_string(),
            final_fen: self.game.fen(),
            fallbacks: self.fallbacks,
            duration_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
#[path = "game_loop_tests.rs"]
mod game_loop_tests;
