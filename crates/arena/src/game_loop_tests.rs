use super::*;
use chess_core::{parse_uci_move, MoveOrigin};
use std::collections::VecDeque;

/// Plays a fixed list of UCI moves, then passes.
struct Scripted {
    moves: VecDeque<String>,
}

impl Scripted {
    fn boxed(moves: &[&str]) -> Box<dyn MoveChooser> {
        Box::new(Self {
            moves: moves.iter().map(|m| m.to_string()).collect(),
        })
    }
}

impl MoveChooser for Scripted {
    fn get_action(&mut self, game: &Game, _limits: &ThinkLimits) -> Decision {
        let mv = self
            .moves
            .pop_front()
            .and_then(|uci| parse_uci_move(game.board(), &uci).ok());
        Decision::new(mv, MoveOrigin::Scripted)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Proposes a move that is legal in the start position, whatever the board.
struct Stubborn;

impl MoveChooser for Stubborn {
    fn get_action(&mut self, _game: &Game, _limits: &ThinkLimits) -> Decision {
        let start = Game::new();
        let mv = parse_uci_move(start.board(), "e2e4").ok();
        Decision::new(mv, MoveOrigin::Scripted)
    }

    fn name(&self) -> &str {
        "stubborn"
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(String, String, usize)>,
}

impl Renderer for Recorder {
    fn update(&mut self, frame: &Frame<'_>) -> std::io::Result<()> {
        self.frames.push((
            frame.rl_status.to_string(),
            frame.llm_status.to_string(),
            frame.history.len(),
        ));
        Ok(())
    }
}

fn quick_config() -> LoopConfig {
    LoopConfig {
        move_delay: Duration::ZERO,
        exit_on_game_over: true,
        idle_poll: Duration::from_millis(1),
        ..LoopConfig::default()
    }
}

fn duel(white: Seat, rl: Box<dyn MoveChooser>, llm: Box<dyn MoveChooser>) -> GameLoop {
    GameLoop::new(quick_config(), Seating::new(white), Players { rl, llm }, 7)
}

#[test]
fn two_plies_with_scripted_seats() {
    let mut game_loop = duel(Seat::Rl, Scripted::boxed(&["e2e4"]), Scripted::boxed(&["e7e5"]));
    let mut renderer = Recorder::default();

    assert_eq!(game_loop.step(&mut renderer).unwrap(), LoopState::AwaitingInput);
    assert_eq!(game_loop.step(&mut renderer).unwrap(), LoopState::AwaitingInput);

    assert_eq!(game_loop.history(), ["RL: e2e4", "LLM: e7e5"]);
    assert_eq!(game_loop.game().side_to_move(), Color::White);
    let fen = game_loop.game().fen();
    assert_eq!(
        fen.split(' ').next(),
        Some("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR")
    );
    assert_eq!(game_loop.fallbacks(), 0);
}

#[test]
fn status_text_around_a_ply() {
    let mut game_loop = duel(Seat::Rl, Scripted::boxed(&["e2e4"]), Scripted::boxed(&[]));
    let mut renderer = Recorder::default();
    game_loop.step(&mut renderer).unwrap();

    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(
        renderer.frames[0],
        ("Thinking...".into(), "Waiting for RL move...".into(), 0)
    );
    assert_eq!(
        renderer.frames[1],
        ("Chosen move: e2e4".into(), "RL moved".into(), 1)
    );
}

#[test]
fn llm_can_play_white() {
    let mut game_loop = duel(Seat::Llm, Scripted::boxed(&["e7e5"]), Scripted::boxed(&["d2d4"]));
    let mut renderer = Recorder::default();
    game_loop.step(&mut renderer).unwrap();
    game_loop.step(&mut renderer).unwrap();

    assert_eq!(game_loop.history(), ["LLM: d2d4", "RL: e7e5"]);
    assert_eq!(game_loop.status(Seat::Rl), "Chosen move: e7e5");
    assert_eq!(game_loop.status(Seat::Llm), "RL moved");
}

#[test]
fn fools_mate_ends_with_black_winning() {
    let mut game_loop = duel(
        Seat::Llm,
        Scripted::boxed(&["e7e5", "d8h4"]),
        Scripted::boxed(&["f2f3", "g2g4"]),
    );
    let mut renderer = Recorder::default();

    let mut state = LoopState::AwaitingInput;
    for _ in 0..4 {
        state = game_loop.step(&mut renderer).unwrap();
    }

    assert_eq!(state, LoopState::GameOver(GameResult::BlackWins));
    assert_eq!(game_loop.status(Seat::Rl), "Game over: Black wins!");
    assert_eq!(game_loop.status(Seat::Llm), "Game over: Black wins!");

    // Further steps are no-ops
    assert_eq!(game_loop.step(&mut renderer).unwrap(), state);
    assert_eq!(game_loop.history().len(), 4);

    let report = game_loop.report();
    assert_eq!(report.result, "0-1");
    assert_eq!(report.termination.as_deref(), Some("checkmate"));
    assert_eq!(report.moves, ["f2f3", "e7e5", "g2g4", "d8h4"]);
}

#[test]
fn illegal_move_is_replaced() {
    let mut game_loop = duel(Seat::Rl, Box::new(Stubborn), Scripted::boxed(&["e7e5"]));
    let mut renderer = Recorder::default();

    game_loop.step(&mut renderer).unwrap();
    game_loop.step(&mut renderer).unwrap();
    // e2e4 is no longer legal for White
    game_loop.step(&mut renderer).unwrap();

    assert_eq!(game_loop.fallbacks(), 1);
    assert_eq!(game_loop.history().len(), 3);
    assert!(game_loop.history()[2].starts_with("RL: "));
    assert_ne!(game_loop.history()[2], "RL: e2e4");
}

#[test]
fn missing_move_is_replaced() {
    let mut game_loop = duel(Seat::Rl, Scripted::boxed(&[]), Scripted::boxed(&[]));
    let mut renderer = Recorder::default();
    game_loop.step(&mut renderer).unwrap();

    assert_eq!(game_loop.fallbacks(), 1);
    assert_eq!(game_loop.game().ply(), 1);
}

#[test]
fn finished_start_position_ends_immediately() {
    let stalemate = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut game_loop = GameLoop::with_game(
        quick_config(),
        Seating::default(),
        Players {
            rl: Scripted::boxed(&[]),
            llm: Scripted::boxed(&[]),
        },
        1,
        stalemate,
    );
    let mut renderer = Recorder::default();

    let state = game_loop.step(&mut renderer).unwrap();
    assert_eq!(state, LoopState::GameOver(GameResult::Draw));
    assert_eq!(game_loop.status(Seat::Rl), "Game over: It's a draw!");
    assert!(game_loop.history().is_empty());
}

struct QuitAfter {
    polls_left: usize,
}

impl EventSource for QuitAfter {
    fn poll(&mut self) -> Option<UiEvent> {
        if self.polls_left == 0 {
            return Some(UiEvent::Quit);
        }
        self.polls_left -= 1;
        None
    }

    fn wait(&mut self, _timeout: Duration) -> Option<UiEvent> {
        None
    }
}

#[test]
fn run_stops_on_quit() {
    let mut game_loop = duel(
        Seat::Rl,
        Box::new(HeuristicChooser::with_seed(1)),
        Box::new(HeuristicChooser::with_seed(2)),
    );
    let mut renderer = Recorder::default();
    let mut events = QuitAfter { polls_left: 3 };

    let report = game_loop.run(&mut renderer, &mut events).unwrap();
    assert_eq!(report.moves.len(), 3);
    assert_eq!(report.result, "*");
    assert_eq!(report.seed, 7);
}

/// Records every wait and answers the first one with `Quit`.
#[derive(Default)]
struct QuitOnFirstWait {
    waits: Vec<Duration>,
}

impl EventSource for QuitOnFirstWait {
    fn poll(&mut self) -> Option<UiEvent> {
        None
    }

    fn wait(&mut self, timeout: Duration) -> Option<UiEvent> {
        self.waits.push(timeout);
        Some(UiEvent::Quit)
    }
}

#[test]
fn ready_screen_waits_one_move_delay() {
    let config = LoopConfig {
        move_delay: Duration::from_millis(250),
        ..quick_config()
    };
    let mut game_loop = GameLoop::new(
        config,
        Seating::default(),
        Players {
            rl: Scripted::boxed(&["e2e4"]),
            llm: Scripted::boxed(&["e7e5"]),
        },
        7,
    );
    let mut renderer = Recorder::default();
    let mut events = QuitOnFirstWait::default();

    let report = game_loop.run(&mut renderer, &mut events).unwrap();

    // Quit during the pause: only the ready frame was drawn, no move played
    assert_eq!(events.waits, [Duration::from_millis(250)]);
    assert!(report.moves.is_empty());
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(renderer.frames[0].0, "RL agent ready");
}

#[test]
fn run_plays_to_the_end() {
    let mut game_loop = duel(
        Seat::Llm,
        Scripted::boxed(&["e7e5", "d8h4"]),
        Scripted::boxed(&["f2f3", "g2g4"]),
    );
    let mut renderer = Recorder::default();
    let mut events = crate::events::NoEvents;

    let report = game_loop.run(&mut renderer, &mut events).unwrap();
    assert_eq!(report.result, "0-1");
    assert_eq!(report.history, ["LLM: f2f3", "RL: e7e5", "LLM: g2g4", "RL: d8h4"]);
    // First frame is the ready screen
    assert_eq!(renderer.frames[0].0, "RL agent ready");
}

#[test]
fn end_messages() {
    assert_eq!(end_message(GameResult::WhiteWins), "Game over: White wins!");
    assert_eq!(end_message(GameResult::BlackWins), "Game over: Black wins!");
    assert_eq!(end_message(GameResult::Draw), "Game over: It's a draw!");
}
