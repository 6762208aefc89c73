use super::*;
use llm_engine::{CacheKeying, LlmBackend};

#[test]
fn empty_file_gives_defaults() {
    let config = DuelConfig::from_toml("", Path::new("duel.toml")).unwrap();
    assert_eq!(config, DuelConfig::default());
    assert_eq!(config.game.move_delay_ms, 1000);
    assert_eq!(config.game.white, None);
    assert_eq!(config.rl.model_path, PathBuf::from("rl_model.json"));
    assert_eq!(config.rl.training.total_timesteps, 50_000);
    assert_eq!(config.llm.backend, LlmBackend::Heuristic);
    assert_eq!(config.llm.cache_capacity, 4096);
}

#[test]
fn sections_override_defaults() {
    let text = r#"
        [game]
        white = "llm"
        seed = "42"
        move_time_ms = 250

        [rl]
        action_mapping = "from-to"

        [rl.training]
        total_timesteps = 1000
        checkpoint_freq = 100

        [llm]
        backend = "http"
        attempts = 1
        cache_keying = "history"

        [llm.http]
        model = "llama3"
    "#;
    let config = DuelConfig::from_toml(text, Path::new("duel.toml")).unwrap();

    assert_eq!(config.game.white, Some(Seat::Llm));
    assert_eq!(config.game.seed.as_deref(), Some("42"));
    assert_eq!(config.game.move_delay_ms, 1000);
    assert_eq!(config.rl.action_mapping, ActionMapping::FromTo);
    assert_eq!(config.rl.training.total_timesteps, 1000);
    assert_eq!(config.rl.training.checkpoint_freq, 100);
    assert_eq!(config.llm.backend, LlmBackend::Http);
    assert_eq!(config.llm.attempts, 1);
    assert_eq!(config.llm.cache_keying, CacheKeying::History);
    assert_eq!(config.llm.http.model, "llama3");

    let loop_config = config.game.loop_config();
    assert_eq!(loop_config.move_time, Some(Duration::from_millis(250)));
}

#[test]
fn bad_toml_is_config_error() {
    let err = DuelConfig::from_toml("[game\nwhite = ", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, ArenaError::Config { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn unknown_seat_is_rejected() {
    let err = DuelConfig::from_toml("[game]\nwhite = \"stockfish\"", Path::new("x.toml"));
    assert!(err.is_err());
}

#[test]
fn missing_explicit_file_is_io_error() {
    let err = DuelConfig::load_or_default(Some(Path::new("/nonexistent/duel.toml"))).unwrap_err();
    assert!(matches!(err, ArenaError::Io { .. }));
}
