use super::*;
use crate::seat::Seat;

fn sample() -> GameReport {
    GameReport {
        seed: 42,
        seating: Seating::new(Seat::Llm),
        result: "0-1".to_string(),
        termination: Some("checkmate".to_string()),
        moves: vec!["f2f3".into(), "e7e5".into(), "g2g4".into(), "d8h4".into()],
        history: vec![
            "LLM: f2f3".into(),
            "RL: e7e5".into(),
            "LLM: g2g4".into(),
            "RL: d8h4".into(),
        ],
        start_fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".into(),
        final_fen: "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".into(),
        fallbacks: 0,
        duration_secs: 1.5,
    }
}

#[test]
fn save_and_load() {
    let path = std::env::temp_dir().join(format!("arena_report_{}.json", std::process::id()));
    let report = sample();
    report.save(&path).unwrap();

    let loaded = GameReport::load(&path).unwrap();
    assert_eq!(loaded, report);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn seating_is_stored_lowercase() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["seating"]["white"], "llm");
    assert_eq!(json["result"], "0-1");
}

#[test]
fn summary_mentions_result_and_players() {
    let summary = sample().generate_summary();
    assert!(summary.contains("LLM (White) vs RL (Black)"));
    assert!(summary.contains("Result: 0-1 (checkmate)"));
    assert!(summary.contains("Moves: 4"));
    assert!(!summary.contains("Fallback"));
}

#[test]
fn unfinished_game() {
    let report = GameReport {
        result: "*".into(),
        termination: None,
        ..sample()
    };
    assert!(!report.is_finished());
    assert!(sample().is_finished());
}
