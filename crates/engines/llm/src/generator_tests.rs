use super::*;

#[test]
fn url_appends_completions_path() {
    let generator = HttpGenerator::new(HttpSettings {
        endpoint: "http://localhost:11434/".to_string(),
        ..HttpSettings::default()
    });
    assert_eq!(generator.url(), "http://localhost:11434/v1/completions");
}

#[test]
fn zero_timeout_fails_without_a_request() {
    // Nothing listens on port 9; the zero budget must short-circuit first
    let mut generator = HttpGenerator::new(HttpSettings {
        endpoint: "http://127.0.0.1:9".to_string(),
        ..HttpSettings::default()
    });
    let err = generator.generate("Move:", 10, Some(Duration::ZERO)).unwrap_err();
    assert!(matches!(err, GenerateError::OutOfTime));
}

#[test]
fn request_body_shape() {
    let body = CompletionRequest {
        model: "m",
        prompt: "p",
        max_tokens: 10,
        temperature: 0.5,
        stop: ["\n"],
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["max_tokens"], 10);
    assert_eq!(json["stop"][0], "\n");
}

#[test]
fn response_takes_first_choice() {
    let parsed: CompletionResponse =
        serde_json::from_str(r#"{"choices":[{"text":" e2e4"},{"text":"d2d4"}]}"#).unwrap();
    assert_eq!(parsed.choices[0].text, " e2e4");
}

#[test]
fn settings_fill_defaults() {
    let s: HttpSettings = serde_json::from_str(r#"{"model":"llama3"}"#).unwrap();
    assert_eq!(s.model, "llama3");
    assert_eq!(s.endpoint, HttpSettings::default().endpoint);
}
