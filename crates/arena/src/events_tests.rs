use super::*;
use std::io::Cursor;

fn drain_until_closed(events: &mut StdinEvents) -> Vec<UiEvent> {
    let mut seen = Vec::new();
    loop {
        match events.wait(Duration::from_millis(200)) {
            Some(UiEvent::InputClosed) => return seen,
            Some(e) => seen.push(e),
            None => {}
        }
    }
}

#[test]
fn quit_lines_become_events() {
    let mut events = StdinEvents::from_reader(Cursor::new("hello\nq\n  QUIT \n"));
    assert_eq!(drain_until_closed(&mut events), vec![UiEvent::Quit, UiEvent::Quit]);
}

#[test]
fn end_of_input_reports_closed() {
    let mut events = StdinEvents::from_reader(Cursor::new(""));
    assert!(drain_until_closed(&mut events).is_empty());
    assert_eq!(events.poll(), Some(UiEvent::InputClosed));
}

#[test]
fn no_events_never_fires() {
    let mut events = NoEvents;
    assert_eq!(events.poll(), None);
    assert_eq!(events.wait(Duration::from_millis(1)), None);
}

#[test]
fn quit_words() {
    assert!(is_quit("q"));
    assert!(is_quit("Exit\n"));
    assert!(!is_quit("e2e4"));
}
