//! Integration tests for the replay engine round trip
//!
//! Walks a full guessing game through `serve_start`/`serve_continue`, one
//! token per request, the way a stateless front end would.

use super::common::{payload, scripted_engine};
use retrace::routine::{ActionKind, Value};
use retrace::{ReplayError, Status, Token};

/// The name, two guesses and a "no" produce tokens 1 through 5.
#[test]
fn test_full_game_one_token_per_round_trip() {
    let (engine, random) = scripted_engine(&[42]);

    let start = engine.serve_start().unwrap();
    assert_eq!(start.token, Token::new(1));
    assert!(start.transcript.is_empty());
    assert_eq!(start.prompt().unwrap().field, "name");

    let greeted = engine
        .serve_continue(start.token, &payload(&[("name", "Ada")]))
        .unwrap();
    assert_eq!(greeted.token, Token::new(2));
    assert_eq!(
        greeted.transcript,
        vec![
            "Hello, Ada.".to_string(),
            "I am thinking of a number between 1 and 100.".to_string(),
        ]
    );
    assert_eq!(greeted.prompt().unwrap().field, "guess");

    let high = engine
        .serve_continue(greeted.token, &payload(&[("guess", "50")]))
        .unwrap();
    assert_eq!(high.token, Token::new(3));
    assert_eq!(high.transcript, vec!["Try lower.".to_string()]);

    let correct = engine
        .serve_continue(high.token, &payload(&[("guess", "42")]))
        .unwrap();
    assert_eq!(correct.token, Token::new(4));
    assert_eq!(correct.transcript, vec!["Correct in 2 guesses.".to_string()]);
    assert_eq!(correct.prompt().unwrap().field, "choice");

    let done = engine
        .serve_continue(correct.token, &payload(&[("choice", "no")]))
        .unwrap();
    assert_eq!(done.token, Token::new(5));
    assert_eq!(done.transcript, vec!["Thank you for playing.".to_string()]);
    assert_eq!(done.status, Status::Done);

    // The secret was drawn once and replayed from the log afterwards.
    assert_eq!(random.draws(), 1);
}

/// Each round trip replays exactly what the previous one logged.
#[test]
fn test_replayed_count_grows_with_history() {
    let (engine, _) = scripted_engine(&[7]);

    let start = engine.serve_start().unwrap();
    assert_eq!(start.replayed, 0);

    let greeted = engine
        .serve_continue(start.token, &payload(&[("name", "Ada")]))
        .unwrap();
    assert_eq!(greeted.replayed, 0);

    // name, greeting, range line, secret
    let history = engine.history(greeted.token).unwrap();
    assert_eq!(history.logged.len(), 4);
    assert!(history.is_suspended());
    assert_eq!(history.logged[0].kind, ActionKind::Prompt);
    assert_eq!(history.logged[0].value, Value::Text("Ada".into()));
    assert_eq!(history.logged[3].kind, ActionKind::Random);
    assert_eq!(history.logged[3].value, Value::Int(7));

    let next = engine
        .serve_continue(greeted.token, &payload(&[("guess", "3")]))
        .unwrap();
    assert_eq!(next.replayed, 4);
}

/// Continuing a finished history is allowed and changes nothing.
#[test]
fn test_finished_session_stays_finished() {
    let (engine, random) = scripted_engine(&[5]);
    let mut token = engine.serve_start().unwrap().token;
    for (field, value) in [("name", "Ada"), ("guess", "5"), ("choice", "n")] {
        token = engine
            .serve_continue(token, &payload(&[(field, value)]))
            .unwrap()
            .token;
    }
    let finished = engine.history(token).unwrap();
    assert!(!finished.is_suspended());

    let again = engine
        .serve_continue(token, &payload(&[("guess", "9")]))
        .unwrap();
    assert_eq!(again.status, Status::Done);
    assert!(again.transcript.is_empty());
    assert_eq!(engine.history(again.token).unwrap(), finished);
    assert_eq!(random.draws(), 1);
}

/// Answering the same token twice forks two independent branches.
#[test]
fn test_branches_from_one_token_are_independent() {
    let (engine, _) = scripted_engine(&[42]);
    let start = engine.serve_start().unwrap();
    let greeted = engine
        .serve_continue(start.token, &payload(&[("name", "Ada")]))
        .unwrap();

    let low = engine
        .serve_continue(greeted.token, &payload(&[("guess", "10")]))
        .unwrap();
    let high = engine
        .serve_continue(greeted.token, &payload(&[("guess", "90")]))
        .unwrap();

    assert_ne!(low.token, high.token);
    assert_eq!(low.transcript, vec!["Try higher.".to_string()]);
    assert_eq!(high.transcript, vec!["Try lower.".to_string()]);

    // The forked-from history is untouched.
    assert_eq!(engine.history(greeted.token).unwrap().logged.len(), 4);
}

/// The next token to be written is in the future and must be rejected.
#[test]
fn test_future_token_is_rejected() {
    let (engine, _) = scripted_engine(&[42]);
    engine.serve_start().unwrap();

    let future = Token::new(engine.store().len() as u64);
    let err = engine
        .serve_continue(future, &payload(&[("name", "Ada")]))
        .unwrap_err();
    assert!(matches!(err, ReplayError::UnknownToken(_)));
    assert!(err.is_client_error());
    assert_eq!(engine.store().len(), 2);
}

/// A rejected answer appends nothing; the same token can be answered again.
#[test]
fn test_malformed_answer_can_be_retried() {
    let (engine, _) = scripted_engine(&[42]);
    let start = engine.serve_start().unwrap();
    let greeted = engine
        .serve_continue(start.token, &payload(&[("name", "Ada")]))
        .unwrap();
    let before = engine.store().len();

    let err = engine
        .serve_continue(greeted.token, &payload(&[("guess", "fifty")]))
        .unwrap_err();
    match err {
        ReplayError::MalformedPayload { token, prompt, .. } => {
            assert_eq!(token, greeted.token);
            assert_eq!(prompt.field, "guess");
        }
        other => panic!("expected malformed payload, got {other:?}"),
    }
    assert_eq!(engine.store().len(), before);

    let retried = engine
        .serve_continue(greeted.token, &payload(&[("guess", "42")]))
        .unwrap();
    assert_eq!(retried.transcript, vec!["Correct in 1 guesses.".to_string()]);
}

/// "Play again" draws a fresh secret for the second round only.
#[test]
fn test_second_round_draws_new_secret() {
    let (engine, random) = scripted_engine(&[10, 20]);
    let mut token = engine.serve_start().unwrap().token;
    for (field, value) in [("name", "Ada"), ("guess", "10"), ("choice", "yes")] {
        token = engine
            .serve_continue(token, &payload(&[(field, value)]))
            .unwrap()
            .token;
    }
    assert_eq!(random.draws(), 2);

    let second = engine
        .serve_continue(token, &payload(&[("guess", "20")]))
        .unwrap();
    assert_eq!(second.transcript, vec!["Correct in 1 guesses.".to_string()]);
    assert_eq!(random.draws(), 2);
}
