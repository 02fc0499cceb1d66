//! Property tests for replay determinism
//!
//! Two engines fed the same answers must write identical histories, and
//! replaying a history must never touch the random source again.

use proptest::prelude::*;

use super::common::{payload, scripted_engine};
use retrace::{Outcome, ReplayEngine, Token};

/// Guesses that never hit `secret`, followed by the secret itself.
fn arb_game() -> impl Strategy<Value = (i64, Vec<i64>)> {
    (1i64..=100).prop_flat_map(|secret| {
        let miss = (1i64..=100).prop_filter("miss", move |g| *g != secret);
        (Just(secret), prop::collection::vec(miss, 0..8))
    })
}

/// Play one game to completion; returns every outcome in order.
fn play(engine: &ReplayEngine, secret: i64, misses: &[i64]) -> Vec<Outcome> {
    let mut outcomes = vec![engine.serve_start().unwrap()];
    let answer = |field: &str, value: String, outcomes: &mut Vec<Outcome>| {
        let token = outcomes.last().map(|o| o.token).unwrap_or(Token::ROOT);
        let next = engine
            .serve_continue(token, &payload(&[(field, value.as_str())]))
            .unwrap();
        outcomes.push(next);
    };

    answer("name", "Ada".to_string(), &mut outcomes);
    for guess in misses {
        answer("guess", guess.to_string(), &mut outcomes);
    }
    answer("guess", secret.to_string(), &mut outcomes);
    answer("choice", "n".to_string(), &mut outcomes);
    outcomes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Same answers, same histories at every token.
    #[test]
    fn prop_histories_are_deterministic((secret, misses) in arb_game()) {
        let (first, _) = scripted_engine(&[secret]);
        let (second, _) = scripted_engine(&[secret]);

        let a = play(&first, secret, &misses);
        let b = play(&second, secret, &misses);

        prop_assert_eq!(&a, &b);
        for outcome in &a {
            prop_assert_eq!(
                first.history(outcome.token).unwrap(),
                second.history(outcome.token).unwrap()
            );
        }
    }

    /// One draw per round no matter how many replays it took.
    #[test]
    fn prop_replay_never_redraws((secret, misses) in arb_game()) {
        let (engine, random) = scripted_engine(&[secret]);
        let outcomes = play(&engine, secret, &misses);

        prop_assert_eq!(random.draws(), 1);
        let last = outcomes.last().unwrap();
        prop_assert!(last.is_done());
        let verdict = format!("Correct in {} guesses.", misses.len() + 1);
        prop_assert!(outcomes.iter().any(|o| o.transcript.contains(&verdict)));
    }

    /// Every write lands on the next free token.
    #[test]
    fn prop_tokens_are_sequential((secret, misses) in arb_game()) {
        let (engine, _) = scripted_engine(&[secret]);
        let outcomes = play(&engine, secret, &misses);

        for (i, outcome) in outcomes.iter().enumerate() {
            prop_assert_eq!(outcome.token, Token::new(i as u64 + 1));
        }
        prop_assert_eq!(engine.store().len(), outcomes.len() + 1);
    }
}
