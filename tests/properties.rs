use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use typeracer::game::events::GameEventData;
use typeracer::game::lanes::SPAWN_MARGIN;
use typeracer::game::stats::SessionStats;
use typeracer::game::tick::{replay_session, tick, tick_action, TickAction};
use typeracer::{Dictionary, Keystroke, KeystrokeScript, PlayField, SessionParams, SessionPhase, SessionState};

const WORDS: [&str; 8] = ["OX", "CAT", "DOG", "LLAMA", "WALRUS", "GIRAFFE", "ELEPHANT", "HIPPOPOTAMUS"];

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).unwrap()
}

fn dictionary() -> Dictionary {
    Dictionary::new(WORDS, Path::new("props.dic")).unwrap()
}

fn keystroke() -> impl Strategy<Value = Keystroke> {
    prop_oneof![
        8 => prop::sample::select(vec!['a', 'c', 'd', 'e', 'g', 'l', 'o', 't', 'x', 'w']).prop_map(Keystroke::Char),
        1 => Just(Keystroke::Backspace),
        1 => Just(Keystroke::Clear),
    ]
}

fn script() -> impl Strategy<Value = KeystrokeScript> {
    prop::collection::vec((1u64..40, keystroke()), 0..200).prop_map(|steps| {
        let mut script = KeystrokeScript::new();
        let mut at = 0;
        for (gap, key) in steps {
            at += gap;
            script.record(at, key);
        }
        script
    })
}

fn params() -> impl Strategy<Value = SessionParams> {
    (any::<u32>(), 50u32..=120, 50u32..=300).prop_map(|(seed, tempo, frequency)| SessionParams::new(seed, tempo, frequency))
}

fn field() -> impl Strategy<Value = PlayField> {
    (30u16..=100, 1u16..=8).prop_map(|(width, lanes)| PlayField::new(width, lanes))
}

proptest! {
    #[test]
    fn replay_is_deterministic(params in params(), field in field(), script in script()) {
        let dictionary = dictionary();
        let (a, a_events) = replay_session(params, field, &dictionary, &script, 6_000, epoch());
        let (b, b_events) = replay_session(params, field, &dictionary, &script, 6_000, epoch());

        prop_assert_eq!(a.compute_hash(), b.compute_hash());
        prop_assert_eq!(a_events, b_events);
    }

    #[test]
    fn spawn_wins_ties(tick_no in 0u64..1_000_000, tempo in 50u32..=500, frequency in 50u32..=500) {
        let params = SessionParams::new(1, tempo, frequency);
        let expected = if tick_no % frequency as u64 == 0 {
            TickAction::Spawn
        } else if tick_no % tempo as u64 == 0 {
            TickAction::Move
        } else {
            TickAction::Idle
        };
        prop_assert_eq!(tick_action(tick_no, &params), expected);
    }

    #[test]
    fn spawns_keep_lane_margin(params in params(), field in field(), script in script()) {
        let dictionary = dictionary();
        let mut state = SessionState::new(params, field, epoch());

        while state.tick < 6_000 && !state.is_ended() {
            let key = script.key_at(state.tick);
            let result = tick(&mut state, &dictionary, key);

            for event in &result.events {
                if let GameEventData::WordSpawned { word_id, text, lane } = &event.data {
                    prop_assert!(*lane < field.lanes());
                    let new_len = text.chars().count() as u32;
                    for other in state.live_words().filter(|w| w.lane == *lane && w.id != *word_id) {
                        prop_assert!(u32::from(other.position) >= new_len + SPAWN_MARGIN);
                    }
                }
            }
        }
    }

    #[test]
    fn lives_fall_until_game_over(params in params(), field in field(), script in script()) {
        // Scripts never contain Quit, so the only way out is running out of lives.
        let dictionary = dictionary();
        let mut state = SessionState::new(params, field, epoch());
        let mut lives = state.lives;

        while state.tick < 6_000 && !state.is_ended() {
            let key = script.key_at(state.tick);
            let result = tick(&mut state, &dictionary, key);
            prop_assert!(state.lives <= lives);
            lives = state.lives;

            let game_over = state.is_ended() && state.phase == SessionPhase::GameOver;
            prop_assert_eq!(game_over, state.lives == 0);
            prop_assert_eq!(result.session_ended, state.lives == 0);
        }
    }

    #[test]
    fn score_is_sum_of_typed_lengths(params in params(), field in field(), script in script()) {
        let dictionary = dictionary();
        let (state, events) = replay_session(params, field, &dictionary, &script, 6_000, epoch());

        let mut total = 0u32;
        let mut words = 0u32;
        for event in &events {
            if let GameEventData::WordTyped { text, points, .. } = &event.data {
                prop_assert_eq!(*points, text.chars().count() as u32);
                total += points;
                words += 1;
            }
        }
        prop_assert_eq!(state.score, total);
        prop_assert_eq!(state.words_completed, words);
    }

    #[test]
    fn accuracy_never_exceeds_hundred(score in 0u32..100_000, words in 0u32..10_000, wasted in 0u64..100_000, elapsed in 0u64..100_000) {
        let stats = SessionStats::compute(score, words, wasted, elapsed);
        prop_assert!(stats.accuracy <= 100.0);
        if wasted == 0 {
            prop_assert_eq!(stats.accuracy, 100.0);
        }
    }

    #[test]
    fn buffer_stays_bounded(script in script()) {
        let dictionary = dictionary();
        let mut state = SessionState::new(SessionParams::new(3, 500, 500), PlayField::new(80, 22), epoch());

        while state.tick < 6_000 && !state.is_ended() {
            let key = script.key_at(state.tick);
            tick(&mut state, &dictionary, key);
            prop_assert!(state.input.len() <= 19);
            prop_assert_eq!(state.input.as_str(), state.input.as_str().to_uppercase());
        }
    }
}
