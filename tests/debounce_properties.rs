//! Property-based tests for suggestion debouncing.
//!
//! Tests validate:
//! 1. A burst of keystrokes produces exactly one suggestion fetch, for the
//!    final query
//! 2. Pausing between bursts produces one fetch per burst
//! 3. Request ids are strictly increasing across any event sequence

use proptest::prelude::*;
use shopsearch::api::{ApiRequest, Endpoint};
use shopsearch::{handle_event, Action, AppState, Event, Theme};

fn fetches(actions: Vec<Action>) -> Vec<ApiRequest> {
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::Fetch(request) => Some(request),
            _ => None,
        })
        .collect()
}

/// Sends `event` and returns the requests it issued.
fn send(state: &mut AppState, event: &Event) -> Vec<ApiRequest> {
    let (_, actions) = handle_event(state, event).expect("handler never fails");
    fetches(actions)
}

/// Types `text`, one timer per keystroke, and returns the timers started.
fn type_burst(state: &mut AppState, text: &str) -> usize {
    let mut timers = 0;
    for c in text.chars() {
        let (_, actions) = handle_event(state, &Event::Char(c)).expect("handler never fails");
        timers += actions
            .iter()
            .filter(|a| matches!(a, Action::StartTimer { .. }))
            .count();
    }
    timers
}

fn fire_timers(state: &mut AppState, count: usize) -> Vec<ApiRequest> {
    (0..count)
        .flat_map(|_| send(state, &Event::DebounceElapsed))
        .collect()
}

// ===== Property 1: Burst collapse =====

proptest! {
    #[test]
    fn burst_fetches_once_with_final_query(text in "[a-z ]{1,16}") {
        let mut state = AppState::new(Theme::default());
        let timers = type_burst(&mut state, &text);
        prop_assert_eq!(timers, text.chars().count());

        let requests = fire_timers(&mut state, timers);
        prop_assert_eq!(requests.len(), 1);
        prop_assert_eq!(&requests[0].endpoint, &Endpoint::Suggestions { query: text.clone() });
    }
}

// ===== Property 2: One fetch per quiet period =====

proptest! {
    #[test]
    fn each_pause_fetches_accumulated_query(bursts in prop::collection::vec("[a-z]{1,5}", 1..6)) {
        let mut state = AppState::new(Theme::default());
        let mut expected = String::new();

        for burst in &bursts {
            expected.push_str(burst);
            let timers = type_burst(&mut state, burst);
            let requests = fire_timers(&mut state, timers);

            prop_assert_eq!(requests.len(), 1);
            prop_assert_eq!(requests[0].endpoint.query(), Some(expected.as_str()));
        }
    }
}

// ===== Property 3: Monotonic request ids =====

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Ready),
        Just(Event::Refresh),
        Just(Event::Submit),
        Just(Event::Backspace),
        Just(Event::Clear),
        Just(Event::DebounceElapsed),
        Just(Event::SelectNext),
        "[a-z]".prop_map(|s| Event::Char(s.chars().next().unwrap_or('a'))),
        "[a-z]{1,6}".prop_map(Event::SelectItem),
    ]
}

proptest! {
    #[test]
    fn request_ids_strictly_increase(events in prop::collection::vec(event_strategy(), 1..40)) {
        let mut state = AppState::new(Theme::default());
        let mut last = None;

        for event in &events {
            for request in send(&mut state, event) {
                if let Some(previous) = last {
                    prop_assert!(request.id > previous);
                }
                last = Some(request.id);
            }
        }
    }
}
