//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::cursor::*;
use super::state::*;
use super::transition::*;
use super::*;
use crate::search::{QueryParams, SearchResults};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_businesses(max: usize) -> impl Strategy<Value = Vec<Business>> {
    (0..=max).prop_map(|n| (1..=n).map(|i| Business::named(format!("R{i}"))).collect())
}

fn arb_last_action() -> impl Strategy<Value = LastAction> {
    prop_oneof![
        Just(LastAction::None),
        Just(LastAction::SetLocation),
        Just(LastAction::FindRestaurant),
        (0usize..4).prop_map(|c| LastAction::ReadList {
            start: c * CHUNK_SIZE
        }),
        (1usize..=CHUNK_SIZE).prop_map(|position| LastAction::Details { position }),
    ]
}

/// States reachable in practice: `read` on a chunk boundary or at the end,
/// and any recorded `ReadList` start lying behind the cursor
fn arb_state() -> impl Strategy<Value = UserState> {
    let parts = (arb_businesses(17), 0usize..5, arb_last_action(), any::<bool>());
    parts.prop_map(|(businesses, chunks, last_action, has_location)| {
        let results = if businesses.is_empty() {
            None
        } else {
            let mut list = ResultSet::new(businesses);
            list.seek(chunks * CHUNK_SIZE);
            Some(list)
        };
        let read = results.as_ref().map_or(0, ResultSet::read);
        let last_action = match last_action {
            LastAction::ReadList { .. } | LastAction::Details { .. } if read == 0 => {
                LastAction::FindRestaurant
            }
            LastAction::ReadList { .. } => LastAction::ReadList {
                start: window_start(read, CHUNK_SIZE),
            },
            other => other,
        };
        UserState {
            location: has_location.then(|| "Seattle".to_string()),
            last_action,
            results,
        }
    })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::ReadList),
        Just(Event::Back),
        Just(Event::Repeat),
        Just(Event::Help),
        proptest::option::of(0usize..8).prop_map(|position| Event::Details { position }),
        arb_businesses(13).prop_map(|businesses| Event::SearchComplete {
            params: QueryParams::default().with_location("Seattle"),
            results: SearchResults {
                total: businesses.len(),
                businesses,
            },
        }),
        Just(Event::FindRestaurant {
            params: QueryParams::default()
        }),
        proptest::option::of("[0-9]{4,6}").prop_map(|zip| Event::SetLocation {
            location: None,
            zip
        }),
    ]
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_state(state: &UserState) -> bool {
    let Some(list) = &state.results else {
        return !matches!(
            state.last_action,
            LastAction::ReadList { .. } | LastAction::Details { .. }
        );
    };
    if list.is_empty() || list.read() > list.len() {
        return false;
    }
    match state.last_action {
        LastAction::ReadList { start } => {
            start % CHUNK_SIZE == 0 && start < list.read() && list.read() - start <= CHUNK_SIZE
        }
        LastAction::Details { position } => (1..=CHUNK_SIZE).contains(&position) && list.read() > 0,
        _ => true,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: window_start lands on the chunk boundary at or below read
    #[test]
    fn prop_window_start_is_enclosing_boundary(read in 0usize..500, chunk in 1usize..10) {
        let start = window_start(read, chunk);
        prop_assert_eq!(start % chunk, 0);
        if read == 0 {
            prop_assert_eq!(start, 0);
        } else {
            prop_assert!(start < read);
            prop_assert!(read - start <= chunk);
        }
    }

    // Invariant 2: advancing never passes the end and never moves backwards
    #[test]
    fn prop_advance_is_monotonic_and_bounded(length in 0usize..60, steps in 0usize..20) {
        let mut read = 0;
        for _ in 0..steps {
            let step = advance(read, length, CHUNK_SIZE);
            prop_assert!(step.read >= read);
            prop_assert!(step.read <= length);
            prop_assert_eq!(step.read - read, step.count);
            prop_assert!(step.count <= CHUNK_SIZE);
            read = step.read;
        }
    }

    // Invariant 3: rewinding always reaches the start of the list
    #[test]
    fn prop_rewind_terminates_at_zero(read in 0usize..500) {
        let mut cursor = read;
        let mut steps = 0;
        while cursor > 0 {
            let next = rewind_one_chunk(cursor, CHUNK_SIZE);
            prop_assert!(next < cursor);
            cursor = next;
            steps += 1;
        }
        prop_assert!(steps <= read / CHUNK_SIZE + 1);
    }

    // Invariant 4: positions outside the chunk are never read
    #[test]
    fn prop_details_outside_chunk_is_invalid(
        state in arb_state(),
        position in prop_oneof![Just(0usize), (CHUNK_SIZE + 1)..50],
    ) {
        let result = transition(&state, Event::Details { position: Some(position) });
        let rejected_as_invalid = matches!(result, Err(TransitionError::InvalidOption { .. }));
        let precondition_failed = matches!(
            result,
            Err(TransitionError::NoListForDetails | TransitionError::NothingReadYet)
        );
        prop_assert!(rejected_as_invalid || precondition_failed, "got {:?}", result);
    }

    // Invariant 5: repeat after a read reproduces the same narration
    #[test]
    fn prop_repeat_replays_read_list(state in arb_state()) {
        if let Ok(read) = transition(&state, Event::ReadList) {
            let repeated = transition(&read.new_state, Event::Repeat).unwrap();
            prop_assert_eq!(&read.reply, &repeated.reply);
            prop_assert_eq!(&read.new_state, &repeated.new_state);
        }
    }

    // Invariant 6: valid state after any sequence of transitions
    #[test]
    fn prop_transitions_preserve_validity(
        start in arb_state(),
        events in proptest::collection::vec(arb_event(), 0..25),
    ) {
        let mut state = start;
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
                prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
            }
        }
    }

    // Invariant 7: PersistState is emitted exactly when the state changed
    #[test]
    fn prop_state_changes_persist(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, event) {
            let persisted = result.effects.iter().any(|e| matches!(e, Effect::PersistState));
            prop_assert_eq!(
                persisted,
                result.new_state != state,
                "{:?} -> {:?}",
                state,
                result.new_state
            );
        }
    }

    // Invariant 8: every accepted event except FindRestaurant has something to say
    #[test]
    fn prop_accepted_turns_reply(state in arb_state(), event in arb_event()) {
        let searching = matches!(event, Event::FindRestaurant { .. });
        if let Ok(result) = transition(&state, event) {
            if searching {
                let searched = result.effects.iter().any(|e| matches!(e, Effect::Search { .. }));
                prop_assert!(result.reply.is_none());
                prop_assert!(searched);
            } else {
                prop_assert!(result.reply.is_some());
            }
        }
    }

    // Invariant 9: Details and Repeat never move the cursor forward
    #[test]
    fn prop_details_and_repeat_do_not_advance(
        state in arb_state(),
        position in 1usize..=CHUNK_SIZE,
    ) {
        let before = state.results.as_ref().map_or(0, ResultSet::read);
        for event in [Event::Details { position: Some(position) }, Event::Repeat] {
            if let Ok(result) = transition(&state, event) {
                let after = result.new_state.results.as_ref().map_or(0, ResultSet::read);
                prop_assert!(after <= before, "{} -> {}", before, after);
            }
        }
    }
}

#[test]
fn test_scenario_twelve_items_back_and_details() {
    let mut list = ResultSet::new((1..=12).map(|i| Business::named(format!("R{i}"))).collect());
    list.seek(10);
    let state = UserState {
        location: None,
        last_action: LastAction::ReadList { start: 5 },
        results: Some(list),
    };

    let details = transition(&state, Event::Details { position: Some(3) }).unwrap();
    assert!(details.reply.unwrap().text().starts_with("R8 "));

    let back = transition(&state, Event::Back).unwrap();
    assert_eq!(back.new_state.last_action, LastAction::ReadList { start: 0 });
}
