//! Pure state transition function
//!
//! Given the state loaded at the start of a turn and one event, decide the
//! next state, what to say, and which effects the runtime must run. No I/O
//! happens here; a rejected event leaves the state untouched.

use super::cursor::{self, CHUNK_SIZE};
use super::state::{Business, LastAction, ResultSet, UserState};
use super::{Effect, Event};
use crate::search::{is_zip_code, QueryParams, SearchResults};
use crate::speech::{self, Reply};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: UserState,
    pub reply: Option<Reply>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: UserState) -> Self {
        Self {
            new_state: state,
            reply: None,
            effects: vec![],
        }
    }

    /// New state, persisted only if it differs from `old`
    fn changed(old: &UserState, new_state: UserState) -> Self {
        let persist = new_state != *old;
        let result = Self::new(new_state);
        if persist {
            result.with_effect(Effect::PersistState)
        } else {
            result
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.reply = Some(reply);
        self
    }
}

/// Why an event was rejected. The message is the spoken guidance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("As a new user, please specify your location by saying Set Location.")]
    LocationRequired,
    #[error("Please specify a city name or five-digit ZIP code as your preferred location.")]
    InvalidLocation,
    #[error("Please ask for a set of restaurants before asking me to read the list.")]
    NoList,
    #[error("You are at the end of the list. Please ask for a new set of restaurants.")]
    EndOfList,
    #[error("I can't go back from this point. Please ask for a new set of restaurants.")]
    CannotGoBack,
    #[error("Please ask for a set of restaurants before asking for details.")]
    NoListForDetails,
    #[error("Please ask to start reading the list before asking for details.")]
    NothingReadYet,
    #[error("I'm sorry, I didn't hear a number of the restaurant you wanted details about.")]
    MissingPosition,
    #[error("{position} is not a valid option to read.")]
    InvalidOption { position: usize },
    #[error("You can say repeat after you've read a list of restaurants or details on a specific restaurant.")]
    NothingToRepeat,
    #[error("I'm sorry, I didn't find any {description}.")]
    NoResults { description: String },
    #[error("I'm sorry, I couldn't reach the restaurant search service. Please try again in a moment.")]
    SearchUnavailable,
}

impl TransitionError {
    /// How the rejection is spoken
    pub fn reply(&self) -> Reply {
        match self {
            TransitionError::InvalidOption { .. } => {
                let reprompt = "Please ask for a valid number or say repeat to repeat the list.";
                Reply::question(format!("{self} {reprompt}"), reprompt)
            }
            TransitionError::NoResults { .. } => Reply::statement(self.to_string()),
            _ => Reply::error(self.to_string()),
        }
    }
}

/// Pure transition function
pub fn transition(state: &UserState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Launch => Ok(TransitionResult::new(state.clone()).with_reply(speech::welcome())),
        Event::Help => Ok(TransitionResult::new(state.clone()).with_reply(speech::help())),
        Event::Stop => Ok(TransitionResult::new(state.clone()).with_reply(speech::goodbye())),

        // ============================================================
        // Search
        // ============================================================
        Event::FindRestaurant { params } => {
            let location = params
                .location
                .clone()
                .or_else(|| state.location.clone())
                .ok_or(TransitionError::LocationRequired)?;
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::Search {
                params: params.with_location(location),
            }))
        }

        Event::SearchComplete { params, results } => search_complete(state, &params, results),

        Event::SearchFailed { message } => {
            tracing::debug!(error = %message, "Search failed, nothing to replace");
            Err(TransitionError::SearchUnavailable)
        }

        // ============================================================
        // Preferences
        // ============================================================
        Event::SetLocation { location, zip } => {
            let location = match (
                location.filter(|l| !l.trim().is_empty()),
                zip.filter(|z| !z.is_empty()),
            ) {
                (Some(location), _) => location,
                (None, Some(zip)) if is_zip_code(&zip) => zip,
                _ => return Err(TransitionError::InvalidLocation),
            };

            let reply = speech::location_set(&location);
            let mut next = state.clone();
            next.location = Some(location);
            next.last_action = LastAction::SetLocation;
            Ok(TransitionResult::changed(state, next).with_reply(reply))
        }

        // ============================================================
        // List navigation
        // ============================================================
        Event::ReadList => read_list(state),
        Event::Back => back(state),
        Event::Details { position } => {
            let position = position.ok_or(TransitionError::MissingPosition)?;
            let business = lookup(state, position)?;
            let reply = speech::describe_business(business);

            let mut next = state.clone();
            next.last_action = LastAction::Details { position };
            Ok(TransitionResult::changed(state, next).with_reply(reply))
        }
        Event::Repeat => repeat(state),
    }
}

fn search_complete(
    state: &UserState,
    params: &QueryParams,
    results: SearchResults,
) -> Result<TransitionResult, TransitionError> {
    let total = results.total;
    let mut list = ResultSet::new(results.businesses);
    if list.is_empty() {
        return Err(TransitionError::NoResults {
            description: speech::describe_query(params),
        });
    }

    let mut next = state.clone();
    let reply = if list.len() <= CHUNK_SIZE {
        let step = list.advance();
        next.last_action = LastAction::ReadList { start: step.start() };
        speech::narrate(&list, step)
    } else {
        next.last_action = LastAction::FindRestaurant;
        speech::found(total, params)
    };
    next.results = Some(list);

    Ok(TransitionResult::changed(state, next).with_reply(reply))
}

fn read_list(state: &UserState) -> Result<TransitionResult, TransitionError> {
    let mut next = state.clone();
    let list = next
        .results
        .as_mut()
        .filter(|r| !r.is_empty())
        .ok_or(TransitionError::NoList)?;

    // After details, re-read the chunk they came from
    if matches!(state.last_action, LastAction::Details { .. }) {
        list.snap_to_window();
    }
    if list.read() >= list.len() {
        return Err(TransitionError::EndOfList);
    }

    let step = list.advance();
    let reply = speech::narrate(list, step);
    next.last_action = LastAction::ReadList { start: step.start() };
    Ok(TransitionResult::changed(state, next).with_reply(reply))
}

fn back(state: &UserState) -> Result<TransitionResult, TransitionError> {
    let mut next = state.clone();
    let list = next
        .results
        .as_mut()
        .filter(|r| !r.is_empty())
        .ok_or(TransitionError::CannotGoBack)?;

    match state.last_action {
        LastAction::ReadList { .. } => list.rewind(),
        LastAction::Details { .. } => list.snap_to_window(),
        _ => return Err(TransitionError::CannotGoBack),
    }

    let step = list.advance();
    let reply = speech::narrate(list, step);
    next.last_action = LastAction::ReadList { start: step.start() };
    Ok(TransitionResult::changed(state, next).with_reply(reply))
}

fn repeat(state: &UserState) -> Result<TransitionResult, TransitionError> {
    match state.last_action {
        LastAction::ReadList { start } => {
            let mut next = state.clone();
            let list = next
                .results
                .as_mut()
                .filter(|r| !r.is_empty())
                .ok_or(TransitionError::NothingToRepeat)?;
            list.seek(start);
            let step = list.advance();
            let reply = speech::narrate(list, step);
            Ok(TransitionResult::changed(state, next).with_reply(reply))
        }
        LastAction::Details { position } => {
            let reply = speech::describe_business(lookup(state, position)?);
            Ok(TransitionResult::new(state.clone()).with_reply(reply))
        }
        _ => Err(TransitionError::NothingToRepeat),
    }
}

/// The business at a spoken position in the last narrated chunk
fn lookup(state: &UserState, position: usize) -> Result<&Business, TransitionError> {
    let list = state
        .non_empty_results()
        .ok_or(TransitionError::NoListForDetails)?;
    if list.read() == 0 {
        return Err(TransitionError::NothingReadYet);
    }

    let index = cursor::resolve_position(list.read(), position, list.len(), CHUNK_SIZE)
        .map_err(|e| TransitionError::InvalidOption {
            position: e.position,
        })?;
    list.get(index)
        .ok_or(TransitionError::InvalidOption { position })
}
