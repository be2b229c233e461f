//! Turn runtime executor

use super::traits::SessionStore;

use crate::search::{QueryParams, SearchProvider};
use crate::speech::{self, Reply};
use crate::state_machine::{transition, Effect, Event, UserState};
use std::sync::Arc;
use tracing::Instrument;

/// Runs one user turn: load, transition, execute effects, save.
///
/// Turns are independent of each other. A search effect feeds its outcome
/// back into the state machine within the same turn, and the state is saved
/// at most once, after the last accepted transition.
pub struct TurnRuntime<S, P>
where
    S: SessionStore + 'static,
    P: SearchProvider + ?Sized + 'static,
{
    storage: S,
    search: Arc<P>,
}

impl<S, P> TurnRuntime<S, P>
where
    S: SessionStore + 'static,
    P: SearchProvider + ?Sized + 'static,
{
    pub fn new(storage: S, search: Arc<P>) -> Self {
        Self { storage, search }
    }

    /// Handle one event for a user and return what to say
    pub async fn handle_turn(&self, user_id: &str, event: Event) -> Reply {
        let turn_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("turn", %turn_id, user_id = %user_id, event = event.name());
        self.run_turn(user_id, event).instrument(span).await
    }

    async fn run_turn(&self, user_id: &str, event: Event) -> Reply {
        let mut state = match self.storage.load(user_id).await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load session state");
                return speech::apology();
            }
        };

        let mut event = event;
        let mut persist = false;
        let reply = loop {
            let result = match transition(&state, event) {
                Ok(result) => result,
                Err(rejection) => {
                    tracing::info!(reason = ?rejection, "Event rejected");
                    return rejection.reply();
                }
            };
            state = result.new_state;

            let mut follow_up = None;
            for effect in result.effects {
                match effect {
                    Effect::Search { params } => follow_up = Some(self.run_search(params).await),
                    Effect::PersistState => persist = true,
                }
            }

            match follow_up {
                Some(next) => event = next,
                None => break result.reply,
            }
        };

        if persist {
            self.persist(user_id, &state).await;
        }

        reply.unwrap_or_else(|| {
            tracing::warn!("Turn finished without a reply");
            speech::apology()
        })
    }

    async fn run_search(&self, params: QueryParams) -> Event {
        match self.search.search(&params).await {
            Ok(results) => Event::SearchComplete { params, results },
            Err(e) => Event::SearchFailed {
                message: e.to_string(),
            },
        }
    }

    // The reply is still delivered when saving fails; the next turn sees the
    // previously stored state.
    async fn persist(&self, user_id: &str, state: &UserState) {
        if let Err(e) = self.storage.save(user_id, state).await {
            tracing::error!(user_id = %user_id, error = %e, "Failed to persist session state");
        }
    }
}
