//! Dialog transport
//!
//! Parses the voice platform's webhook envelope into state machine events and
//! formats replies back into the platform's response shape.

mod request;
mod response;

pub use request::PlatformRequest;
pub use response::{render, PlatformResponse};

use crate::search::QueryParams;
use crate::state_machine::Event;
use request::{Intent, RequestBody};
use thiserror::Error;

const DESCRIPTOR_SLOTS: [&str; 3] = ["FirstDescriptor", "SecondDescriptor", "ThirdDescriptor"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request has no user id")]
    MissingUser,
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
    #[error("Unsupported request type")]
    UnsupportedRequest,
}

/// What one platform request asks of the skill
#[derive(Debug)]
pub enum Turn {
    /// Run an event through the state machine for this user
    Event { user_id: String, event: Event },
    /// The platform closed the session; nothing to say
    SessionEnded { reason: Option<String> },
}

/// Map a platform request to a turn
pub fn parse_turn(request: &PlatformRequest) -> Result<Turn, TransportError> {
    let event = match &request.request {
        RequestBody::SessionEndedRequest { reason } => {
            return Ok(Turn::SessionEnded {
                reason: reason.clone(),
            })
        }
        RequestBody::LaunchRequest => Event::Launch,
        RequestBody::IntentRequest { intent } => intent_event(intent)?,
        RequestBody::Unsupported => return Err(TransportError::UnsupportedRequest),
    };

    let user_id = request.user_id().ok_or(TransportError::MissingUser)?;
    Ok(Turn::Event {
        user_id: user_id.to_string(),
        event,
    })
}

fn intent_event(intent: &Intent) -> Result<Event, TransportError> {
    let event = match intent.name.as_str() {
        "FindRestaurantIntent" => Event::FindRestaurant {
            params: query_params(intent),
        },
        "SetLocationIntent" => Event::SetLocation {
            location: intent.slot("Location").map(String::from),
            zip: intent.slot("LocationZIP").map(String::from),
        },
        "ReadListIntent" => Event::ReadList,
        "BackIntent" => Event::Back,
        // A position that isn't a number is treated as not heard
        "DetailsIntent" => Event::Details {
            position: intent.slot("RestaurantID").and_then(|v| v.parse().ok()),
        },
        "AMAZON.RepeatIntent" => Event::Repeat,
        "AMAZON.HelpIntent" => Event::Help,
        "AMAZON.StopIntent" | "AMAZON.CancelIntent" => Event::Stop,
        other => return Err(TransportError::UnknownIntent(other.to_string())),
    };
    Ok(event)
}

fn query_params(intent: &Intent) -> QueryParams {
    let mut params = QueryParams::default();
    for slot in DESCRIPTOR_SLOTS {
        if let Some(descriptor) = intent.slot(slot) {
            params.add_descriptor(descriptor);
        }
    }

    if let Some(location) = intent.slot("Location") {
        params.location = Some(location.to_string());
    } else if let Some(zip) = intent.slot("LocationZIP").filter(|z| z.chars().count() == 5) {
        params.location = Some(zip.to_string());
    }
    params
}
