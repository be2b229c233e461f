//! Outgoing platform response envelope

use crate::speech::Reply;
use serde::Serialize;

const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize)]
pub struct PlatformResponse {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<SimpleCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: &str) -> Self {
        Self {
            kind: "PlainText",
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimpleCard {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub content: String,
}

impl PlatformResponse {
    /// Acknowledgement with nothing to say
    pub fn empty() -> Self {
        Self {
            version: RESPONSE_VERSION,
            response: ResponseBody::default(),
        }
    }
}

/// Format a reply for the platform
pub fn render(reply: &Reply) -> PlatformResponse {
    PlatformResponse {
        version: RESPONSE_VERSION,
        response: ResponseBody {
            output_speech: Some(OutputSpeech::plain(reply.text())),
            reprompt: reply.reprompt().map(|text| Reprompt {
                output_speech: OutputSpeech::plain(text),
            }),
            card: reply.card().map(|card| SimpleCard {
                kind: "Simple",
                title: card.title.clone(),
                content: card.content.clone(),
            }),
            should_end_session: Some(reply.ends_session()),
        },
    }
}
