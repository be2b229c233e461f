//! Spoken responses
//!
//! Pure rendering from result windows and business records into text. Nothing
//! here touches the cursor; transport formatting lives in `transport`.

use crate::search::{is_zip_code, QueryParams};
use crate::state_machine::cursor::Advance;
use crate::state_machine::state::{Business, ResultSet};

pub const CARD_TITLE: &str = "Restaurant Finder";
pub const GENERIC_REPROMPT: &str = "What else can I help with?";

const WELCOME: &str = "Welcome to Restaurant Finder. You can find restaurants by type of cuisine, price range, or with high Yelp reviews. For example, you can say Find a cheap Chinese restaurant in Seattle. How can I help you?";
const WELCOME_REPROMPT: &str = "For instructions on what you can say, please say help me.";
const HELP: &str = "You can find restaurants by type of cuisine, price range, or Yelp review. For example, you can say Find a cheap Chinese restaurant in Seattle ... Now, what can I help you with?";
const HELP_REPROMPT: &str = "You can find restaurants by type of cuisine, price range, or Yelp review, or you can say exit... Now, what can I help you with?";
const NARROW_REPROMPT: &str = "Repeat your request with additional conditions like good or cheap to narrow the list, or say Read List to start reading the list.";
const PRICE_ADJECTIVES: [&str; 4] = ["cheap", "moderately priced", "spendy", "splurge"];
/// Totals above this are spoken as "more than"
const SPOKEN_TOTAL_CAP: usize = 100;

/// Display card shown alongside speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub content: String,
}

impl Card {
    fn for_text(text: &str) -> Self {
        Self {
            title: CARD_TITLE.to_string(),
            content: text.to_string(),
        }
    }
}

/// What to say back for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Say this and end the session
    Statement { text: String, card: Option<Card> },
    /// Say this and wait, repeating `reprompt` if the user is silent
    Question {
        text: String,
        reprompt: String,
        card: Option<Card>,
    },
    /// Guidance after a problem, with the generic reprompt
    Error { text: String },
}

impl Reply {
    /// Statement with a card echoing the text
    pub fn statement(text: impl Into<String>) -> Self {
        let text = text.into();
        let card = Some(Card::for_text(&text));
        Reply::Statement { text, card }
    }

    /// Question with a card echoing the text
    pub fn question(text: impl Into<String>, reprompt: impl Into<String>) -> Self {
        let text = text.into();
        let card = Some(Card::for_text(&text));
        Reply::Question {
            text,
            reprompt: reprompt.into(),
            card,
        }
    }

    /// Question without a card
    pub fn prompt(text: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Reply::Question {
            text: text.into(),
            reprompt: reprompt.into(),
            card: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Reply::Error { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Statement { text, .. }
            | Reply::Question { text, .. }
            | Reply::Error { text } => text,
        }
    }

    pub fn reprompt(&self) -> Option<&str> {
        match self {
            Reply::Statement { .. } => None,
            Reply::Question { reprompt, .. } => Some(reprompt),
            Reply::Error { .. } => Some(GENERIC_REPROMPT),
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Reply::Statement { card, .. } | Reply::Question { card, .. } => card.as_ref(),
            Reply::Error { .. } => None,
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Reply::Statement { .. })
    }
}

// ============================================================================
// Fixed replies
// ============================================================================

pub fn welcome() -> Reply {
    Reply::prompt(WELCOME, WELCOME_REPROMPT)
}

pub fn help() -> Reply {
    Reply::prompt(HELP, HELP_REPROMPT)
}

pub fn goodbye() -> Reply {
    Reply::Statement {
        text: "Goodbye".to_string(),
        card: None,
    }
}

/// Reply when the turn could not run at all (session store down)
pub fn apology() -> Reply {
    Reply::error("I'm sorry, something went wrong on my end. Please try again in a moment.")
}

// ============================================================================
// List narration
// ============================================================================

/// Narrate the window covered by `step`
pub fn narrate(results: &ResultSet, step: Advance) -> Reply {
    let more = results.remaining() > 0;
    let reprompt = if more {
        "You can ask for more details by saying the corresponding restaurant number or say More to hear more results."
    } else {
        "You can ask for more details by saying the corresponding restaurant number."
    };
    let noun = if step.count == 1 {
        "restaurant"
    } else {
        "restaurants"
    };

    let mut text = format!("Reading {} {noun}. {reprompt}", step.count);
    for (i, business) in results.window(step.start(), step.count).iter().enumerate() {
        text.push_str(&format!(" {} ... {}.", i + 1, business.name));
    }

    Reply::question(text, reprompt)
}

/// Summary after a search that returned more than one chunk
pub fn found(total: usize, params: &QueryParams) -> Reply {
    let count = if total > SPOKEN_TOTAL_CAP {
        format!("more than {SPOKEN_TOTAL_CAP}")
    } else {
        total.to_string()
    };
    let text = format!(
        "I found {count} {}. {NARROW_REPROMPT}",
        describe_query(params)
    );
    Reply::question(text, NARROW_REPROMPT)
}

// ============================================================================
// Details
// ============================================================================

/// One-paragraph description of a business
pub fn describe_business(business: &Business) -> Reply {
    let mut text = format!(
        "{} is located at {} in {}. It has a Yelp rating of {} based on {} reviews.",
        business.name, business.address, business.city, business.rating, business.review_count
    );
    if let Some(adjective) = price_adjective(business.price) {
        text.push_str(&format!(" It is a {adjective} option."));
    }
    if let Some(phone) = &business.phone {
        text.push_str(&format!(" The phone number is {}.", format_phone(phone)));
    }
    Reply::statement(text)
}

fn price_adjective(tier: u8) -> Option<&'static str> {
    match tier {
        1..=4 => Some(PRICE_ADJECTIVES[usize::from(tier) - 1]),
        _ => None,
    }
}

/// `+1XXXXXXXXXX` becomes `(XXX) XXX-XXXX`; anything else is returned as is
pub fn format_phone(raw: &str) -> String {
    let Some(digits) = raw.strip_prefix("+1") else {
        return raw.to_string();
    };
    if raw.len() != 12 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    let digits: Vec<char> = digits.chars().collect();
    let area: String = digits[0..3].iter().collect();
    let exchange: String = digits[3..6].iter().collect();
    let line: String = digits[6..].iter().collect();
    format!("({area}) {exchange}-{line}")
}

// ============================================================================
// Query and location phrasing
// ============================================================================

/// "open good cheap chinese restaurants in Seattle"
pub fn describe_query(params: &QueryParams) -> String {
    let mut words: Vec<String> = Vec::new();
    if params.open_now {
        words.push("open".to_string());
    }
    if let Some(rating) = params.rating {
        words.push(rating.describe().to_string());
    }
    if let Some(price) = params.price {
        words.push(price.describe().to_string());
    }
    words.extend(params.categories.iter().map(|alias| {
        crate::search::category_title(alias).map_or_else(|| alias.clone(), str::to_lowercase)
    }));
    words.push("restaurants".to_string());

    let mut text = words.join(" ");
    if let Some(location) = &params.location {
        text.push_str(" in ");
        text.push_str(&speakable_location(location));
    }
    text
}

/// ZIP codes are read digit by digit
pub fn speakable_location(location: &str) -> String {
    if is_zip_code(location) {
        location
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        location.to_string()
    }
}

pub fn location_set(location: &str) -> Reply {
    let mut text = format!("Preferred location set to {}.", speakable_location(location));
    if !is_zip_code(location) {
        text.push_str(" If this is incorrect, you can also specify a five-digit ZIP code.");
    }
    Reply::statement(text)
}
