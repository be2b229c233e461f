//! Typed search filters built from intent descriptor slots

use super::categories::find_category;

/// Price filter; a single tier or a range of tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Cheap,
    Moderate,
    Spendy,
    Splurge,
    Inexpensive,
    Expensive,
}

impl Price {
    /// Value for the provider's `price` query field
    pub fn query_value(self) -> &'static str {
        match self {
            Price::Cheap => "1",
            Price::Moderate => "2",
            Price::Spendy => "3",
            Price::Splurge => "4",
            Price::Inexpensive => "1,2",
            Price::Expensive => "3,4",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Price::Cheap => "cheap",
            Price::Moderate => "moderate",
            Price::Spendy => "spendy",
            Price::Splurge => "splurge",
            Price::Inexpensive => "inexpensive",
            Price::Expensive => "expensive",
        }
    }
}

/// Rating filter; an inclusive range applied after the search returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    Great,
    Bad,
    Terrible,
}

impl Rating {
    /// Inclusive `(min, max)` star range
    pub fn range(self) -> (f64, f64) {
        match self {
            Rating::Good => (3.0, 5.0),
            Rating::Great => (4.0, 5.0),
            Rating::Bad => (0.0, 2.5),
            Rating::Terrible => (0.0, 2.0),
        }
    }

    pub fn contains(self, rating: f64) -> bool {
        let (min, max) = self.range();
        rating >= min && rating <= max
    }

    pub fn describe(self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::Great => "great",
            Rating::Bad => "bad",
            Rating::Terrible => "terrible",
        }
    }
}

/// Filters for one search, rebuilt every turn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    pub location: Option<String>,
    /// Canonical category aliases, in the order they were spoken
    pub categories: Vec<String>,
    pub open_now: bool,
    pub price: Option<Price>,
    pub rating: Option<Rating>,
}

impl QueryParams {
    /// Fold one spoken descriptor into the filters.
    ///
    /// Categories win over the fixed vocabulary; unknown words are ignored.
    pub fn add_descriptor(&mut self, descriptor: &str) {
        let word = descriptor.trim().to_lowercase();
        if word.is_empty() {
            return;
        }

        if let Some(alias) = find_category(&word) {
            self.categories.push(alias.to_string());
            return;
        }

        match word.as_str() {
            "open" | "open now" => self.open_now = true,
            "cheap" => self.price = Some(Price::Cheap),
            "moderate" => self.price = Some(Price::Moderate),
            "spendy" => self.price = Some(Price::Spendy),
            "splurge" | "costly" => self.price = Some(Price::Splurge),
            "inexpensive" => self.price = Some(Price::Inexpensive),
            "expensive" | "pricey" => self.price = Some(Price::Expensive),
            "good" => self.rating = Some(Rating::Good),
            "great" => self.rating = Some(Rating::Great),
            "bad" => self.rating = Some(Rating::Bad),
            "terrible" => self.rating = Some(Rating::Terrible),
            other => tracing::debug!(descriptor = %other, "Ignoring unknown descriptor"),
        }
    }

    /// Comma-joined category aliases, if any
    pub fn categories_query(&self) -> Option<String> {
        if self.categories.is_empty() {
            None
        } else {
            Some(self.categories.join(","))
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Whether `value` is a five-digit postal code
pub fn is_zip_code(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}
