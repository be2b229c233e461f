//! Per-user session state types

use super::cursor::{self, Advance, CHUNK_SIZE};
use serde::{Deserialize, Serialize};

// ============================================================================
// Business - one search hit
// ============================================================================

/// A business returned by the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    /// 0 = unknown, 1-4 = price tiers
    #[serde(default)]
    pub price: u8,
    #[serde(default)]
    pub is_closed: bool,
    /// Distance from the search location, in meters
    #[serde(default)]
    pub distance: f64,
    /// Raw phone as returned by the provider
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub url: String,
}

impl Business {
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: "1 Main St".to_string(),
            city: "Seattle".to_string(),
            rating: 4.0,
            review_count: 10,
            price: 2,
            is_closed: false,
            distance: 100.0,
            phone: None,
            url: String::new(),
        }
    }
}

// ============================================================================
// ResultSet - search results plus read cursor
// ============================================================================

/// The results of one search, in provider order, plus how many have been read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredResultSet")]
pub struct ResultSet {
    businesses: Vec<Business>,
    read: usize,
}

/// Wire form of `ResultSet`; the cursor is clamped when it is decoded
#[derive(Deserialize)]
struct StoredResultSet {
    businesses: Vec<Business>,
    #[serde(default)]
    read: usize,
}

impl From<StoredResultSet> for ResultSet {
    fn from(stored: StoredResultSet) -> Self {
        let mut results = ResultSet::new(stored.businesses);
        results.seek(stored.read);
        results
    }
}

impl ResultSet {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self {
            businesses,
            read: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    /// Number of items already narrated
    pub fn read(&self) -> usize {
        self.read
    }

    /// Items not yet narrated
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.read)
    }

    pub fn get(&self, index: usize) -> Option<&Business> {
        self.businesses.get(index)
    }

    /// The contiguous slice `[start, start + count)`, clamped to the list
    pub fn window(&self, start: usize, count: usize) -> &[Business] {
        let start = start.min(self.len());
        let end = start.saturating_add(count).min(self.len());
        &self.businesses[start..end]
    }

    /// Move the cursor to an absolute position (clamped to the list length)
    pub fn seek(&mut self, read: usize) {
        self.read = read.min(self.len());
    }

    /// Advance the cursor by one chunk
    pub fn advance(&mut self) -> Advance {
        let step = cursor::advance(self.read, self.len(), CHUNK_SIZE);
        self.read = step.read;
        step
    }

    /// Snap the cursor back to the start of the chunk last narrated
    pub fn snap_to_window(&mut self) {
        self.read = cursor::window_start(self.read, CHUNK_SIZE);
    }

    /// Step the cursor back to the chunk before the one last narrated
    pub fn rewind(&mut self) {
        self.read = cursor::rewind_one_chunk(self.read, CHUNK_SIZE);
    }
}

// ============================================================================
// Recorded actions
// ============================================================================

/// What the previous turn did, used to interpret Back and Repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LastAction {
    #[default]
    None,
    SetLocation,
    /// Search returned more than one chunk; waiting for the user to filter or read
    FindRestaurant,
    /// A chunk was narrated starting at `start`
    ReadList { start: usize },
    /// Details were given for the 1-based `position` in the last chunk
    Details { position: usize },
}

// ============================================================================
// User State
// ============================================================================

/// Durable per-user state, loaded and saved once per turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "StoredUserState")]
pub struct UserState {
    /// Preferred location: a city name or a five-digit ZIP code
    pub location: Option<String>,
    pub last_action: LastAction,
    pub results: Option<ResultSet>,
}

#[derive(Deserialize)]
struct StoredUserState {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    last_action: LastAction,
    #[serde(default)]
    results: Option<ResultSet>,
}

impl From<StoredUserState> for UserState {
    /// A recorded action must point inside the chunk the cursor is on
    fn from(stored: StoredUserState) -> Self {
        let read = stored
            .results
            .as_ref()
            .filter(|r| !r.is_empty())
            .map_or(0, ResultSet::read);
        let has_list = stored.results.as_ref().is_some_and(|r| !r.is_empty());

        let last_action = match stored.last_action {
            LastAction::ReadList { .. } | LastAction::Details { .. } if !has_list => {
                LastAction::None
            }
            LastAction::ReadList { .. } | LastAction::Details { .. } if read == 0 => {
                LastAction::FindRestaurant
            }
            LastAction::ReadList { start } if start != cursor::window_start(read, CHUNK_SIZE) => {
                LastAction::ReadList {
                    start: cursor::window_start(read, CHUNK_SIZE),
                }
            }
            LastAction::Details { position } if !(1..=CHUNK_SIZE).contains(&position) => {
                LastAction::FindRestaurant
            }
            other => other,
        };

        Self {
            location: stored.location,
            last_action,
            results: stored.results,
        }
    }
}

impl UserState {
    /// The current result set, if it has anything in it
    pub fn non_empty_results(&self) -> Option<&ResultSet> {
        self.results.as_ref().filter(|r| !r.is_empty())
    }
}
