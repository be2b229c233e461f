//! Chunked cursor arithmetic over a result list
//!
//! `read` is the number of items already narrated. After a forward read it
//! sits on the end of the chunk that was just spoken, so the chunk itself
//! starts at `window_start(read)`.

use thiserror::Error;

/// Number of items narrated per turn
pub const CHUNK_SIZE: usize = 5;

/// Outcome of moving the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// New cursor position
    pub read: usize,
    /// Items covered by this step
    pub count: usize,
}

impl Advance {
    /// Index of the first item covered by this step
    pub fn start(&self) -> usize {
        self.read - self.count
    }
}

/// A spoken position that does not name an item in the last chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position {position} is outside the last narrated chunk")]
pub struct PositionOutOfRange {
    pub position: usize,
}

/// Start of the chunk that ends at `read`
pub fn window_start(read: usize, chunk: usize) -> usize {
    if read == 0 {
        0
    } else {
        chunk * ((read - 1) / chunk)
    }
}

/// Move forward one chunk, stopping at `length`
pub fn advance(read: usize, length: usize, chunk: usize) -> Advance {
    let next = read.saturating_add(chunk).min(length).max(read);
    Advance {
        read: next,
        count: next - read,
    }
}

/// Back to the chunk before the one that ends at `read`, clamped at 0
pub fn rewind_one_chunk(read: usize, chunk: usize) -> usize {
    window_start(read, chunk).saturating_sub(chunk)
}

/// Map a 1-based position within the last chunk to an absolute index
pub fn resolve_position(
    read: usize,
    position: usize,
    length: usize,
    chunk: usize,
) -> Result<usize, PositionOutOfRange> {
    if position == 0 || position > chunk {
        return Err(PositionOutOfRange { position });
    }
    let index = window_start(read, chunk) + (position - 1);
    if index < length {
        Ok(index)
    } else {
        Err(PositionOutOfRange { position })
    }
}
