//! Output buffer with tail-only prompt search.
//!
//! Prompts only ever appear at the end of a device's output, so only the
//! last `search_depth` bytes are searched. This keeps prompt detection cheap
//! for long outputs such as full routing tables.

use regex::bytes::Regex;

/// Accumulates shell output for one command.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,

    /// How many bytes from the end to search for the prompt.
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer that searches the last `search_depth` bytes.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append device output, stripping ANSI escape sequences.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Check if the tail of the buffer matches the prompt pattern.
    pub fn tail_matches(&self, pattern: &Regex) -> bool {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.is_match(&self.buffer[start..])
    }

    /// Take the accumulated output as text and reset the buffer.
    pub fn take_string(&mut self) -> String {
        let data = std::mem::take(&mut self.buffer);
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Drop any accumulated output.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}
