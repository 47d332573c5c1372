//! Channel layer for the interactive PTY shell.
//!
//! This module accumulates device output, strips ANSI escapes and detects
//! the prompt that marks the end of a command's output.

mod buffer;
mod pty;

pub use buffer::PatternBuffer;
pub use pty::PtyChannel;
