//! PTY shell channel for interactive device sessions.

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::buffer::PatternBuffer;
use crate::error::{Result, TransportError};

/// Prompt search depth used for shell output.
const SEARCH_DEPTH: usize = 1000;

/// An open PTY shell on a device.
///
/// Wraps the russh channel and provides line sends and prompt-terminated
/// reads with timeout handling.
pub struct PtyChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

impl PtyChannel {
    /// Wrap an SSH channel that already has a PTY and shell.
    pub fn new(channel: Channel<Msg>) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(SEARCH_DEPTH),
        }
    }

    /// Send a line of input, discarding any unread output first.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.buffer.clear();
        let data = format!("{}\n", line);
        self.channel
            .data(data.as_bytes())
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }

    /// Read until the prompt pattern matches the tail of the output.
    ///
    /// Returns everything read, prompt included. Fails with
    /// [`TransportError::Timeout`] if the prompt does not show up in time and
    /// [`TransportError::Disconnected`] if the device closes the channel.
    pub async fn read_until_prompt(&mut self, prompt: &Regex, timeout: Duration) -> Result<String> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.buffer.tail_matches(prompt) {
                return Ok(self.buffer.take_string());
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| TransportError::Timeout(timeout))?;

            match msg {
                Some(ChannelMsg::Data { data }) | Some(ChannelMsg::ExtendedData { data, .. }) => {
                    trace!("pty: read {} bytes", data.len());
                    self.buffer.extend(&data);
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(TransportError::Disconnected.into());
                }
                Some(_) => {}
            }
        }
    }

    /// Close the channel.
    pub async fn close(self) -> Result<()> {
        self.channel.close().await.map_err(TransportError::Ssh)?;
        Ok(())
    }
}
