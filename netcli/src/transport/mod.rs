//! Transport layer: how a session reaches its device.
//!
//! A session only needs two operations from its transport: connect once,
//! then run commands one at a time. [`Connector`] and [`Transport`] capture
//! that contract; [`SshConnector`] implements it over russh with an
//! interactive PTY shell.

pub mod config;
mod ssh;

use std::future::Future;

pub use config::{AuthMethod, ConnectionConfig, HostKeyVerification};
pub use ssh::{SshConnector, SshTransport};

use crate::error::Result;

/// Opens device connections.
pub trait Connector: Send + Sync + 'static {
    /// The live connection produced by [`connect`](Self::connect).
    type Transport: Transport;

    /// Connect and authenticate using the given configuration.
    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Self::Transport>> + Send;
}

/// A live device connection.
pub trait Transport: Send + 'static {
    /// Send one command and return its output once the device is ready for
    /// the next one.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;

    /// Release the connection.
    fn close(self) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized;
}
