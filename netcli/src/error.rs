//! Error types for netcli.

use std::io;
use thiserror::Error;

/// Main error type for netcli operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Custom command resolution errors
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Catalog loading and validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session setup and lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Transport layer errors (SSH connection, authentication, command I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host key does not match the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Host is not present in known_hosts and strict checking is enabled
    #[error("Host key for {host}:{port} is unknown")]
    HostKeyUnknown { host: String, port: u16 },

    /// Reading or writing known_hosts failed
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while turning a custom command into a vendor command.
///
/// `command` carries the text as the caller typed it (arguments included).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The main command is not in the catalog
    #[error("Custom command {command} not recognized. Use help")]
    UnknownCommand { command: String },

    /// The command exists but has no template for the device type
    #[error("Command {command} not implemented for vendor {device_type}")]
    UnsupportedVendor {
        command: String,
        device_type: String,
    },

    /// A bracket argument names a key the command does not declare
    #[error("Unknown argument: {key}")]
    UnknownArgument { key: String },
}

/// Custom command catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file is not valid JSON for the catalog schema
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// A template references a placeholder with no default in `args`
    #[error("Command '{command}' template for '{device_type}' uses undeclared argument [{placeholder}]")]
    UndeclaredPlaceholder {
        command: String,
        device_type: String,
        placeholder: String,
    },

    /// A command declares no vendor templates at all
    #[error("Command '{command}' has no vendor templates")]
    NoTemplates { command: String },
}

/// Session construction and channel errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The session task has stopped and no longer answers requests
    #[error("Session closed")]
    Closed,
}

/// Result type alias using netcli's Error.
pub type Result<T> = std::result::Result<T, Error>;
