//! # netcli
//!
//! Vendor-agnostic custom commands over persistent SSH sessions to network
//! devices.
//!
//! A [`CommandCatalog`] maps abstract command names to per-vendor
//! templates. A session runs as a background task that owns one device
//! connection; callers send it command lines and get exactly one
//! [`Response`] back for each, in order.
//!
//! ## Command lines
//!
//! - `show-int` resolves the `show-int` template for the session's device
//!   type, filling every `[arg]` with its default
//! - `show-int[port:Gi0/1]` overrides the `port` argument
//! - `show-int | up` keeps only the output lines containing `up`
//! - `r- show clock` sends `show clock` verbatim
//! - `end`, `exit` or `quit` closes the session
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use netcli::{CommandCatalog, SessionBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netcli::Error> {
//!     let catalog = Arc::new(CommandCatalog::from_json_file("commands.json")?);
//!
//!     let mut session = SessionBuilder::new("192.168.1.1")
//!         .username("admin")
//!         .password("secret")
//!         .device_type("cisco_ios")
//!         .spawn(catalog)?;
//!
//!     if session.connected().await.ok {
//!         if let Some(response) = session.request("show-int[port:Gi0/1]").await {
//!             println!("{}", response);
//!         }
//!     }
//!
//!     session.close().await
//! }
//! ```

pub mod catalog;
pub mod channel;
pub mod command;
pub mod error;
pub mod platform;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use catalog::{CommandCatalog, CustomCommand};
pub use command::{Request, resolve_vendor_command};
pub use error::Error;
pub use platform::{PlatformDefinition, PlatformRegistry};
pub use session::{Response, SessionBuilder, SessionHandle, spawn_session};
pub use transport::{AuthMethod, ConnectionConfig, Connector, HostKeyVerification, Transport};
