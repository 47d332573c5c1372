//! Device sessions.
//!
//! Each session is a background task that owns one device connection. The
//! caller talks to it through a [`SessionHandle`] in strict lock-step: one
//! request in, exactly one [`Response`] out, until a terminator (`end`,
//! `exit` or `quit`) closes the session without a reply.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use netcli::{CommandCatalog, SessionBuilder};
//!
//! # async fn example() -> Result<(), netcli::Error> {
//! let catalog = Arc::new(CommandCatalog::from_json_file("commands.json")?);
//!
//! let mut session = SessionBuilder::new("192.168.1.1")
//!     .username("admin")
//!     .password("secret")
//!     .device_type("cisco_ios")
//!     .spawn(catalog)?;
//!
//! let connected = session.connected().await;
//! if !connected.ok {
//!     eprintln!("{}", connected.payload);
//!     return Ok(());
//! }
//!
//! if let Some(response) = session.request("show-int[port:Gi0/1] | up").await {
//!     println!("{}", response);
//! }
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

mod actor;
mod builder;
mod handle;
mod response;

pub use actor::{SessionActor, spawn_session};
pub use builder::SessionBuilder;
pub use handle::SessionHandle;
pub use response::Response;
