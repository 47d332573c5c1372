//! Platform definitions for multi-vendor support.
//!
//! A platform tells the SSH transport how a vendor's CLI looks: which
//! prompts end a command's output and which commands prepare the terminal.
//! Device types without a built-in definition fall back to a generic
//! prompt pattern.

mod definition;
mod registry;
pub mod vendors;

pub use definition::PlatformDefinition;
pub use registry::PlatformRegistry;
