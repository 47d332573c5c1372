//! Custom command handling.
//!
//! This module turns the text a caller submits into something the device
//! understands: request classification (terminators, raw passthrough,
//! grep filters), vendor template resolution and output filtering.

mod filter;
mod request;
mod resolver;

pub use filter::grep_lines;
pub use request::{CommandLine, FILTER_SEPARATOR, RAW_PREFIX, Request, TERMINATORS};
pub use resolver::{bracket_groups, resolve_vendor_command};
