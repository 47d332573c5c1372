//! Juniper JUNOS platform definition.
//!
//! # Prompt Examples
//!
//! ```text
//! user@router>              # operational mode
//! user@router#              # configuration mode
//! {master:0}[edit]          # routing-engine banner line before the prompt
//! user@router%              # shell mode
//! ```

use crate::platform::PlatformDefinition;

/// Create the Juniper JUNOS platform definition.
pub fn platform() -> PlatformDefinition {
    PlatformDefinition::new("juniper_junos", r"(?:\{[^}]+\})?[\w.\-@:]+[>#%]\s*$")
        .unwrap()
        .with_on_open_command("set cli screen-length 0")
        .with_on_open_command("set cli screen-width 511")
}
