//! Cisco IOS / IOS-XE, NX-OS and IOS-XR platform definitions.
//!
//! Prompt patterns cover exec (`>`), privileged (`#`) and configuration
//! (`(config*)#`) modes in one expression since custom commands may be
//! sent from any of them.
//!
//! # Prompt Examples
//!
//! ```text
//! router>                            # exec mode
//! router#                            # privileged exec
//! router(config-if)#                 # configuration sub-mode
//! RP/0/RP0/CPU0:xr-router#           # IOS-XR
//! ```

use crate::platform::PlatformDefinition;

/// Create the Cisco IOS / IOS-XE platform definition.
pub fn ios() -> PlatformDefinition {
    PlatformDefinition::new("cisco_ios", r"(?m)^[\w.\-@()/:]{1,63}[>#]\s*\z")
        .unwrap()
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
}

/// Create the Cisco NX-OS platform definition.
pub fn nxos() -> PlatformDefinition {
    PlatformDefinition::new("cisco_nxos", r"(?m)^[\w.\-@()/:]{1,63}[>#]\s*\z")
        .unwrap()
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
}

/// Create the Cisco IOS-XR platform definition.
pub fn xr() -> PlatformDefinition {
    PlatformDefinition::new(
        "cisco_xr",
        r"(?m)^(?:RP/\d+/\w+/CPU\d+:)?[\w.\-@()/:]{1,63}[>#]\s*\z",
    )
    .unwrap()
    .with_on_open_command("terminal length 0")
    .with_on_open_command("terminal width 512")
}
