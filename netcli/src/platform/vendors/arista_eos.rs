//! Arista EOS platform definition.
//!
//! Prompt pattern adapted from scrapli's EOS driver, with exec, privileged
//! and configuration modes folded into a single expression.

use crate::platform::PlatformDefinition;

/// Create the Arista EOS platform definition.
pub fn platform() -> PlatformDefinition {
    PlatformDefinition::new("arista_eos", r"(?mi)^[\w.\-@()/: ]{1,63}[>#]\s?\z")
        .unwrap()
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 32767")
        .with_terminal_size(32767, 24)
}
