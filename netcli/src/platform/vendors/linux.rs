//! Linux platform definition.
//!
//! Standard Linux/Unix shells with `$` (user) and `#` (root) prompts.

use crate::platform::PlatformDefinition;

/// Create the Linux platform definition.
pub fn platform() -> PlatformDefinition {
    PlatformDefinition::new("linux", r"[$#]\s*$").unwrap()
}
