//! Fallback platform for device types without a built-in definition.

use crate::platform::PlatformDefinition;

/// Create the generic platform definition.
///
/// Accepts any line ending in one of the common prompt characters and sends
/// nothing on open, since paging commands differ per vendor.
pub fn platform() -> PlatformDefinition {
    PlatformDefinition::new("generic", r"[>#$%\]]\s*$").unwrap()
}
