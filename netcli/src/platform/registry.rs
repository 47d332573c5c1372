//! Platform lookup by device type.

use std::collections::HashMap;

use super::definition::PlatformDefinition;
use super::vendors;

/// Device type aliases accepted in addition to the canonical names.
const ALIASES: &[(&str, &str)] = &[
    ("cisco", "cisco_ios"),
    ("ios", "cisco_ios"),
    ("cisco_xe", "cisco_ios"),
    ("iosxe", "cisco_ios"),
    ("nxos", "cisco_nxos"),
    ("iosxr", "cisco_xr"),
    ("eos", "arista_eos"),
    ("arista", "arista_eos"),
    ("junos", "juniper_junos"),
    ("juniper", "juniper_junos"),
];

/// Registry of platform definitions.
///
/// Each session builds or borrows one; nothing here is process-global.
#[derive(Debug)]
pub struct PlatformRegistry {
    platforms: HashMap<String, PlatformDefinition>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            platforms: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in platforms.
    pub fn with_builtin_platforms() -> Self {
        let mut registry = Self::new();
        for platform in [
            vendors::cisco::ios(),
            vendors::cisco::nxos(),
            vendors::cisco::xr(),
            vendors::arista_eos::platform(),
            vendors::juniper_junos::platform(),
            vendors::linux::platform(),
        ] {
            registry.register(platform);
        }
        registry
    }

    /// Register a platform definition, replacing any with the same name.
    pub fn register(&mut self, platform: PlatformDefinition) {
        self.platforms.insert(platform.name.clone(), platform);
    }

    /// Get a platform by device type (canonical name or alias).
    pub fn get(&self, device_type: &str) -> Option<&PlatformDefinition> {
        let key = device_type.to_ascii_lowercase();
        let name = ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, name)| *name)
            .unwrap_or(key.as_str());
        self.platforms.get(name)
    }

    /// Get the platform for a device type, falling back to the generic one.
    pub fn resolve(&self, device_type: &str) -> PlatformDefinition {
        self.get(device_type)
            .cloned()
            .unwrap_or_else(vendors::generic::platform)
    }

    /// Check if a platform is registered.
    pub fn contains(&self, device_type: &str) -> bool {
        self.get(device_type).is_some()
    }

    /// List all registered platform names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.platforms.keys()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::with_builtin_platforms()
    }
}
