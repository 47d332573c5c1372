//! Custom command catalog.
//!
//! A catalog maps vendor-agnostic command names to per-vendor templates.
//! Templates may reference arguments as `[name]`; every argument has a
//! default value used when the caller does not supply one.
//!
//! ```json
//! {
//!     "show-int": {
//!         "types": { "cisco_ios": "show interface [port]" },
//!         "args": { "port": "all" }
//!     }
//! }
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// A single custom command definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCommand {
    /// Vendor templates keyed by device type (e.g. "cisco_ios").
    pub types: IndexMap<String, String>,

    /// Argument defaults keyed by argument name.
    #[serde(default)]
    pub args: IndexMap<String, String>,
}

impl CustomCommand {
    /// Create an empty command definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vendor template.
    pub fn with_type(mut self, device_type: impl Into<String>, template: impl Into<String>) -> Self {
        self.types.insert(device_type.into(), template.into());
        self
    }

    /// Declare an argument and its default value.
    pub fn with_arg(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.args.insert(name.into(), default.into());
        self
    }

    /// Get the template for a device type.
    pub fn template_for(&self, device_type: &str) -> Option<&str> {
        self.types.get(device_type).map(String::as_str)
    }

    /// Get the default value of an argument.
    pub fn default_for(&self, arg: &str) -> Option<&str> {
        self.args.get(arg).map(String::as_str)
    }

    /// Names referenced as `[name]` in a template, in order of appearance.
    pub fn placeholders(template: &str) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find('[') {
            let after = &rest[open + 1..];
            match after.find(['[', ']']) {
                Some(close) if after.as_bytes()[close] == b']' => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                Some(close) => rest = &after[close..],
                None => break,
            }
        }
        names
    }
}

/// The catalog of custom commands, shared read-only between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandCatalog {
    commands: IndexMap<String, CustomCommand>,
}

impl CommandCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e).into())
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(CatalogError::Io)?;
        Self::from_json_str(&json)
    }

    /// Add (or replace) a command definition.
    pub fn insert(&mut self, name: impl Into<String>, command: CustomCommand) {
        self.commands.insert(name.into(), command);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_command(mut self, name: impl Into<String>, command: CustomCommand) -> Self {
        self.insert(name, command);
        self
    }

    /// Get a command definition by name.
    pub fn get(&self, name: &str) -> Option<&CustomCommand> {
        self.commands.get(name)
    }

    /// Check if a command is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// List all command names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// List the commands that have a template for the given device type.
    pub fn commands_for<'a>(&'a self, device_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.commands
            .iter()
            .filter(move |(_, cmd)| cmd.types.contains_key(device_type))
            .map(|(name, _)| name.as_str())
    }

    /// Number of commands in the catalog.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Check that every template placeholder has a declared default.
    ///
    /// The resolver assumes a validated catalog and leaves undeclared
    /// placeholders untouched, so loaders should call this once up front.
    pub fn validate(&self) -> Result<()> {
        for (name, command) in &self.commands {
            if command.types.is_empty() {
                return Err(CatalogError::NoTemplates {
                    command: name.clone(),
                }
                .into());
            }

            for (device_type, template) in &command.types {
                if let Some(missing) = CustomCommand::placeholders(template)
                    .into_iter()
                    .find(|p| !command.args.contains_key(*p))
                {
                    return Err(CatalogError::UndeclaredPlaceholder {
                        command: name.clone(),
                        device_type: device_type.clone(),
                        placeholder: missing.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> CommandCatalog {
        CommandCatalog::new()
            .with_command(
                "show-int",
                CustomCommand::new()
                    .with_type("cisco_ios", "show interface [port]")
                    .with_type("juniper_junos", "show interfaces [port] terse")
                    .with_arg("port", "all"),
            )
            .with_command(
                "version",
                CustomCommand::new().with_type("cisco_ios", "show version"),
            )
    }

    #[test]
    fn test_from_json_without_args() {
        let json = serde_json::json!({
            "show-int": {
                "types": { "cisco_ios": "show interface [port]" },
                "args": { "port": "all" }
            },
            "version": {
                "types": { "cisco_ios": "show version", "arista_eos": "show version" }
            }
        });

        let catalog = CommandCatalog::from_json_str(&json.to_string()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("version").unwrap().args.is_empty());
        assert_eq!(
            catalog.get("show-int").unwrap().default_for("port"),
            Some("all")
        );
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let err = CommandCatalog::from_json_str(r#"{"version": "show version"}"#).unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::Parse(_))));
    }

    #[test]
    fn test_names_keep_catalog_order() {
        let catalog = sample();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["show-int", "version"]);
    }

    #[test]
    fn test_commands_for_vendor() {
        let catalog = sample();
        let junos: Vec<_> = catalog.commands_for("juniper_junos").collect();
        assert_eq!(junos, vec!["show-int"]);
        assert_eq!(catalog.commands_for("nokia_sros").count(), 0);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            CustomCommand::placeholders("show bgp [vrf] neighbor [peer] detail"),
            vec!["vrf", "peer"]
        );
        assert!(CustomCommand::placeholders("show version").is_empty());
        assert_eq!(CustomCommand::placeholders("show [a [b]"), vec!["b"]);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_undeclared_placeholder() {
        let catalog = sample().with_command(
            "bgp",
            CustomCommand::new().with_type("cisco_ios", "show bgp vrf [vrf] summary"),
        );

        match catalog.validate() {
            Err(Error::Catalog(CatalogError::UndeclaredPlaceholder {
                command,
                placeholder,
                ..
            })) => {
                assert_eq!(command, "bgp");
                assert_eq!(placeholder, "vrf");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_no_templates() {
        let catalog = sample().with_command("empty", CustomCommand::new());
        assert!(matches!(
            catalog.validate(),
            Err(Error::Catalog(CatalogError::NoTemplates { .. }))
        ));
    }
}
