//! Vendor command resolution.
//!
//! A custom command is written as `name[arg1:value][arg2]`. The name selects
//! a catalog entry, the device type selects the vendor template, and each
//! bracket group fills in one `[arg]` placeholder of that template.

use std::borrow::Cow;

use log::trace;

use crate::catalog::CommandCatalog;
use crate::error::CommandError;

/// Resolve a custom command into the vendor command for `device_type`.
///
/// Arguments are applied as follows:
/// - no `[` anywhere in the text: every declared argument gets its default
/// - otherwise only the bracket groups given are substituted; `[key:value]`
///   uses `value`, a bare `[key]` uses the catalog default
///
/// Unknown argument keys fail the whole resolution, so a caller never sees
/// a partially substituted command.
///
/// # Example
///
/// ```rust
/// use netcli::catalog::{CommandCatalog, CustomCommand};
/// use netcli::command::resolve_vendor_command;
///
/// let catalog = CommandCatalog::new().with_command(
///     "show-int",
///     CustomCommand::new()
///         .with_type("cisco_ios", "show interface [port]")
///         .with_arg("port", "all"),
/// );
///
/// let cmd = resolve_vendor_command("show-int[port:Gi0/1]", "cisco_ios", &catalog).unwrap();
/// assert_eq!(cmd, "show interface Gi0/1");
/// ```
pub fn resolve_vendor_command(
    command_text: &str,
    device_type: &str,
    catalog: &CommandCatalog,
) -> Result<String, CommandError> {
    let (main_command, args_text) = match command_text.find('[') {
        Some(pos) => (&command_text[..pos], Some(&command_text[pos..])),
        None => (command_text, None),
    };
    let main_command = main_command.trim();

    let command = catalog
        .get(main_command)
        .ok_or_else(|| CommandError::UnknownCommand {
            command: command_text.to_string(),
        })?;

    let template = command
        .template_for(device_type)
        .ok_or_else(|| CommandError::UnsupportedVendor {
            command: command_text.to_string(),
            device_type: device_type.to_string(),
        })?;

    let substitutions: Vec<(&str, Cow<'_, str>)> = match args_text {
        None => command
            .args
            .iter()
            .map(|(key, default)| (key.as_str(), Cow::Borrowed(default.as_str())))
            .collect(),
        Some(args_text) => {
            let mut given = Vec::new();
            for group in bracket_groups(args_text) {
                let (key, value) = match group.split_once(':') {
                    Some((key, value)) => (key, Some(value)),
                    None => (&*group, None),
                };

                let (key, default) = command
                    .args
                    .get_key_value(key)
                    .ok_or_else(|| CommandError::UnknownArgument {
                        key: key.to_string(),
                    })?;

                let value = value.unwrap_or(default.as_str()).to_string();
                given.push((key.as_str(), Cow::Owned(value)));
            }
            given
        }
    };

    let mut resolved = template.to_string();
    for (key, value) in substitutions {
        trace!("substituting [{}] -> {:?}", key, value);
        resolved = resolved.replace(&format!("[{}]", key), &value);
    }

    Ok(resolved)
}

/// Extract the bracket groups of an argument list, left to right.
///
/// Each group runs from a `[` to the nearest following `]`; groups never
/// overlap. A `[` nested inside a group is dropped from its contents, and a
/// group may not span a line break. An unterminated `[` yields nothing.
pub fn bracket_groups(text: &str) -> Vec<Cow<'_, str>> {
    let mut groups = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };

        let inner = &after[..close];
        if inner.contains('\n') {
            rest = after;
            continue;
        }

        if inner.contains('[') {
            groups.push(Cow::Owned(inner.replace('[', "")));
        } else {
            groups.push(Cow::Borrowed(inner));
        }
        rest = &after[close + 1..];
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CustomCommand;

    fn catalog() -> CommandCatalog {
        CommandCatalog::new()
            .with_command(
                "show-int",
                CustomCommand::new()
                    .with_type("cisco", "show interface [port]")
                    .with_arg("port", "all"),
            )
            .with_command(
                "bgp-neighbor",
                CustomCommand::new()
                    .with_type("cisco_ios", "show bgp vrf [vrf] neighbors [peer]")
                    .with_type("juniper_junos", "show bgp neighbor [peer] instance [vrf]")
                    .with_arg("vrf", "default")
                    .with_arg("peer", ""),
            )
            .with_command(
                "version",
                CustomCommand::new().with_type("cisco_ios", "show version"),
            )
    }

    #[test]
    fn test_no_brackets_applies_all_defaults() {
        let cmd = resolve_vendor_command("show-int", "cisco", &catalog()).unwrap();
        assert_eq!(cmd, "show interface all");

        let cmd = resolve_vendor_command("bgp-neighbor", "juniper_junos", &catalog()).unwrap();
        assert_eq!(cmd, "show bgp neighbor  instance default");
    }

    #[test]
    fn test_explicit_argument_overrides_default() {
        let cmd = resolve_vendor_command("show-int[port:eth0]", "cisco", &catalog()).unwrap();
        assert_eq!(cmd, "show interface eth0");
    }

    #[test]
    fn test_bare_argument_uses_default() {
        let cmd = resolve_vendor_command("show-int[port]", "cisco", &catalog()).unwrap();
        assert_eq!(cmd, "show interface all");
    }

    #[test]
    fn test_partial_arguments_leave_other_placeholders() {
        let cmd =
            resolve_vendor_command("bgp-neighbor[peer:10.0.0.1]", "cisco_ios", &catalog()).unwrap();
        assert_eq!(cmd, "show bgp vrf [vrf] neighbors 10.0.0.1");
    }

    #[test]
    fn test_multiple_arguments() {
        let cmd = resolve_vendor_command(
            "bgp-neighbor [vrf:CUST-A][peer:10.0.0.1]",
            "cisco_ios",
            &catalog(),
        )
        .unwrap();
        assert_eq!(cmd, "show bgp vrf CUST-A neighbors 10.0.0.1");
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let cmd = resolve_vendor_command("show-int[port:fe80::1]", "cisco", &catalog()).unwrap();
        assert_eq!(cmd, "show interface fe80::1");
    }

    #[test]
    fn test_unknown_command() {
        for text in ["nope", "nope[port:1]", "  nope  "] {
            let err = resolve_vendor_command(text, "cisco", &catalog()).unwrap_err();
            assert_eq!(
                err,
                CommandError::UnknownCommand {
                    command: text.to_string()
                }
            );
        }
        assert!(matches!(
            resolve_vendor_command("nope", "juniper_junos", &catalog()),
            Err(CommandError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_unsupported_vendor() {
        let err = resolve_vendor_command("version", "juniper_junos", &catalog()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command version not implemented for vendor juniper_junos"
        );

        assert!(matches!(
            resolve_vendor_command("show-int[port:eth0]", "arista_eos", &catalog()),
            Err(CommandError::UnsupportedVendor { .. })
        ));
    }

    #[test]
    fn test_unknown_argument() {
        let err = resolve_vendor_command("show-int[speed:10g]", "cisco", &catalog()).unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownArgument {
                key: "speed".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown argument: speed");
    }

    #[test]
    fn test_unknown_argument_after_valid_one() {
        let err = resolve_vendor_command(
            "bgp-neighbor[peer:10.0.0.1][bogus]",
            "cisco_ios",
            &catalog(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown argument: bogus");
        assert!(!err.to_string().contains("10.0.0.1"));
    }

    #[test]
    fn test_unterminated_bracket_applies_nothing() {
        let cmd = resolve_vendor_command("show-int[port:eth0", "cisco", &catalog()).unwrap();
        assert_eq!(cmd, "show interface [port]");
    }

    #[test]
    fn test_bracket_groups() {
        assert_eq!(bracket_groups("[a:1][b]"), vec!["a:1", "b"]);
        assert_eq!(bracket_groups("[a:1] junk [b]"), vec!["a:1", "b"]);
        assert_eq!(bracket_groups("[a[b]"), vec!["ab"]);
        assert_eq!(bracket_groups("[]"), vec![""]);
        assert!(bracket_groups("[open").is_empty());
        assert!(bracket_groups("no groups").is_empty());
    }

    #[test]
    fn test_bracket_groups_do_not_span_lines() {
        assert_eq!(bracket_groups("[a\n[b]"), vec!["b"]);
    }
}
