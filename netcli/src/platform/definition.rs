//! Platform definition for vendor-specific shell behavior.

use regex::bytes::Regex;

/// What the SSH transport needs to know to drive a vendor's CLI.
///
/// The prompt pattern decides when a command has finished; on-open commands
/// put the terminal in a scrape-friendly state (no paging, wide lines).
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "cisco_ios", "juniper_junos").
    pub name: String,

    /// Regex matching any prompt of this platform at the end of the output.
    pub prompt_pattern: Regex,

    /// Commands to run when the shell is first opened.
    pub on_open_commands: Vec<String>,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Create a new platform definition from a prompt pattern.
    pub fn new(name: impl Into<String>, prompt_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            prompt_pattern: Regex::new(prompt_pattern)?,
            on_open_commands: vec![],
            terminal_width: 511,
            terminal_height: 24,
        })
    }

    /// Add an on_open command.
    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    /// Set terminal dimensions.
    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Check if the tail of some output ends in a prompt.
    pub fn matches_prompt(&self, output: &[u8]) -> bool {
        self.prompt_pattern.is_match(output)
    }

    /// Strip the echoed command and the trailing prompt from raw output.
    pub fn normalize_output(&self, raw: &str, command: &str) -> String {
        let raw = raw.replace("\r\n", "\n");

        let trimmed = raw.trim_start_matches(['\r', '\n']);
        let output = trimmed
            .strip_prefix(command)
            .unwrap_or(trimmed)
            .trim_start_matches(['\r', '\n']);

        // Trailing prompt is the last line
        match output.rfind('\n') {
            Some(pos) => output[..pos].to_string(),
            None if self.matches_prompt(output.as_bytes()) => String::new(),
            None => output.to_string(),
        }
    }
}
