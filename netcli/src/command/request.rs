//! Request classification.

/// Prefix that sends the rest of the line to the device verbatim.
pub const RAW_PREFIX: &str = "r- ";

/// Separator between a templated command and its grep filter.
pub const FILTER_SEPARATOR: &str = " | ";

/// Texts that end a session (compared case-insensitively).
pub const TERMINATORS: [&str; 3] = ["end", "exit", "quit"];

/// A request submitted to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Run a command line and reply with its output.
    Command(String),

    /// Close the session. Never answered.
    Terminate,
}

impl Request {
    /// Classify submitted text, mapping terminators to [`Request::Terminate`].
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        if Self::is_terminator(&text) {
            Request::Terminate
        } else {
            Request::Command(text)
        }
    }

    /// Check if text is exactly one of the terminators, ignoring case.
    pub fn is_terminator(text: &str) -> bool {
        TERMINATORS.iter().any(|t| text.eq_ignore_ascii_case(t))
    }
}

impl From<&str> for Request {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Request {
    fn from(text: String) -> Self {
        Self::parse(text)
    }
}

/// The parsed form of a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandLine<'a> {
    /// Vendor command sent as-is, never filtered.
    Raw(&'a str),

    /// Custom command to resolve, with an optional grep term.
    Templated {
        command: &'a str,
        filter: Option<&'a str>,
    },
}

impl<'a> CommandLine<'a> {
    /// Split a command line into its raw or templated form.
    ///
    /// Only the segment between the first and second separator is used as
    /// the grep term.
    pub fn parse(text: &'a str) -> Self {
        if let Some(raw) = text.strip_prefix(RAW_PREFIX) {
            return CommandLine::Raw(raw);
        }

        let mut segments = text.split(FILTER_SEPARATOR);
        let command = segments.next().unwrap_or_default();
        CommandLine::Templated {
            command,
            filter: segments.next(),
        }
    }

    /// Check if this line bypasses the resolver.
    pub fn is_raw(&self) -> bool {
        matches!(self, CommandLine::Raw(_))
    }
}
