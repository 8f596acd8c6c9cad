//! Severity-tagged diagnostic messages produced by deserialization

use std::fmt;

/// Severity of a diagnostic message.
///
/// Severities follow the asset taxonomy: `Info` is advisory, `Warning`
/// means the content is usable but flagged, `Error` means the content is
/// not usable and the owning record's payload stays (or returns to) Empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Advisory; no effect on usability.
    Info,
    /// Content usable but flagged.
    Warning,
    /// Content not usable.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One free-form diagnostic string with its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity of this message.
    pub severity: Severity,
    /// Human-readable diagnostic text.
    pub text: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)
    }
}

/// An ordered list of severity-tagged diagnostic messages.
///
/// Every deserialization attempt produces one `MessageLog`; the asset
/// record then keeps the attempt's messages partitioned by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, severity: Severity, text: impl Into<String>) {
        self.messages.push(Message {
            severity,
            text: text.into(),
        });
    }

    /// Append an [`Severity::Info`] message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Severity::Info, text);
    }

    /// Append a [`Severity::Warning`] message.
    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(Severity::Warning, text);
    }

    /// Append an [`Severity::Error`] message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Severity::Error, text);
    }

    /// Whether the log holds no messages at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether any message has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    /// Whether any message has [`Severity::Warning`].
    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Warning)
    }

    /// Whether any message has [`Severity::Info`].
    pub fn has_infos(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Info)
    }

    /// Iterate over the messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// All messages as a slice.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Split the log into (info, warning, error) logs, preserving order
    /// within each severity.
    pub fn partition(self) -> (MessageLog, MessageLog, MessageLog) {
        let mut infos = MessageLog::new();
        let mut warnings = MessageLog::new();
        let mut errors = MessageLog::new();
        for message in self.messages {
            match message.severity {
                Severity::Info => infos.messages.push(message),
                Severity::Warning => warnings.messages.push(message),
                Severity::Error => errors.messages.push(message),
            }
        }
        (infos, warnings, errors)
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
