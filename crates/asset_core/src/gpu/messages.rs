//! Builder diagnostic message types
//!
//! Resource builders report failures as data, following the same severity
//! convention as deserialization messages but with builder-specific
//! shapes (a shader compiler knows line numbers, a linker does not).

use std::fmt;

use crate::message::Severity;

/// One diagnostic from a shader compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderCompilerMessage {
    /// 1-based source line the diagnostic refers to, 0 if unknown.
    pub line: u32,
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Diagnostic text.
    pub message: String,
}

impl fmt::Display for ShaderCompilerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.severity, self.message)
    }
}

/// One diagnostic from a shader program linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderLinkerMessage {
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Diagnostic text.
    pub message: String,
}

impl fmt::Display for ShaderLinkerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Generic builder diagnostic for kinds without a specialized shape
/// (textures, samplers, frame buffers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMessage {
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Diagnostic text.
    pub message: String,
}

impl BuildMessage {
    /// Convenience constructor for an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
