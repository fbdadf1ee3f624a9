//! Tool call outcomes.
//!
//! Every handler resolves to one of these; the MCP layer maps them onto
//! `CallToolResult` without inspecting the text. Domain failures are data,
//! not transport errors, so a client always gets the message back as tool
//! output.

/// The result of one dispatched tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The operation completed; the message describes what happened.
    Success(String),
    /// The operation was refused or could not complete; the message starts
    /// with `Error:` and names the reason.
    Failed(String),
    /// The tool is advertised but intentionally not built; the message
    /// points the caller at a workaround.
    Unimplemented(String),
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::Unimplemented(message.into())
    }

    /// The text reported back to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failed(message) | Self::Unimplemented(message) => {
                message
            }
        }
    }

    /// Whether the MCP result should carry the error flag. Unimplemented
    /// tools answer normally; only refusals are flagged.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_are_flagged_as_errors() {
        assert!(!ToolOutcome::success("done").is_error());
        assert!(ToolOutcome::failed("Error: no").is_error());
        assert!(!ToolOutcome::unimplemented("later").is_error());
    }

    #[test]
    fn message_passes_through_unchanged() {
        let outcome = ToolOutcome::failed("Error: Presentation 'a.pptx' not found.");
        assert_eq!(outcome.message(), "Error: Presentation 'a.pptx' not found.");
    }
}
