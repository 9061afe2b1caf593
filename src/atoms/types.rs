// ── Vaani Atoms: Core types ────────────────────────────────────────────────
// These are the data structures that flow through the entire pipeline.
// They are independent of any storage backend or remote service.

use serde::{Deserialize, Serialize};

// ── Conversation entries ───────────────────────────────────────────────────

/// Who produced a conversation turn. Derived once from the structural
/// prefix of the raw line (`"User: "` / `"Assistant: "` / `"System: "`)
/// at entry creation and never mutated afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Structural-prefix label used when recomposing a line for context.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }

    pub fn parse(s: &str) -> Role {
        match s {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::System,
        }
    }
}

/// One logged utterance or response. Duplicates are allowed; ordering is
/// insertion order, owned by the memory store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationEntry {
    pub text: String,
    pub timestamp: String,
    pub role: Role,
}

impl ConversationEntry {
    /// Build an entry from a raw prefixed line. Unprefixed text is treated
    /// as a system note.
    pub fn from_line(line: &str) -> Self {
        let (role, text) = if let Some(rest) = line.strip_prefix("User: ") {
            (Role::User, rest)
        } else if let Some(rest) = line.strip_prefix("Assistant: ") {
            (Role::Assistant, rest)
        } else if let Some(rest) = line.strip_prefix("System: ") {
            (Role::System, rest)
        } else {
            (Role::System, line)
        };
        ConversationEntry {
            text: text.to_string(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            role,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        ConversationEntry {
            text: text.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            role: Role::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ConversationEntry {
            text: text.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            role: Role::Assistant,
        }
    }

    /// Recompose the prefixed line shape used for remote context windows.
    pub fn as_context_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

// ── Intent results ─────────────────────────────────────────────────────────

/// Result of one offline-matcher invocation. Transient, never persisted.
/// `action` uses the `"none"` sentinel for replies with no side effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntentResult {
    pub reply: String,
    pub action: String,
    pub target: String,
    pub handled: bool,
}

impl IntentResult {
    pub fn handled(reply: impl Into<String>, action: impl Into<String>, target: impl Into<String>) -> Self {
        IntentResult {
            reply: reply.into(),
            action: action.into(),
            target: target.into(),
            handled: true,
        }
    }

    /// A reply with no side effect (`action = "none"`).
    pub fn spoken(reply: impl Into<String>) -> Self {
        Self::handled(reply, "none", "")
    }

    pub fn unhandled(reply: impl Into<String>) -> Self {
        IntentResult {
            reply: reply.into(),
            action: "none".into(),
            target: String::new(),
            handled: false,
        }
    }
}

// ── Pipeline responses ─────────────────────────────────────────────────────

/// The externally visible result of one resolution cycle. The `(action,
/// target)` pair is handed to an external executor; the pipeline itself
/// never performs side effects beyond its own memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineResponse {
    pub reply: String,
    pub action: String,
    pub target: String,
}

impl PipelineResponse {
    pub fn new(reply: impl Into<String>, action: impl Into<String>, target: impl Into<String>) -> Self {
        PipelineResponse {
            reply: reply.into(),
            action: action.into(),
            target: target.into(),
        }
    }

    pub fn spoken(reply: impl Into<String>) -> Self {
        Self::new(reply, "none", "")
    }
}

impl From<IntentResult> for PipelineResponse {
    fn from(r: IntentResult) -> Self {
        PipelineResponse {
            reply: r.reply,
            action: r.action,
            target: r.target,
        }
    }
}

// ── Entity dictionaries ────────────────────────────────────────────────────

/// Namespace of a persisted entity dictionary. Contacts map spoken names to
/// phone numbers; apps map spoken names to package identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Contact,
    App,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Contact => "contact",
            EntityKind::App => "app",
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_derived_from_prefix() {
        assert_eq!(ConversationEntry::from_line("User: call mom").role, Role::User);
        assert_eq!(ConversationEntry::from_line("Assistant: Calling mom").role, Role::Assistant);
        assert_eq!(ConversationEntry::from_line("System: ready").role, Role::System);
        assert_eq!(ConversationEntry::from_line("bare text").role, Role::System);
    }

    #[test]
    fn prefix_stripped_from_text() {
        let e = ConversationEntry::from_line("User: call mom");
        assert_eq!(e.text, "call mom");
        assert_eq!(e.as_context_line(), "User: call mom");
    }

    #[test]
    fn intent_result_sentinels() {
        let r = IntentResult::spoken("hi");
        assert_eq!(r.action, "none");
        assert!(r.handled);
        assert!(!IntentResult::unhandled("eh?").handled);
    }
}
