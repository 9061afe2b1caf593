// ── Vaani Atoms: Error Types ───────────────────────────────────────────────
// Single canonical error enum for the pipeline, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (I/O, DB, Network, Gateway…).
//   • The `#[from]` attribute wires std/external error conversions automatically.
//   • Errors never cross the dispatcher boundary: `Dispatcher::resolve` absorbs
//     every variant into a user-facing apology, so nothing here is ever shown
//     to the user as a raw error code.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssistantError {
    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite / rusqlite database failure (persisted memory, dictionaries).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP / network failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote inference service reachable but unusable: non-2xx status,
    /// malformed payload, or an empty reply. Triggers the fallback tier.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Arithmetic expression failed to parse (mismatched parentheses,
    /// empty operand, trailing garbage). Never a crash — the offline
    /// matcher treats this as "no match".
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Config file is invalid or missing required values.
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All pipeline operations should return this type.
pub type AssistantResult<T> = Result<T, AssistantError>;
