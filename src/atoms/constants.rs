// ── Vaani Atoms: Constants ─────────────────────────────────────────────────
// All named constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic strings and
// keeps every layer's code self-documenting.

// ── Memory bounds ──────────────────────────────────────────────────────────
// The conversation log is FIFO-bounded; appends beyond this evict the oldest
// entry. 100 matches the phone-assistant heritage of this pipeline.
pub const DEFAULT_MEMORY_CAPACITY: usize = 100;

/// Turns of recent memory sent to the remote service as context.
pub const DEFAULT_CONTEXT_TURNS: usize = 5;

// ── Remote gateway timeouts ────────────────────────────────────────────────
// The remote call is the only unbounded-wall-clock operation in the
// pipeline; both bounds are enforced by the reqwest client.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 90;

/// Default remote inference endpoint (local Ollama-backed command server).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

// ── Phone numbers ──────────────────────────────────────────────────────────
/// Prefixed to bare 10-digit numbers when saving contacts.
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// A canonical phone identifier: optional leading `+`, 10–13 digits.
pub const PHONE_SHAPE: &str = r"^\+?[0-9]{10,13}$";

// ── Action vocabulary ──────────────────────────────────────────────────────
// Symbolic side-effect requests handed to an external executor. The
// pipeline only ever selects from this set; it executes none of them.
pub const ACTION_NONE: &str = "none";
pub const KNOWN_ACTIONS: &[&str] = &[
    "call",
    "sms",
    "search",
    "open_app",
    "wifi",
    "mobile_data",
    "hotspot",
    "bluetooth",
    "settings",
    "add_contact",
    "time",
    "date",
    ACTION_NONE,
];
