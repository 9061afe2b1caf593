// ── Vaani Atoms Layer ──────────────────────────────────────────────────────
// Pure types, constants, config, and errors — zero side effects, no I/O
// beyond config file loading. Dependency rule: atoms may only depend on std
// and external pure crates. Nothing here may import from engine/ or main.rs.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
