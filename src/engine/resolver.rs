// Vaani Engine — Entity Resolver
//
// Maps free-text names to canonical identifiers (contact → phone number,
// app → package id) over a mutable, persisted dictionary. Resolution is
// exact-then-fuzzy; ties between substring candidates go to the longest
// key, so "rammohan" beats "ram" on "call rammohan please".
//
// Each resolver instance owns exactly one dictionary namespace and is
// injected where needed — there is no shared global state.

use log::warn;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::atoms::constants::PHONE_SHAPE;
use crate::atoms::error::AssistantResult;
use crate::atoms::types::EntityKind;
use crate::engine::store::MemoryStore;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_SHAPE).expect("phone shape regex is valid"));

/// True if the text already is a canonical phone identifier.
pub fn is_phone_shaped(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

pub struct EntityResolver {
    store: Arc<MemoryStore>,
    kind: EntityKind,
}

impl EntityResolver {
    pub fn new(store: Arc<MemoryStore>, kind: EntityKind) -> Self {
        EntityResolver { store, kind }
    }

    /// Resolve a free-text name to its canonical identifier, or return the
    /// input unchanged when nothing matches (the caller treats that as
    /// "unresolved" and decides whether it is a literal identifier).
    pub fn resolve(&self, raw: &str) -> String {
        self.lookup(raw).unwrap_or_else(|| raw.to_string())
    }

    /// Like `resolve`, but `None` when the dictionary has no match.
    /// Resolution order: identifier shape → exact key → fuzzy substring
    /// (longest key wins).
    pub fn lookup(&self, raw: &str) -> Option<String> {
        let clean = normalize(raw);
        if clean.is_empty() {
            return None;
        }

        // Already-canonical input needs no dictionary.
        if self.kind == EntityKind::Contact && is_phone_shaped(&clean) {
            return Some(clean);
        }

        match self.store.entity_get(self.kind, &clean) {
            Ok(Some(id)) => return Some(id),
            Ok(None) => {}
            Err(e) => {
                warn!("[resolver] dictionary read failed: {}", e);
                return None;
            }
        }

        // Fuzzy: any key that contains, or is contained in, the input.
        let entries = match self.store.entities(self.kind) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("[resolver] dictionary scan failed: {}", e);
                return None;
            }
        };
        entries
            .iter()
            .filter(|(key, _)| clean.contains(key.as_str()) || key.contains(&clean))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, id)| id.clone())
    }

    /// Normalize the name and upsert, persisting synchronously.
    pub fn add(&self, name: &str, identifier: &str) -> AssistantResult<()> {
        let clean = normalize(name);
        self.store.entity_upsert(self.kind, &clean, identifier)
    }

    /// Every known (name, identifier) pair, name-ordered.
    pub fn all(&self) -> AssistantResult<Vec<(String, String)>> {
        self.store.entities(self.kind)
    }
}

/// Trim, lowercase, and strip leading action verbs the speech layer tends
/// to leave on names ("call mom" → "mom").
fn normalize(raw: &str) -> String {
    let mut s = raw.trim().to_lowercase();
    for prefix in ["call ", "phone ", "dial ", "open "] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim().to_string();
        }
    }
    s
}
