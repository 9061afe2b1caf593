// Vaani Engine — Command Dispatcher
//
// The tiered resolution cascade. Every utterance walks the same ladder:
//
//   1. memory recall        — answer directly from persisted memory
//   2. offline matcher      — fixed intent catalog, no network
//   3. preference capture   — "my favorite X is Y" side channel
//   4. remote inference     — HTTP gateway with conversation context
//   5. offline retry        — matcher again when the gateway fails
//   6. apology              — bilingual terminal fallback
//
// A tier that produces a response ends the walk. Recall answers are served
// from memory and not logged back into it; every other outcome records the
// user turn and the reply. Persistence failures are logged and never block
// a response.

use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::atoms::config::AssistantConfig;
use crate::atoms::constants::{ACTION_NONE, KNOWN_ACTIONS};
use crate::atoms::types::{ConversationEntry, EntityKind, PipelineResponse};
use crate::engine::gateway::InferenceGateway;
use crate::engine::intent::{can_handle_offline, IntentMatcher};
use crate::engine::language::{is_devanagari, pick};
use crate::engine::resolver::EntityResolver;
use crate::engine::store::MemoryStore;

pub struct Dispatcher {
    store: Arc<MemoryStore>,
    contacts: EntityResolver,
    apps: EntityResolver,
    matcher: IntentMatcher,
    gateway: Box<dyn InferenceGateway>,
    context_turns: usize,
    busy: AtomicBool,
}

/// Resets the busy flag on every exit path out of `resolve`.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Dispatcher {
    pub fn new(
        config: &AssistantConfig,
        store: Arc<MemoryStore>,
        gateway: Box<dyn InferenceGateway>,
    ) -> Self {
        Dispatcher {
            contacts: EntityResolver::new(store.clone(), EntityKind::Contact),
            apps: EntityResolver::new(store.clone(), EntityKind::App),
            matcher: IntentMatcher::new(config.country_code.clone()),
            store,
            gateway,
            context_turns: config.context_turns,
            busy: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn contacts(&self) -> &EntityResolver {
        &self.contacts
    }

    pub fn apps(&self) -> &EntityResolver {
        &self.apps
    }

    pub async fn health(&self) -> bool {
        self.gateway.health().await
    }

    /// Resolve one utterance through the cascade. Re-entrant calls while a
    /// previous resolution is in flight get a "still working" reply and do
    /// not touch memory.
    pub async fn resolve(&self, utterance: &str) -> PipelineResponse {
        let hindi = is_devanagari(utterance);

        if self.busy.swap(true, Ordering::SeqCst) {
            return PipelineResponse::spoken(pick(
                hindi,
                "मैं अभी आपके पिछले अनुरोध पर काम कर रहा हूँ। एक क्षण रुकें।",
                "I'm still working on your previous request. One moment please.",
            ));
        }
        let _guard = BusyGuard(&self.busy);

        let utterance = utterance.trim();
        if utterance.is_empty() {
            return PipelineResponse::spoken(pick(
                hindi,
                "मुझे कुछ सुनाई नहीं दिया। कृपया फिर से कहें।",
                "I didn't catch that. Could you say it again?",
            ));
        }
        let lower = utterance.to_lowercase();

        // Tier 1: recall from memory. Served, not re-logged.
        if let Some(reply) = self.try_recall(&lower, hindi) {
            info!("[dispatch] tier=recall");
            return PipelineResponse::spoken(reply);
        }

        // Tier 2: offline intent catalog.
        let offline = self.matcher.match_intent(utterance);
        if offline.handled {
            info!("[dispatch] tier=offline action='{}'", offline.action);
            return self.finish(utterance, offline.into());
        }

        // Tier 3: preference capture.
        if let Some(reply) = self.try_capture(&lower, hindi) {
            info!("[dispatch] tier=capture");
            return self.finish(utterance, PipelineResponse::spoken(reply));
        }

        // Tier 4: remote inference with recent conversation context.
        let context = self.context_window();
        match self.gateway.generate(utterance, &context).await {
            Ok(reply) => {
                info!("[dispatch] tier=remote action='{}'", reply.action);
                // Only vocabulary actions reach the executor; anything else
                // the model invents degrades to a plain reply.
                let action = if KNOWN_ACTIONS.contains(&reply.action.as_str()) {
                    reply.action
                } else {
                    warn!("[dispatch] dropping unknown remote action '{}'", reply.action);
                    ACTION_NONE.to_string()
                };
                let response = PipelineResponse::new(reply.reply, action, reply.target);
                return self.finish(utterance, response);
            }
            Err(e) => warn!("[dispatch] remote inference failed: {}", e),
        }

        // Tier 5: offline retry after a gateway failure. Only a retry that
        // actually handles the utterance counts; otherwise fall through.
        if can_handle_offline(utterance) {
            let retry = self.matcher.match_intent(utterance);
            if retry.handled {
                info!("[dispatch] tier=offline-retry");
                return self.finish(utterance, retry.into());
            }
        }

        // Tier 6: terminal apology.
        info!("[dispatch] tier=apology");
        let apology = PipelineResponse::spoken(pick(
            hindi,
            "माफ़ कीजिए, आपके अनुरोध को संसाधित करते समय एक त्रुटि हुई।",
            "I'm sorry, I encountered an error processing your request.",
        ));
        self.finish(utterance, apology)
    }

    // ── Tier 1: memory recall ──────────────────────────────────────────

    fn try_recall(&self, lower: &str, hindi: bool) -> Option<String> {
        const INTERROGATIVES: &[&str] = &["what", "which", "tell me", "क्या", "बताओ", "कौन"];
        if !INTERROGATIVES.iter().any(|c| lower.contains(c)) {
            return None;
        }

        // "what is the number of <name>" / "contact for <name>"
        if (lower.contains("number") || lower.contains("contact"))
            && !lower.contains("save")
            && !lower.contains("add")
        {
            let name = last_after(lower, &[" of ", " for "])?;
            let name = name.trim_matches(|c: char| !c.is_alphanumeric() && c != ' ').trim();
            if name.is_empty() {
                return None;
            }
            let number = self.contacts.lookup(name)?;
            return Some(if hindi {
                format!("{} का नंबर {} है", name, number)
            } else {
                format!("{}'s number is {}", name, number)
            });
        }

        // "what is my favorite <category>"
        if lower.contains("favorite") || lower.contains("favourite") {
            let category = PREF_CATEGORIES.iter().find(|c| lower.contains(**c))?;
            let category = canonical_category(category);
            let key = format!("favorite {}", category);

            match self.store.get_preference(&key) {
                Ok(Some(value)) => return Some(recall_reply(hindi, category, &value)),
                Ok(None) => {}
                Err(e) => warn!("[dispatch] preference read failed: {}", e),
            }

            // Older sessions may only have the statement in the log.
            if let Ok(hits) = self.store.search(&key) {
                for entry in hits.iter().rev() {
                    if let Some(value) = value_after_is(&entry.text) {
                        return Some(recall_reply(hindi, category, value));
                    }
                }
            }
            return None;
        }

        None
    }

    // ── Tier 3: preference capture ─────────────────────────────────────

    fn try_capture(&self, lower: &str, hindi: bool) -> Option<String> {
        const CUES: &[&str] = &["my favorite", "my favourite", "i like", "i love"];
        if !CUES.iter().any(|c| lower.contains(c)) {
            return None;
        }

        let (category, value) = detect_preference(lower)?;
        let key = format!("favorite {}", category);
        if let Err(e) = self.store.set_preference(&key, &value) {
            warn!("[dispatch] preference write failed: {}", e);
        }
        Some(if hindi {
            format!("समझ गया! मैं याद रखूँगा कि आपका पसंदीदा {} {} है।", category, value)
        } else {
            format!("Got it! I'll remember that your favorite {} is {}.", category, value)
        })
    }

    // ── Shared tail ────────────────────────────────────────────────────

    /// Newline-joined prefixed lines of the recent conversation.
    fn context_window(&self) -> String {
        match self.store.recent(self.context_turns) {
            Ok(entries) => entries
                .iter()
                .map(ConversationEntry::as_context_line)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                warn!("[dispatch] context read failed: {}", e);
                String::new()
            }
        }
    }

    /// Apply entity resolution and side effects to the chosen response,
    /// then record both turns.
    fn finish(&self, utterance: &str, mut response: PipelineResponse) -> PipelineResponse {
        response.target = match response.action.as_str() {
            "call" => self.contacts.resolve(&response.target),
            "open_app" => self.apps.resolve(&response.target),
            "sms" => match response.target.split_once(':') {
                Some((contact, body)) => {
                    format!("{}:{}", self.contacts.resolve(contact), body)
                }
                None => response.target,
            },
            "add_contact" => {
                if let Some((name, number)) = response.target.split_once(':') {
                    if let Err(e) = self.contacts.add(name, number) {
                        warn!("[dispatch] contact save failed: {}", e);
                    }
                }
                response.target
            }
            _ => response.target,
        };

        self.record(utterance, &response.reply);
        response
    }

    fn record(&self, user: &str, reply: &str) {
        if let Err(e) = self.store.append(&ConversationEntry::user(user)) {
            warn!("[dispatch] failed to log user turn: {}", e);
        }
        if let Err(e) = self.store.append(&ConversationEntry::assistant(reply)) {
            warn!("[dispatch] failed to log assistant turn: {}", e);
        }
    }
}

// ── Preference vocabulary ──────────────────────────────────────────────────

const PREF_CATEGORIES: &[&str] = &["colour", "color", "food", "song", "movie", "game", "place"];

const COLOR_VALUES: &[&str] = &[
    "red", "blue", "green", "yellow", "black", "white", "pink", "purple", "orange",
];

const FOOD_VALUES: &[&str] = &[
    "pizza", "pasta", "biryani", "dosa", "samosa", "burger", "noodles", "ice cream",
];

fn canonical_category(category: &str) -> &'static str {
    match category {
        "colour" | "color" => "color",
        "food" => "food",
        "song" => "song",
        "movie" => "movie",
        "game" => "game",
        _ => "place",
    }
}

/// Infer (category, value) from a statement. An explicit "favorite X is Y"
/// shape wins; otherwise a known value implies its category ("i love
/// biryani" → food/biryani).
fn detect_preference(lower: &str) -> Option<(&'static str, String)> {
    if let Some(category) = PREF_CATEGORIES.iter().find(|c| lower.contains(**c)) {
        if let Some(value) = value_after_is(lower) {
            return Some((canonical_category(category), value.to_string()));
        }
    }
    for (category, values) in [("color", COLOR_VALUES), ("food", FOOD_VALUES)] {
        if let Some(value) = values.iter().find(|v| lower.contains(**v)) {
            return Some((category, value.to_string()));
        }
    }
    None
}

/// Text after the last " is ", trimmed of trailing punctuation.
fn value_after_is(text: &str) -> Option<&str> {
    let i = text.rfind(" is ")?;
    let value = text[i + 4..].trim().trim_end_matches(['.', '!', '?']);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn recall_reply(hindi: bool, category: &str, value: &str) -> String {
    if hindi {
        format!("आपका पसंदीदा {} {} है।", category, value)
    } else {
        format!("Your favorite {} is {}.", category, value)
    }
}

/// Text after the last occurrence of any separator.
fn last_after<'a>(text: &'a str, separators: &[&str]) -> Option<&'a str> {
    separators
        .iter()
        .filter_map(|sep| text.rfind(sep).map(|i| &text[i + sep.len()..]))
        .max_by_key(|rest| text.len() - rest.len())
}

// ── Tests ──────────────────────────────────────────────────────────────────
