// Vaani — bilingual voice-command resolution pipeline.
//
// Layering:
//   atoms  — pure types, constants, errors, config (no I/O)
//   engine — dispatcher, intent catalog, memory store, resolver, gateway
//
// The crate exposes the dispatcher as the single entry point; callers feed
// it utterances and execute the `(action, target)` pairs it returns.

pub mod atoms;
pub mod engine;

pub use atoms::config::AssistantConfig;
pub use atoms::error::{AssistantError, AssistantResult};
pub use atoms::types::{ConversationEntry, EntityKind, IntentResult, PipelineResponse, Role};
pub use engine::dispatcher::Dispatcher;
pub use engine::gateway::{GatewayReply, HttpGateway, InferenceGateway};
pub use engine::store::MemoryStore;
