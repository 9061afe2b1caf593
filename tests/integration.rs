// End-to-end tests for the command resolution pipeline: real store, real
// matcher and resolvers, scripted inference gateways instead of a live
// server.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use vaani::engine::language::is_devanagari;
use vaani::{
    AssistantConfig, AssistantError, AssistantResult, Dispatcher, GatewayReply, HttpGateway,
    InferenceGateway, MemoryStore,
};

// ── Scripted gateways ──────────────────────────────────────────────────────

/// Always errors; pushes every utterance down to the offline tiers.
struct DownGateway;

#[async_trait]
impl InferenceGateway for DownGateway {
    async fn generate(&self, _text: &str, _context: &str) -> AssistantResult<GatewayReply> {
        Err(AssistantError::Gateway("service down".into()))
    }

    async fn health(&self) -> bool {
        false
    }
}

/// Replies with a fixed payload and records the context it was given.
struct EchoGateway {
    reply: String,
    seen_context: Mutex<String>,
    calls: AtomicUsize,
}

impl EchoGateway {
    fn new(reply: &str) -> Self {
        EchoGateway {
            reply: reply.to_string(),
            seen_context: Mutex::new(String::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl InferenceGateway for EchoGateway {
    async fn generate(&self, _text: &str, context: &str) -> AssistantResult<GatewayReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_context.lock() = context.to_string();
        Ok(GatewayReply {
            reply: self.reply.clone(),
            action: "none".to_string(),
            target: String::new(),
            emotion: None,
            confidence: Some(0.8),
        })
    }

    async fn health(&self) -> bool {
        true
    }
}

/// Blocks inside `generate` until released, to hold the dispatcher busy.
struct StallingGateway {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl InferenceGateway for StallingGateway {
    async fn generate(&self, _text: &str, _context: &str) -> AssistantResult<GatewayReply> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(GatewayReply {
            reply: "done".to_string(),
            action: "none".to_string(),
            target: String::new(),
            emotion: None,
            confidence: None,
        })
    }

    async fn health(&self) -> bool {
        true
    }
}

fn offline_dispatcher() -> Dispatcher {
    let config = AssistantConfig::default();
    let store = Arc::new(MemoryStore::open_in_memory(config.memory_capacity).unwrap());
    Dispatcher::new(&config, store, Box::new(DownGateway))
}

// ── Offline command scenarios ──────────────────────────────────────────────

#[tokio::test]
async fn call_mom_resolves_to_seeded_number() {
    let d = offline_dispatcher();
    let r = d.resolve("call mom").await;
    assert_eq!(r.action, "call");
    assert_eq!(r.target, "+918827613672");
    assert_eq!(r.reply, "Calling mom");
    assert_eq!(d.store().len().unwrap(), 2);
}

#[tokio::test]
async fn time_query_is_answered_offline() {
    let d = offline_dispatcher();
    let r = d.resolve("what time is it").await;
    assert_eq!(r.action, "time");
    let clock = r.reply.rsplit("is ").next().unwrap();
    assert!(clock.contains(':'));
    assert!(clock.ends_with("AM") || clock.ends_with("PM"));
}

#[tokio::test]
async fn arithmetic_commands() {
    let d = offline_dispatcher();
    assert_eq!(d.resolve("calculate 10/4").await.reply, "Result: 2.5");
    assert_eq!(d.resolve("calculate (2+3)*4").await.reply, "Result: 20");
    assert_eq!(d.resolve("what is 2+3*4").await.reply, "Result: 14");
}

#[tokio::test]
async fn saved_contact_is_callable_by_its_new_name() {
    let d = offline_dispatcher();
    let r = d.resolve("add contact uncle raj 9876543210").await;
    assert_eq!(r.action, "add_contact");
    assert_eq!(r.target, "uncle raj:+919876543210");

    let r = d.resolve("call uncle raj").await;
    assert_eq!(r.action, "call");
    assert_eq!(r.target, "+919876543210");
}

#[tokio::test]
async fn fuzzy_contact_resolution_prefers_longest_key() {
    let d = offline_dispatcher();
    let r = d.resolve("call rammohan now").await;
    // Seed data has both "ram" and "rammohan"; the longer key must win.
    assert_eq!(r.target, "+917879648737");
}

// ── Gateway failure cascade ────────────────────────────────────────────────

#[tokio::test]
async fn unknown_command_ends_in_apology_when_gateway_is_down() {
    let d = offline_dispatcher();
    let r = d.resolve("compose a haiku about rain").await;
    assert_eq!(r.action, "none");
    assert!(r.reply.contains("sorry"));
    // The failed exchange is still part of the conversation record.
    assert_eq!(d.store().len().unwrap(), 2);
}

#[tokio::test]
async fn apology_is_spoken_in_the_input_script() {
    let d = offline_dispatcher();
    let r = d.resolve("बारिश पर एक कविता लिखो").await;
    assert_eq!(r.action, "none");
    assert!(is_devanagari(&r.reply));
}

#[tokio::test]
async fn precheck_hit_without_a_matching_rule_still_apologizes() {
    // "day" passes the offline precheck, yet no catalog rule handles the
    // utterance. With the gateway down the terminal apology must win over
    // the matcher's retry reply.
    let d = offline_dispatcher();
    let r = d.resolve("have a nice day ahead").await;
    assert_eq!(r.action, "none");
    assert!(r.reply.contains("sorry"));
}

#[tokio::test]
async fn offline_retry_still_answers_after_gateway_failure() {
    // "joke" is offline-capable, so a down gateway never matters.
    let d = offline_dispatcher();
    let r = d.resolve("tell a joke").await;
    assert_eq!(r.action, "none");
    assert!(!r.reply.contains("sorry"));
}

// ── Remote tier ────────────────────────────────────────────────────────────

#[tokio::test]
async fn remote_tier_receives_prefixed_context_lines() {
    let config = AssistantConfig::default();
    let store = Arc::new(MemoryStore::open_in_memory(config.memory_capacity).unwrap());
    let gateway = Arc::new(EchoGateway::new("Blue light scatters the most."));

    struct Fwd(Arc<EchoGateway>);
    #[async_trait]
    impl InferenceGateway for Fwd {
        async fn generate(&self, text: &str, context: &str) -> AssistantResult<GatewayReply> {
            self.0.generate(text, context).await
        }
        async fn health(&self) -> bool {
            self.0.health().await
        }
    }

    let d = Dispatcher::new(&config, store, Box::new(Fwd(gateway.clone())));
    d.resolve("call mom").await;
    let r = d.resolve("why is the sky blue").await;
    assert!(r.reply.contains("scatters"));

    let context = gateway.seen_context.lock().clone();
    assert!(context.contains("User: call mom"));
    assert!(context.contains("Assistant: Calling mom"));
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
}

// ── Memory behavior ────────────────────────────────────────────────────────

#[tokio::test]
async fn preference_capture_and_recall_loop() {
    let d = offline_dispatcher();
    let r = d.resolve("my favorite color is blue").await;
    assert!(r.reply.contains("blue"));

    let before = d.store().len().unwrap();
    let r = d.resolve("what is my favorite color").await;
    assert_eq!(r.reply, "Your favorite color is blue.");
    // Recall is served from memory, not logged back into it.
    assert_eq!(d.store().len().unwrap(), before);
}

#[tokio::test]
async fn conversation_log_never_exceeds_capacity() {
    let mut config = AssistantConfig::default();
    config.memory_capacity = 4;
    let store = Arc::new(MemoryStore::open_in_memory(config.memory_capacity).unwrap());
    let d = Dispatcher::new(&config, store, Box::new(DownGateway));

    for _ in 0..5 {
        d.resolve("what time is it").await;
    }
    assert_eq!(d.store().len().unwrap(), 4);
}

#[tokio::test]
async fn store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vaani.db");

    {
        let config = AssistantConfig::default();
        let store = Arc::new(MemoryStore::open(&path, config.memory_capacity).unwrap());
        let d = Dispatcher::new(&config, store, Box::new(DownGateway));
        d.resolve("my favorite food is biryani").await;
        d.resolve("add contact raj:+919876543210").await;
        d.resolve("call mom").await;
    }

    let config = AssistantConfig::default();
    let store = Arc::new(MemoryStore::open(&path, config.memory_capacity).unwrap());
    let d = Dispatcher::new(&config, store, Box::new(DownGateway));

    let r = d.resolve("what is my favorite food").await;
    assert_eq!(r.reply, "Your favorite food is biryani.");
    let r = d.resolve("call raj").await;
    assert_eq!(r.target, "+919876543210");
    assert!(d.store().len().unwrap() >= 2);
}

// ── Concurrency guard ──────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_request_gets_a_busy_reply() {
    let config = AssistantConfig::default();
    let store = Arc::new(MemoryStore::open_in_memory(config.memory_capacity).unwrap());
    let gateway = Arc::new(StallingGateway { entered: Notify::new(), release: Notify::new() });

    struct Fwd(Arc<StallingGateway>);
    #[async_trait]
    impl InferenceGateway for Fwd {
        async fn generate(&self, text: &str, context: &str) -> AssistantResult<GatewayReply> {
            self.0.generate(text, context).await
        }
        async fn health(&self) -> bool {
            self.0.health().await
        }
    }

    let d = Arc::new(Dispatcher::new(&config, store, Box::new(Fwd(gateway.clone()))));

    let d2 = d.clone();
    let slow = tokio::spawn(async move { d2.resolve("why is the sky blue").await });
    gateway.entered.notified().await;

    // The pipeline is mid-flight; a second request must not enter it.
    let r = d.resolve("call mom").await;
    assert!(r.reply.contains("still working"));
    assert_eq!(r.action, "none");

    gateway.release.notify_one();
    let first = slow.await.unwrap();
    assert_eq!(first.reply, "done");

    // Released: the same command now goes through.
    let r = d.resolve("call mom").await;
    assert_eq!(r.action, "call");
}

// ── Construction smoke ─────────────────────────────────────────────────────

#[test]
fn http_gateway_builds_from_default_config() {
    let g = HttpGateway::new(&AssistantConfig::default()).unwrap();
    assert_eq!(g.endpoint(), "http://127.0.0.1:8000");
}
