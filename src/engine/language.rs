// Vaani Engine — Script detection & bilingual replies
//
// The pipeline speaks English and Hindi. Language choice is a pure script
// heuristic: any Devanagari code point anywhere in the input selects the
// Hindi variant of a reply. No NLP, fast & deterministic.

/// True if the text contains any Devanagari code point (U+0900–U+097F).
pub fn is_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Language tag for downstream speech synthesis.
pub fn language_tag(text: &str) -> &'static str {
    if is_devanagari(text) {
        "hi-IN"
    } else {
        "en-US"
    }
}

/// Pick the Hindi or English variant of a reply.
pub fn pick<'a>(hindi: bool, hi: &'a str, en: &'a str) -> &'a str {
    if hindi {
        hi
    } else {
        en
    }
}

/// Hour-bucketed greeting used at startup.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning! I'm Vaani, your AI assistant. How may I help you?",
        12..=16 => "Good afternoon! I'm Vaani, ready to assist you!",
        17..=20 => "Good evening! I'm Vaani, how can I help you today?",
        _ => "Hello! I'm Vaani, your AI assistant. What can I do for you?",
    }
}
