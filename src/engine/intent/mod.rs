// Vaani Engine — Offline Intent Matcher
//
// Keyword/pattern classifier for the fixed intent catalog. No ML model —
// substring heuristics over the lowercased utterance, fast & deterministic,
// covering English and Hindi trigger variants.
//
// The catalog is a data-driven table of rules evaluated in a fixed order;
// evaluation order is significant and part of the contract ("call" must be
// tried before "open", arithmetic before trivia, and so on). The first rule
// whose triggers match wins. A matched rule whose responder produces
// nothing (malformed expression, empty app name, discarded contact parse)
// ends matching with `handled = false` — later rules are not consulted.
//
// Module layout:
//   calc — recursive-descent arithmetic evaluator
//   mod  — rule table, target extraction, trivia, jokes

pub mod calc;

use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::atoms::types::IntentResult;
use crate::engine::language::{is_devanagari, pick};
use crate::engine::resolver::is_phone_shaped;

// ── Matcher ────────────────────────────────────────────────────────────────

/// Pure over its input plus the system clock; never touches memory.
pub struct IntentMatcher {
    /// Prefixed to bare 10-digit numbers when parsing add-contact.
    country_code: String,
}

impl IntentMatcher {
    pub fn new(country_code: impl Into<String>) -> Self {
        IntentMatcher { country_code: country_code.into() }
    }

    /// Classify one utterance against the ordered catalog.
    pub fn match_intent(&self, utterance: &str) -> IntentResult {
        let u = Utterance::new(utterance);
        for rule in RULES {
            if rule.matches(&u) {
                debug!("[intent] rule '{}' matched", rule.name);
                if let Some(result) = (rule.respond)(self, &u) {
                    return result;
                }
                // Matched group produced nothing — offline cannot help.
                break;
            }
        }
        IntentResult::unhandled(pick(
            u.hindi,
            "मुझे यह ऑफलाइन समझने में दिक्कत हो रही है। क्या आप इसे दोहरा सकते हैं?",
            "I'm having trouble understanding that offline. Can you try again?",
        ))
    }
}

/// Quick pre-check: does the utterance mention anything the offline
/// catalog could plausibly handle?
pub fn can_handle_offline(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    const OFFLINE_KEYWORDS: &[&str] = &[
        "name", "who are you", "how are you", "hello", "hi", "time", "date", "day", "call",
        "open", "wifi", "mobile data", "hotspot", "bluetooth", "settings", "thank", "joke",
        "help", "can you", "good morning", "good night", "namaste", "what can you do",
        "calculate", "capital", "message", "send", "text", "sms",
    ];
    OFFLINE_KEYWORDS.iter().any(|k| lower.contains(k))
}

// ── Utterance view ─────────────────────────────────────────────────────────

struct Utterance<'a> {
    raw: &'a str,
    lower: String,
    hindi: bool,
}

impl<'a> Utterance<'a> {
    fn new(raw: &'a str) -> Self {
        Utterance {
            raw,
            lower: raw.to_lowercase().trim().to_string(),
            hindi: is_devanagari(raw),
        }
    }
}

// ── Rule table ─────────────────────────────────────────────────────────────

struct IntentRule {
    name: &'static str,
    /// Case-insensitive substring triggers; any hit matches the rule.
    triggers: &'static [&'static str],
    /// Substrings that suppress the rule even when a trigger hits.
    veto: &'static [&'static str],
    /// Extra match condition beyond trigger containment (OR-ed in).
    guard: Option<fn(&Utterance) -> bool>,
    respond: fn(&IntentMatcher, &Utterance) -> Option<IntentResult>,
}

impl IntentRule {
    fn matches(&self, u: &Utterance) -> bool {
        if self.veto.iter().any(|v| u.lower.contains(v)) {
            return false;
        }
        self.triggers.iter().any(|t| u.lower.contains(t))
            || self.guard.map_or(false, |g| g(u))
    }
}

/// Evaluation order is load-bearing; keep in sync with the doc comment at
/// the top of this file when editing.
const RULES: &[IntentRule] = &[
    IntentRule {
        name: "identity",
        triggers: &[
            "what is your name", "who are you", "your name",
            "तुम्हारा नाम", "तेरा नाम", "आपका नाम", "नाम",
        ],
        veto: &[],
        guard: None,
        respond: identity,
    },
    IntentRule {
        name: "how_are_you",
        triggers: &["how are you", "how r u", "kaise ho", "कैसे हो", "कैसा है"],
        veto: &[],
        guard: None,
        respond: how_are_you,
    },
    IntentRule {
        name: "hello",
        triggers: &["hello", "hi vaani", "हेलो", "नमस्ते", "namaste"],
        veto: &[],
        guard: None,
        respond: hello,
    },
    IntentRule {
        name: "good_morning",
        triggers: &["good morning", "गुड मॉर्निंग", "सुप्रभात"],
        veto: &[],
        guard: None,
        respond: good_morning,
    },
    IntentRule {
        name: "good_night",
        triggers: &["good night", "शुभ रात्रि"],
        veto: &[],
        guard: None,
        respond: good_night,
    },
    IntentRule {
        name: "thanks",
        triggers: &["thank you", "thanks", "थैंक्यू", "धन्यवाद", "dhanyavad"],
        veto: &[],
        guard: None,
        respond: thanks,
    },
    IntentRule {
        name: "time",
        triggers: &["time", "समय", "samay"],
        veto: &[],
        guard: None,
        respond: time,
    },
    IntentRule {
        name: "date",
        triggers: &["date", "today", "tarikh", "तारीख", "तिथि", "टुडे डेट"],
        veto: &[],
        guard: None,
        respond: date,
    },
    IntentRule {
        name: "weekday",
        triggers: &["what day", "कौन सा दिन", "आज का दिन", "दिन क्या है"],
        veto: &[],
        guard: None,
        respond: weekday,
    },
    IntentRule {
        name: "call",
        triggers: &["call", "phone", "dial", "कॉल"],
        veto: &[],
        guard: None,
        respond: call,
    },
    IntentRule {
        name: "message",
        triggers: &["message", "send", "text", "sms", "मैसेज"],
        veto: &[],
        guard: None,
        respond: message,
    },
    IntentRule {
        name: "open_app",
        triggers: &["open"],
        veto: &["can you open"],
        guard: None,
        respond: open_app,
    },
    IntentRule {
        name: "wifi",
        triggers: &["wifi", "वाईफाई"],
        veto: &[],
        guard: None,
        respond: wifi,
    },
    IntentRule {
        name: "mobile_data",
        triggers: &["mobile data", "मोबाइल डेटा"],
        veto: &[],
        guard: None,
        respond: mobile_data,
    },
    IntentRule {
        name: "hotspot",
        triggers: &["hotspot", "हॉटस्पॉट"],
        veto: &[],
        guard: None,
        respond: hotspot,
    },
    IntentRule {
        name: "bluetooth",
        triggers: &["bluetooth", "ब्लूटूथ"],
        veto: &[],
        guard: None,
        respond: bluetooth,
    },
    IntentRule {
        name: "settings",
        triggers: &["settings", "सेटिंग्स"],
        veto: &[],
        guard: None,
        respond: settings,
    },
    IntentRule {
        name: "add_contact",
        triggers: &["add contact", "save contact"],
        veto: &[],
        guard: Some(|u| u.lower.contains("save") && u.lower.contains("number")),
        respond: add_contact,
    },
    IntentRule {
        name: "help",
        triggers: &["what can you do", "help", "commands"],
        veto: &[],
        guard: None,
        respond: help,
    },
    IntentRule {
        name: "joke",
        triggers: &["joke", "funny"],
        veto: &[],
        guard: None,
        respond: joke,
    },
    IntentRule {
        name: "creator",
        triggers: &["who made you", "who created you", "your creator"],
        veto: &[],
        guard: None,
        respond: creator,
    },
    IntentRule {
        name: "arithmetic",
        triggers: &["calculate"],
        veto: &[],
        guard: Some(|u| u.lower.chars().any(|c| c.is_ascii_digit() || "+-*/".contains(c))),
        respond: arithmetic,
    },
    IntentRule {
        name: "trivia",
        triggers: &["capital", "city", "country", "राजधानी"],
        veto: &[],
        guard: None,
        respond: trivia,
    },
    IntentRule {
        name: "capability",
        triggers: &["can you"],
        veto: &[],
        guard: None,
        respond: capability,
    },
];

// ── Responders ─────────────────────────────────────────────────────────────

fn identity(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "मैं वाणी हूँ, आपका निजी AI सहायक। कॉल, मैसेज और दैनिक कार्यों में आपकी मदद करने के लिए यहाँ हूँ!",
        "I am Vaani, your personal AI assistant. I'm here to help with calls, messages, and daily tasks!",
    )))
}

fn how_are_you(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "मैं बहुत अच्छा हूँ और आपकी मदद के लिए तैयार हूँ! आप आज कैसे हैं?",
        "I'm doing great and ready to assist! How can I help you today?",
    )))
}

fn hello(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "नमस्ते! मैं वाणी, आपका AI सहायक हूँ। मैं आपकी कैसे मदद कर सकता हूँ?",
        "Hello! I'm Vaani, your AI assistant. How may I help you?",
    )))
}

fn good_morning(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "सुप्रभात! आपके दिन की शानदार शुरुआत हो!",
        "Good morning! Hope you have a wonderful day ahead!",
    )))
}

fn good_night(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "शुभ रात्रि! अच्छे सपने देखें!",
        "Good night! Sleep well and sweet dreams!",
    )))
}

fn thanks(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "आपका स्वागत है! मैं हमेशा मदद के लिए यहाँ हूँ!",
        "You're welcome! I'm always here to help!",
    )))
}

fn time(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let now = chrono::Local::now().format("%I:%M %p").to_string();
    let reply = if u.hindi {
        format!("वर्तमान समय {} है", now)
    } else {
        format!("The current time is {}", now)
    };
    Some(IntentResult::handled(reply, "time", ""))
}

fn date(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let today = chrono::Local::now().format("%A, %B %d, %Y").to_string();
    let reply = if u.hindi {
        format!("आज {} है", today)
    } else {
        format!("Today is {}", today)
    };
    Some(IntentResult::handled(reply, "date", ""))
}

fn weekday(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let day = chrono::Local::now().format("%A").to_string();
    let reply = if u.hindi {
        format!("आज {} है", day)
    } else {
        format!("Today is {}", day)
    };
    Some(IntentResult::spoken(reply))
}

fn call(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let target = words_after(&u.lower, &["call", "phone", "dial", "कॉल"]);
    if target.is_empty() {
        return Some(IntentResult::spoken(pick(
            u.hindi,
            "किसे कॉल करना चाहेंगे?",
            "Who would you like me to call?",
        )));
    }
    let reply = if u.hindi {
        format!("{} को कॉल कर रहा हूँ", target)
    } else {
        format!("Calling {}", target)
    };
    Some(IntentResult::handled(reply, "call", target))
}

fn message(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    // Expected shape: "message <contact>: <text>".
    if let Some((left, right)) = u.lower.split_once(':') {
        let contact = strip_through(left, &["message", "send", "text", "sms", "मैसेज"])
            .trim()
            .to_string();
        let body = right.trim();
        if !contact.is_empty() && !body.is_empty() {
            let reply = if u.hindi {
                format!("{} को मैसेज भेज रहा हूँ: {}", contact, body)
            } else {
                format!("Sending message to {}: {}", contact, body)
            };
            return Some(IntentResult::handled(reply, "sms", format!("{}:{}", contact, body)));
        }
    }
    Some(IntentResult::spoken(pick(
        u.hindi,
        "कृपया बताएँ कि किसे और क्या मैसेज भेजना है।",
        "Please specify who to message and what to say.",
    )))
}

fn open_app(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let app = words_after(&u.lower, &["open"]);
    if app.is_empty() {
        return None;
    }
    let reply = if u.hindi {
        format!("{} खोल रहा हूँ", app)
    } else {
        format!("Opening {}", app)
    };
    Some(IntentResult::handled(reply, "open_app", app))
}

fn wifi(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(toggle(u, "wifi", "WiFi", "WiFi"))
}

fn mobile_data(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(toggle(u, "mobile_data", "mobile data", "मोबाइल डेटा"))
}

fn hotspot(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(toggle(u, "hotspot", "hotspot", "हॉटस्पॉट"))
}

fn bluetooth(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(toggle(u, "bluetooth", "Bluetooth", "ब्लूटूथ"))
}

/// On/off sub-match: "on"/"enable" anywhere selects on, everything else off.
fn toggle(u: &Utterance, action: &str, en_name: &str, hi_name: &str) -> IntentResult {
    let on = u.lower.contains("on") || u.lower.contains("enable") || u.lower.contains("चालू");
    let reply = if u.hindi {
        format!("{} {} कर रहा हूँ", hi_name, if on { "चालू" } else { "बंद" })
    } else {
        format!("Turning {} {}", if on { "on" } else { "off" }, en_name)
    };
    IntentResult::handled(reply, action, if on { "on" } else { "off" })
}

fn settings(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::handled(
        pick(u.hindi, "सेटिंग्स खोल रहा हूँ", "Opening settings"),
        "settings",
        "",
    ))
}

fn add_contact(m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let words: Vec<&str> = u.lower.split_whitespace().collect();
    let idx = words.iter().position(|w| w.contains("contact") || w.contains("save"))?;
    let remaining = words.get(idx + 1..)?.join(" ");
    let (name, number) = parse_contact_target(&remaining, &m.country_code)?;
    Some(IntentResult::handled(
        pick(u.hindi, "संपर्क सहेज रहा हूँ", "Saving contact"),
        "add_contact",
        format!("{}:{}", name, number),
    ))
}

/// Parse "<name>:<number>" or "<name…> <number>"; keep digits and a leading
/// `+`, prefix the country code onto bare 10-digit numbers, and discard
/// anything that does not end up phone-shaped.
fn parse_contact_target(raw: &str, country_code: &str) -> Option<(String, String)> {
    let (name, number) = if let Some((n, num)) = raw.split_once(':') {
        (n.trim().to_string(), num.trim().to_string())
    } else {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.len() < 2 {
            return None;
        }
        (words[..words.len() - 1].join(" "), words[words.len() - 1].to_string())
    };
    if name.is_empty() {
        return None;
    }

    let mut digits: String = number.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    if !digits.starts_with('+') && digits.len() == 10 {
        digits = format!("{}{}", country_code, digits);
    }
    if !is_phone_shaped(&digits) {
        return None;
    }
    Some((name, digits))
}

fn help(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "मैं कॉल करने, मैसेज भेजने, ऐप्स खोलने, समय और तारीख बताने, WiFi/डेटा/हॉटस्पॉट नियंत्रित करने, गणनाएँ करने, और बहुत कुछ कर सकता हूँ! बस पूछें!",
        "I can help with: making calls, sending messages, opening apps, checking time/date, controlling WiFi/data/hotspot, calculations, and more! Just ask!",
    )))
}

const JOKES: &[(&str, &str)] = &[
    (
        "कंप्यूटर ने ब्रेक क्यों माँगा? क्योंकि वह क्रैश कर रहा था!",
        "Why did the computer take a break? Because it was crashing!",
    ),
    (
        "स्मार्टफोन स्कूल क्यों गया? अपनी रिसेप्शन सुधारने के लिए!",
        "Why did the smartphone go to school? To improve its reception!",
    ),
    (
        "मैं आलसी नहीं हूँ, मैं बस एनर्जी-सेविंग मोड में हूँ!",
        "I'm not lazy, I'm just in energy-saving mode!",
    ),
];

fn joke(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    // Clock-nanos index — cheap randomness, no extra crate.
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos() as usize;
    let (hi, en) = JOKES[nanos % JOKES.len()];
    Some(IntentResult::spoken(pick(u.hindi, hi, en)))
}

fn creator(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    Some(IntentResult::spoken(pick(
        u.hindi,
        "मुझे आपके लिए एक निजी AI सहायक के रूप में बनाया गया था!",
        "I was created to be your personal AI assistant!",
    )))
}

fn arithmetic(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let mut rest = u.lower.as_str();
    for marker in ["calculate", "what is", "equals"] {
        if let Some(i) = rest.find(marker) {
            rest = &rest[i + marker.len()..];
        }
    }
    let expr: String = rest
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/(). ".contains(*c))
        .collect();
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }
    match calc::evaluate(expr) {
        Ok(value) => {
            let rendered = calc::format_result(value);
            let reply = if u.hindi {
                format!("परिणाम: {}", rendered)
            } else {
                format!("Result: {}", rendered)
            };
            Some(IntentResult::spoken(reply))
        }
        Err(e) => {
            debug!("[intent] calculation failed for '{}': {}", expr, e);
            None
        }
    }
}

const TRIVIA: &[(&str, &str)] = &[
    ("capital of france", "Paris"),
    ("capital of india", "New Delhi"),
    ("capital of usa", "Washington, D.C."),
    ("फ्रांस की राजधानी", "पेरिस"),
    ("भारत की राजधानी", "नई दिल्ली"),
    ("अमेरिका की राजधानी", "वाशिंगटन, डी.सी."),
];

fn trivia(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let (question, answer) = TRIVIA.iter().find(|(q, _)| u.lower.contains(q))?;
    let reply = if u.hindi {
        format!("{}: {}", question, answer)
    } else {
        format!("The {} is {}", question, answer)
    };
    Some(IntentResult::spoken(reply))
}

fn capability(_m: &IntentMatcher, u: &Utterance) -> Option<IntentResult> {
    let reply = if u.lower.contains("call") {
        pick(
            u.hindi,
            "हाँ, मैं आपके लिए कॉल कर सकता हूँ! बस 'कॉल' के बाद संपर्क का नाम बताएँ।",
            "Yes, I can make calls for you! Just say 'Call' followed by the contact name.",
        )
    } else if u.lower.contains("message") || u.lower.contains("text") {
        pick(
            u.hindi,
            "हाँ, मैं मैसेज भेज सकता हूँ! बस 'मैसेज' के बाद संपर्क और संदेश बताएँ।",
            "Yes, I can send messages! Just say 'Message' followed by contact and message.",
        )
    } else {
        pick(
            u.hindi,
            "मैं बहुत कुछ कर सकता हूँ! कॉल, ऐप्स खोलने, या समय पूछने की कोशिश करें।",
            "I can do many things! Try asking me to make calls, open apps, or check the time.",
        )
    };
    Some(IntentResult::spoken(reply))
}

// ── Target extraction helpers ──────────────────────────────────────────────

/// Everything after the first whitespace token containing a trigger word.
fn words_after(lower: &str, triggers: &[&str]) -> String {
    let words: Vec<&str> = lower.split_whitespace().collect();
    let Some(idx) = words.iter().position(|w| triggers.iter().any(|t| w.contains(t))) else {
        return String::new();
    };
    words.get(idx + 1..).map(|rest| rest.join(" ")).unwrap_or_default()
}

/// Drop everything up to and including the first marker occurrence.
fn strip_through<'a>(s: &'a str, markers: &[&str]) -> &'a str {
    for marker in markers {
        if let Some(i) = s.find(marker) {
            return &s[i + marker.len()..];
        }
    }
    s
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> IntentMatcher {
        IntentMatcher::new("+91")
    }

    #[test]
    fn identity_in_both_languages() {
        let r = matcher().match_intent("what is your name");
        assert!(r.handled);
        assert!(r.reply.contains("Vaani"));
        let r = matcher().match_intent("तुम्हारा नाम क्या है");
        assert!(r.handled);
        assert!(r.reply.contains("वाणी"));
    }

    #[test]
    fn time_has_clock_format() {
        let r = matcher().match_intent("what time is it");
        assert!(r.handled);
        assert_eq!(r.action, "time");
        // hh:mm AM/PM shape
        let spoken = r.reply.rsplit("is ").next().unwrap();
        assert!(spoken.contains(':'));
        assert!(spoken.ends_with("AM") || spoken.ends_with("PM"));
    }

    #[test]
    fn call_extracts_trailing_target() {
        let r = matcher().match_intent("call mom");
        assert!(r.handled);
        assert_eq!(r.action, "call");
        assert_eq!(r.target, "mom");
        assert_eq!(r.reply, "Calling mom");
    }

    #[test]
    fn call_without_target_prompts() {
        let r = matcher().match_intent("please call");
        assert!(r.handled);
        assert_eq!(r.action, "none");
        assert!(r.reply.contains("Who"));
    }

    #[test]
    fn call_outranks_open() {
        // "phone" is both a call trigger and an app name; call wins by order.
        let r = matcher().match_intent("open phone");
        assert_eq!(r.action, "none");
        assert!(r.reply.contains("Who"));
    }

    #[test]
    fn message_requires_colon_shape() {
        let r = matcher().match_intent("message mom: reaching home by 8");
        assert!(r.handled);
        assert_eq!(r.action, "sms");
        assert_eq!(r.target, "mom:reaching home by 8");

        let r = matcher().match_intent("send something");
        assert!(r.handled);
        assert_eq!(r.action, "none");
        assert!(r.reply.contains("specify"));
    }

    #[test]
    fn open_app_extracts_name() {
        let r = matcher().match_intent("open whatsapp");
        assert!(r.handled);
        assert_eq!(r.action, "open_app");
        assert_eq!(r.target, "whatsapp");
    }

    #[test]
    fn can_you_open_is_a_capability_question() {
        let r = matcher().match_intent("can you open apps for me");
        assert!(r.handled);
        assert_eq!(r.action, "none");
    }

    #[test]
    fn connectivity_on_off_submatch() {
        let r = matcher().match_intent("turn on wifi");
        assert_eq!((r.action.as_str(), r.target.as_str()), ("wifi", "on"));
        let r = matcher().match_intent("wifi off");
        assert_eq!((r.action.as_str(), r.target.as_str()), ("wifi", "off"));
        let r = matcher().match_intent("enable bluetooth");
        assert_eq!((r.action.as_str(), r.target.as_str()), ("bluetooth", "on"));
        let r = matcher().match_intent("disable hotspot");
        assert_eq!((r.action.as_str(), r.target.as_str()), ("hotspot", "off"));
    }

    #[test]
    fn add_contact_colon_form() {
        let r = matcher().match_intent("add contact raj:+919876543210");
        assert!(r.handled);
        assert_eq!(r.action, "add_contact");
        assert_eq!(r.target, "raj:+919876543210");
    }

    #[test]
    fn add_contact_bare_ten_digits_gets_country_code() {
        let r = matcher().match_intent("save contact uncle raj 9876543210");
        assert!(r.handled);
        assert_eq!(r.target, "uncle raj:+919876543210");
    }

    #[test]
    fn add_contact_bad_number_is_discarded() {
        let r = matcher().match_intent("add contact raj 12345");
        assert!(!r.handled);
    }

    #[test]
    fn arithmetic_happy_path() {
        let r = matcher().match_intent("calculate 10/4");
        assert!(r.handled);
        assert_eq!(r.reply, "Result: 2.5");

        let r = matcher().match_intent("calculate 2+3*4");
        assert_eq!(r.reply, "Result: 14");
    }

    #[test]
    fn arithmetic_triggers_on_operators_alone() {
        let r = matcher().match_intent("(2+3)*4");
        assert!(r.handled);
        assert_eq!(r.reply, "Result: 20");
    }

    #[test]
    fn malformed_expression_is_not_handled() {
        let r = matcher().match_intent("calculate (2+");
        assert!(!r.handled);
    }

    #[test]
    fn trivia_lookup() {
        let r = matcher().match_intent("what's the capital of france");
        assert!(r.handled);
        assert!(r.reply.contains("Paris"));
    }

    #[test]
    fn unknown_utterance_is_unhandled_bilingually() {
        let r = matcher().match_intent("fly me to the moon");
        assert!(!r.handled);
        assert!(r.reply.contains("offline"));
        let r = matcher().match_intent("चाँद पर ले चलो");
        assert!(!r.handled);
        assert!(is_devanagari(&r.reply));
    }

    #[test]
    fn offline_precheck() {
        assert!(can_handle_offline("what time is it"));
        assert!(can_handle_offline("call mom"));
        assert!(!can_handle_offline("quantum entanglement"));
    }
}
