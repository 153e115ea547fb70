//! Farming assistant chat
//!
//! Replies are canned. Picking one is an ordered list of keyword rules
//! evaluated top to bottom against the lower-cased message; the first
//! rule with a matching keyword wins and [`ResponseKey::Crop`] is the
//! fallback. Keywords cover all three interface languages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::i18n::Language;

/// Canned reply topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKey {
    Crop,
    Soil,
    Weather,
    Scheme,
}

impl ResponseKey {
    pub const ALL: [ResponseKey; 4] = [
        ResponseKey::Crop,
        ResponseKey::Soil,
        ResponseKey::Weather,
        ResponseKey::Scheme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKey::Crop => "crop",
            ResponseKey::Soil => "soil",
            ResponseKey::Weather => "weather",
            ResponseKey::Scheme => "scheme",
        }
    }
}

/// One matching rule: any keyword contained in the message selects `response`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub response: ResponseKey,
    pub keywords: Vec<String>,
}

impl Rule {
    pub fn new(response: ResponseKey, keywords: &[&str]) -> Self {
        Self {
            response,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered rules plus the fallback reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: ResponseKey,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::new(ResponseKey::Soil, &["soil", "மண்", "मिट्टी"]),
                Rule::new(ResponseKey::Weather, &["weather", "வானிலை", "मौसम"]),
                Rule::new(ResponseKey::Scheme, &["scheme", "திட்ட", "योजना"]),
            ],
            fallback: ResponseKey::Crop,
        }
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback: ResponseKey) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Pick the reply for a message
    pub fn classify(&self, text: &str) -> ResponseKey {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.response)
            .unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReply {
    key: ResponseKey,
    ticks_left: u32,
}

/// Chat transcript with a simulated thinking delay
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: Option<PendingReply>,
    reply_delay_ticks: u32,
    rules: RuleSet,
}

impl Conversation {
    /// Start a conversation with the assistant's greeting
    pub fn new(greeting: &str, reply_delay_ticks: u32) -> Self {
        Self::with_rules(greeting, reply_delay_ticks, RuleSet::default())
    }

    pub fn with_rules(greeting: &str, reply_delay_ticks: u32, rules: RuleSet) -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, greeting)],
            pending: None,
            reply_delay_ticks: reply_delay_ticks.max(1),
            rules,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a reply is still being "thought about"
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
    }

    /// Add a user message and schedule the reply
    ///
    /// Blank input, or input sent while a reply is pending, is ignored and
    /// returns `None`.
    pub fn send(&mut self, text: &str) -> Option<ResponseKey> {
        let text = text.trim();
        if text.is_empty() || self.pending.is_some() {
            return None;
        }

        let key = self.rules.classify(text);
        self.messages.push(Message::new(Role::User, text));
        self.pending = Some(PendingReply {
            key,
            ticks_left: self.reply_delay_ticks,
        });
        tracing::debug!(response = key.as_str(), "assistant reply scheduled");
        Some(key)
    }

    /// Advance the reply delay; returns the reply when it is delivered
    pub fn tick(&mut self, catalog: &Catalog, language: Language) -> Option<&Message> {
        let pending = self.pending.as_mut()?;
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left > 0 {
            return None;
        }

        let key = pending.key;
        self.pending = None;
        self.messages
            .push(Message::new(Role::Assistant, catalog.reply(key, language)));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_keyword() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify("Check my soil health"), ResponseKey::Soil);
        assert_eq!(rules.classify("WEATHER forecast"), ResponseKey::Weather);
        assert_eq!(rules.classify("Government schemes for me"), ResponseKey::Scheme);
        assert_eq!(rules.classify("What crops should I plant?"), ResponseKey::Crop);
    }

    #[test]
    fn test_classify_local_languages() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify("என் மண் ஆரோக்கியத்தை சரிபார்க்கவும்"), ResponseKey::Soil);
        assert_eq!(rules.classify("मौसम का पूर्वानुमान"), ResponseKey::Weather);
        assert_eq!(rules.classify("எனக்கான அரசு திட்டங்கள்"), ResponseKey::Scheme);
        assert_eq!(rules.classify("मेरे लिए सरकारी योजनाएं"), ResponseKey::Scheme);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = RuleSet::default();
        // Mentions both soil and weather; soil is listed first
        assert_eq!(
            rules.classify("will the weather hurt my soil?"),
            ResponseKey::Soil
        );
    }

    #[test]
    fn test_fallback_is_crop() {
        assert_eq!(RuleSet::default().classify("hello"), ResponseKey::Crop);
        assert_eq!(RuleSet::default().classify(""), ResponseKey::Crop);
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleSet::new(
            vec![Rule::new(ResponseKey::Weather, &["RAIN"])],
            ResponseKey::Scheme,
        );
        assert_eq!(rules.classify("will it rain"), ResponseKey::Weather);
        assert_eq!(rules.classify("soil"), ResponseKey::Scheme);
    }

    #[test]
    fn test_conversation_reply_after_delay() {
        let catalog = Catalog::embedded().unwrap();
        let mut chat = Conversation::new(catalog.greeting(Language::English), 2);
        assert_eq!(chat.messages().len(), 1);

        assert_eq!(chat.send("weather please"), Some(ResponseKey::Weather));
        assert!(chat.is_waiting());
        assert_eq!(chat.messages().len(), 2);

        assert!(chat.tick(&catalog, Language::English).is_none());
        let reply = chat.tick(&catalog, Language::English).cloned().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with("Weather forecast"));
        assert!(!chat.is_waiting());
        assert_eq!(chat.last_reply(), Some(&reply));
    }

    #[test]
    fn test_conversation_ignores_blank_and_busy() {
        let catalog = Catalog::embedded().unwrap();
        let mut chat = Conversation::new(catalog.greeting(Language::Tamil), 1);

        assert_eq!(chat.send("   "), None);
        assert_eq!(chat.send("soil"), Some(ResponseKey::Soil));
        assert_eq!(chat.send("another"), None);
        assert_eq!(chat.messages().len(), 2);

        let reply = chat.tick(&catalog, Language::Tamil).unwrap();
        assert!(reply.content.starts_with("உங்கள் மண்"));
    }

    #[test]
    fn test_idle_tick_delivers_nothing() {
        let catalog = Catalog::embedded().unwrap();
        let mut chat = Conversation::new("hi", 1);
        assert!(chat.tick(&catalog, Language::English).is_none());
        assert_eq!(chat.messages().len(), 1);
    }
}
