//! Prompt composition: configurable system template + final user prompt.
//!
//! Pure string/structure assembly. No I/O happens here, so composition is
//! testable without network access and byte-identical for identical inputs.

use chrono::{Datelike, NaiveDate};
use llm_service::ChatMessage;

/// Default system instruction. A product-policy string, not logic: override
/// it via `SYSTEM_PROMPT_TEMPLATE` without touching the pipeline.
///
/// Placeholders: `{topic}`, `{current_date}`.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "You are a helpful and knowledgeable assistant for {topic}. Today is {current_date}. \
Given the provided context sections from the documentation, answer the question using only that information, \
formatted as markdown. If the documentation does not cover the question, you may fall back on general \
knowledge, but say so with a lighthearted disclaimer.";

/// The system-instruction template with its placeholders still in place.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    system: String,
}

impl PromptTemplate {
    /// Wraps a raw template string.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
        }
    }

    /// Reads `SYSTEM_PROMPT_TEMPLATE` from env, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var("SYSTEM_PROMPT_TEMPLATE") {
            Ok(s) if !s.trim().is_empty() => Self::new(s),
            _ => Self::default(),
        }
    }

    /// Renders the system instruction for a topic and date.
    pub fn render_system(&self, topic: &str, date: NaiveDate) -> String {
        self.system
            .replace("{topic}", topic)
            .replace("{current_date}", &format_prompt_date(date))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_TEMPLATE)
    }
}

/// Renders a date as `<MONTH_UPPERCASE> <DAY>`, e.g. `AUGUST 7`.
pub fn format_prompt_date(date: NaiveDate) -> String {
    let month = date.format("%B").to_string().to_uppercase();
    format!("{month} {}", date.day())
}

/// Builds the full message sequence:
/// `[system] + history (role-tagged) + [user: context + question]`.
pub fn compose(
    template: &PromptTemplate,
    context_text: &str,
    history: &[ChatMessage],
    query: &str,
    topic: &str,
    date: NaiveDate,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(template.render_system(topic, date)));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(build_user_prompt(context_text, query)));
    messages
}

/// Final user prompt combining the context block and the question.
fn build_user_prompt(context_text: &str, query: &str) -> String {
    format!(
        "Context sections:\n{context_text}\n\nQuestion: \"\"\"\n{query}\n\"\"\"\n\nAnswer as markdown (including related code snippets if available):"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_service::ChatRole;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn date_renders_uppercase_month_without_padding() {
        assert_eq!(format_prompt_date(date()), "AUGUST 7");
        let jan = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(format_prompt_date(jan), "JANUARY 31");
    }

    #[test]
    fn system_template_renders_topic_and_date() {
        let rendered = PromptTemplate::default().render_system("the course docs", date());
        assert!(rendered.contains("the course docs"));
        assert!(rendered.contains("AUGUST 7"));
        assert!(!rendered.contains("{topic}"));
        assert!(!rendered.contains("{current_date}"));
    }

    #[test]
    fn message_sequence_is_system_history_user() {
        let history = vec![
            ChatMessage::user("earlier question"),
            ChatMessage::assistant("earlier answer"),
        ];
        let messages = compose(
            &PromptTemplate::default(),
            "passage one\n---\n",
            &history,
            "what is due next week?",
            "the syllabus",
            date(),
        );

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier answer");
        assert_eq!(messages[3].role, ChatRole::User);
        assert!(messages[3].content.contains("passage one"));
        assert!(messages[3].content.contains("what is due next week?"));
    }

    #[test]
    fn composition_is_idempotent() {
        let history = vec![ChatMessage::user("q")];
        let a = compose(
            &PromptTemplate::default(),
            "ctx",
            &history,
            "query",
            "topic",
            date(),
        );
        let b = compose(
            &PromptTemplate::default(),
            "ctx",
            &history,
            "query",
            "topic",
            date(),
        );
        assert_eq!(a, b);
    }
}
