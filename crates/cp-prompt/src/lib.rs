//! Prompt-format lookup: turns a model-type identifier into the wrapper
//! strings and templates a llama.cpp-style server expects raw prompts in.
//!
//! The table ships embedded in the binary; an unusable table is a programmer
//! error and panics at first access.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

pub type PromptFormats = BTreeMap<String, PromptFormat>;

static PROMPT_FORMATS: LazyLock<PromptFormats> = LazyLock::new(|| {
    let formats: PromptFormats =
        serde_json::from_str(include_str!("../prompt-formats.json")).expect("prompt-formats.json must parse");
    assert!(!formats.is_empty(), "prompt format table must not be empty");
    formats
});

pub fn prompt_formats() -> &'static PromptFormats {
    &PROMPT_FORMATS
}

pub fn get(model_type: &str) -> Option<&'static PromptFormat> {
    PROMPT_FORMATS.get(model_type)
}

/// All known model-type identifiers, sorted. Drives the CLI value enum.
pub fn model_types() -> Vec<&'static str> {
    PROMPT_FORMATS.keys().map(String::as_str).collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFormat {
    pub template: String,
    pub history_template: String,
    pub char: String,
    pub char_msg_prefix: String,
    pub char_msg_suffix: String,
    pub user: String,
    pub user_msg_prefix: String,
    pub user_msg_suffix: String,
    #[serde(default)]
    pub stops: String,
}

/// A named message, user or assistant side.
#[derive(Debug, Clone)]
pub struct TextMessage {
    pub name: String,
    pub message: String,
}

impl PromptFormat {
    pub fn user_content(&self, content: &str) -> String {
        format!("{}{}{}", self.user_msg_prefix, content, self.user_msg_suffix)
    }

    pub fn char_content(&self, content: &str) -> String {
        format!("{}{}{}", self.char_msg_prefix, content, self.char_msg_suffix)
    }

    pub fn user_message(&self, content: &str) -> TextMessage {
        TextMessage { name: self.user.clone(), message: self.user_content(content) }
    }

    pub fn char_message(&self, content: &str) -> TextMessage {
        TextMessage { name: self.char.clone(), message: self.char_content(content) }
    }

    /// Render the message history through the per-message template.
    pub fn history(&self, messages: &[TextMessage]) -> String {
        let mut out = String::new();
        for msg in messages {
            out.push_str(&render(&self.history_template, &[("name", &msg.name), ("message", &msg.message)]));
        }
        out
    }

    /// Render a full prompt: system text plus message history in this
    /// format's frame.
    pub fn prompt(&self, system: &str, messages: &[TextMessage]) -> String {
        let history = self.history(messages);
        render(
            &self.template,
            &[("prompt", system), ("history", &history), ("char", &self.char), ("user", &self.user)],
        )
    }
}

fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "This is a conversation between a user and a friendly chatbot. The chatbot is helpful, kind, honest, good at writing, and never fails to answer any requests immediately and with precision";

    #[test]
    fn table_is_consistent() {
        let formats = prompt_formats();
        assert!(!formats.is_empty());
        for (model, format) in formats {
            assert!(!format.user.is_empty(), "{model}: empty user name");
            assert!(!format.char.is_empty(), "{model}: empty char name");
            assert!(format.history_template.contains("{{message}}"), "{model}: history template drops messages");
        }
    }

    #[test]
    fn llama2_renders_known_frame() {
        let p = get("llama2").unwrap();
        let user_msg = p.user_message("Hello to you!");
        let char_msg = p.char_message("Hello friend :)");

        let prompt = p.prompt(SYSTEM, &[user_msg, char_msg]);
        assert_eq!(
            prompt,
            format!(
                "<s>[INST] <<SYS>>\n{SYSTEM}\n<</SYS>>\n\nTest Message [/INST] Test Successfull </s>User: <s>[INST] Hello to you! [/INST]Assistant: Hello friend :)</s>Assistant"
            )
        );
    }

    #[test]
    fn every_format_renders_a_prompt() {
        for (model, p) in prompt_formats() {
            let user_msg = p.user_message("Hello to you!");
            let char_msg = p.char_message("Hello friend :)");
            let prompt = p.prompt(SYSTEM, &[user_msg, char_msg]);
            assert!(!prompt.is_empty(), "{model}: empty prompt");
            assert!(prompt.contains("Hello to you!"), "{model}: prompt drops user content");
        }
    }

    #[test]
    fn model_types_are_sorted() {
        let types = model_types();
        let mut sorted = types.clone();
        sorted.sort();
        assert_eq!(types, sorted);
        assert!(types.contains(&"mistral"));
    }
}
