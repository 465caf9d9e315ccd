use crate::core::{ChatMessage, DescriptionEntry, TextGenerator};

const SYSTEM_PROMPT: &str = "You are a culinary expert specializing in Chinese cuisine.";

pub fn build_conversation(dish_name: &str) -> Vec<ChatMessage> {
    let request = format!(
        "Please provide a detailed description of the dish '{dish_name}'. \
         Include the following details:\n\
         1. An English translation of the dish name.\n\
         2. Key ingredients.\n\
         3. Flavor profile (e.g., spicy, sweet, umami, etc.).\n\
         4. Regional origin within China (if applicable).\n\
         5. Cooking method (e.g., stir-fried, steamed, etc.).\n\
         6. A recommendation on whether the dish is suitable for foreigners \
         trying Chinese food for the first time, and why."
    );
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(request)]
}

/// 逐行解析：只以第一個冒號切分，沒有冒號的行直接略過
pub fn parse_description(raw: &str) -> Vec<DescriptionEntry> {
    raw.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(title, content)| DescriptionEntry::new(title.trim(), content.trim()))
        .collect()
}

pub struct DescriptionGenerator<T: TextGenerator> {
    generator: T,
}

impl<T: TextGenerator> DescriptionGenerator<T> {
    pub fn new(generator: T) -> Self {
        Self { generator }
    }

    /// Never fails: an upstream error becomes a single `Error` entry.
    pub async fn describe(&self, dish_name: &str) -> Vec<DescriptionEntry> {
        let conversation = build_conversation(dish_name);

        match self.generator.complete(&conversation).await {
            Ok(raw) => {
                let entries = parse_description(&raw);
                if entries.is_empty() {
                    tracing::warn!("Description reply for '{}' had no labeled lines", dish_name);
                } else {
                    tracing::debug!("Parsed {} description entries", entries.len());
                }
                entries
            }
            Err(e) => {
                tracing::warn!(
                    "Description generation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                vec![DescriptionEntry::error(e.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChatRole, Result};
    use crate::utils::error::DishError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            self.reply.clone().map_err(|message| DishError::MalformedResponseError {
                service: "OpenAI".to_string(),
                message,
            })
        }
    }

    #[test]
    fn test_parse_keeps_only_colon_lines_in_order() {
        let raw = "Here is the description\n\
                   1. English name: Kung Pao Chicken\n\
                   \n\
                   2. Key ingredients: chicken, peanuts, chili\n\
                   Enjoy!\n\
                   3. Flavor profile: spicy and nutty";

        let entries = parse_description(raw);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], DescriptionEntry::new("1. English name", "Kung Pao Chicken"));
        assert_eq!(entries[1].title, "2. Key ingredients");
        assert_eq!(entries[2].content, "spicy and nutty");
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let entries = parse_description("Flavor: sweet: mild");
        assert_eq!(entries, vec![DescriptionEntry::new("Flavor", "sweet: mild")]);
    }

    #[test]
    fn test_parse_line_without_colon_is_dropped() {
        assert!(parse_description("No labels here at all").is_empty());
        assert!(parse_description("").is_empty());
    }

    #[test]
    fn test_parse_trims_and_allows_empty_halves() {
        let entries = parse_description("  Origin :   Sichuan  \r\n:orphan\nTitle only:");
        assert_eq!(
            entries,
            vec![
                DescriptionEntry::new("Origin", "Sichuan"),
                DescriptionEntry::new("", "orphan"),
                DescriptionEntry::new("Title only", ""),
            ]
        );
    }

    #[test]
    fn test_conversation_shape() {
        let conversation = build_conversation("Mapo Tofu");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].role, ChatRole::System);
        assert!(conversation[0].content.contains("culinary expert"));
        assert_eq!(conversation[1].role, ChatRole::User);
        assert!(conversation[1].content.contains("'Mapo Tofu'"));
        for aspect in ["1. ", "2. ", "3. ", "4. ", "5. ", "6. "] {
            assert!(conversation[1].content.contains(aspect));
        }
    }

    #[tokio::test]
    async fn test_describe_parses_reply() {
        let generator = DescriptionGenerator::new(ScriptedGenerator::replying(
            "1. English Translation: Mapo Tofu\n2. Key Ingredients: tofu, pork",
        ));

        let entries = generator.describe("麻婆豆腐").await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Mapo Tofu");
        let seen = generator.generator.seen.lock().unwrap();
        assert!(seen[1].content.contains("麻婆豆腐"));
    }

    #[tokio::test]
    async fn test_describe_failure_yields_single_error_entry() {
        let generator = DescriptionGenerator::new(ScriptedGenerator::failing("no choices"));

        let entries = generator.describe("Kung Pao Chicken").await;

        assert_eq!(
            entries,
            vec![DescriptionEntry::error("Malformed OpenAI response: no choices")]
        );
    }
}
