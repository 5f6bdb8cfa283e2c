//! services/api/src/adapters/vocab_llm.rs
//!
//! This module contains the adapter for the vocabulary tutor LLM.
//! It implements the `VocabularyGenerationService` port from the `core` crate
//! against any OpenAI-compatible chat-completions endpoint (Fireworks by default).

const SYSTEM_INSTRUCTIONS: &str = r#"You are Dobby, a multilingual AI vocabulary assistant.

Your task:
Generate a clean, well-structured vocabulary list based on the user's topic and target language.

Return ONLY a valid JSON object with this structure:
{
  "topic": "<topic in English>",
  "target_language": "<target language>",
  "word_count": <number>,
  "words": [
    {
      "english": "<English word>",
      "target": "<translation in target language>",
      "phonetic": "<phonetic transcription if available>",
      "example": "<short example sentence in English>"
    }
  ]
}

Rules:
- Use simple, practical words suitable for CEFR A2-B1 level learners.
- Keep examples short (max 10 words).
- Never include grammar explanations, only vocabulary.
- If the user doesn't specify the number, default to 10 words.
- Return pure JSON (no markdown, no text, no bullet points).
- Ensure translations are accurate in the requested target language."#;

const USER_INPUT_TEMPLATE: &str = "Target language: {language}\nInstruction: {instruction}";

/// Shown to the user for every failure after the key check.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate vocabulary. Please try again.";

const DEFAULT_TOPIC: &str = "Vocabulary";
const DEFAULT_LANGUAGE_LABEL: &str = "Unknown";
const DEFAULT_WORD_COUNT: u64 = 10;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use language_buddy_core::domain::{VocabItem, VocabRequest, VocabResponse};
use language_buddy_core::ports::{PortError, PortResult, VocabularyGenerationService};
use regex::Regex;
use serde_json::Value;
use tracing::{error, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `VocabularyGenerationService` using an OpenAI-compatible LLM.
///
/// The API key is supplied per call, so a client is built for each request.
#[derive(Clone)]
pub struct OpenAiVocabAdapter {
    api_base: String,
    model: String,
    temperature: f32,
}

impl OpenAiVocabAdapter {
    /// Creates a new `OpenAiVocabAdapter`.
    pub fn new(api_base: String, model: String, temperature: f32) -> Self {
        Self {
            api_base,
            model,
            temperature,
        }
    }

    async fn request_completion(&self, request: &VocabRequest, api_key: &str) -> PortResult<String> {
        let config = OpenAIConfig::new()
            .with_api_base(self.api_base.clone())
            .with_api_key(api_key);
        let client = Client::with_config(config);

        let user_input = USER_INPUT_TEMPLATE
            .replace("{language}", &request.target_language)
            .replace("{instruction}", &request.instruction);

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_input)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let completion = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = client
            .chat()
            .create(completion)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

//=========================================================================================
// `VocabularyGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl VocabularyGenerationService for OpenAiVocabAdapter {
    async fn generate_vocabulary(
        &self,
        request: &VocabRequest,
        api_key: &str,
    ) -> PortResult<VocabResponse> {
        info!(
            language = %request.target_language,
            model = %self.model,
            "Requesting vocabulary from the tutor model"
        );

        let outcome = match self.request_completion(request, api_key).await {
            Ok(content) => parse_vocab_reply(&content),
            Err(e) => Err(e),
        };

        outcome.map_err(|e| {
            error!("Vocabulary generation failed: {}", e);
            PortError::Unexpected(GENERATION_FAILED_MESSAGE.to_string())
        })
    }
}

//=========================================================================================
// Reply Parsing
//=========================================================================================

/// Parses the model's reply text into a `VocabResponse`.
pub fn parse_vocab_reply(content: &str) -> PortResult<VocabResponse> {
    let json = extract_json_object(content)?;
    Ok(map_vocab_json(&json))
}

/// Finds the JSON object in a reply.
///
/// A reply that is a bare `{ ... }` is parsed directly; otherwise the span from
/// the first `{` to the last `}` is tried, which strips prose and code fences.
pub fn extract_json_object(content: &str) -> PortResult<Value> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return Ok(value);
        }
    }

    let object_span = Regex::new(r"\{[\s\S]*\}").map_err(|e| PortError::Unexpected(e.to_string()))?;
    if let Some(found) = object_span.find(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(found.as_str()) {
            return Ok(value);
        }
    }

    Err(PortError::Unexpected(
        "Model did not return parseable JSON".to_string(),
    ))
}

/// Maps the tutor's JSON shape onto a `VocabResponse`, filling defaults for
/// anything missing or malformed.
pub fn map_vocab_json(json: &Value) -> VocabResponse {
    let topic = non_empty_text(json.get("topic")).unwrap_or_else(|| DEFAULT_TOPIC.to_string());
    let target_language = non_empty_text(json.get("target_language"))
        .unwrap_or_else(|| DEFAULT_LANGUAGE_LABEL.to_string());

    let vocab_list: Vec<VocabItem> = json
        .get("words")
        .and_then(Value::as_array)
        .map(|words| {
            words
                .iter()
                .map(|word| VocabItem {
                    word_target: lenient_text(word.get("target")),
                    word_english: lenient_text(word.get("english")),
                    phonetic: lenient_text(word.get("phonetic")),
                    example_sentence: lenient_text(word.get("example")),
                })
                .filter(|item| !item.word_target.is_empty() || !item.word_english.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let announced = if vocab_list.is_empty() {
        json.get("word_count")
            .and_then(Value::as_u64)
            .filter(|count| *count > 0)
            .unwrap_or(DEFAULT_WORD_COUNT)
    } else {
        vocab_list.len() as u64
    };

    VocabResponse {
        summary_message: format!("Here are {} words about {}", announced, topic),
        topic,
        target_language,
        vocab_list,
    }
}

/// Stringifies any JSON value; missing and `null` become empty.
fn lenient_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
