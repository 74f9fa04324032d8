//! Structured extraction of typed values from model output.

use crate::CoreError;
use lantern_llm::ChatProvider;
use lantern_protocol::ChatMessage;
use serde::de::DeserializeOwned;

/// Ask the model for a JSON object and decode it into `T`.
///
/// `instructions` should describe the desired fields; the provider is
/// asked in JSON mode, so the reply is a single JSON document.
pub async fn extract<T>(provider: &dyn ChatProvider, instructions: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned,
{
    let messages = [ChatMessage::user(instructions)];
    let payload = provider.chat_json(&messages).await?;
    Ok(serde_json::from_str(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_test_utils::FixedChatProvider;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct ActorFilms {
        actor: String,
        movies: Vec<String>,
    }

    #[tokio::test]
    async fn decodes_a_json_reply_into_the_target_type() {
        let provider = FixedChatProvider::new(
            r#"{"actor": "Tom Hanks", "movies": ["Big", "Cast Away", "Toy Story"]}"#,
        );

        let extracted: ActorFilms = extract(&provider, "Generate an actor and 3 movies.")
            .await
            .unwrap();

        assert_eq!(extracted.actor, "Tom Hanks");
        assert_eq!(extracted.movies.len(), 3);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let provider = FixedChatProvider::new("not json at all");

        let result: Result<ActorFilms, _> = extract(&provider, "Generate an actor.").await;

        assert!(matches!(result, Err(CoreError::Decode(_))));
    }
}
