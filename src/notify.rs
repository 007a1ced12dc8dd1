//! Slack notification
//!
//! Delivers the final answer map to a Slack channel via the
//! `chat.postMessage` API. Delivery failure is reported to the caller,
//! which logs it; it never affects the outcome of the question pipeline.

use thiserror::Error;

use crate::services::qa::AnswerMap;

const SLACK_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),
}

/// Sends messages to a Slack channel with a bot token.
pub struct SlackNotifier {
    token: String,
    channel: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(token: String, channel: String) -> Self {
        Self {
            token,
            channel,
            client: reqwest::Client::new(),
        }
    }

    /// Format and deliver an answer map.
    pub async fn post_answers(&self, answers: &AnswerMap) -> Result<(), NotifyError> {
        self.post_message(&format_answers(answers)).await
    }

    /// Send a raw text message via `chat.postMessage`.
    ///
    /// Slack reports failures inside a 200 response, so the `ok`/`error`
    /// envelope is checked rather than the HTTP status alone.
    pub async fn post_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "channel": self.channel,
            "text": text,
        });

        tracing::debug!(channel = %self.channel, "Posting Slack message");

        let response = self
            .client
            .post(SLACK_POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let envelope: serde_json::Value = response.json().await?;

        if envelope.get("ok") == Some(&serde_json::Value::Bool(true)) {
            tracing::info!(channel = %self.channel, "Slack notification sent");
            return Ok(());
        }

        let description = envelope
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown Slack API error");

        Err(NotifyError::Api(description.to_string()))
    }
}

/// Render the answer map as an indented key/value block in a code fence.
pub fn format_answers(answers: &AnswerMap) -> String {
    let rendered =
        serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string());
    format!("Answers to your questions:\n```{rendered}```")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_answers_preserve_question_order() {
        let mut answers = AnswerMap::new();
        answers.insert("Who is the CEO?".to_string(), "Jane Doe".to_string());
        answers.insert(
            "When is the next solar eclipse?".to_string(),
            "Data Not Available".to_string(),
        );

        let message = format_answers(&answers);

        assert!(message.starts_with("Answers to your questions:\n```"));
        assert!(message.ends_with("```"));

        let ceo = message.find("Who is the CEO?").expect("first question present");
        let eclipse = message
            .find("When is the next solar eclipse?")
            .expect("second question present");
        assert!(ceo < eclipse);
        assert!(message.contains("Jane Doe"));
        assert!(message.contains("Data Not Available"));
    }
}
