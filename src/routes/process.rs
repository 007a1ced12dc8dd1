//! Document processing handler
//!
//! The ingress contract: accept a PDF, service credentials, a destination
//! channel, and an ordered list of questions; run the question pipeline;
//! forward the answers to Slack. Extraction failure aborts the request
//! before the pipeline runs; Slack failure is logged only.

use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::completion::{CompletionClient, MockCompletionClient, OpenAiClient};
use crate::errors::AppError;
use crate::notify::SlackNotifier;
use crate::pdf;
use crate::services::qa::{AnswerMap, QaService};
use crate::services::AppState;

#[derive(Serialize)]
pub struct ProcessResponse {
    pub status: String,
    pub message: String,
    pub answers: AnswerMap,
}

#[instrument(skip_all)]
pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut pdf_bytes = None;
    let mut openai_api_key = None;
    let mut slack_token = None;
    let mut slack_channel = None;
    let mut questions_raw = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pdf" => {
                pdf_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::ValidationError(format!("failed to read pdf field: {e}"))
                })?);
            }
            "openai_api_key" => openai_api_key = Some(text_field(field).await?),
            "slack_token" => slack_token = Some(text_field(field).await?),
            "slack_channel" => slack_channel = Some(text_field(field).await?),
            "questions" => questions_raw = Some(text_field(field).await?),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let pdf_bytes = pdf_bytes.ok_or_else(|| AppError::MissingField("pdf".to_string()))?;
    let openai_api_key =
        openai_api_key.ok_or_else(|| AppError::MissingField("openai_api_key".to_string()))?;
    let slack_token = slack_token.ok_or_else(|| AppError::MissingField("slack_token".to_string()))?;
    let slack_channel =
        slack_channel.ok_or_else(|| AppError::MissingField("slack_channel".to_string()))?;
    let questions_raw =
        questions_raw.ok_or_else(|| AppError::MissingField("questions".to_string()))?;

    let questions: Vec<String> = serde_json::from_str(&questions_raw).map_err(|e| {
        AppError::ValidationError(format!("questions must be a JSON array of strings: {e}"))
    })?;
    if questions.is_empty() {
        return Err(AppError::ValidationError(
            "at least one question is required".to_string(),
        ));
    }

    // Extraction failure is fatal: the pipeline never runs.
    let text = pdf::extract_text(&pdf_bytes)?;
    tracing::info!(
        text_len = text.len(),
        questions = questions.len(),
        "Document extracted"
    );

    // The API key scopes one client; "mock" answers offline for local runs.
    let client: Arc<dyn CompletionClient> = if openai_api_key == "mock" {
        Arc::new(MockCompletionClient::new("mock completion"))
    } else {
        Arc::new(OpenAiClient::new(openai_api_key, &state.config.completion)?)
    };

    let qa = QaService::new(client, state.config.completion.clone());
    let answers = qa.answer_questions(&text, &questions).await;

    let notifier = SlackNotifier::new(slack_token, slack_channel);
    if let Err(error) = notifier.post_answers(&answers).await {
        tracing::error!(error = %error, "Failed to deliver answers to Slack");
    }

    Ok((
        StatusCode::OK,
        Json(ProcessResponse {
            status: "success".to_string(),
            message: "Processing completed and message posted to Slack.".to_string(),
            answers,
        }),
    ))
}

async fn text_field(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::ValidationError(format!("failed to read field '{name}': {e}")))
}
