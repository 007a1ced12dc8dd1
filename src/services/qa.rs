//! Question answering service
//!
//! The core pipeline: chunk the document, query every chunk per question,
//! synthesize one answer per question across the chunk answers, classify
//! its confidence, and collect an ordered answer map with per-question
//! failure isolation.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;

use crate::chunker;
use crate::completion::{ChatMessage, CompletionClient, CompletionRequest, ASSISTANT_PERSONA};
use crate::config::CompletionConfig;
use crate::confidence;
use crate::errors::AppError;

/// Fixed placeholder recorded when a question fails or yields no usable
/// information.
pub const FALLBACK_ANSWER: &str = "Data Not Available";

/// Ordered mapping from each input question to its final answer.
pub type AnswerMap = IndexMap<String, String>;

/// Per-question result the orchestrator pattern-matches on.
///
/// `NoInformation` and `Failed` both collapse to [`FALLBACK_ANSWER`] in
/// the answer map, so consumers cannot distinguish "the model found
/// nothing" from "the call failed"; the distinction survives only in logs
/// and metrics.
#[derive(Debug)]
pub enum QuestionOutcome {
    /// A substantive synthesized answer.
    Answered(String),
    /// The synthesis succeeded but its text indicates nothing was found.
    NoInformation(String),
    /// Chunk querying or synthesis failed.
    Failed(AppError),
}

impl QuestionOutcome {
    pub fn into_final_answer(self) -> String {
        match self {
            QuestionOutcome::Answered(answer) => answer,
            QuestionOutcome::NoInformation(_) | QuestionOutcome::Failed(_) => {
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}

pub struct QaService {
    client: Arc<dyn CompletionClient>,
    config: CompletionConfig,
}

impl QaService {
    pub fn new(client: Arc<dyn CompletionClient>, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    /// Ask one question against one chunk and return the trimmed answer.
    ///
    /// One outbound completion call; failures propagate to the caller.
    async fn ask_on_chunk(&self, chunk: &str, question: &str) -> Result<String, AppError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(ASSISTANT_PERSONA),
                ChatMessage::user(format!(
                    "Based on the following document chunk, answer the question verbatim: \
                     '{question}'\n\nDocument chunk:\n{chunk}"
                )),
            ],
            max_tokens: self.config.chunk_answer_max_tokens,
            n: 1,
            temperature: self.config.temperature,
        };

        let answer = self.client.complete(request).await?;
        Ok(answer.trim().to_string())
    }

    /// Merge the combined per-chunk answers into one synthesized answer.
    ///
    /// Uses a larger output budget than the per-chunk pass since the model
    /// may need to restate several partial answers.
    async fn synthesize(&self, question: &str, combined: &str) -> Result<String, AppError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(ASSISTANT_PERSONA),
                ChatMessage::user(format!(
                    "Find the answer to the following question from these responses, combining \
                     the information from all of them to derive the correct answer: \
                     '{question}'\n\nResponses:\n{combined}"
                )),
            ],
            max_tokens: self.config.synthesis_max_tokens,
            n: 1,
            temperature: self.config.temperature,
        };

        let answer = self.client.complete(request).await?;
        Ok(answer.trim().to_string())
    }

    /// Answer one question against pre-computed chunks.
    ///
    /// Chunk queries may run with bounded fan-out, but the per-chunk
    /// answers are always joined in chunk order before synthesis. Zero
    /// chunks means zero completion calls and an empty answer. Failures
    /// propagate.
    pub async fn answer_with_chunks(
        &self,
        chunks: &[String],
        question: &str,
    ) -> Result<String, AppError> {
        if chunks.is_empty() {
            return Ok(String::new());
        }

        let concurrency = self.config.concurrency.max(1);
        let chunk_futures: Vec<_> = chunks
            .iter()
            .map(|chunk| self.ask_on_chunk(chunk, question))
            .collect();
        let chunk_answers: Vec<String> = stream::iter(chunk_futures)
            .buffered(concurrency)
            .try_collect()
            .await?;

        let combined = chunk_answers.join(" ");
        tracing::debug!(
            chunks = chunks.len(),
            combined_len = combined.len(),
            "Chunk answers collected"
        );

        self.synthesize(question, &combined).await
    }

    /// Answer one question against the full document text.
    pub async fn answer_on_document(
        &self,
        text: &str,
        question: &str,
    ) -> Result<String, AppError> {
        let chunks = chunker::split_into_chunks(text, self.config.chunk_max_tokens);
        self.answer_with_chunks(&chunks, question).await
    }

    async fn answer_question(&self, chunks: &[String], question: &str) -> QuestionOutcome {
        match self.answer_with_chunks(chunks, question).await {
            Ok(answer) if confidence::is_low_confidence(&answer) => {
                QuestionOutcome::NoInformation(answer)
            }
            Ok(answer) => QuestionOutcome::Answered(answer),
            Err(error) => QuestionOutcome::Failed(error),
        }
    }

    /// Answer a batch of questions against the document text.
    ///
    /// The document is chunked once and the chunks reused for every
    /// question. Questions are processed strictly sequentially and
    /// independently: a failed question records the fallback marker and
    /// the batch continues. The result has exactly one entry per
    /// question, in input order.
    pub async fn answer_questions(&self, text: &str, questions: &[String]) -> AnswerMap {
        let start = Instant::now();
        let chunks = chunker::split_into_chunks(text, self.config.chunk_max_tokens);

        tracing::info!(
            chunks = chunks.len(),
            questions = questions.len(),
            "Answering question batch"
        );

        let mut answers = AnswerMap::with_capacity(questions.len());
        for (question_index, question) in questions.iter().enumerate() {
            let outcome = self.answer_question(&chunks, question).await;

            match &outcome {
                QuestionOutcome::Answered(_) => {
                    metrics::counter!("docqa_questions_answered_total").increment(1);
                }
                QuestionOutcome::NoInformation(answer) => {
                    tracing::info!(question_index, answer = %answer, "No usable information found");
                    metrics::counter!("docqa_questions_low_confidence_total").increment(1);
                }
                QuestionOutcome::Failed(error) => {
                    tracing::error!(
                        question_index,
                        error = %error,
                        "Question failed, recording fallback answer"
                    );
                    metrics::counter!("docqa_questions_failed_total").increment(1);
                }
            }

            answers.insert(question.clone(), outcome.into_final_answer());
        }

        metrics::histogram!("docqa_batch_duration_seconds").record(start.elapsed().as_secs_f64());
        answers
    }
}
