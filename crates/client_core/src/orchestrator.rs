//! Transcription followed, for single-word results, by word analysis.

use shared::error::{DecoderError, ErrorCode};
use tracing::{debug, error, warn};

use crate::{render::AnalysisView, DecoderApi};

pub const EMPTY_INPUT_WARNING: &str = "Please enter some Linear B text";
pub const TRANSCRIBE_FAILED_MESSAGE: &str = "Failed to transcribe text";
const UNKNOWN_SERVICE_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    pub transliteration: String,
    pub phonetic: String,
}

impl Transcription {
    /// The word to analyze: the transliteration split on single spaces must
    /// yield exactly one non-empty token.
    pub fn analysis_target(&self) -> Option<&str> {
        let mut words = self.transliteration.split(' ');
        let first = words.next()?;
        if first.is_empty() || words.next().is_some() {
            return None;
        }
        Some(first)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    Transcribed(Result<Transcription, DecoderError>),
    Analyzed { word: String, view: AnalysisView },
}

/// Sends `raw_text` (trimmed) to the transcription endpoint. The error's
/// message is the text to show the user.
pub async fn transcribe<A: DecoderApi + ?Sized>(
    api: &A,
    raw_text: &str,
) -> Result<Transcription, DecoderError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(DecoderError::new(
            ErrorCode::UserInputEmpty,
            EMPTY_INPUT_WARNING,
        ));
    }

    let result = match api.transcribe(text).await {
        Ok(result) => result,
        Err(err) => {
            error!("transcription request failed: {err}");
            return Err(DecoderError::new(
                ErrorCode::TransportFailure,
                TRANSCRIBE_FAILED_MESSAGE,
            ));
        }
    };

    if !result.success {
        let reason = result
            .error
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(UNKNOWN_SERVICE_ERROR);
        return Err(DecoderError::new(
            ErrorCode::ServiceRejected,
            format!("Error: {reason}"),
        ));
    }

    Ok(Transcription {
        transliteration: result.transliteration.unwrap_or_default(),
        phonetic: result.phonetic.unwrap_or_default(),
    })
}

/// Best-effort enrichment: transport failures are logged and yield `None` so
/// the panel keeps whatever it showed before.
pub async fn analyze<A: DecoderApi + ?Sized>(api: &A, word: &str) -> Option<AnalysisView> {
    match api.analyze(word).await {
        Ok(result) => {
            if let Some(message) = result.message.as_deref() {
                debug!(word, message, "analysis service note");
            }
            Some(AnalysisView::from_result(&result))
        }
        Err(err) => {
            warn!(word, "word analysis failed: {err}");
            None
        }
    }
}

/// Awaits the transcription, reports it, then analyzes the single word if
/// there is one. Blank input reports the warning without touching `api`.
pub async fn transcribe_and_analyze<A, F>(api: &A, raw_text: &str, mut emit: F)
where
    A: DecoderApi + ?Sized,
    F: FnMut(DecodeStep) + Send,
{
    let transcribed = transcribe(api, raw_text).await;
    let target = transcribed
        .as_ref()
        .ok()
        .and_then(Transcription::analysis_target)
        .map(str::to_string);
    emit(DecodeStep::Transcribed(transcribed));

    let Some(word) = target else {
        return;
    };
    if let Some(view) = analyze(api, &word).await {
        emit(DecodeStep::Analyzed { word, view });
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
