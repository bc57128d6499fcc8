//! Controller state for every UI surface and the reducer that applies
//! backend events to it.
//!
//! Handlers return the backend command to queue, if any; the UI layer only
//! renders what this state says and forwards commands.

use std::time::{Duration, Instant};

use client_core::{
    orchestrator::EMPTY_INPUT_WARNING,
    reference::{CardHighlights, SYLLABARY_ERROR_MESSAGE},
    AnalysisView, DecodeStep, InputSurface, Transcription,
};
use shared::{
    domain::RequestToken,
    error::{DecoderError, ErrorCode},
    protocol::{ReferenceSign, WorkedExample},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Results,
    Top,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SyllabaryPanel {
    #[default]
    Loading,
    Loaded(Vec<ReferenceSign>),
    Failed(String),
}

#[derive(Debug)]
pub struct DecoderController {
    input: InputSurface,
    results: Option<Transcription>,
    analysis: AnalysisView,
    examples: Vec<WorkedExample>,
    syllabary: SyllabaryPanel,
    highlights: CardHighlights,
    highlight_duration: Duration,
    alert: Option<UiError>,
    status: String,
    scroll_target: Option<ScrollTarget>,
    focus_input: bool,
    latest_token: RequestToken,
}

impl DecoderController {
    pub fn new(highlight_duration: Duration) -> Self {
        Self {
            input: InputSurface::new(),
            results: None,
            analysis: AnalysisView::Hidden,
            examples: Vec::new(),
            syllabary: SyllabaryPanel::Loading,
            highlights: CardHighlights::default(),
            highlight_duration,
            alert: None,
            status: "Starting backend worker...".to_string(),
            scroll_target: None,
            focus_input: true,
            latest_token: RequestToken::default(),
        }
    }

    /// Reference lists are fetched once, independently of each other.
    pub fn startup_commands(&self) -> [BackendCommand; 2] {
        [BackendCommand::LoadSyllabary, BackendCommand::LoadExamples]
    }

    pub fn input_mut(&mut self) -> &mut InputSurface {
        &mut self.input
    }

    pub fn results(&self) -> Option<&Transcription> {
        self.results.as_ref()
    }

    pub fn analysis(&self) -> &AnalysisView {
        &self.analysis
    }

    pub fn examples(&self) -> &[WorkedExample] {
        &self.examples
    }

    pub fn syllabary(&self) -> &SyllabaryPanel {
        &self.syllabary
    }

    pub fn alert(&self) -> Option<&UiError> {
        self.alert.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut String {
        &mut self.status
    }

    pub fn is_highlighted(&self, index: usize, now: Instant) -> bool {
        self.highlights.is_highlighted(index, now)
    }

    /// Time until the next highlight reverts, for scheduling a repaint.
    pub fn highlight_remaining(&self, now: Instant) -> Option<Duration> {
        self.highlights.next_expiry(now)
    }

    pub fn take_scroll_target(&mut self) -> Option<ScrollTarget> {
        self.scroll_target.take()
    }

    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_input)
    }

    pub fn submit(&mut self) -> Option<BackendCommand> {
        if self.input.is_blank() {
            self.alert = Some(UiError::from_decoder(
                UiErrorContext::Transcribe,
                &DecoderError::new(ErrorCode::UserInputEmpty, EMPTY_INPUT_WARNING),
            ));
            return None;
        }

        self.latest_token = self.latest_token.next();
        Some(BackendCommand::Transcribe {
            token: self.latest_token,
            text: self.input.read(),
        })
    }

    /// Also invalidates any outstanding request so a late response cannot
    /// bring the panels back.
    pub fn clear(&mut self) {
        self.input.clear();
        self.results = None;
        self.analysis = AnalysisView::Hidden;
        self.latest_token = self.latest_token.next();
        self.focus_input = true;
    }

    pub fn insert_space(&mut self) {
        self.input.append(" ");
        self.focus_input = true;
    }

    pub fn select_example(&mut self, index: usize) {
        let Some(example) = self.examples.get(index) else {
            return;
        };
        self.input.replace(&example.linear_b);
        self.scroll_target = Some(ScrollTarget::Top);
        self.focus_input = true;
    }

    pub fn select_sign(&mut self, index: usize, now: Instant) {
        let SyllabaryPanel::Loaded(signs) = &self.syllabary else {
            return;
        };
        let Some(sign) = signs.get(index) else {
            return;
        };
        self.input.append(&sign.sign);
        self.highlights.start(index, now, self.highlight_duration);
        self.focus_input = true;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                tracing::error!(context = ?err.context(), "{}", err.message());
                self.status = err.message().to_string();
                self.alert = Some(err);
            }
            UiEvent::Decode { token, step } => {
                if token != self.latest_token {
                    tracing::debug!(
                        token = token.0,
                        latest = self.latest_token.0,
                        "discarding stale decoder response"
                    );
                    return;
                }
                self.apply_decode_step(step);
            }
            UiEvent::ExamplesLoaded(Ok(examples)) => {
                self.examples = examples;
            }
            UiEvent::ExamplesLoaded(Err(err)) => {
                tracing::error!("error loading examples: {err}");
                self.examples.clear();
            }
            UiEvent::SyllabaryLoaded(Ok(signs)) => {
                self.highlights.clear();
                self.syllabary = SyllabaryPanel::Loaded(signs);
            }
            UiEvent::SyllabaryLoaded(Err(err)) => {
                tracing::error!("error loading syllabary: {err}");
                self.highlights.clear();
                self.syllabary = SyllabaryPanel::Failed(SYLLABARY_ERROR_MESSAGE.to_string());
            }
        }
    }

    fn apply_decode_step(&mut self, step: DecodeStep) {
        match step {
            DecodeStep::Transcribed(Ok(transcription)) => {
                if transcription.analysis_target().is_none() {
                    self.analysis = AnalysisView::Hidden;
                }
                self.results = Some(transcription);
                self.scroll_target = Some(ScrollTarget::Results);
            }
            DecodeStep::Transcribed(Err(err)) => {
                self.alert = Some(UiError::from_decoder(UiErrorContext::Transcribe, &err));
            }
            DecodeStep::Analyzed { word, view } => {
                tracing::debug!(word = %word, visible = view.is_visible(), "analysis received");
                self.analysis = view;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
