//! Backend-to-UI events and error modeling for the decoder controller.

use client_core::DecodeStep;
use shared::{
    domain::RequestToken,
    error::{DecoderError, ErrorCode},
    protocol::{ReferenceSign, WorkedExample},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    Decode {
        token: RequestToken,
        step: DecodeStep,
    },
    ExamplesLoaded(Result<Vec<WorkedExample>, String>),
    SyllabaryLoaded(Result<Vec<ReferenceSign>, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Service,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Transcribe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("runtime")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_decoder(context: UiErrorContext, err: &DecoderError) -> Self {
        let category = match err.code {
            ErrorCode::UserInputEmpty => UiErrorCategory::Validation,
            ErrorCode::ServiceRejected => UiErrorCategory::Service,
            ErrorCode::TransportFailure | ErrorCode::EmptyCollection => {
                UiErrorCategory::Transport
            }
        };
        Self {
            category,
            context,
            message: err.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
