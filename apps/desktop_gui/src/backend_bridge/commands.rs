//! Backend commands queued from UI to backend worker.

use shared::domain::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Transcribe { token: RequestToken, text: String },
    LoadExamples,
    LoadSyllabary,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Transcribe { .. } => "transcribe",
            BackendCommand::LoadExamples => "load_examples",
            BackendCommand::LoadSyllabary => "load_syllabary",
        }
    }
}
