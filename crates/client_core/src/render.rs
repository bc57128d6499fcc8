//! Analysis panel contents derived from an `/api/analyze` response.
//!
//! Rendering is a pure function of the response: every optional field that
//! is absent or empty simply contributes no line.

use std::fmt;

use shared::protocol::{AnalysisResult, PossibleEnding, SoundChange};

pub const UNKNOWN_MEANING: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisLine {
    Meaning(String),
    ClassicalGreek(String),
    Reconstruction(String),
    PossibleEndings(Vec<PossibleEnding>),
    SoundChanges(Vec<SoundChange>),
}

impl AnalysisLine {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisLine::Meaning(_) => "Meaning",
            AnalysisLine::ClassicalGreek(_) => "Classical Greek",
            AnalysisLine::Reconstruction(_) => "Reconstruction",
            AnalysisLine::PossibleEndings(_) => "Possible Endings",
            AnalysisLine::SoundChanges(_) => "Sound Changes",
        }
    }

    /// Inline value for single-value lines; `None` for itemized lines.
    pub fn value(&self) -> Option<&str> {
        match self {
            AnalysisLine::Meaning(v)
            | AnalysisLine::ClassicalGreek(v)
            | AnalysisLine::Reconstruction(v) => Some(v),
            AnalysisLine::PossibleEndings(_) | AnalysisLine::SoundChanges(_) => None,
        }
    }

    pub fn items(&self) -> Vec<String> {
        match self {
            AnalysisLine::PossibleEndings(endings) => endings
                .iter()
                .map(|e| format!("{}: {}", e.ending, e.function))
                .collect(),
            AnalysisLine::SoundChanges(changes) => changes
                .iter()
                .map(|c| format!("{}: {}", c.kind, c.description))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for AnalysisLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{}: {value}", self.label()),
            None => {
                write!(f, "{}:", self.label())?;
                for item in self.items() {
                    write!(f, "\n  - {item}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisView {
    #[default]
    Hidden,
    Shown(Vec<AnalysisLine>),
}

impl AnalysisView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let analysis = match (&result.analysis, result.success) {
            (Some(analysis), true) => analysis,
            _ => return AnalysisView::Hidden,
        };

        let mut lines = vec![AnalysisLine::Meaning(
            non_empty(&analysis.meaning).unwrap_or(UNKNOWN_MEANING).to_string(),
        )];

        if let Some(classical) = non_empty(&analysis.classical_greek) {
            lines.push(AnalysisLine::ClassicalGreek(classical.to_string()));
        }
        if let Some(reconstruction) = non_empty(&analysis.reconstruction) {
            lines.push(AnalysisLine::Reconstruction(reconstruction.to_string()));
        }
        if !analysis.possible_analysis.is_empty() {
            lines.push(AnalysisLine::PossibleEndings(
                analysis.possible_analysis.clone(),
            ));
        }

        let changes = result
            .comparison
            .as_ref()
            .and_then(|c| c.changes.as_ref())
            .filter(|changes| !changes.is_empty());
        if let Some(changes) = changes {
            lines.push(AnalysisLine::SoundChanges(changes.clone()));
        }

        AnalysisView::Shown(lines)
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, AnalysisView::Shown(_))
    }

    pub fn lines(&self) -> &[AnalysisLine] {
        match self {
            AnalysisView::Hidden => &[],
            AnalysisView::Shown(lines) => lines,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
