use serde::{Deserialize, Serialize};

/// Sequence number issued for each orchestrated action. Responses carrying a
/// token other than the latest issued one are stale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct RequestToken(pub u64);

impl RequestToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Transcribe,
    Analyze,
    Examples,
    Syllabary,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Transcribe => "api/transcribe",
            Endpoint::Analyze => "api/analyze",
            Endpoint::Examples => "api/examples",
            Endpoint::Syllabary => "api/syllabary",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Transcribe => "transcribe",
            Endpoint::Analyze => "analyze",
            Endpoint::Examples => "examples",
            Endpoint::Syllabary => "syllabary",
        }
    }
}
