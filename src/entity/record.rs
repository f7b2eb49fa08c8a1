use cvss_parser::{CvssScore, ExtractError};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Message recorded when NVD returns no item for an identifier.
pub const NO_DATA_MESSAGE: &str = "no data";

/// Terminal state of one identifier lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Success { score: f64, vector: Option<String> },
    NoData,
    ExtractionFailed(String),
    NetworkError(String),
}

impl From<CvssScore> for LookupOutcome {
    fn from(score: CvssScore) -> Self {
        LookupOutcome::Success {
            score: score.base_score,
            vector: score.vector,
        }
    }
}

impl From<ExtractError> for LookupOutcome {
    fn from(e: ExtractError) -> Self {
        LookupOutcome::ExtractionFailed(format!("score extraction failed: {e}"))
    }
}

/// Outcome of one identifier, kept for the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRecord {
    pub identifier: String,
    pub outcome: LookupOutcome,
}

impl LookupRecord {
    pub fn new(identifier: impl Into<String>, outcome: LookupOutcome) -> Self {
        Self {
            identifier: identifier.into(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Success { .. })
    }

    pub fn score(&self) -> Option<f64> {
        match &self.outcome {
            LookupOutcome::Success { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn vector(&self) -> Option<&str> {
        match &self.outcome {
            LookupOutcome::Success { vector, .. } => vector.as_deref(),
            _ => None,
        }
    }

    /// Empty for a success, a non-empty description otherwise.
    pub fn error(&self) -> &str {
        match &self.outcome {
            LookupOutcome::Success { .. } => "",
            LookupOutcome::NoData => NO_DATA_MESSAGE,
            LookupOutcome::ExtractionFailed(msg) | LookupOutcome::NetworkError(msg) => msg.as_str(),
        }
    }
}

impl Serialize for LookupRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LookupRecord", 4)?;
        state.serialize_field("identifier", &self.identifier)?;
        state.serialize_field("baseScore", &self.score())?;
        state.serialize_field("vector", &self.vector())?;
        state.serialize_field("error", self.error())?;
        state.end()
    }
}
