//! Error types for cvss-parser.

use thiserror::Error;

/// Errors that can occur while pulling a score out of an NVD metrics block.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    /// None of the known schema keys is present
    #[error("no recognized CVSS metrics")]
    NoRecognizedMetrics,

    /// The schema key is present but holds no entries
    #[error("{0} has no entries")]
    EmptyMetricList(&'static str),

    /// The schema key holds something other than a list of metric entries
    #[error("{key} is malformed: {reason}")]
    MalformedMetrics { key: &'static str, reason: String },

    /// The chosen entry carries no base score
    #[error("{0} entry has no baseScore")]
    MissingScore(&'static str),

    /// The base score could not be read as a finite number
    #[error("invalid baseScore: {0}")]
    InvalidScore(String),
}
