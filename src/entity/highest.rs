use serde::Serialize;

use super::LookupRecord;

/// The record with the greatest base score seen in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestResult {
    pub identifier: String,
    pub score: f64,
    pub vector: Option<String>,
}

impl HighestResult {
    pub fn into_tuple(self) -> (String, f64, Option<String>) {
        (self.identifier, self.score, self.vector)
    }
}

/// Everything a batch produced, in input order.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub records: Vec<LookupRecord>,
    pub highest: Option<HighestResult>,
}

impl BatchSummary {
    /// Records with a non-empty error field.
    pub fn failures(&self) -> impl Iterator<Item = &LookupRecord> {
        self.records.iter().filter(|r| !r.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Running maximum plus every record pushed so far.
#[derive(Debug, Default)]
pub struct Aggregator {
    summary: BatchSummary,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `record`, returning true when its score became the new maximum.
    ///
    /// Only a strictly greater score replaces the current maximum, so the
    /// earliest identifier wins a tie.
    pub fn push(&mut self, record: LookupRecord) -> bool {
        let replaced = match record.score() {
            Some(score) if self.summary.highest.as_ref().is_none_or(|h| score > h.score) => {
                self.summary.highest = Some(HighestResult {
                    identifier: record.identifier.clone(),
                    score,
                    vector: record.vector().map(str::to_string),
                });
                true
            }
            _ => false,
        };
        self.summary.records.push(record);
        replaced
    }

    pub fn highest(&self) -> Option<&HighestResult> {
        self.summary.highest.as_ref()
    }

    pub fn finish(self) -> BatchSummary {
        self.summary
    }
}
