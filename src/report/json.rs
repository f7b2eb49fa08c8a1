use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::entity::{BatchSummary, HighestResult, LookupRecord};
use crate::usecase::BatchObserver;

/// Message carried by the document when the input held no identifiers.
pub const NO_IDENTIFIERS_MESSAGE: &str = "no identifiers found";

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    records: &'a [LookupRecord],
    failures: Vec<&'a LookupRecord>,
    highest: Option<&'a HighestResult>,
}

/// Writes one JSON document once the batch is done. Progress goes to the log.
#[derive(Debug)]
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_document(&mut self, document: &JsonDocument) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, document)?;
        writeln!(self.out)
    }
}

impl<W: Write> BatchObserver for JsonReport<W> {
    fn no_identifiers(&mut self) -> std::io::Result<()> {
        self.write_document(&JsonDocument {
            message: Some(NO_IDENTIFIERS_MESSAGE),
            records: &[],
            failures: Vec::new(),
            highest: None,
        })
    }

    fn started(&mut self, identifiers: &[String]) -> std::io::Result<()> {
        info!("looking up {} identifier(s)", identifiers.len());
        Ok(())
    }

    fn lookup_started(
        &mut self,
        index: usize,
        total: usize,
        identifier: &str,
    ) -> std::io::Result<()> {
        info!("[{}/{}] fetching {}", index, total, identifier);
        Ok(())
    }

    fn lookup_finished(&mut self, record: &LookupRecord, _new_highest: bool) -> std::io::Result<()> {
        match record.score() {
            Some(score) => info!("{}: score {}", record.identifier, score),
            None => info!("{}: {}", record.identifier, record.error()),
        }
        Ok(())
    }

    fn finished(&mut self, summary: &BatchSummary) -> std::io::Result<()> {
        self.write_document(&JsonDocument {
            message: None,
            records: &summary.records,
            failures: summary.failures().collect(),
            highest: summary.highest.as_ref(),
        })
    }
}
