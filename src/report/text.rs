use std::io::Write;

use crate::entity::{BatchSummary, LookupOutcome, LookupRecord};
use crate::usecase::BatchObserver;

const HEADERS: [&str; 4] = ["CVE_ID", "baseScore", "vector", "error"];

/// Human readable console output.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchObserver for TextReport<W> {
    fn no_identifiers(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "No CVE identifiers found.")
    }

    fn started(&mut self, identifiers: &[String]) -> std::io::Result<()> {
        writeln!(
            self.out,
            "\nTarget CVEs ({}): {}\n",
            identifiers.len(),
            identifiers.join(", ")
        )
    }

    fn lookup_started(
        &mut self,
        index: usize,
        total: usize,
        identifier: &str,
    ) -> std::io::Result<()> {
        write!(self.out, "[{index}/{total}] fetching {identifier} ... ")?;
        self.out.flush()
    }

    fn lookup_finished(&mut self, record: &LookupRecord, new_highest: bool) -> std::io::Result<()> {
        match &record.outcome {
            LookupOutcome::Success { score, .. } => {
                writeln!(self.out, "ok (score={score:.1})")?;
                if new_highest {
                    writeln!(
                        self.out,
                        "   -> new highest score: {} (score={score:.1})",
                        record.identifier
                    )?;
                }
                Ok(())
            }
            LookupOutcome::NoData | LookupOutcome::ExtractionFailed(_) => {
                writeln!(self.out, "{}", record.error())
            }
            LookupOutcome::NetworkError(msg) => writeln!(self.out, "error: {msg}"),
        }
    }

    fn finished(&mut self, summary: &BatchSummary) -> std::io::Result<()> {
        writeln!(self.out, "\n===== Failed CVEs =====")?;
        let failures: Vec<&LookupRecord> = summary.failures().collect();
        if failures.is_empty() {
            writeln!(self.out, "Scores were retrieved for every CVE.")?;
        } else {
            write!(self.out, "{}", failure_table(&failures))?;
        }

        match &summary.highest {
            None => writeln!(self.out, "\nNo valid CVE score could be retrieved."),
            Some(highest) => {
                writeln!(self.out, "\n===== Highest Scoring CVE =====")?;
                writeln!(self.out, "CVE-ID        : {}", highest.identifier)?;
                writeln!(self.out, "BaseScore     : {:.1}", highest.score)?;
                writeln!(
                    self.out,
                    "VectorString  : {}",
                    highest.vector.as_deref().unwrap_or_default()
                )
            }
        }
    }
}

/// Left-aligned table of failed records, absent values left blank.
pub fn failure_table(records: &[&LookupRecord]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.identifier.clone(),
                r.score().map(|s| format!("{s:.1}")).unwrap_or_default(),
                r.vector().unwrap_or_default().to_string(),
                r.error().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_row(&mut table, &HEADERS, &widths);
    for row in &rows {
        push_row(&mut table, row, &widths);
    }
    table
}

fn push_row<S: AsRef<str>>(table: &mut String, cells: &[S; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    table.push_str(line.trim_end());
    table.push('\n');
}
