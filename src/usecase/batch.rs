use std::time::Duration;

use cvss_parser::normalize_identifiers;
use tracing::{info, warn};

use crate::entity::{Aggregator, BatchSummary, HighestResult, LookupRecord};

use super::nvd::{classify, CveSource};

/// Pause after every request. NVD allows 50 requests per 30 s with a key.
pub const REQUEST_DELAY: Duration = Duration::from_millis(600);

/// Progress sink for a batch run.
pub trait BatchObserver {
    fn no_identifiers(&mut self) -> std::io::Result<()>;
    fn started(&mut self, identifiers: &[String]) -> std::io::Result<()>;
    fn lookup_started(&mut self, index: usize, total: usize, identifier: &str)
        -> std::io::Result<()>;
    fn lookup_finished(&mut self, record: &LookupRecord, new_highest: bool)
        -> std::io::Result<()>;
    fn finished(&mut self, summary: &BatchSummary) -> std::io::Result<()>;
}

/// Look up every identifier in `text` and return the highest scored one.
///
/// Returns `Ok(None)` when the text holds no identifiers (no request is
/// made) or when no lookup produced a usable score. Per-identifier failures
/// never abort the batch; only observer I/O errors are returned.
pub async fn highest_from_text<S, O>(
    text: &str,
    delimiter: char,
    source: &S,
    delay: Duration,
    observer: &mut O,
) -> std::io::Result<Option<HighestResult>>
where
    S: CveSource,
    O: BatchObserver,
{
    let identifiers = normalize_identifiers(text, delimiter);
    if identifiers.is_empty() {
        info!("no identifiers in input");
        observer.no_identifiers()?;
        return Ok(None);
    }

    let summary = run_batch(&identifiers, source, delay, observer).await?;
    observer.finished(&summary)?;
    Ok(summary.highest)
}

/// Sequentially fetch each identifier, pausing `delay` after every attempt.
pub async fn run_batch<S, O>(
    identifiers: &[String],
    source: &S,
    delay: Duration,
    observer: &mut O,
) -> std::io::Result<BatchSummary>
where
    S: CveSource,
    O: BatchObserver,
{
    observer.started(identifiers)?;

    let total = identifiers.len();
    let mut aggregator = Aggregator::new();

    for (index, identifier) in identifiers.iter().enumerate() {
        observer.lookup_started(index + 1, total, identifier)?;

        let outcome = classify(source.fetch(identifier).await);
        let record = LookupRecord::new(identifier.as_str(), outcome);
        if !record.is_success() {
            warn!("{}: {}", identifier, record.error());
        }

        let new_highest = aggregator.push(record.clone());
        if let Some(highest) = aggregator.highest().filter(|_| new_highest) {
            info!("new highest: {} ({})", highest.identifier, highest.score);
        }
        observer.lookup_finished(&record, new_highest)?;

        tokio::time::sleep(delay).await;
    }

    let summary = aggregator.finish();
    info!(
        "batch done: {} looked up, {} failed",
        summary.records.len(),
        summary.failure_count()
    );
    Ok(summary)
}
