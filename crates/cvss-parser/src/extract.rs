//! Pick the preferred CVSS score out of an NVD metrics block.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;
use crate::metric::{MetricEntry, Metrics};

/// CVSS specification version a score was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CvssVersion {
    #[serde(rename = "3.1")]
    V31,
    #[serde(rename = "3.0")]
    V30,
    #[serde(rename = "2.0")]
    V2,
}

/// A base score with the vector string it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssScore {
    pub version: CvssVersion,
    pub base_score: f64,
    pub vector: Option<String>,
}

type Extractor = fn(&'static str, CvssVersion, &Value) -> Result<CvssScore, ExtractError>;

/// A metrics key and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct MetricSchema {
    pub key: &'static str,
    pub version: CvssVersion,
    extractor: Extractor,
}

impl MetricSchema {
    pub fn extract(&self, raw: &Value) -> Result<CvssScore, ExtractError> {
        (self.extractor)(self.key, self.version, raw)
    }
}

/// Known schema keys, newest first. The first key present wins.
pub const METRIC_SCHEMAS: &[MetricSchema] = &[
    MetricSchema {
        key: "cvssMetricV31",
        version: CvssVersion::V31,
        extractor: extract_cvss_data,
    },
    MetricSchema {
        key: "cvssMetricV30",
        version: CvssVersion::V30,
        extractor: extract_cvss_data,
    },
    MetricSchema {
        key: "cvssMetricV2",
        version: CvssVersion::V2,
        extractor: extract_cvss_data,
    },
];

/// Extract the score of the newest schema present in `metrics`.
///
/// Once a schema key is found, older schemas are not consulted even when the
/// found one turns out to be unusable.
///
/// # Example
///
/// ```
/// use cvss_parser::{extract_score, Metrics};
/// use serde_json::json;
///
/// let metrics: Metrics = serde_json::from_value(json!({
///     "cvssMetricV2": [{ "type": "Primary", "cvssData": { "baseScore": 5.0 } }]
/// })).unwrap();
///
/// assert_eq!(extract_score(&metrics).unwrap().base_score, 5.0);
/// ```
pub fn extract_score(metrics: &Metrics) -> Result<CvssScore, ExtractError> {
    METRIC_SCHEMAS
        .iter()
        .find_map(|schema| metrics.get(schema.key).map(|raw| (schema, raw)))
        .map(|(schema, raw)| {
            debug!("extracting score from {}", schema.key);
            schema.extract(raw)
        })
        .unwrap_or(Err(ExtractError::NoRecognizedMetrics))
}

/// Shared reader for the `cvssData` shape used by every NVD schema so far.
fn extract_cvss_data(
    key: &'static str,
    version: CvssVersion,
    raw: &Value,
) -> Result<CvssScore, ExtractError> {
    let entries: Vec<MetricEntry> =
        serde_json::from_value(raw.clone()).map_err(|e| ExtractError::MalformedMetrics {
            key,
            reason: e.to_string(),
        })?;

    let entry = entries
        .iter()
        .find(|e| e.is_primary())
        .or_else(|| entries.first())
        .ok_or(ExtractError::EmptyMetricList(key))?;

    let data = entry
        .cvss_data
        .as_ref()
        .ok_or(ExtractError::MissingScore(key))?;

    let base_score = match &data.base_score {
        None | Some(Value::Null) => return Err(ExtractError::MissingScore(key)),
        Some(value) => coerce_score(value)?,
    };

    Ok(CvssScore {
        version,
        base_score,
        vector: data.vector_string.clone(),
    })
}

/// Read a JSON number or numeric string as a finite `f64`.
pub fn coerce_score(value: &Value) -> Result<f64, ExtractError> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    score
        .filter(|s| s.is_finite())
        .ok_or_else(|| ExtractError::InvalidScore(value.to_string()))
}
