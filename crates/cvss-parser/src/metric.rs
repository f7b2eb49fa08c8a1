//! NVD CVE API 2.0 response model.
//!
//! Only the fields needed to locate a base score are modelled. Everything
//! else in the payload is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level body of `GET /rest/json/cves/2.0`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveResponse {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityItem>,
}

impl CveResponse {
    /// The first returned item, or `None` when the database has no match.
    pub fn first_item(&self) -> Option<&VulnerabilityItem> {
        self.vulnerabilities.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VulnerabilityItem {
    #[serde(default)]
    pub cve: Option<CveItem>,
}

impl VulnerabilityItem {
    /// Metrics of the wrapped CVE; empty when the item carries no `cve` object.
    pub fn metrics(&self) -> Metrics {
        self.cve
            .as_ref()
            .map(|cve| cve.metrics.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CveItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub metrics: Metrics,
}

/// The `metrics` object, keyed by schema name (`cvssMetricV31`, ...).
///
/// Kept as an open map so unknown or future schema keys never fail decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Metrics(Map<String, Value>);

impl Metrics {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One scoring entry inside a schema list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    /// "Primary" or "Secondary"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub cvss_data: Option<CvssData>,
}

impl MetricEntry {
    pub fn is_primary(&self) -> bool {
        self.kind.as_deref() == Some("Primary")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssData {
    /// Raw value; usually a number but coerced later.
    #[serde(default)]
    pub base_score: Option<Value>,
    #[serde(default)]
    pub vector_string: Option<String>,
}
