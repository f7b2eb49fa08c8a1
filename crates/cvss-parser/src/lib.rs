//! # cvss-parser
//!
//! Normalize identifier lists and read CVSS scores out of NVD API responses.
//!
//! ## Overview
//!
//! The crate has no network or console I/O. It covers the two pure steps of
//! a lookup batch:
//! - **input**: free text to an ordered list of identifier tokens
//! - **extract**: an NVD `metrics` block to the preferred base score
//!
//! ## Example
//!
//! ```
//! use cvss_parser::{extract_score, normalize_identifiers, CveResponse};
//! use serde_json::json;
//!
//! let ids = normalize_identifiers("CVE-2021-44228, CVE-2014-0160", ',');
//! assert_eq!(ids.len(), 2);
//!
//! let body: CveResponse = serde_json::from_value(json!({
//!     "vulnerabilities": [{
//!         "cve": {
//!             "id": "CVE-2021-44228",
//!             "metrics": {
//!                 "cvssMetricV31": [{
//!                     "type": "Primary",
//!                     "cvssData": { "baseScore": 10.0, "vectorString": "CVSS:3.1/AV:N" }
//!                 }]
//!             }
//!         }
//!     }]
//! })).unwrap();
//!
//! let item = body.first_item().unwrap();
//! let score = extract_score(&item.metrics()).unwrap();
//! assert_eq!(score.base_score, 10.0);
//! ```
//!
//! ## Schema preference
//!
//! | Order | Key |
//! |-------|-----|
//! | 1 | `cvssMetricV31` |
//! | 2 | `cvssMetricV30` |
//! | 3 | `cvssMetricV2` |

mod error;
mod extract;
mod input;
mod metric;

pub use error::ExtractError;
pub use extract::{coerce_score, extract_score, CvssScore, CvssVersion, MetricSchema, METRIC_SCHEMAS};
pub use input::{normalize_identifiers, DEFAULT_DELIMITER, SEPARATORS};
pub use metric::{CveItem, CveResponse, CvssData, MetricEntry, Metrics, VulnerabilityItem};
