use std::time::Duration;

use cvss_parser::{extract_score, CveResponse};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::entity::LookupOutcome;

/// NVD CVE API 2.0 endpoint
pub const NVD_API_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("cvss-peak/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport failure, timeout or non-success status.
    /// The message is reqwest's, unchanged.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The body is not a JSON document of the expected shape
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Something that can answer a CVE query with an NVD-shaped body.
#[allow(async_fn_in_trait)]
pub trait CveSource {
    async fn fetch(&self, identifier: &str) -> Result<CveResponse, LookupError>;
}

#[derive(Debug, Clone)]
pub struct NvdClient {
    http_client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl NvdClient {
    pub fn new(endpoint: Url, api_key: String, timeout: Duration) -> Result<Self, LookupError> {
        install_crypto_provider();
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }

    /// `<endpoint>?cveId=<identifier>`, keeping any query already on the endpoint.
    pub fn request_url(&self, identifier: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("cveId", identifier);
        url
    }
}

impl CveSource for NvdClient {
    async fn fetch(&self, identifier: &str) -> Result<CveResponse, LookupError> {
        let url = self.request_url(identifier);
        debug!("GET {}", url);

        let resp = self
            .http_client
            .get(url)
            .header("apiKey", &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let text = resp.text().await?;
        let body: CveResponse = serde_json::from_str(&text)?;
        debug!(
            "{} returned {} item(s)",
            identifier,
            body.vulnerabilities.len()
        );
        Ok(body)
    }
}

/// reqwest is built without a bundled TLS provider; register ring once per process.
fn install_crypto_provider() {
    // Err only means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Decide the outcome for one identifier from its fetch result.
pub fn classify(result: Result<CveResponse, LookupError>) -> LookupOutcome {
    match result {
        Err(e) => LookupOutcome::NetworkError(e.to_string()),
        Ok(response) => match response.first_item() {
            None => LookupOutcome::NoData,
            Some(item) => match extract_score(&item.metrics()) {
                Ok(score) => {
                    debug!("using CVSS {:?} base score {}", score.version, score.base_score);
                    score.into()
                }
                Err(e) => e.into(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    fn response(value: serde_json::Value) -> CveResponse {
        serde_json::from_value(value).unwrap()
    }

    fn client(endpoint: &str) -> NvdClient {
        NvdClient::new(
            Url::parse(endpoint).unwrap(),
            "test-key".to_string(),
            REQUEST_TIMEOUT,
        )
        .unwrap()
    }

    #[test]
    fn test_request_url() {
        let url = client(NVD_API_URL).request_url("CVE-2021-44228");
        assert_eq!(
            url.as_str(),
            "https://services.nvd.nist.gov/rest/json/cves/2.0?cveId=CVE-2021-44228"
        );

        let url = client("http://localhost:8080/cves?noRejected").request_url("a b&c");
        assert_eq!(url.as_str(), "http://localhost:8080/cves?noRejected&cveId=a+b%26c");
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify(Ok(response(json!({
            "vulnerabilities": [{
                "cve": {
                    "id": "CVE-2021-44228",
                    "metrics": {
                        "cvssMetricV31": [{
                            "type": "Primary",
                            "cvssData": {
                                "baseScore": 10.0,
                                "vectorString": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H"
                            }
                        }]
                    }
                }
            }]
        }))));

        assert_eq!(
            outcome,
            LookupOutcome::Success {
                score: 10.0,
                vector: Some("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H".to_string()),
            }
        );
    }

    #[test]
    fn test_classify_no_data() {
        assert_eq!(
            classify(Ok(response(json!({ "totalResults": 0, "vulnerabilities": [] })))),
            LookupOutcome::NoData
        );
        assert_eq!(classify(Ok(response(json!({})))), LookupOutcome::NoData);
    }

    #[test]
    fn test_classify_extraction_failure() {
        let outcome = classify(Ok(response(json!({
            "vulnerabilities": [{ "cve": { "id": "CVE-2024-0001", "metrics": {} } }]
        }))));
        assert!(matches!(outcome, LookupOutcome::ExtractionFailed(msg) if !msg.is_empty()));
    }

    /// Accept one connection, answer with `status_line` and an empty body,
    /// and hand back the raw request head.
    async fn one_shot_server(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (format!("http://{addr}/cves"), handle)
    }

    #[tokio::test]
    async fn test_error_status_is_network_error_with_headers_sent() {
        let (endpoint, server) = one_shot_server("HTTP/1.1 404 Not Found").await;
        let client = NvdClient::new(
            Url::parse(&endpoint).unwrap(),
            "k123".to_string(),
            REQUEST_TIMEOUT,
        )
        .unwrap();

        let outcome = classify(client.fetch("CVE-1").await);
        let request = server.await.unwrap();

        assert!(
            matches!(&outcome, LookupOutcome::NetworkError(msg) if msg.contains("404 Not Found")),
            "outcome: {outcome:?}"
        );
        assert!(request.starts_with("get /cves?cveid=cve-1 "), "request: {request}");
        assert!(request.contains("\r\napikey: k123\r\n"), "request: {request}");
        assert!(
            request.contains(&format!("\r\nuser-agent: {}\r\n", USER_AGENT.to_lowercase())),
            "request: {request}"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // nothing listens on port 1
        let client = client("http://127.0.0.1:1/rest/json/cves/2.0");
        let result = client.fetch("CVE-2021-44228").await;
        assert!(result.is_err());

        let outcome = classify(result);
        assert!(matches!(outcome, LookupOutcome::NetworkError(msg) if !msg.is_empty()));
    }
}
