/// Thin HTTP wrapper for the Hydrology API: one GET, one JSON decode.
///
/// Synchronous, no retries. Transport failures, non-success statuses, and
/// bodies that fail to decode as JSON are all reported as `ApiError`, so
/// callers see a single failure mode with the request context attached.
use std::time::Duration;

use log::{debug, error, info};
use serde_json::Value;

use crate::model::ApiError;

/// Blocking HTTP client carrying the per-run request timeout.
pub struct ApiClient {
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Builds the underlying client. `timeout_secs` bounds each request end
    /// to end; a timed-out call fails like any other transport error.
    pub fn new(timeout_secs: u64) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError {
                url: String::new(),
                params: String::new(),
                detail: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { http })
    }

    /// Issues one GET with the given query pairs and decodes the body as
    /// JSON.
    pub fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let params = render_query(query);
        debug!("GET {} params={}", url, params);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("HTTP request failed: url={} params={} error={}", url, params, e);
                ApiError {
                    url: url.to_string(),
                    params: params.clone(),
                    detail: e.to_string(),
                }
            })?;
        info!("GET {} succeeded", url);

        response.json::<Value>().map_err(|e| {
            error!("invalid JSON response: url={} params={}", url, params);
            ApiError {
                url: url.to_string(),
                params,
                detail: format!("invalid JSON body: {}", e),
            }
        })
    }
}

/// Renders query pairs as `k=v&k=v` for logs and error context, `-` when
/// there are none.
fn render_query(query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return "-".to_string();
    }
    query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Collects log records so tests can assert on them. Installed at most
    /// once per test binary, by the one test that needs it.
    struct MemoryLogger(Arc<Mutex<Vec<(log::Level, String)>>>);

    impl log::Log for MemoryLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    /// Serves one canned 200 JSON response on a loopback socket and returns
    /// the base URL to reach it.
    fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut chunk = [0u8; 512];
                while let Ok(n) = socket.read(&mut chunk) {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_get_json_logs_request_success_and_failure() {
        let records = Arc::new(Mutex::new(Vec::new()));
        log::set_boxed_logger(Box::new(MemoryLogger(records.clone()))).unwrap();
        log::set_max_level(log::LevelFilter::Debug);

        let client = ApiClient::new(2).unwrap();

        let base = serve_once(r#"{"items": []}"#);
        let body = client
            .get_json(&format!("{}/id/stations/E64999A.json", base), &[])
            .unwrap();
        assert!(body["items"].as_array().unwrap().is_empty());

        // Port 0 is never connectable, so the failure path runs offline too.
        client
            .get_json("http://127.0.0.1:0/id/stations/E64999A.json", &[])
            .unwrap_err();

        let captured = records.lock().unwrap();
        assert!(
            captured
                .iter()
                .any(|(lvl, msg)| *lvl == log::Level::Debug && msg.starts_with("GET http://"))
        );
        assert!(
            captured
                .iter()
                .any(|(lvl, msg)| *lvl == log::Level::Info && msg.contains("succeeded"))
        );
        assert!(
            captured
                .iter()
                .any(|(lvl, msg)| *lvl == log::Level::Error && msg.contains("HTTP request failed"))
        );
    }

    #[test]
    fn test_render_query_joins_pairs_in_order() {
        let query = [
            ("_limit", "10".to_string()),
            ("_sort", "-dateTime".to_string()),
        ];
        assert_eq!(render_query(&query), "_limit=10&_sort=-dateTime");
    }

    #[test]
    fn test_render_query_empty_is_dash() {
        assert_eq!(render_query(&[]), "-");
    }

    #[test]
    fn test_unreachable_host_maps_to_api_error_with_context() {
        // Port 0 is never connectable, so this fails fast without touching
        // the network.
        let client = ApiClient::new(2).unwrap();
        let err = client
            .get_json("http://127.0.0.1:0/id/stations/X.json", &[])
            .unwrap_err();
        assert!(err.url.contains("/id/stations/X.json"));
        assert_eq!(err.params, "-");
        assert!(!err.detail.is_empty());
    }
}
