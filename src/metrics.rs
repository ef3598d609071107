//! Metrics table loading
//!
//! The accuracy metrics of every precomputed model live in a CSV file with an
//! `index` column (the combination table position) and seven numeric columns:
//! `R2, MAE, MBE, MSE, RMSE, cvRMSE, NMBE`. The table is read once at startup,
//! from a local file or an `http(s)://` URL, and is read-only afterwards.

use crate::error::{FeatureTuiError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const HTTP_USER_AGENT: &str = concat!("featuretui/", env!("CARGO_PKG_VERSION"));

/// Upper bound for the one-time metrics download
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a metrics location names a remote resource rather than a file
pub fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Precomputed accuracy statistics for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    #[serde(rename = "R2")]
    pub r2: f64,
    #[serde(rename = "MAE")]
    pub mae: f64,
    #[serde(rename = "MBE")]
    pub mbe: f64,
    #[serde(rename = "MSE")]
    pub mse: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "cvRMSE")]
    pub cv_rmse: f64,
    #[serde(rename = "NMBE")]
    pub nmbe: f64,
}

impl MetricsRow {
    /// Display label and value pairs, in presentation order.
    pub fn labeled(&self) -> [(&'static str, f64); 7] {
        [
            ("R2", self.r2),
            ("MAE", self.mae),
            ("MBE", self.mbe),
            ("MSE", self.mse),
            ("RMSE", self.rmse),
            ("cvRMSE", self.cv_rmse),
            ("NMBE", self.nmbe),
        ]
    }
}

// One CSV line. Kept separate from `MetricsRow` because csv does not support
// `#[serde(flatten)]` for typed fields.
#[derive(Debug, Deserialize)]
struct MetricsRecord {
    index: usize,
    #[serde(rename = "R2")]
    r2: f64,
    #[serde(rename = "MAE")]
    mae: f64,
    #[serde(rename = "MBE")]
    mbe: f64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    #[serde(rename = "cvRMSE")]
    cv_rmse: f64,
    #[serde(rename = "NMBE")]
    nmbe: f64,
}

impl From<MetricsRecord> for MetricsRow {
    fn from(r: MetricsRecord) -> Self {
        Self {
            r2: r.r2,
            mae: r.mae,
            mbe: r.mbe,
            mse: r.mse,
            rmse: r.rmse,
            cv_rmse: r.cv_rmse,
            nmbe: r.nmbe,
        }
    }
}

/// Metrics rows addressed by combination table position.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    /// Load the metrics CSV from `location`: fetched over HTTP when it is an
    /// `http://` or `https://` URL, read from disk otherwise.
    pub fn load<P: AsRef<Path>>(location: P, expected_rows: usize) -> Result<Self> {
        let location = location.as_ref();
        match location.to_str().filter(|s| is_remote_location(s)) {
            Some(url) => Self::load_from_url(url, expected_rows),
            None => Self::load_from_file(location, expected_rows),
        }
    }

    /// Download and parse the metrics CSV at `url`.
    pub fn load_from_url(url: &str, expected_rows: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| {
                FeatureTuiError::metrics_load(format!("failed to build HTTP client: {}", e))
            })?;
        Self::fetch(&client, url, expected_rows)
    }

    fn fetch(client: &Client, url: &str, expected_rows: usize) -> Result<Self> {
        info!("Fetching metrics table from {}", url);
        let response = client
            .get(url)
            .send()
            .map_err(|e| FeatureTuiError::metrics_load(format!("cannot fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeatureTuiError::metrics_load(format!(
                "cannot fetch {}: HTTP {}",
                url, status
            )));
        }

        let body = response.bytes().map_err(|e| {
            FeatureTuiError::metrics_load(format!("cannot read response from {}: {}", url, e))
        })?;
        debug!("Fetched {} bytes of metrics", body.len());
        Self::from_reader(&body[..], expected_rows)
    }

    /// Load the metrics CSV at `path`, expecting exactly `expected_rows`
    /// positions (`0..expected_rows`).
    pub fn load_from_file<P: AsRef<Path>>(path: P, expected_rows: usize) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading metrics table from {}", path.display());
        let file = File::open(path).map_err(|e| {
            FeatureTuiError::metrics_load(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file, expected_rows)
    }

    /// Parse a metrics CSV from any reader.
    ///
    /// # Errors
    ///
    /// `MetricsLoad` on a missing column, a non-numeric value, an index outside
    /// `0..expected_rows`, a duplicated index, or a position with no row.
    pub fn from_reader<R: Read>(reader: R, expected_rows: usize) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut slots: Vec<Option<MetricsRow>> = vec![None; expected_rows];

        for (line, record) in csv_reader.deserialize::<MetricsRecord>().enumerate() {
            let record = record.map_err(|e| {
                FeatureTuiError::metrics_load(format!("row {}: {}", line + 1, e))
            })?;
            let index = record.index;
            let slot = slots.get_mut(index).ok_or_else(|| {
                FeatureTuiError::metrics_load(format!(
                    "row {}: index {} is outside 0..{}",
                    line + 1,
                    index,
                    expected_rows
                ))
            })?;
            if slot.is_some() {
                return Err(FeatureTuiError::metrics_load(format!(
                    "row {}: duplicate index {}",
                    line + 1,
                    index
                )));
            }
            *slot = Some(record.into());
        }

        let rows = slots
            .into_iter()
            .enumerate()
            .map(|(pos, row)| {
                row.ok_or_else(|| {
                    FeatureTuiError::metrics_load(format!("no metrics row for position {}", pos))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Metrics table loaded with {} rows", rows.len());
        Ok(Self { rows })
    }

    pub fn get(&self, position: usize) -> Option<&MetricsRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<MetricsRow> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = MetricsRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    const HEADER: &str = "index,R2,MAE,MBE,MSE,RMSE,cvRMSE,NMBE";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content
    }

    #[test]
    fn test_load_in_order() {
        let content = csv_with_rows(&[
            "0,0.9,1.0,0.1,2.0,1.41,10.5,0.2",
            "1,0.8,1.5,-0.1,3.0,1.73,12.0,-0.3",
        ]);
        let table = MetricsTable::from_reader(content.as_bytes(), 2).expect("valid csv");
        assert_eq!(table.len(), 2);
        let row = table.get(1).expect("row 1");
        assert_eq!(row.r2, 0.8);
        assert_eq!(row.mbe, -0.1);
        assert_eq!(row.cv_rmse, 12.0);
    }

    #[test]
    fn test_rows_keyed_by_index_not_line() {
        let content = csv_with_rows(&[
            "1,0.8,1.5,-0.1,3.0,1.73,12.0,-0.3",
            "0,0.9,1.0,0.1,2.0,1.41,10.5,0.2",
        ]);
        let table = MetricsTable::from_reader(content.as_bytes(), 2).expect("valid csv");
        assert_eq!(table.get(0).map(|r| r.r2), Some(0.9));
    }

    #[test]
    fn test_column_order_and_extra_columns_ignored() {
        let content = "NMBE,cvRMSE,RMSE,MSE,MBE,MAE,R2,index,note\n0.2,10.5,1.41,2.0,0.1,1.0,0.9,0,svr";
        let table = MetricsTable::from_reader(content.as_bytes(), 1).expect("valid csv");
        assert_eq!(table.get(0).map(|r| r.nmbe), Some(0.2));
    }

    #[test]
    fn test_missing_column_fails() {
        let content = "index,R2,MAE,MBE,MSE,RMSE,cvRMSE\n0,0.9,1.0,0.1,2.0,1.41,10.5";
        let err = MetricsTable::from_reader(content.as_bytes(), 1).unwrap_err();
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let content = csv_with_rows(&["0,high,1.0,0.1,2.0,1.41,10.5,0.2"]);
        let err = MetricsTable::from_reader(content.as_bytes(), 1).unwrap_err();
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
    }

    #[test]
    fn test_gap_fails() {
        let content = csv_with_rows(&["0,0.9,1.0,0.1,2.0,1.41,10.5,0.2"]);
        let err = MetricsTable::from_reader(content.as_bytes(), 2).unwrap_err();
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_duplicate_and_out_of_range_fail() {
        let dup = csv_with_rows(&[
            "0,0.9,1.0,0.1,2.0,1.41,10.5,0.2",
            "0,0.9,1.0,0.1,2.0,1.41,10.5,0.2",
        ]);
        assert!(MetricsTable::from_reader(dup.as_bytes(), 2).is_err());

        let out = csv_with_rows(&["5,0.9,1.0,0.1,2.0,1.41,10.5,0.2"]);
        assert!(MetricsTable::from_reader(out.as_bytes(), 1).is_err());
    }

    /// Serve one HTTP response on a local port; returns the base URL.
    fn serve_once(status_line: &'static str, body: String) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            // Drain request headers
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
        });
        (format!("http://{}", addr), handle)
    }

    fn local_client() -> Client {
        Client::builder().no_proxy().build().expect("http client")
    }

    #[test]
    fn test_remote_locations_detected() {
        assert!(is_remote_location("https://example.org/assets/metrics.csv"));
        assert!(is_remote_location("http://127.0.0.1:8080/metrics.csv"));
        assert!(!is_remote_location("assets/metrics.csv"));
        assert!(!is_remote_location("/srv/https/metrics.csv"));
    }

    #[test]
    fn test_fetch_over_http() {
        let content = csv_with_rows(&[
            "1,0.8,1.5,-0.1,3.0,1.73,12.0,-0.3",
            "0,0.9,1.0,0.1,2.0,1.41,10.5,0.2",
        ]);
        let (base, server) = serve_once("200 OK", content);
        let table = MetricsTable::fetch(&local_client(), &format!("{}/metrics.csv", base), 2)
            .expect("served csv");
        server.join().expect("server thread");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).map(|r| r.mae), Some(1.5));
    }

    #[test]
    fn test_fetch_http_error_status_fails() {
        let (base, server) = serve_once("404 Not Found", "missing".to_string());
        let err = MetricsTable::fetch(&local_client(), &format!("{}/metrics.csv", base), 1)
            .unwrap_err();
        server.join().expect("server thread");
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_fetch_malformed_body_fails() {
        let (base, server) = serve_once("200 OK", "not,a,metrics\ntable".to_string());
        let err = MetricsTable::fetch(&local_client(), &format!("{}/metrics.csv", base), 1)
            .unwrap_err();
        server.join().expect("server thread");
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
    }

    #[test]
    fn test_fetch_unreachable_host_fails() {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("free port")
            .port();
        let url = format!("http://127.0.0.1:{}/metrics.csv", port);
        let err = MetricsTable::fetch(&local_client(), &url, 1).unwrap_err();
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
    }

    #[test]
    fn test_local_path_is_not_fetched() {
        let err = MetricsTable::load("/nonexistent/metrics.csv", 1).unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }

    #[test]
    fn test_missing_file_fails() {
        let err = MetricsTable::load_from_file("/nonexistent/metrics.csv", 1).unwrap_err();
        assert!(matches!(err, FeatureTuiError::MetricsLoad(_)));
    }
}
