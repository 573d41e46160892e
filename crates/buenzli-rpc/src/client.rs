//! Blocking HTTP client for the ledger node.
//!
//! Every call is a single blocking round trip: no retry, no batching, no
//! pooling guarantees. Failures are returned to the caller as they happen.

use crate::error::RpcError;
use buenzli_types::constants::endpoints;
use buenzli_types::{Transaction, UnspentOutput};
use log::debug;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Maximum number of characters of an error body kept in [`RpcError::HttpStatus`].
const ERROR_BODY_LIMIT: usize = 500;

/// Operations the wallet core needs from a ledger node.
pub trait NodeApi {
    /// Every unspent output the node knows about, in the node's order.
    ///
    /// The node does not filter by owner; callers match addresses themselves.
    fn unspent_outputs(&self) -> Result<Vec<UnspentOutput>, RpcError>;

    /// Ask the node to mine a block whose reward pays `reward_address`.
    fn request_block(&self, reward_address: &str) -> Result<(), RpcError>;

    /// Submit a signed transaction. The node's response body is not read.
    fn submit_transaction(&self, transaction: &Transaction) -> Result<(), RpcError>;
}

impl<T: NodeApi + ?Sized> NodeApi for &T {
    fn unspent_outputs(&self) -> Result<Vec<UnspentOutput>, RpcError> {
        (**self).unspent_outputs()
    }

    fn request_block(&self, reward_address: &str) -> Result<(), RpcError> {
        (**self).request_block(reward_address)
    }

    fn submit_transaction(&self, transaction: &Transaction) -> Result<(), RpcError> {
        (**self).submit_transaction(transaction)
    }
}

/// Configuration for a node client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL (e.g., `http://localhost:8080`).
    pub url: String,
    /// Request timeout. `None` waits for the node indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout: None,
        }
    }
}

impl RpcConfig {
    /// Configuration for `node`, given either as `host:port` or a full URL.
    pub fn for_node(node: &str) -> Result<Self, RpcError> {
        Ok(Self {
            url: normalize_url(node)?,
            ..Default::default()
        })
    }
}

/// Turn `host:port` into `http://host:port` and strip trailing slashes.
pub fn normalize_url(node: &str) -> Result<String, RpcError> {
    let node = node.trim().trim_end_matches('/');
    if node.is_empty() {
        return Err(RpcError::InvalidUrl("node address is empty".into()));
    }
    if node.contains(char::is_whitespace) {
        return Err(RpcError::InvalidUrl(node.to_string()));
    }
    if node.contains("://") {
        Ok(node.to_string())
    } else {
        Ok(format!("http://{}", node))
    }
}

/// Blocking client for the node's JSON-over-HTTP interface.
pub struct NodeClient {
    client: Client,
    config: RpcConfig,
}

impl NodeClient {
    /// Create a client for `node` (`host:port` or URL) with default settings.
    pub fn new(node: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::for_node(node)?)
    }

    /// Create a client with full configuration.
    pub fn with_config(mut config: RpcConfig) -> Result<Self, RpcError> {
        config.url = normalize_url(&config.url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RpcError::Client)?;

        Ok(Self { client, config })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.url, endpoint)
    }

    fn check_status(resp: Response, endpoint: &str, url: &str) -> Result<Response, RpcError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().unwrap_or_default();
            return Err(RpcError::HttpStatus {
                endpoint: endpoint.to_string(),
                url: url.to_string(),
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        Ok(resp)
    }

    fn http_error(endpoint: &str, url: &str, source: reqwest::Error) -> RpcError {
        RpcError::Http {
            endpoint: endpoint.to_string(),
            url: url.to_string(),
            source,
        }
    }

    fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<(), RpcError> {
        let url = self.endpoint_url(endpoint);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| Self::http_error(endpoint, &url, e))?;

        Self::check_status(resp, endpoint, &url)?;
        Ok(())
    }
}

impl NodeApi for NodeClient {
    fn unspent_outputs(&self) -> Result<Vec<UnspentOutput>, RpcError> {
        let endpoint = endpoints::UNSPENT_OUTPUTS;
        let url = self.endpoint_url(endpoint);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Self::http_error(endpoint, &url, e))?;

        let body = Self::check_status(resp, endpoint, &url)?
            .text()
            .map_err(|e| Self::http_error(endpoint, &url, e))?;

        let outputs: Vec<UnspentOutput> = serde_json::from_str(&body)?;
        debug!("node reported {} unspent outputs", outputs.len());
        Ok(outputs)
    }

    fn request_block(&self, reward_address: &str) -> Result<(), RpcError> {
        debug!("requesting block for {}", reward_address);
        self.post_json(endpoints::BLOCKS, reward_address)
    }

    fn submit_transaction(&self, transaction: &Transaction) -> Result<(), RpcError> {
        debug!(
            "submitting transaction {} ({} inputs, {} outputs)",
            transaction.hash,
            transaction.inputs.len(),
            transaction.outputs.len()
        );
        self.post_json(endpoints::TRANSACTIONS, transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buenzli_types::{TxInput, TxKind, TxOutput};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Accept one connection, capture the raw request and send `status` + `body`.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (addr, handle)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_string();
                let content_length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_config_default() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "http://localhost:8080");
        assert_eq!(config.timeout, None);
        assert_eq!(RpcConfig::for_node("node:8080").unwrap().timeout, None);
    }

    #[test]
    fn test_opt_in_timeout() {
        let config = RpcConfig {
            timeout: Some(Duration::from_secs(5)),
            ..RpcConfig::for_node("node:8080").unwrap()
        };
        let client = NodeClient::with_config(config).unwrap();
        assert_eq!(client.config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("node:8080").unwrap(), "http://node:8080");
        assert_eq!(
            normalize_url("https://node.example/").unwrap(),
            "https://node.example"
        );
        assert!(matches!(normalize_url("  "), Err(RpcError::InvalidUrl(_))));
        assert!(matches!(normalize_url("a b"), Err(RpcError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_url() {
        let client = NodeClient::new("127.0.0.1:9000/").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_unspent_outputs_roundtrip() {
        let (addr, server) = serve_once(
            "200 OK",
            r#"[{"output_hash":"aa","output_index":0,"output":{"amount":30,"address":"QUJD"}}]"#,
        );
        let client = NodeClient::new(&addr).unwrap();
        let outputs = client.unspent_outputs().unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /transactions/unspent "));
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].amount(), 30);
        assert_eq!(outputs[0].owner(), "QUJD");
    }

    #[test]
    fn test_unspent_outputs_bad_json() {
        let (addr, server) = serve_once("200 OK", "not json");
        let client = NodeClient::new(&addr).unwrap();
        let result = client.unspent_outputs();
        server.join().unwrap();
        assert!(matches!(result, Err(RpcError::Json(_))));
    }

    #[test]
    fn test_request_block_posts_json_string() {
        let (addr, server) = serve_once("200 OK", "{}");
        let client = NodeClient::new(&addr).unwrap();
        client.request_block("QUJD").unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /blocks "));
        assert!(request.ends_with("\"QUJD\""));
    }

    #[test]
    fn test_submit_transaction_body() {
        let (addr, server) = serve_once("200 OK", "");
        let client = NodeClient::new(&addr).unwrap();
        let tx = Transaction {
            kind: TxKind::Standard,
            index: 0,
            hash: "beef".into(),
            inputs: vec![TxInput {
                output_hash: "aa".into(),
                output_index: 1,
                signature: "3044".into(),
            }],
            outputs: vec![TxOutput::new(5, "QUJD")],
        };
        client.submit_transaction(&tx).unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /transactions "));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: Transaction = serde_json::from_str(body).unwrap();
        assert_eq!(sent, tx);
    }

    #[test]
    fn test_error_status_is_reported() {
        let (addr, server) = serve_once("500 Internal Server Error", "boom");
        let client = NodeClient::new(&addr).unwrap();
        let result = client.request_block("QUJD");
        server.join().unwrap();
        match result {
            Err(RpcError::HttpStatus { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
