//! Signing relay submitter.
//!
//! Signing keys never live in this process. The relay (a wallet bridge or
//! signing service) receives the sender and entry-function payload, signs,
//! submits to the configured network and answers with the transaction hash
//! and, when it waits for execution, the result value.
//!
//! Request body:
//! ```json
//! { "network": "testnet", "sender": "0x…",
//!   "payload": { "type": "entry_function_payload", "function": "0x…::calculator::+",
//!                "type_arguments": [], "arguments": ["7", "5"] } }
//! ```
//! Response body: `{ "hash": "0x…", "result": "12" }` (`result` optional).
//!
//! Every request is bounded by the client timeout (`DEFAULT_TIMEOUT`
//! unless configured); expiry is reported as `SubmissionError::Timeout`.

use std::time::Duration;

use async_trait::async_trait;
use ledgercalc_core::{AccountRef, DispatchRequest, Submission, SubmissionError, Submitter};
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RelaySubmitter {
    url: String,
    network: String,
    token: Option<String>,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl RelaySubmitter {
    pub fn new(url: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            network: network.into(),
            token: None,
            timeout: Some(DEFAULT_TIMEOUT),
            client: build_client(Some(DEFAULT_TIMEOUT)),
        }
    }

    /// Bound each request. `None` waits as long as the relay takes.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self.client = build_client(timeout);
        self
    }

    /// Authenticate to the relay with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmissionError {
        match self.timeout {
            Some(limit) if e.is_timeout() => SubmissionError::Timeout {
                timeout_secs: limit.as_secs(),
            },
            _ => SubmissionError::Network(e.to_string()),
        }
    }

    fn body(&self, request: &DispatchRequest, account: &AccountRef) -> serde_json::Value {
        serde_json::json!({
            "network": self.network,
            "sender": account.address(),
            "payload": request.entry_function_payload(),
        })
    }
}

fn build_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("ledgercalc/", env!("CARGO_PKG_VERSION")));
    if let Some(limit) = timeout {
        builder = builder.timeout(limit);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Falling back to default HTTP client: {e}");
        reqwest::Client::new()
    })
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    hash: String,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl From<RelayResponse> for Submission {
    fn from(resp: RelayResponse) -> Self {
        let result = resp.result.and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        Submission {
            tx_hash: resp.hash,
            result,
        }
    }
}

#[async_trait]
impl Submitter for RelaySubmitter {
    fn name(&self) -> &str {
        "relay"
    }

    async fn submit(
        &self,
        request: &DispatchRequest,
        account: &AccountRef,
    ) -> Result<Submission, SubmissionError> {
        debug!(url = %self.url, function = %request.function_name, "Posting to signing relay");

        let mut http = self.client.post(&self.url).json(&self.body(request, account));
        if let Some(token) = &self.token {
            http = http.bearer_auth(token);
        }

        let response = http
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(SubmissionError::Signing(
                "relay refused to sign: invalid or missing token".into(),
            ));
        }

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Relay returned error");
            return Err(SubmissionError::Rejected {
                status_code: status,
                message: error_body,
            });
        }

        let body: RelayResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                SubmissionError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(body.into())
    }
}
