//! Dispatch request and outcome types — what crosses the boundary to the
//! transaction submission service.

use serde::{Deserialize, Serialize};

/// Address of the connected signer (e.g. `0x1f…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRef(pub String);

impl AccountRef {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn address(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlates log lines and events for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub uuid::Uuid);

impl DispatchId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A remote entry-function call, owned by the dispatcher for the duration
/// of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Fully qualified id: `<module_address>::<module_name>::<operation>`
    pub function_name: String,

    /// `[operand1, operand2]`, passed through without numeric coercion
    pub arguments: [String; 2],
}

impl DispatchRequest {
    /// JSON entry-function payload with no type arguments.
    pub fn entry_function_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "entry_function_payload",
            "function": self.function_name,
            "type_arguments": [],
            "arguments": self.arguments,
        })
    }
}

/// What the submission service reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Transaction hash
    pub tx_hash: String,

    /// Result value, if the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Submission {
    /// Text for the result display: the reported value, else the hash.
    pub fn display_value(&self) -> &str {
        self.result.as_deref().unwrap_or(&self.tx_hash)
    }
}

/// Terminal state of a dispatch that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The request was handed to the submitter and accepted.
    Submitted {
        id: DispatchId,
        request: DispatchRequest,
        submission: Submission,
    },

    /// No request was sent (e.g. no connected signer).
    Skipped { id: DispatchId, reason: String },

    /// The caller cancelled before the submitter finished.
    Cancelled { id: DispatchId },
}

impl DispatchOutcome {
    pub fn id(&self) -> DispatchId {
        match self {
            Self::Submitted { id, .. } | Self::Skipped { id, .. } | Self::Cancelled { id } => *id,
        }
    }

    pub fn submission(&self) -> Option<&Submission> {
        match self {
            Self::Submitted { submission, .. } => Some(submission),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let req = DispatchRequest {
            function_name: "0xa1::calculator::+".into(),
            arguments: ["7".into(), "5".into()],
        };
        let payload = req.entry_function_payload();
        assert_eq!(payload["type"], "entry_function_payload");
        assert_eq!(payload["function"], "0xa1::calculator::+");
        assert_eq!(payload["type_arguments"], serde_json::json!([]));
        assert_eq!(payload["arguments"], serde_json::json!(["7", "5"]));
    }

    #[test]
    fn display_value_prefers_result() {
        let mut sub = Submission {
            tx_hash: "0xdead".into(),
            result: None,
        };
        assert_eq!(sub.display_value(), "0xdead");
        sub.result = Some("12".into());
        assert_eq!(sub.display_value(), "12");
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = DispatchOutcome::Skipped {
            id: DispatchId::new(),
            reason: "no active signer".into(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"skipped\""));
    }
}
