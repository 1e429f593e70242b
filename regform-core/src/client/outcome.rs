//! src/client/outcome.rs
//! ============================================================================
//! # SubmitOutcome: what a registration request resolved to
//!
//! Every way a submit can end, including transport failure, is a value here;
//! the dispatcher turns it into exactly one notification.

use compact_str::CompactString;
use serde::Deserialize;
use serde_json::Value;

use crate::model::ui_state::NotificationLevel;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

pub const FALLBACK_SUCCESS: &str = "Employee registered";
pub const FALLBACK_WARNING: &str = "Employee already registered";

/// Known message fields of the endpoint's JSON answer. Any of them may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseBody {
    pub success: Option<String>,
    pub warning: Option<String>,
    pub failure: Option<String>,
    pub result: Option<Value>,
}

impl ResponseBody {
    /// Lenient parse: an empty or non-JSON body yields no fields.
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 201: the record was stored.
    Created {
        message: CompactString,
        result: Option<Value>,
    },
    /// 200: accepted but flagged by the server (e.g. a duplicate).
    Warning { message: CompactString },
    /// Any other 2xx answer.
    Failed {
        status: u16,
        message: CompactString,
    },
    /// Connect/TLS/timeout/body failures and non-2xx statuses.
    TransportFailed { reason: String },
}

impl SubmitOutcome {
    /// Maps a 2xx status and its body onto an outcome.
    pub fn from_response(status: u16, body: ResponseBody) -> Self {
        match status {
            201 => Self::Created {
                message: body
                    .success
                    .map_or_else(|| FALLBACK_SUCCESS.into(), Into::into),
                result: body.result,
            },
            200 => Self::Warning {
                message: body
                    .warning
                    .map_or_else(|| FALLBACK_WARNING.into(), Into::into),
            },
            other => Self::Failed {
                status: other,
                message: body.failure.map_or_else(
                    || compact_str::format_compact!("Unexpected response status {other}"),
                    Into::into,
                ),
            },
        }
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            Self::Created { .. } => NotificationLevel::Success,
            Self::Warning { .. } => NotificationLevel::Warning,
            Self::Failed { .. } | Self::TransportFailed { .. } => NotificationLevel::Error,
        }
    }

    /// Text shown to the user. Transport details are never surfaced.
    pub fn message(&self) -> &str {
        match self {
            Self::Created { message, .. }
            | Self::Warning { message }
            | Self::Failed { message, .. } => message.as_str(),
            Self::TransportFailed { .. } => INTERNAL_SERVER_ERROR,
        }
    }

    pub fn notification(&self) -> (NotificationLevel, &str) {
        (self.level(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_uses_success_field() {
        let body = ResponseBody::parse(r#"{"success":"OK","result":{}}"#);
        let outcome = SubmitOutcome::from_response(201, body);
        assert_eq!(outcome.notification(), (NotificationLevel::Success, "OK"));
        assert!(matches!(outcome, SubmitOutcome::Created { result: Some(ref r), .. } if *r == json!({})));
    }

    #[test]
    fn test_ok_uses_warning_field() {
        let outcome = SubmitOutcome::from_response(200, ResponseBody::parse(r#"{"warning":"dup"}"#));
        assert_eq!(outcome.notification(), (NotificationLevel::Warning, "dup"));
    }

    #[test]
    fn test_other_status_without_failure_field() {
        let outcome = SubmitOutcome::from_response(202, ResponseBody::parse("accepted"));
        assert_eq!(
            outcome.notification(),
            (NotificationLevel::Error, "Unexpected response status 202")
        );

        let outcome = SubmitOutcome::from_response(204, ResponseBody::parse(r#"{"failure":"nope"}"#));
        assert_eq!(outcome.message(), "nope");
    }

    #[test]
    fn test_missing_message_falls_back() {
        let outcome = SubmitOutcome::from_response(201, ResponseBody::parse(""));
        assert_eq!(outcome.message(), FALLBACK_SUCCESS);
    }

    #[test]
    fn test_transport_failure_is_fixed_text() {
        let outcome = SubmitOutcome::TransportFailed {
            reason: "connection refused".into(),
        };
        assert_eq!(
            outcome.notification(),
            (NotificationLevel::Error, INTERNAL_SERVER_ERROR)
        );
    }
}
