use serde::{Deserialize, Serialize};

/// Body the service attaches to non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(serde_json::Value::String(detail.into())),
        }
    }

    /// User-visible text for the error, if the service supplied one.
    ///
    /// Payload validation failures carry a structured `detail`; those are
    /// rendered as compact JSON rather than dropped.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"no eligible problems"}"#)
            .expect("decode");
        assert_eq!(body.message().as_deref(), Some("no eligible problems"));
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","id"],"msg":"field required"}]}"#)
                .expect("decode");
        assert_eq!(
            body.message().as_deref(),
            Some(r#"[{"loc":["body","id"],"msg":"field required"}]"#)
        );
    }

    #[test]
    fn missing_or_blank_detail_has_no_message() {
        let body: ErrorBody = serde_json::from_str("{}").expect("decode");
        assert_eq!(body.message(), None);
        assert_eq!(ErrorBody::new("  ").message(), None);
    }
}
