use serde::Serialize;

/// Result of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response carried a non-blank Strict-Transport-Security header.
    Supported { header_value: String },
    /// A response arrived (any status) without a usable header.
    NotSupported,
    /// No response could be obtained at all.
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Supported,
    NotSupported,
    Failed,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Supported => "supported",
            OutcomeKind::NotSupported => "not_supported",
            OutcomeKind::Failed => "failed",
        }
    }
}

impl ProbeOutcome {
    pub fn from_header(header_value: Option<String>) -> Self {
        match header_value {
            Some(header_value) if !header_value.trim().is_empty() => {
                ProbeOutcome::Supported { header_value }
            }
            _ => ProbeOutcome::NotSupported,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            "request failed".to_string()
        } else {
            reason
        };
        ProbeOutcome::Failed { reason }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            ProbeOutcome::Supported { .. } => OutcomeKind::Supported,
            ProbeOutcome::NotSupported => OutcomeKind::NotSupported,
            ProbeOutcome::Failed { .. } => OutcomeKind::Failed,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, ProbeOutcome::Supported { .. })
    }

    /// Header value, failure reason, or empty for `NotSupported`.
    pub fn message(&self) -> &str {
        match self {
            ProbeOutcome::Supported { header_value } => header_value,
            ProbeOutcome::NotSupported => "",
            ProbeOutcome::Failed { reason } => reason,
        }
    }
}
