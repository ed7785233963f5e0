//! Fetch failure classification.

use thiserror::Error;

/// Why a request produced no usable response. Every variant is the same
/// "unreachable or unusable" outcome to callers; the kind only feeds logs and stats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(u32),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            return FetchError::Timeout;
        }
        if e.is_url_malformed() || e.is_unsupported_protocol() {
            return FetchError::InvalidUrl(e.description().to_string());
        }
        if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_ssl_connect_error()
            || e.is_peer_failed_verification()
        {
            return FetchError::Connect(e.description().to_string());
        }
        FetchError::Transport(e.description().to_string())
    }
}

/// Maps a final response status onto the failure taxonomy; `None` means usable.
pub fn classify_status(code: u32) -> Option<FetchError> {
    match code {
        0 => Some(FetchError::Transport("no HTTP status".to_string())),
        400..=u32::MAX => Some(FetchError::Status(code)),
        _ => None,
    }
}
