//! Error classification for the Gemini adapter
//!
//! Maps HTTP and transport failures onto the gateway error taxonomy.
//! The transient set is deliberately narrow: a 503 status, or an error
//! message carrying "503". Nothing else is assumed retryable.

use macrolens_application::GatewayError;

/// Classify a non-success HTTP response.
pub fn classify_http(status: u16, body: &str) -> GatewayError {
    match status {
        401 | 403 => GatewayError::Auth(format!("HTTP {status}: {body}")),
        503 => GatewayError::Transient(format!("HTTP 503: {body}")),
        _ if body.contains("503") => GatewayError::Transient(format!("HTTP {status}: {body}")),
        _ => GatewayError::Fatal(format!("HTTP {status}: {body}")),
    }
}

/// Classify a transport-level failure (no HTTP status available).
pub fn classify_message(message: &str) -> GatewayError {
    if message.contains("503") {
        GatewayError::Transient(message.to_string())
    } else {
        GatewayError::Fatal(message.to_string())
    }
}
