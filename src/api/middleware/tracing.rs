//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Path prefix whose final segment is a live password reset token.
const RESET_PREFIX: &str = "/account/reset/";

/// Builds request spans from the method and a redacted path.
///
/// The query string is never recorded and reset tokens are replaced by a
/// placeholder, so a log line cannot be replayed as a reset link.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactedMakeSpan;

impl<B> MakeSpan<B> for RedactedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %redact_path(request.uri().path()),
            version = ?request.version(),
        )
    }
}

fn redact_path(path: &str) -> &str {
    if path.starts_with(RESET_PREFIX) {
        "/account/reset/{token}"
    } else {
        path
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - Path (reset tokens redacted, no query string)
///   - HTTP version
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST path=/account/reset/{token} version=HTTP/1.1}: finished processing request latency=12 ms status=303
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RedactedMakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RedactedMakeSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
