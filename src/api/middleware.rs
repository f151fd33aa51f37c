// Middleware stack for observability and protection

use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Tracing middleware
///
/// Logs method, path, status and latency for every request.
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Body size limit middleware
///
/// Returns 413 Payload Too Large if exceeded
pub fn body_size_limit_layer(limit_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(limit_bytes)
}

/// Request timeout middleware
///
/// Must sit under a `HandleErrorLayer` so that elapsed requests become 408s
pub fn timeout_layer(timeout: Duration) -> tower::timeout::TimeoutLayer {
    tower::timeout::TimeoutLayer::new(timeout)
}
