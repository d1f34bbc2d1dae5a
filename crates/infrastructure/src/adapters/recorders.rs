//! Exchange recorders.

use parking_lot::Mutex;
use petstore_application::ports::ExchangeRecorder;
use petstore_domain::Exchange;

/// Logs every exchange through `tracing`.
///
/// Request line and status go out at `info`, bodies at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecorder;

impl ExchangeRecorder for TracingRecorder {
    fn record(&self, exchange: &Exchange) {
        tracing::info!(
            method = %exchange.method,
            uri = %exchange.url,
            status = exchange.status,
            duration_ms = u64::try_from(exchange.duration.as_millis()).unwrap_or(u64::MAX),
            "{}",
            exchange.name
        );
        if let Some(body) = &exchange.request_body {
            tracing::debug!(body = %body, "request body");
        }
        tracing::debug!(body = %exchange.response_body, "response body");
    }
}

/// Keeps every exchange in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    exchanges: Mutex<Vec<Exchange>>,
}

impl MemoryRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded exchanges.
    #[must_use]
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().clone()
    }

    /// Number of recorded exchanges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.lock().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.lock().is_empty()
    }
}

impl ExchangeRecorder for MemoryRecorder {
    fn record(&self, exchange: &Exchange) {
        self.exchanges.lock().push(exchange.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstore_domain::request::RequestSpec;
    use petstore_domain::response::ResponseSpec;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_recorder_keeps_order() {
        let recorder = MemoryRecorder::new();
        assert!(recorder.is_empty());

        for status in [404, 200] {
            let request = RequestSpec::get("Get pet", "http://petstore.test/api/v3/pet/1");
            let response = ResponseSpec::json(status, &serde_json::json!({}));
            recorder.record(&Exchange::new(&request, &response));
        }

        let statuses: Vec<_> = recorder.exchanges().iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![404, 200]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_tracing_recorder_does_not_panic_without_subscriber() {
        let request = RequestSpec::get("Get pet", "http://petstore.test/api/v3/pet/1");
        let response = ResponseSpec::json(200, &serde_json::json!({"id": 1}));
        TracingRecorder.record(&Exchange::new(&request, &response));
    }
}
