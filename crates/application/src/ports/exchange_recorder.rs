//! Exchange recorder port

use petstore_domain::Exchange;

/// Passive observer of every request/response pair.
///
/// Recorders never influence control flow; they only log or collect.
pub trait ExchangeRecorder: Send + Sync {
    /// Called once per completed exchange.
    fn record(&self, exchange: &Exchange);
}
