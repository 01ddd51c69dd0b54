//! Model transport trait — the seam between analysis and the hosted model.
//!
//! The client only needs "send this request, give me the text back".
//! `GeminiTransport` is the production implementation; tests plug in fakes.

use super::types::AnalysisRequest;
use crate::error::TransportError;
use async_trait::async_trait;

#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Send one request and return the model's raw response text.
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, TransportError>;

    /// Provider name for log lines.
    fn name(&self) -> &str {
        "model"
    }
}
