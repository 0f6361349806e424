//! Port abstraction for the external media metadata API.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::UpstreamRequest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by metadata source adapters.
    pub enum MetadataSourceError {
        /// The API credential is absent.
        NotConfigured => "metadata API credential missing",
        /// The upstream answered with a non-success status.
        Status { status: u16, message: String } => "metadata API returned {status}: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } => "metadata API timed out: {message}",
        /// Connection-level failure.
        Transport { message: String } => "metadata API transport failed: {message}",
        /// The upstream body was not valid JSON.
        Decode { message: String } => "metadata API payload invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Perform `request` and return the upstream JSON body on success.
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value, MetadataSourceError>;
}
