pub mod base;
pub mod http_client;
pub mod log_client;

// Re-export the primary client items so code outside can do
// "use crate::transport::{MetricsClient, create_client};"
pub use base::{create_client, MetricsClient, TransportConfig, TransportError};
