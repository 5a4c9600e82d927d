//! Library exports for the CloudWatch reporter, shared between the binary and tests.

pub mod config;
pub mod metrics;
pub mod models;
pub mod naming;
pub mod reporter;
pub mod routes;
pub mod sources;
pub mod startup;
pub mod state;
pub mod translators;
pub mod transport;
pub mod utils;
