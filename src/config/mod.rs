// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod logging;
pub mod reporter;
pub mod types;

pub use logging::*;
pub use reporter::*;
pub use types::*;
