pub mod base;
pub mod histogram;
pub mod passthrough;

// Re-export from base.rs so we can do "use crate::translators::*;"
pub use base::*;
