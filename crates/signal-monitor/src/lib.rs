//! Logging and run observability.

mod logging;

pub use logging::{file_writer, setup_logging};
