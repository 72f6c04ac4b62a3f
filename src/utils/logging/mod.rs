//! Logging helpers and progress bars for diagnosis loads

pub mod log;
pub mod progress;

pub use log::{log_read_complete, log_read_start, log_source_warning, source_message};
pub use progress::{create_main_progress_bar, finish_progress_bar};
