pub mod airport;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod output;
pub mod records;
pub mod results;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
pub mod upload;

pub use error::{Error, Result};
