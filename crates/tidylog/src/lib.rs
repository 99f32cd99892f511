//! Structured-log prettifier core
//!
//! Turns a stream of newline-delimited log lines of mixed dialects (JSON
//! objects, logfmt key=value pairs, free text) into single-line, colorized,
//! column-aligned records. Unrecognized lines pass through unchanged.
//!
//! # Architecture
//!
//! - `handlers/`: per-dialect recognizer/parser/renderer implementations
//! - `dispatch.rs`: handler orchestration with sticky-preference fallback
//! - `render.rs`: shared rendering pipeline (all dialects)
//! - `stream.rs`: blocking line-by-line read/write loop
//!
//! Processing is single-threaded and synchronous: one line is fully
//! detected, parsed, rendered and written before the next is read. For
//! parallel streams, create one `Dispatcher` per stream.

pub mod coerce;
pub mod color;
pub mod dispatch;
pub mod handlers;
pub mod model;
pub mod options;
pub mod render;
pub mod stream;
pub mod timeparse;

// Re-export commonly used types
pub use dispatch::Dispatcher;
pub use model::Entry;
pub use options::{ConfigError, RenderOptions};

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
