/// Command-line interface
pub mod cli;
/// Tuning constants and defaults
pub mod configuration;
/// Error type shared across the crate
pub mod error;
/// Level documents and solve input files
pub mod level;
/// Terminal progress display
pub mod progress;
/// Messages streamed by a background solve
pub mod wire;
