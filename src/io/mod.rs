//! Input/output operations and error handling

/// Command-line front end
pub mod cli;
/// Constants and command-line defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Image decoding and encoding collaborators
pub mod image;
/// Terminal progress reporting
pub mod progress;
