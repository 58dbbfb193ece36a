/// `capture` command implementation.
pub mod capture;
/// `format` command implementation.
pub mod format;
/// `tokens` command implementation.
pub mod tokens;
/// Shared CLI helpers.
pub mod util;
