//! Message template parsing, structured value capture, and rendering.

/// Template parsing, value capture, binding, and culture-aware rendering.
pub mod template;
