//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for the `llm` backend.
//!
//! Template loading chain:
//! 1. `{prompts.dir}/{name}.pmt` (user override, when configured)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax and render in strict mode.

pub mod embedded;
mod loader;

pub use loader::{PromptLoader, TemplateOrigin};

/// Template name for initial list generation
pub const PACKING_LIST: &str = "packing-list";

/// Template name for the forgotten-item check
pub const FORGOTTEN_ITEMS: &str = "forgotten-items";
