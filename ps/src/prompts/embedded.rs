//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

use super::{FORGOTTEN_ITEMS, PACKING_LIST};

/// Initial packing list prompt
pub const PACKING_LIST_PROMPT: &str = include_str!("../../prompts/packing-list.pmt");

/// "Did you forget" prompt
pub const FORGOTTEN_ITEMS_PROMPT: &str = include_str!("../../prompts/forgotten-items.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        PACKING_LIST => Some(PACKING_LIST_PROMPT),
        FORGOTTEN_ITEMS => Some(FORGOTTEN_ITEMS_PROMPT),
        _ => None,
    }
}
