//! Input collaborator: keyboard actions, segment selection, and the mapping
//! from fresh actions to pose commands.
//!
//! # Invariants
//! - Selection state lives here, never in the pose kernel.
//! - At most one pose command is produced per polled frame.

pub mod action;
pub mod puppeteer;
pub mod selection;

pub use action::{Action, Keymap};
pub use puppeteer::{ActionEdges, DEFAULT_STEP, InputError, Puppeteer, command_for};
pub use selection::{SELECTION_ORDER, Selection};

pub fn crate_info() -> &'static str {
    "marionette-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
