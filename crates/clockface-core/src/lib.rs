//! Component runtime for the **clockface** time picker.
//!
//! `clockface-core` follows the [Elm Architecture]: state changes only inside
//! `update`, drawing happens in a pure `view`, and side effects are returned
//! as [`Command`]s for the runtime to execute.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Reusable state holder that renders into a [`ratatui::layout::Rect`] |
//! | [`Model`] | Top-level application (init / update / view / event mapping) |
//! | [`Command`] | Side effect executed by the runtime (messages, timers, quit) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestHarness`](testing::TestHarness) | Headless driver for unit-testing a [`Component`] |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod testing;

pub use command::{Action, Command};
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{log_to_file, Program, ProgramError, ProgramOptions};

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
