//! A clock-face time picker for [`ratatui`].
//!
//! [`Clockface`] draws twelve selectable values around an `hour:minute` pair
//! of fields and an am/pm toggle, keeps the dial, the fields, and the toggle
//! in step as the user clicks or types, and formats the chosen time with a
//! template such as `H:mm` or `hh:mm A`.
//!
//! The picker is a [`Component`]: embed it in a [`Model`], forward its
//! messages, and hand it a [`Rect`](ratatui::layout::Rect) to draw in.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`picker`] | The [`Clockface`] component, its options, style, and messages |
//! | [`format`] | Format templates and output formatting |
//! | [`time`] | [`AmPm`], [`TimeValue`], and the lenient time text parser |
//! | [`ampm`] | Am/pm inference from a typed hour |
//! | [`ring`] | Dial positions and the values shown per view mode |
//! | [`field`] | Two-character numeric input |
//! | [`debounce`] | Keystroke debouncing |
//!
//! The runtime from [`clockface_core`] is re-exported at the crate root, and
//! [`ratatui`] and [`crossterm`] are re-exported for downstream crates.

pub mod ampm;
pub mod debounce;
pub mod field;
pub mod format;
pub mod picker;
pub mod ring;
pub mod time;

pub use clockface_core::*;
pub use format::TimeFormat;
pub use picker::{ActiveField, Clockface, ClockfaceOptions, ClockfaceStyle, Message};
pub use ring::{BaseView, ViewMode};
pub use time::{AmPm, ParseTimeError, ParsedTime, TimeValue};

pub use crossterm;
pub use ratatui;
