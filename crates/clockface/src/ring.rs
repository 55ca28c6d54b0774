//! The twelve dial positions and the values shown on them per view mode.
//!
//! Positions are numbered in drawing order, top row first, the way the face
//! is laid out in [`SLOTS`]: three across the top, a left/right pair on each
//! of the three middle rows, three across the bottom. [`RING_ORDER`] gives
//! the base value (an hour on a 12-hour clock, with 0 at the top) that lands
//! at each position.

use crate::time::AmPm;

/// Number of positions on the dial.
pub const RING_SIZE: usize = 12;

/// Base value at each position, in drawing order.
pub const RING_ORDER: [u32; RING_SIZE] = [11, 0, 1, 10, 2, 9, 3, 8, 4, 7, 6, 5];

/// Positions listed clockwise starting from the top (the position holding 0).
pub const CLOCKWISE: [usize; RING_SIZE] = [1, 2, 4, 6, 8, 11, 10, 9, 7, 5, 3, 0];

/// Grid slot `(row, column)` of each position on a 5 x 5 face.
pub const SLOTS: [(u16, u16); RING_SIZE] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (1, 4),
    (2, 0),
    (2, 4),
    (3, 0),
    (3, 4),
    (4, 1),
    (4, 2),
    (4, 3),
];

/// The field a view edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseView {
    Hour,
    Minute,
}

/// One of the three value sets the dial can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    HourAm,
    HourPm,
    Minute,
}

impl ViewMode {
    /// Combine a requested view with the current bucket. Minutes ignore the bucket.
    pub fn resolve(view: BaseView, ampm: AmPm) -> Self {
        match (view, ampm) {
            (BaseView::Minute, _) => ViewMode::Minute,
            (BaseView::Hour, AmPm::Am) => ViewMode::HourAm,
            (BaseView::Hour, AmPm::Pm) => ViewMode::HourPm,
        }
    }

    pub fn base(self) -> BaseView {
        match self {
            ViewMode::HourAm | ViewMode::HourPm => BaseView::Hour,
            ViewMode::Minute => BaseView::Minute,
        }
    }

    /// Stable name: `hour-am`, `hour-pm`, or `minute`.
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::HourAm => "hour-am",
            ViewMode::HourPm => "hour-pm",
            ViewMode::Minute => "minute",
        }
    }
}

/// Values for every position in the given mode.
///
/// * `hour-am`: the base values, so midnight shows as `0`.
/// * `hour-pm`: base + 12 in 24-hour mode; in 12-hour mode the base values
///   with `12` in place of `0`.
/// * `minute`: base x 5.
pub fn values(mode: ViewMode, is_24: bool) -> [u32; RING_SIZE] {
    RING_ORDER.map(|v| match mode {
        ViewMode::HourAm => v,
        ViewMode::HourPm if is_24 => v + 12,
        ViewMode::HourPm if v == 0 => 12,
        ViewMode::HourPm => v,
        ViewMode::Minute => v * 5,
    })
}

/// Text written on each position. Minutes below 10 get a leading zero.
pub fn labels(mode: ViewMode, values: &[u32; RING_SIZE]) -> [String; RING_SIZE] {
    let minute = mode == ViewMode::Minute;
    std::array::from_fn(|i| {
        if minute {
            format!("{:02}", values[i])
        } else {
            values[i].to_string()
        }
    })
}

/// Position showing `value`, if any.
pub fn position_of(values: &[u32; RING_SIZE], value: u32) -> Option<usize> {
    values.iter().position(|&v| v == value)
}

/// The position `steps` places clockwise from `from` (negative steps go
/// counter-clockwise). With no starting position, stepping forward lands on
/// the top of the dial and stepping back on the position just before it.
pub fn step(from: Option<usize>, steps: isize) -> usize {
    let n = RING_SIZE as isize;
    let start = match from {
        Some(pos) => CLOCKWISE.iter().position(|&p| p == pos).unwrap_or(0) as isize,
        None if steps > 0 => -1,
        None => 0,
    };
    CLOCKWISE[(start + steps).rem_euclid(n) as usize]
}
