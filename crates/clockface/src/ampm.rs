//! Am/pm bucket inference from a typed hour.

use crate::time::AmPm;

/// Outcome of [`infer_from_hour`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourInference {
    /// The bucket after inference.
    pub ampm: AmPm,
    /// A replacement for the hour field text, when the typed hour must be
    /// rewritten (`24` becomes `0`; `13..=23` fold to `1..=11` in 12-hour mode).
    pub rewrite: Option<u32>,
}

/// Decide the am/pm bucket for a typed hour.
///
/// * `24` is treated as `0` and the field is rewritten.
/// * `12..24` selects pm; in 12-hour mode hours above 12 are folded down.
/// * `0..11` selects am in 24-hour mode, and in 12-hour mode only for `0`.
///   Other single-digit 12-hour values are ambiguous and keep `current`.
/// * `11` keeps `current` in both modes, as does anything above 24.
pub fn infer_from_hour(hour: u32, is_24: bool, current: AmPm) -> HourInference {
    let (hour, mut rewrite) = if hour == 24 { (0, Some(0)) } else { (hour, None) };

    let ampm = match hour {
        12..=23 => {
            if !is_24 && hour > 12 {
                rewrite = Some(hour - 12);
            }
            AmPm::Pm
        }
        0..=10 if is_24 || hour == 0 => AmPm::Am,
        _ => current,
    };

    HourInference { ampm, rewrite }
}
