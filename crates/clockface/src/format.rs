//! Display format templates such as `H:mm` or `hh:mm A`.
//!
//! Recognized tokens: hour `HH`, `hh`, `H`, `h`; minute `mm`, `m`; and, in
//! 12-hour formats only, `A` (uppercase am/pm) or `a` (lowercase am/pm).
//! Everything else passes through unchanged.

use crate::time::AmPm;

const HOUR_TOKENS: [&str; 4] = ["HH", "hh", "H", "h"];
const MINUTE_TOKENS: [&str; 2] = ["mm", "m"];

/// A parsed format template.
///
/// The 12/24-hour mode is fixed when the template is parsed: an uppercase
/// `H` hour token means 24-hour. A template without a recognized hour or
/// minute token falls back to `HH` / `mm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    template: String,
    hour_token: &'static str,
    minute_token: &'static str,
    is_24: bool,
}

impl TimeFormat {
    /// Parse a template. Tokens are tried in priority order and the first
    /// one present anywhere in the template wins.
    pub fn parse(template: impl Into<String>) -> Self {
        let template = template.into();
        let hour_token = first_token(&template, &HOUR_TOKENS).unwrap_or("HH");
        let minute_token = first_token(&template, &MINUTE_TOKENS).unwrap_or("mm");
        Self {
            is_24: hour_token.contains('H'),
            template,
            hour_token,
            minute_token,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn hour_token(&self) -> &'static str {
        self.hour_token
    }

    pub fn minute_token(&self) -> &'static str {
        self.minute_token
    }

    /// Whether the hour token selects 24-hour mode.
    pub fn is_24(&self) -> bool {
        self.is_24
    }

    /// Substitute hour, minute, and am/pm into the template.
    ///
    /// Two-character tokens zero-pad values below 10. A missing value (an
    /// empty or non-numeric field) substitutes as an empty string. Each token
    /// is replaced at its first occurrence only. In 12-hour mode `A` takes
    /// precedence over `a`; 24-hour output never carries am/pm.
    pub fn format(&self, hour: Option<u32>, minute: Option<u32>, ampm: AmPm) -> String {
        let hour = pad(hour, self.hour_token.len() > 1);
        let minute = pad(minute, self.minute_token.len() > 1);

        let mut out = self
            .template
            .replacen(self.hour_token, &hour, 1)
            .replacen(self.minute_token, &minute, 1);

        if !self.is_24 {
            out = if out.contains('A') {
                out.replacen('A', &ampm.as_str().to_uppercase(), 1)
            } else {
                out.replacen('a', ampm.as_str(), 1)
            };
        }
        out
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        TimeFormat::parse("H:mm")
    }
}

impl From<&str> for TimeFormat {
    fn from(template: &str) -> Self {
        TimeFormat::parse(template)
    }
}

fn first_token(template: &str, tokens: &[&'static str]) -> Option<&'static str> {
    tokens.iter().copied().find(|t| template.contains(t))
}

fn pad(value: Option<u32>, two_wide: bool) -> String {
    match value {
        Some(v) if two_wide => format!("{v:02}"),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
