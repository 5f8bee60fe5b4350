//! Masked `HH:MM` input used by the admin forms.
//!
//! Digits are typed one by one and shown progressively, e.g. `9` -> `9-:--`,
//! `930` -> `93:0-`. Leaving the field ("blur") clamps a complete 4-digit value into a valid
//! time; any other length is handed on unchanged and left to form validation.

const MAX_DIGITS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeMask {
    digits: String,
}

impl TimeMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the mask from a stored value such as `09:30:00`. Seconds are dropped.
    pub fn from_value(value: &str) -> Self {
        let mut mask = Self::new();
        mask.input(value);
        mask
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Accepts one keystroke. Non-digits and digits past the fourth are ignored.
    pub fn push(&mut self, key: char) -> bool {
        if !key.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(key);
        true
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn input(&mut self, keys: &str) {
        for key in keys.chars() {
            self.push(key);
        }
    }

    /// Value shown while typing, `-` marking unfilled positions. Empty when nothing was typed.
    pub fn display(&self) -> String {
        if self.digits.is_empty() {
            return String::new();
        }
        let mut padded = self.digits.chars().chain(std::iter::repeat('-'));
        let mut out = String::with_capacity(5);
        for position in 0..MAX_DIGITS {
            if position == 2 {
                out.push(':');
            }
            out.extend(padded.next());
        }
        out
    }

    /// Value kept when the field loses focus.
    pub fn blur(&self) -> String {
        if self.digits.len() != MAX_DIGITS {
            return self.display();
        }
        let hour = self.digits[..2].parse::<u32>().unwrap_or(0).min(23);
        let minute = self.digits[2..].parse::<u32>().unwrap_or(0).min(59);
        format!("{:02}:{:02}", hour, minute)
    }
}

/// Zero-padded `HH:MM` or `HH:MM:SS` within the 24 hour clock.
pub fn is_valid_time(value: &str) -> bool {
    let parts = value.split(':').collect::<Vec<_>>();
    if !(2..=3).contains(&parts.len()) {
        return false;
    }
    let limits = [23, 59, 59];
    parts.iter().zip(limits).all(|(part, limit)| {
        part.len() == 2
            && part.chars().all(|c| c.is_ascii_digit())
            && part.parse::<u32>().is_ok_and(|value| value <= limit)
    })
}

/// `HH:MM` -> `HH:MM:SS` as the backend stores times. Other values are returned unchanged.
pub fn to_backend(value: &str) -> String {
    if value.len() == 5 && is_valid_time(value) {
        format!("{}:00", value)
    } else {
        value.to_owned()
    }
}

/// Runs a raw form value through the mask and blur, then converts it for the backend.
pub fn normalize_time_field(raw: &str) -> String {
    if is_valid_time(raw) && raw.len() == 8 {
        return raw.to_owned();
    }
    to_backend(&TimeMask::from_value(raw).blur())
}
