//! Pending hours/minutes/seconds selection

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const MAX_HOURS: u8 = 23;
pub const MAX_MINUTES: u8 = 59;
pub const MAX_SECONDS: u8 = 59;

/// One of the three dials of the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    Hours,
    Minutes,
    Seconds,
}

impl SelectionField {
    /// Largest value the dial accepts
    pub fn max(self) -> u8 {
        match self {
            SelectionField::Hours => MAX_HOURS,
            SelectionField::Minutes => MAX_MINUTES,
            SelectionField::Seconds => MAX_SECONDS,
        }
    }

    /// Unit label shown next to the dial
    pub fn unit(self) -> &'static str {
        match self {
            SelectionField::Hours => "hr",
            SelectionField::Minutes => "min",
            SelectionField::Seconds => "sec",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionField::Hours => "hours",
            SelectionField::Minutes => "minutes",
            SelectionField::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: SelectionField,
        value: u32,
        max: u8,
    },
}

/// Duration chosen on the dials before starting.
///
/// Each field is kept within its own range; there is no constraint across
/// fields, so an all-zero selection is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationSelection {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl DurationSelection {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, SelectionError> {
        let mut selection = Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
        };
        selection.set(SelectionField::Hours, hours)?;
        selection.set(SelectionField::Minutes, minutes)?;
        selection.set(SelectionField::Seconds, seconds)?;
        Ok(selection)
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn get(&self, field: SelectionField) -> u8 {
        match field {
            SelectionField::Hours => self.hours,
            SelectionField::Minutes => self.minutes,
            SelectionField::Seconds => self.seconds,
        }
    }

    /// Set a single dial, leaving the selection untouched on error
    pub fn set(&mut self, field: SelectionField, value: u32) -> Result<(), SelectionError> {
        let max = field.max();
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= max)
            .ok_or(SelectionError::OutOfRange { field, value, max })?;

        match field {
            SelectionField::Hours => self.hours = value,
            SelectionField::Minutes => self.minutes = value,
            SelectionField::Seconds => self.seconds = value,
        }
        Ok(())
    }

    pub fn set_hours(&mut self, hours: u32) -> Result<(), SelectionError> {
        self.set(SelectionField::Hours, hours)
    }

    pub fn set_minutes(&mut self, minutes: u32) -> Result<(), SelectionError> {
        self.set(SelectionField::Minutes, minutes)
    }

    pub fn set_seconds(&mut self, seconds: u32) -> Result<(), SelectionError> {
        self.set(SelectionField::Seconds, seconds)
    }

    /// Countdown length this selection seeds, at most 23:59:59
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl Default for DurationSelection {
    /// The dials start at 0 hr 0 min 10 sec
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 10,
        }
    }
}

impl fmt::Display for DurationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.hours,
            SelectionField::Hours.unit(),
            self.minutes,
            SelectionField::Minutes.unit(),
            self.seconds,
            SelectionField::Seconds.unit(),
        )
    }
}
