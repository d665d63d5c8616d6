//! Console command parsing

use std::str::FromStr;
use thiserror::Error;

use crate::{services::AlertButton, state::SelectionField};

pub const HELP: &str = "\
Commands:
  <enter>          start, or stop while running
  start | stop     start or stop the countdown
  h <n> | hours <n>      set hours (0-23)
  m <n> | minutes <n>    set minutes (0-59)
  s <n> | seconds <n>    set seconds (0-59)
  ok | cancel      acknowledge the alert
  status           show the current state
  help             show this help
  quit             exit";

/// A user intent read from the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start when idle, stop when running
    Toggle,
    Start,
    Stop,
    Set(SelectionField, u32),
    Acknowledge(AlertButton),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs a value")]
    MissingValue(String),
    #[error("'{value}' is not a valid number for {field}")]
    InvalidValue { field: SelectionField, value: String },
    #[error("unexpected argument '{0}'")]
    TrailingInput(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Toggle);
        };
        let word = word.to_lowercase();

        let field = match word.as_str() {
            "h" | "hr" | "hours" => Some(SelectionField::Hours),
            "m" | "min" | "minutes" => Some(SelectionField::Minutes),
            "s" | "sec" | "seconds" => Some(SelectionField::Seconds),
            _ => None,
        };

        let command = match (word.as_str(), field) {
            (_, Some(field)) => {
                let raw = words
                    .next()
                    .ok_or_else(|| CommandError::MissingValue(word.clone()))?;
                let value = raw.parse().map_err(|_| CommandError::InvalidValue {
                    field,
                    value: raw.to_string(),
                })?;
                Command::Set(field, value)
            }
            ("start", _) => Command::Start,
            ("stop", _) => Command::Stop,
            ("ok", _) => Command::Acknowledge(AlertButton::Ok),
            ("cancel", _) => Command::Acknowledge(AlertButton::Cancel),
            ("status", _) => Command::Status,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            _ => return Err(CommandError::Unknown(word)),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_string())),
            None => Ok(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_toggles() {
        assert_eq!("".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("   ".parse::<Command>(), Ok(Command::Toggle));
    }

    #[test]
    fn parses_selection_updates() {
        assert_eq!("h 2".parse::<Command>(), Ok(Command::Set(SelectionField::Hours, 2)));
        assert_eq!(
            "Minutes 45".parse::<Command>(),
            Ok(Command::Set(SelectionField::Minutes, 45))
        );
        assert_eq!(
            "seconds 0".parse::<Command>(),
            Ok(Command::Set(SelectionField::Seconds, 0))
        );
    }

    #[test]
    fn both_alert_buttons_parse() {
        assert_eq!("ok".parse::<Command>(), Ok(Command::Acknowledge(AlertButton::Ok)));
        assert_eq!(
            "CANCEL".parse::<Command>(),
            Ok(Command::Acknowledge(AlertButton::Cancel))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "m".parse::<Command>(),
            Err(CommandError::MissingValue("m".to_string()))
        );
        assert_eq!(
            "s ten".parse::<Command>(),
            Err(CommandError::InvalidValue {
                field: SelectionField::Seconds,
                value: "ten".to_string(),
            })
        );
        assert_eq!(
            "start now".parse::<Command>(),
            Err(CommandError::TrailingInput("now".to_string()))
        );
        assert!(matches!(
            "snooze".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }
}
