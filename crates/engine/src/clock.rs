//! Time source and display formatting for new records.

use chrono::{
    DateTime, Utc,
    format::{Item, StrftimeItems},
};
use chrono_tz::Tz;

use crate::{EngineError, ResultEngine};

pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// How the `date` of a new record is rendered.
#[derive(Debug, Clone)]
pub struct DateFormat {
    timezone: Tz,
    pattern: String,
}

impl DateFormat {
    /// Build a format from an IANA timezone name and a chrono strftime
    /// pattern.
    pub fn new(timezone: &str, pattern: &str) -> ResultEngine<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| EngineError::UnknownOption(format!("timezone \"{timezone}\"")))?;
        if pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(EngineError::UnknownOption(format!(
                "date format \"{pattern}\""
            )));
        }
        Ok(Self {
            timezone,
            pattern: pattern.to_string(),
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(&self.pattern)
            .to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Sao_Paulo,
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
