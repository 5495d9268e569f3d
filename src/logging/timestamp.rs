//! Wall-clock source and the non-padded timestamp prefix

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Build from calendar fields, `None` if they do not form a valid time
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock that moves one second forward on every read
#[cfg(test)]
pub(crate) struct TickingClock(std::sync::Mutex<NaiveDateTime>);

#[cfg(test)]
impl TickingClock {
    pub(crate) fn starting_at(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Self {
        let start = FixedClock::at(year, month, day, hour, min, sec).unwrap();
        Self(std::sync::Mutex::new(start.0))
    }
}

#[cfg(test)]
impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let mut current = self.0.lock().unwrap();
        *current += chrono::Duration::seconds(1);
        *current
    }
}

/// `[year-month-day] [hour:minute:second]` without zero padding
pub fn format_timestamp(t: &NaiveDateTime) -> String {
    format!(
        "[{}-{}-{}] [{}:{}:{}]",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

/// Full line: timestamp, a space, then the already tagged text
pub fn format_line(t: &NaiveDateTime, text: &str) -> String {
    format!("{} {}", format_timestamp(t), text)
}
