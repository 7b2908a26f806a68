/// Clock abstraction for "today" and the logging hour
///
/// The store and the streak calculator never read the system time directly;
/// they ask a Clock, so tests can pin the date.

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now_utc(&self) -> DateTime<Utc>;

    /// Wall-clock hour (0-23) in the user's local time zone
    fn local_hour(&self) -> u32;

    /// Calendar date used as "today" for streaks and default entry dates
    ///
    /// This is the UTC date, matching the ISO timestamp the journal has
    /// always keyed its entries by.
    fn today(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}

/// Clock backed by the operating system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Clock frozen at a single instant; the local hour is taken from the UTC time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Fixed at the given date and hour (UTC)
    pub fn at(date: NaiveDate, hour: u32) -> Self {
        let now = date
            .and_hms_opt(hour.min(23), 0, 0)
            .unwrap_or_default()
            .and_utc();
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_hour(&self) -> u32 {
        self.now.hour()
    }
}
