//! Time source for task timestamps.

use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

/// Supplies the current instant.
///
/// Collection operations take the instant as an argument; the manager in the
/// application crate reads it from a `Clock` so tests can pin time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Returns a timestamp strictly after `previous`: `now` when the clock has
/// advanced, otherwise `previous` plus one millisecond.
#[must_use]
pub fn next_timestamp(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous
        .checked_add_signed(TimeDelta::milliseconds(1))
        .unwrap_or(previous);
    now.max(floor)
}
