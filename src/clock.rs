//! Tick clock and timestamp types.
//!
//! Identifiers store time as 100-nanosecond ticks counted from 0001-01-01T00:00:00Z, truncated to
//! the lower 48 bits. The unit and epoch are part of the binary format and must never change, or
//! [`Uuid::timestamp`](crate::Uuid::timestamp) would be misread for identifiers persisted by
//! other installations.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Number of ticks in one second (one tick is 100 nanoseconds).
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Tick value of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// Mask selecting the 48 bits of a tick value that fit into an identifier.
pub const TIMESTAMP_MASK: u64 = (1 << 48) - 1;

const NANOS_PER_TICK: u128 = 100;

/// A trait for clocks that produce the current time in ticks.
///
/// This abstraction allows a generator to be driven by the system clock or by a fixed clock in
/// tests.
///
/// # Examples
///
/// ```rust
/// use locality_uuid::{Generator, MachineIdentity, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_ticks(&self) -> u64 {
///         0x0123_4567_89ab
///     }
/// }
///
/// let g = Generator::with_time_source(MachineIdentity::new(7, [0; 6]), FixedTime);
/// assert_eq!(g.generate().timestamp().map(|t| t.ticks()), Some(0x0123_4567_89ab));
/// ```
pub trait TimeSource {
    /// Returns the current time as 100-nanosecond ticks since 0001-01-01T00:00:00Z.
    fn current_ticks(&self) -> u64;
}

/// The default [`TimeSource`] backed by [`SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn current_ticks(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => UNIX_EPOCH_TICKS.wrapping_add((d.as_nanos() / NANOS_PER_TICK) as u64),
            // clock set before 1970
            Err(e) => UNIX_EPOCH_TICKS
                .saturating_sub((e.duration().as_nanos() / NANOS_PER_TICK) as u64),
        }
    }
}

/// The raw 48-bit tick value embedded in an identifier.
///
/// The upper bits of the original tick count are not stored, so a `Timestamp` wraps around
/// roughly every 325 days and cannot be turned into a calendar date on its own.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from a tick count, keeping only the lower 48 bits.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks & TIMESTAMP_MASK)
    }

    /// Returns the 48-bit tick count.
    pub const fn ticks(&self) -> u64 {
        self.0
    }

    /// Returns the tick count as a [`Duration`] (ticks times 100 nanoseconds).
    pub const fn as_duration(&self) -> Duration {
        Duration::new(
            self.0 / TICKS_PER_SECOND,
            ((self.0 % TICKS_PER_SECOND) * NANOS_PER_TICK as u64) as u32,
        )
    }
}

impl From<Timestamp> for u64 {
    fn from(src: Timestamp) -> Self {
        src.0
    }
}
