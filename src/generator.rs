//! Locality UUID generator and related types.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::Rng;

use crate::{MachineIdentity, StdSystemTime, TimeSource, Uuid};

/// Amount added to the counter per UUID in variable mode.
pub const INCREMENT: i32 = 198_491_317;

/// Represents a locality UUID generator that encapsulates a shared counter, the machine identity,
/// and a clock.
///
/// A generator is safe to share across threads: the counter is advanced by a single atomic
/// fetch-and-add, so concurrent calls to [`generate`](Generator::generate) never observe the same
/// counter value.
///
/// # Counter modes
///
/// | Mode                 | Step          | Counter bytes 0-3                          |
/// | -------------------- | ------------- | ------------------------------------------ |
/// | variable (default)   | [`INCREMENT`] | little-endian, nibbles of each byte swapped |
/// | sequential           | `1`           | big-endian                                 |
///
/// Variable mode scatters UUIDs generated in a row, while sequential mode makes them ascend
/// byte-wise for index locality in sorted storage.
///
/// # Examples
///
/// ```rust
/// use locality_uuid::{Generator, VERSION};
/// use std::thread;
///
/// let g = Generator::new();
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 let uuid = g.generate();
///                 assert_eq!(uuid.version(), VERSION);
///                 println!("{} by thread {}", uuid, i);
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct Generator<T = StdSystemTime> {
    counter: AtomicI32,
    sequential: AtomicBool,
    identity: MachineIdentity,
    time: T,
}

impl Generator {
    /// Creates a generator with the identity of the running process and the system clock.
    pub fn new() -> Self {
        Self::with_identity(MachineIdentity::current())
    }

    /// Creates a generator with a specified identity and the system clock.
    pub fn with_identity(identity: MachineIdentity) -> Self {
        Self::with_time_source(identity, StdSystemTime)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Generator<T> {
    /// Creates a generator with a specified identity and time source.
    ///
    /// The generator starts in variable mode with a random non-negative counter.
    pub fn with_time_source(identity: MachineIdentity, time: T) -> Self {
        Self {
            counter: AtomicI32::new(rand::thread_rng().gen_range(0..i32::MAX)),
            sequential: AtomicBool::new(false),
            identity,
            time,
        }
    }

    /// Replaces the current counter value.
    pub fn with_counter(self, counter: i32) -> Self {
        self.counter.store(counter, Ordering::Relaxed);
        self
    }

    /// Returns the identity embedded in generated UUIDs.
    pub const fn identity(&self) -> &MachineIdentity {
        &self.identity
    }

    /// Generates a new UUID from the current time.
    pub fn generate(&self) -> Uuid {
        self.generate_core(self.time.current_ticks())
    }

    /// Generates a new UUID from the `ticks` passed.
    ///
    /// Only the lower 48 bits of `ticks` are stored.
    pub fn generate_core(&self, ticks: u64) -> Uuid {
        // the fetch-and-add alone keeps counter values unique
        let counter = if self.sequential.load(Ordering::Acquire) {
            self.counter.fetch_add(1, Ordering::Relaxed).to_be_bytes()
        } else {
            scatter(self.counter.fetch_add(INCREMENT, Ordering::Relaxed))
        };
        Uuid::from_fields(counter, &self.identity, ticks)
    }

    /// Switches the generator into sequential mode, reseeding the counter from the current UTC
    /// time.
    ///
    /// See [`Generator::use_sequential_ids_at`].
    pub fn use_sequential_ids(&self) {
        self.use_sequential_ids_at(Utc::now());
    }

    /// Switches the generator into sequential mode, reseeding the counter with
    /// [`sequential_seed`] of `now`.
    ///
    /// Generators switched within the same 10-minute window start from the same counter value, so
    /// UUIDs produced around the same time across a fleet begin with similar bytes. This is a
    /// heuristic only: instances generating at very different rates drift apart.
    ///
    /// Calling this again without switching back to variable mode has no effect, even when
    /// several threads switch at once: only the caller that flips the mode reseeds the counter.
    pub fn use_sequential_ids_at(&self, now: DateTime<Utc>) {
        if self
            .sequential
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let seed = sequential_seed(now);
            self.counter.store(seed, Ordering::Relaxed);
            tracing::debug!(seed, "switched to sequential ids");
        }
    }

    /// Switches the generator into variable mode, the default. The counter is left as is.
    pub fn use_variable_ids(&self) {
        if self.sequential.swap(false, Ordering::AcqRel) {
            tracing::debug!("switched to variable ids");
        }
    }

    /// Returns true if the generator is in sequential mode.
    pub fn is_sequential(&self) -> bool {
        self.sequential.load(Ordering::Acquire)
    }
}

/// Supports operations as an infinite iterator that produces a new UUID for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use locality_uuid::Generator;
///
/// let g = Generator::new();
/// (&g).take(4).for_each(|e| println!("{e}"));
/// ```
impl<T: TimeSource> Iterator for &Generator<T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T: TimeSource> std::iter::FusedIterator for &Generator<T> {}

/// Lays out a variable-mode counter: least significant byte first, with the two nibbles of every
/// byte exchanged.
const fn scatter(count: i32) -> [u8; 4] {
    let b = count.to_le_bytes();
    [
        b[0].rotate_left(4),
        b[1].rotate_left(4),
        b[2].rotate_left(4),
        b[3].rotate_left(4),
    ]
}

/// Returns the sequential-mode counter seed for `now`.
///
/// The seed is the first four bytes, read little-endian, of the MD5 digest of the UTC date
/// formatted as `yyyyMMddHHm` (the minute truncated to tens), so it changes every 10 minutes.
pub fn sequential_seed(now: DateTime<Utc>) -> i32 {
    let date = format!(
        "{:04}{:02}{:02}{:02}{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute() / 10
    );
    let digest = md5::compute(date.as_bytes());
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

#[cfg(test)]
mod tests;
