//! Locality-aware UUIDs
//!
//! ```rust
//! use locality_uuid::generate;
//!
//! let uuid = generate();
//! println!("{}", uuid); // e.g. "d23190e1-1234-bc3d-4e5f-0123456789ab"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte array
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            counter                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              pid              |  ver  |          mac          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              mac              |           timestamp           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 32-bit `counter` field holds a process-wide counter advanced atomically for each new
//!   identifier. In the default variable mode the counter grows by a large odd increment and is
//!   written least significant byte first with the nibbles of each byte swapped, which scatters
//!   identifiers generated in a row. In sequential mode it grows by one and is written big-endian,
//!   so identifiers ascend byte-wise.
//! - The 16-bit `pid` field is the process id modulo 65536.
//! - The 4-bit `ver` field is set at `1011` (hex `b`).
//! - The 28-bit `mac` field holds the lower 4 bits of the third byte and the last three bytes of
//!   the first non-loopback MAC address of the host, or zeros if the host has none.
//! - The 48-bit `timestamp` field holds the lower 48 bits of the generation time in 100-nanosecond
//!   ticks since 0001-01-01T00:00:00Z.
//!
//! # Sequential mode
//!
//! ```rust
//! locality_uuid::use_sequential_ids();
//! let a = locality_uuid::generate();
//! let b = locality_uuid::generate();
//! assert!(a.as_bytes()[..4] < b.as_bytes()[..4]);
//! # locality_uuid::use_variable_ids();
//! ```
//!
//! Switching into sequential mode seeds the counter from the current UTC time at a 10-minute
//! resolution, so generators started around the same time across a fleet begin with similar
//! counter values.
//!
//! # Field extraction
//!
//! Identifiers of other kinds can be parsed as well. Fields that only exist in this layout are
//! reported as `-1` or `None` for them:
//!
//! ```rust
//! use locality_uuid::Uuid;
//!
//! let v4 = "550e8400-e29b-41d4-a716-446655440000".parse::<Uuid>()?;
//! assert_eq!(v4.version(), '4');
//! assert_eq!(v4.process_id(), -1);
//! assert_eq!(v4.timestamp(), None);
//! assert_eq!(v4.mac_fragment(), None);
//! # Ok::<(), locality_uuid::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
pub use clock::{
    StdSystemTime, TimeSource, Timestamp, TICKS_PER_SECOND, TIMESTAMP_MASK, UNIX_EPOCH_TICKS,
};

mod error;
pub use error::{Error, Result};

mod id;
pub use id::{Uuid, VERSION};

mod identity;
pub use identity::{MachineIdentity, MAX_PID};

pub mod generator;
#[doc(inline)]
pub use generator::Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{generate, global, use_sequential_ids, use_variable_ids};
