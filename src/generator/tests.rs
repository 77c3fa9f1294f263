use super::{sequential_seed, Generator, INCREMENT};
use crate::{MachineIdentity, TimeSource, Uuid};
use chrono::{TimeZone, Utc};

const IDENTITY: MachineIdentity =
    MachineIdentity::new(0x1234, [0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]);

const TS: u64 = 0x0123_4567_89ab;

struct FixedTime;
impl TimeSource for FixedTime {
    fn current_ticks(&self) -> u64 {
        TS
    }
}

fn new_generator() -> Generator<FixedTime> {
    Generator::with_time_source(IDENTITY, FixedTime)
}

fn counter_bytes(e: &Uuid) -> [u8; 4] {
    let b = e.as_bytes();
    [b[0], b[1], b[2], b[3]]
}

/// Swaps nibbles of little-endian counter in variable mode
#[test]
fn swaps_nibbles_of_little_endian_counter_in_variable_mode() {
    let g = new_generator().with_counter(0x1234_5678);
    assert!(!g.is_sequential());
    assert_eq!(
        g.generate().to_string(),
        "87654321-1234-bc3d-4e5f-0123456789ab"
    );
    // 0x12345678 + INCREMENT == 0x1e09132d
    assert_eq!(
        g.generate().to_string(),
        "d23190e1-1234-bc3d-4e5f-0123456789ab"
    );
}

/// Wraps counter around without panicking
#[test]
fn wraps_counter_around_without_panicking() {
    let g = new_generator().with_counter(i32::MAX);
    assert_eq!(counter_bytes(&g.generate()), [0xff, 0xff, 0xff, 0xf7]);
    assert_eq!(counter_bytes(&g.generate()), [0x4b, 0xcb, 0x4d, 0xb8]);
    assert_eq!(i32::MAX.wrapping_add(INCREMENT) as u32, 0x8bd4_bcb4);
}

/// Computes sequential seed from 10-minute window
#[test]
fn computes_sequential_seed_from_10_minute_window() {
    let cases = [
        ((2024, 3, 15, 12, 30, 0), -1_326_727_645),
        ((2024, 3, 15, 12, 34, 56), -1_326_727_645),
        ((2024, 3, 15, 12, 39, 59), -1_326_727_645),
        ((2026, 10, 19, 18, 45, 1), 1_721_895_270),
        ((2000, 1, 1, 0, 9, 0), -1_731_709_387),
    ];

    for ((y, mo, d, h, mi, s), seed) in cases {
        let now = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
        assert_eq!(sequential_seed(now), seed);
    }

    let a = Utc.with_ymd_and_hms(2024, 3, 15, 12, 39, 59).unwrap();
    let b = Utc.with_ymd_and_hms(2024, 3, 15, 12, 40, 0).unwrap();
    assert_ne!(sequential_seed(a), sequential_seed(b));
}

/// Writes big-endian counter in sequential mode
#[test]
fn writes_big_endian_counter_in_sequential_mode() {
    let g = new_generator();
    g.use_sequential_ids_at(Utc.with_ymd_and_hms(2024, 3, 15, 12, 34, 56).unwrap());
    assert!(g.is_sequential());
    assert_eq!(
        g.generate().to_string(),
        "b0ebbe23-1234-bc3d-4e5f-0123456789ab"
    );
    assert_eq!(
        g.generate().to_string(),
        "b0ebbe24-1234-bc3d-4e5f-0123456789ab"
    );
}

/// Generates increasing counters in sequential mode
#[test]
fn generates_increasing_counters_in_sequential_mode() {
    let g = new_generator();
    g.use_sequential_ids_at(Utc.with_ymd_and_hms(2024, 3, 15, 12, 34, 56).unwrap());
    let mut prev = g.generate();
    for _ in 0..100_000 {
        let curr = g.generate();
        assert!(counter_bytes(&prev) < counter_bytes(&curr));
        assert!(prev < curr);
        prev = curr;
    }
}

/// Ignores repeated switches in the same direction
#[test]
fn ignores_repeated_switches_in_the_same_direction() {
    let g = new_generator();
    g.use_sequential_ids_at(Utc.with_ymd_and_hms(2024, 3, 15, 12, 34, 56).unwrap());
    g.generate();
    g.use_sequential_ids_at(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(counter_bytes(&g.generate()), [0xb0, 0xeb, 0xbe, 0x24]);

    g.use_variable_ids();
    g.use_variable_ids();
    assert!(!g.is_sequential());
    // counter continues from 0xb0ebbe25
    let e = g.generate();
    assert_eq!(counter_bytes(&e), [0x52, 0xeb, 0xbe, 0x0b]);
}

/// Keeps identity fields across mode switches
#[test]
fn keeps_identity_fields_across_mode_switches() {
    let g = new_generator();
    let mut samples = Vec::new();
    for i in 0..10 {
        if i % 2 == 0 {
            g.use_sequential_ids();
        } else {
            g.use_variable_ids();
        }
        samples.extend((&g).take(100));
    }

    for e in samples {
        assert_eq!(
            e.as_bytes()[4..16],
            [0x12, 0x34, 0xbc, 0x3d, 0x4e, 0x5f, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab]
        );
        assert_eq!(e.version(), 'b');
        assert_eq!(e.process_id(), 0x1234);
        assert_eq!(e.mac_fragment(), Some([0x00, 0x00, 0x0c, 0x3d, 0x4e, 0x5f]));
        assert_eq!(e.timestamp().map(|t| t.ticks()), Some(TS));
    }
}

/// Falls back to zero MAC fragment
#[test]
fn falls_back_to_zero_mac_fragment() {
    let g = Generator::with_identity(MachineIdentity::new(42, [0; 6]));
    for e in (&g).take(1_000) {
        assert_eq!(e.mac_fragment(), Some([0; 6]));
        assert_eq!(e.process_id(), 42);
        assert_eq!(e.as_bytes()[6], 0xb0);
    }
}

/// Reseeds once when switched from many threads at once
#[test]
fn reseeds_once_when_switched_from_many_threads_at_once() {
    use std::{
        collections::HashSet,
        sync::Barrier,
        thread,
    };

    const N_THREADS: usize = 8;
    const N_PER_THREAD: usize = 1_000;

    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 34, 56).unwrap();
    let g = new_generator();
    let barrier = Barrier::new(N_THREADS);

    // a second reseed would restart the counter and repeat identifiers already handed out
    let s: HashSet<Uuid> = thread::scope(|s| {
        let handles: Vec<_> = (0..N_THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    g.use_sequential_ids_at(now);
                    (&g).take(N_PER_THREAD).collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert!(g.is_sequential());
    assert_eq!(s.len(), N_THREADS * N_PER_THREAD);
}

/// Generates no duplicates under multithreading even with constant timestamp
#[test]
fn generates_no_duplicates_under_multithreading_even_with_constant_timestamp() {
    use std::{collections::HashSet, thread};

    const N_THREADS: usize = 8;
    const N_PER_THREAD: usize = 12_500;

    for sequential in [false, true] {
        let g = new_generator();
        if sequential {
            g.use_sequential_ids();
        }

        let s: HashSet<Uuid> = thread::scope(|s| {
            let handles: Vec<_> = (0..N_THREADS)
                .map(|_| s.spawn(|| (&g).take(N_PER_THREAD).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(s.len(), N_THREADS * N_PER_THREAD);
    }
}
