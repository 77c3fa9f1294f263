//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::OnceLock;

use crate::{Generator, Uuid};

/// Returns the process-wide global generator, creating one if none exists.
///
/// The global generator is shared by [`generate`], [`use_sequential_ids`], and
/// [`use_variable_ids`], so a mode switch applies to every caller in the process.
pub fn global() -> &'static Generator {
    static G: OnceLock<Generator> = OnceLock::new();
    G.get_or_init(Generator::new)
}

/// Generates a locality UUID.
///
/// This function employs the global generator and never produces the same counter value twice
/// within a process, even when called concurrently from multiple threads.
///
/// # Examples
///
/// ```rust
/// let uuid = locality_uuid::generate();
/// println!("{uuid}"); // e.g., "d23190e1-1234-bc3d-4e5f-0123456789ab"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte array
///
/// let uuid_string: String = locality_uuid::generate().to_string();
/// ```
pub fn generate() -> Uuid {
    global().generate()
}

/// Switches the global generator into sequential mode.
///
/// This is best called once at program start. See [`Generator::use_sequential_ids`].
pub fn use_sequential_ids() {
    global().use_sequential_ids();
}

/// Switches the global generator back into variable mode, the default.
pub fn use_variable_ids() {
    global().use_variable_ids();
}
