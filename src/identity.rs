//! Process and host identity embedded in generated identifiers.

use std::{process, sync::OnceLock};

use mac_address::{MacAddress, MacAddressError};

/// Process ids are stored modulo this value.
pub const MAX_PID: u32 = 65536;

/// The process id and network hardware address of the generating machine.
///
/// The value for the running process is computed once by [`MachineIdentity::current`] and cached
/// for the process lifetime; it is never refreshed even if network interfaces change.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MachineIdentity {
    pid: u16,
    mac: [u8; 6],
}

impl MachineIdentity {
    /// Creates an identity from explicit values.
    pub const fn new(pid: u16, mac: [u8; 6]) -> Self {
        Self { pid, mac }
    }

    /// Returns the identity of the running process, discovering it on first use.
    ///
    /// The MAC address is that of the first non-loopback interface found, or six zero bytes if
    /// there is none or the interfaces cannot be enumerated. Discovery never fails.
    pub fn current() -> Self {
        static IDENTITY: OnceLock<MachineIdentity> = OnceLock::new();
        *IDENTITY.get_or_init(Self::discover)
    }

    /// Returns the process id modulo [`MAX_PID`].
    pub const fn pid(&self) -> u16 {
        self.pid
    }

    /// Returns the 6-byte hardware address.
    pub const fn mac(&self) -> &[u8; 6] {
        &self.mac
    }

    fn discover() -> Self {
        let pid = (process::id() % MAX_PID) as u16;
        let mac = mac_or_zero(mac_address::get_mac_address());
        tracing::debug!(pid, has_mac = mac != [0; 6], "discovered machine identity");
        Self::new(pid, mac)
    }
}

/// Picks the address from an interface lookup, falling back to six zero bytes when there is no
/// usable address or the lookup failed.
fn mac_or_zero(res: Result<Option<MacAddress>, MacAddressError>) -> [u8; 6] {
    match res {
        Ok(Some(addr)) if addr.bytes() != [0; 6] => addr.bytes(),
        Ok(_) => [0; 6],
        Err(err) => {
            tracing::warn!(error = %err, "could not enumerate network interfaces");
            [0; 6]
        }
    }
}
