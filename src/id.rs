use std::{fmt, str};

use fstr::FStr;

use crate::{Error, MachineIdentity, Result, Timestamp};

/// Version marker of the identifiers produced by this crate.
pub const VERSION: char = 'b';

/// [`VERSION`] placed in the upper nibble of byte 6.
const VERSION_BITS: u8 = 0xb0;

/// Positions of the hyphens in the 8-4-4-4-12 representation.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Represents a locality-aware Universally Unique IDentifier.
///
/// The 16 bytes are owned by the value; constructors copy their input.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID by copying a byte slice that must be exactly 16 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        <[u8; 16]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidLength { len: bytes.len() })
    }

    /// Creates a UUID from the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// Leading and trailing whitespace is ignored and hexadecimal digits are accepted in either
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedIdentifier`] if the trimmed input is not exactly 36 characters
    /// with hyphens at positions 8, 13, 18, and 23 and hexadecimal digits everywhere else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locality_uuid::Uuid;
    ///
    /// let x = Uuid::parse_str(" 550E8400-E29B-41D4-A716-446655440000\n")?;
    /// assert_eq!(x.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    /// # Ok::<(), locality_uuid::Error>(())
    /// ```
    pub fn parse_str(src: &str) -> Result<Self> {
        let src = src.trim();
        decode(src.as_bytes())
            .map(Self)
            .ok_or_else(|| Error::MalformedIdentifier {
                input: src.to_owned(),
            })
    }

    /// Returns true if `src` is in the canonical 8-4-4-4-12 format and can be parsed.
    ///
    /// Unlike [`Uuid::parse_str`], surrounding whitespace is not trimmed.
    pub fn is_valid(src: &str) -> bool {
        decode(src.as_bytes()).is_some()
    }

    /// Creates a UUID from its field values.
    ///
    /// `counter` is placed as is; the counter encoding is chosen by the
    /// [`Generator`](crate::Generator). Only the lower 48 bits of `ticks` are stored.
    pub const fn from_fields(counter: [u8; 4], identity: &MachineIdentity, ticks: u64) -> Self {
        let pid = identity.pid();
        let mac = identity.mac();
        Self([
            counter[0],
            counter[1],
            counter[2],
            counter[3],
            (pid >> 8) as u8,
            pid as u8,
            VERSION_BITS | (mac[2] & 0x0f),
            mac[3],
            mac[4],
            mac[5],
            (ticks >> 40) as u8,
            (ticks >> 32) as u8,
            (ticks >> 24) as u8,
            (ticks >> 16) as u8,
            (ticks >> 8) as u8,
            ticks as u8,
        ])
    }

    /// Creates a UUID from the first and second halves of its content.
    pub const fn from_halves(hi: u64, lo: u64) -> Self {
        let hi = hi.to_be_bytes();
        let lo = lo.to_be_bytes();
        Self([
            hi[0], hi[1], hi[2], hi[3], hi[4], hi[5], hi[6], hi[7], lo[0], lo[1], lo[2], lo[3],
            lo[4], lo[5], lo[6], lo[7],
        ])
    }

    /// Returns the first and second halves of the content as big-endian `u64` values.
    pub const fn to_halves(&self) -> (u64, u64) {
        (self.most_significant_bits(), self.least_significant_bits())
    }

    /// Returns the first half (bytes 0-7) of the content.
    pub const fn most_significant_bits(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Returns the second half (bytes 8-15) of the content.
    pub const fn least_significant_bits(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]])
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal string representation stored in a
    /// stack-allocated string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locality_uuid::Uuid;
    ///
    /// let x = "87654321-1234-bc3d-4e5f-0123456789ab".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "87654321-1234-bc3d-4e5f-0123456789ab");
    /// assert_eq!(format!("{}", y), "87654321-1234-bc3d-4e5f-0123456789ab");
    /// # Ok::<(), locality_uuid::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut j = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[j] = DIGITS[(e >> 4) as usize];
            buffer[j + 1] = DIGITS[(e & 15) as usize];
            j += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buffer[j] = b'-';
                j += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the version field as a lowercase hexadecimal character.
    ///
    /// Identifiers generated by this crate report [`VERSION`], but UUIDs of other kinds (e.g.,
    /// `'4'` for random UUIDs) may be parsed as well.
    pub const fn version(&self) -> char {
        let v = self.0[6] >> 4;
        (if v < 10 { b'0' + v } else { b'a' + v - 10 }) as char
    }

    /// Returns the id of the process that generated the UUID, or `-1` if the UUID is not of
    /// [`VERSION`].
    pub const fn process_id(&self) -> i32 {
        if self.version() != VERSION {
            return -1;
        }
        ((self.0[4] as i32) << 8) | self.0[5] as i32
    }

    /// Returns the raw 48-bit generation timestamp, or `None` if the UUID is not of [`VERSION`].
    pub const fn timestamp(&self) -> Option<Timestamp> {
        if self.version() != VERSION {
            return None;
        }
        let b = &self.0;
        Some(Timestamp::from_ticks(u64::from_be_bytes([
            0, 0, b[10], b[11], b[12], b[13], b[14], b[15],
        ])))
    }

    /// Returns the MAC address fragment of the generating host, or `None` if the version field is
    /// not `'b'`.
    ///
    /// Only three and a half bytes of the address are stored, so the first two and a half bytes
    /// of the returned array are zero.
    pub const fn mac_fragment(&self) -> Option<[u8; 6]> {
        // compared with the literal marker, not `VERSION`
        if self.version() != 'b' {
            return None;
        }
        Some([0, 0, self.0[6] & 0x0f, self.0[7], self.0[8], self.0[9]])
    }
}

/// Decodes the 8-4-4-4-12 representation, returning `None` on any deviation from the format.
fn decode(src: &[u8]) -> Option<[u8; 16]> {
    if src.len() != 36 {
        return None;
    }

    let mut dst = [0u8; 16];
    let mut n = 0;
    for (i, &c) in src.iter().enumerate() {
        if HYPHENS.contains(&i) {
            if c != b'-' {
                return None;
            }
            continue;
        }
        let digit = (c as char).to_digit(16)? as u8;
        dst[n / 2] |= if n % 2 == 0 { digit << 4 } else { digit };
        n += 1;
    }
    Some(dst)
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self> {
        Self::parse_str(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self> {
        Self::from_slice(src)
    }
}

impl TryFrom<Option<&[u8]>> for Uuid {
    type Error = Error;

    /// Creates an object from a nullable byte slice, failing with [`Error::NullInput`] on `None`.
    fn try_from(src: Option<&[u8]>) -> Result<Self> {
        src.ok_or(Error::NullInput).and_then(Self::from_slice)
    }
}

impl TryFrom<&str> for Uuid {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self> {
        Self::parse_str(src)
    }
}

impl TryFrom<Option<&str>> for Uuid {
    type Error = Error;

    /// Creates an object from a nullable string, failing with [`Error::NullInput`] on `None`.
    fn try_from(src: Option<&str>) -> Result<Self> {
        src.ok_or(Error::NullInput).and_then(Self::parse_str)
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        Self::parse_str(&src)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            let (hi, lo) = src.to_halves();
            uuid::Uuid::from_u64_pair(hi, lo)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            let (hi, lo) = src.as_u64_pair();
            Self::from_halves(hi, lo)
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use crate::Error;
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_any(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid::parse_str(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Err(de::Error::custom(Error::NullInput))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Err(de::Error::custom(Error::NullInput))
        }
    }

}
