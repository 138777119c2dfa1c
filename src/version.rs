//! Version and variant tagging.

use std::fmt;

/// The UUID versions this crate generates.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Version {
    /// Version 1: Gregorian timestamp, clock sequence, and node identifier.
    TimeBased = 1,

    /// Version 3: MD5 hash of a namespace and a name.
    NameMd5 = 3,

    /// Version 4: random.
    Random = 4,

    /// Version 5: SHA-1 hash of a namespace and a name.
    NameSha1 = 5,
}

impl From<Version> for u8 {
    fn from(src: Version) -> Self {
        src as u8
    }
}

impl TryFrom<u8> for Version {
    type Error = UnknownVersion;

    fn try_from(src: u8) -> Result<Self, Self::Error> {
        match src {
            1 => Ok(Self::TimeBased),
            3 => Ok(Self::NameMd5),
            4 => Ok(Self::Random),
            5 => Ok(Self::NameSha1),
            _ => Err(UnknownVersion(src)),
        }
    }
}

/// Error converting a number that is not a supported version into [`Version`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnknownVersion(/** The rejected version number. */ pub u8);

impl fmt::Display for UnknownVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported UUID version: {}", self.0)
    }
}

impl std::error::Error for UnknownVersion {}

/// Overwrites the version nibble (top 4 bits of byte 6) and the variant bits (top 2 bits of byte
/// 8, set at `10`), leaving all other bits untouched.
///
/// # Examples
///
/// ```rust
/// use su_uuid::{stamp, Version};
///
/// let bytes = stamp([0xff; 16], Version::Random);
/// assert_eq!(bytes[6], 0x4f);
/// assert_eq!(bytes[8], 0xbf);
/// ```
pub const fn stamp(mut bytes: [u8; 16], version: Version) -> [u8; 16] {
    bytes[6] = ((version as u8) << 4) | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
    bytes
}
