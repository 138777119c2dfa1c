//! Name-based UUIDs (versions 3 and 5).

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::{stamp, Uuid, Version};

/// Name space ID for fully-qualified domain names.
pub const NAMESPACE_DNS: Uuid = Uuid::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);

/// Name space ID for URLs.
pub const NAMESPACE_URL: Uuid = Uuid::from_u128(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8);

/// Name space ID for ISO object identifiers.
pub const NAMESPACE_OID: Uuid = Uuid::from_u128(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8);

/// Name space ID for X.500 distinguished names (in DER or text output format).
pub const NAMESPACE_X500: Uuid = Uuid::from_u128(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8);

/// The hash functions used to derive name-based UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HashAlgorithm {
    /// MD5, producing version 3 UUIDs.
    Md5,

    /// SHA-1 truncated to 128 bits, producing version 5 UUIDs.
    Sha1,
}

impl HashAlgorithm {
    /// Returns the version stamped onto UUIDs derived with this algorithm.
    pub const fn version(self) -> Version {
        match self {
            Self::Md5 => Version::NameMd5,
            Self::Sha1 => Version::NameSha1,
        }
    }
}

impl Uuid {
    /// Name space ID for fully-qualified domain names.
    pub const NAMESPACE_DNS: Self = NAMESPACE_DNS;

    /// Name space ID for URLs.
    pub const NAMESPACE_URL: Self = NAMESPACE_URL;

    /// Name space ID for ISO object identifiers.
    pub const NAMESPACE_OID: Self = NAMESPACE_OID;

    /// Name space ID for X.500 distinguished names.
    pub const NAMESPACE_X500: Self = NAMESPACE_X500;

    /// Creates a name-based UUID by hashing the namespace bytes followed by the name bytes.
    pub fn new_name_based(namespace: &Uuid, name: &[u8], algorithm: HashAlgorithm) -> Self {
        let mut bytes = [0u8; 16];
        match algorithm {
            HashAlgorithm::Md5 => {
                let digest = Md5::new()
                    .chain_update(namespace.as_bytes())
                    .chain_update(name)
                    .finalize();
                bytes.copy_from_slice(&digest);
            }
            HashAlgorithm::Sha1 => {
                let digest = Sha1::new()
                    .chain_update(namespace.as_bytes())
                    .chain_update(name)
                    .finalize();
                bytes.copy_from_slice(&digest[..16]);
            }
        }
        Self::from_bytes(stamp(bytes, algorithm.version()))
    }
}

/// Generates a UUIDv3 object from the MD5 hash of a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use su_uuid::{uuid3, NAMESPACE_DNS};
///
/// let uuid = uuid3(&NAMESPACE_DNS, "python.org");
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_name_based(namespace, name.as_ref(), HashAlgorithm::Md5)
}

/// Generates a UUIDv5 object from the SHA-1 hash of a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use su_uuid::{uuid5, NAMESPACE_DNS};
///
/// let uuid = uuid5(&NAMESPACE_DNS, "python.org");
/// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// ```
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_name_based(namespace, name.as_ref(), HashAlgorithm::Sha1)
}
