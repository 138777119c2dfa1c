//! An implementation of RFC 4122 UUID versions 1, 3, 4, and 5
//!
//! ```rust
//! use su_uuid::{uuid1, uuid3, uuid4, uuid5, NAMESPACE_DNS};
//!
//! println!("{}", uuid1()); // e.g. "a8098c1a-f86e-11da-bd1a-00112444be1e"
//! println!("{}", uuid4()); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = uuid5(&NAMESPACE_DNS, "python.org");
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid3(&NAMESPACE_DNS, "python.org");
//! assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! Every UUID produced by this library carries the `10` variant bits and a 4-bit version. Version
//! 1 identifiers have the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |       time_hi         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|     clock_seq             |         node (0-1)            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp, split into `time_low`, `time_mid`, and `time_hi`, counts 100-nanosecond
//!   intervals since 1582-10-15T00:00:00Z.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized and incremented whenever the clock does
//!   not advance past the timestamp of the previous UUID.
//! - The 48-bit `node` field holds a node identifier. Generators created without an explicit node
//!   use random bits with the multicast bit set.
//!
//! When the system clock stalls or moves backward, [`V1Generator`] increments the clock sequence
//! and reuses the previous timestamp plus one, so that timestamps never repeat or decrease within
//! a generator.
//!
//! Versions 3 and 5 replace the timestamp, clock sequence, and node with the first 122 bits of the
//! MD5 or SHA-1 hash of a namespace UUID followed by a name, and version 4 with random bits.
//!
//! # Crate features
//!
//! - `global_gen` (default): the process-wide [`uuid1`] and thread-local [`uuid4`] entry points.
//! - `serde`: `Serialize` and `Deserialize` implementations for [`Uuid`].
//! - `uuid`: conversions from and to `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, ParseErrorKind, Uuid, Variant};

mod error;
pub use error::Error;

mod version;
pub use version::{stamp, UnknownVersion, Version};

pub mod generator;
#[doc(inline)]
pub use generator::{Node, V1Generator};

mod name;
pub use name::{
    uuid3, uuid5, HashAlgorithm, NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500,
};

mod v4;
pub use v4::V4Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{try_uuid1, try_uuid4, uuid1, uuid1_with, uuid4};
