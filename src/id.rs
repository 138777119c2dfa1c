use std::{fmt, str};

use fstr::FStr;

use crate::{stamp, Error, Node, Version};

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a byte slice, failing unless the slice is exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::{Error, Uuid};
    ///
    /// let x = Uuid::from_slice(&[0xab; 16])?;
    /// assert_eq!(x.as_bytes(), &[0xab; 16]);
    /// assert_eq!(Uuid::from_slice(&[0; 15]), Err(Error::InvalidLength { len: 15 }));
    /// # Ok::<(), su_uuid::Error>(())
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidLength { len: bytes.len() })
    }

    /// Creates an object from a 128-bit unsigned integer.
    pub const fn from_u128(src: u128) -> Self {
        Self(src.to_be_bytes())
    }

    /// Creates an object from the little-endian byte order in which the first three fields are
    /// byte-swapped (the order used by Microsoft GUID structures).
    pub const fn from_bytes_le(b: [u8; 16]) -> Self {
        Self(swap_leading_fields(b))
    }

    /// Creates an object from the six RFC 4122 field groups.
    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq_hi_and_reserved: u8,
        clock_seq_low: u8,
        node: Node,
    ) -> Self {
        let n = node.as_bytes();
        Self([
            (time_low >> 24) as u8,
            (time_low >> 16) as u8,
            (time_low >> 8) as u8,
            time_low as u8,
            (time_mid >> 8) as u8,
            time_mid as u8,
            (time_hi_and_version >> 8) as u8,
            time_hi_and_version as u8,
            clock_seq_hi_and_reserved,
            clock_seq_low,
            n[0],
            n[1],
            n[2],
            n[3],
            n[4],
            n[5],
        ])
    }

    /// Creates a UUIDv1 object from a 60-bit Gregorian timestamp, a 14-bit clock sequence, and a
    /// node identifier.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` or `clock_seq` does not fit in its field.
    pub const fn from_fields_v1(timestamp: u64, clock_seq: u16, node: Node) -> Self {
        if timestamp >= 1 << 60 || clock_seq >= 1 << 14 {
            panic!("invalid field value");
        }

        let raw = Self::from_fields(
            timestamp as u32,
            (timestamp >> 32) as u16,
            (timestamp >> 48) as u16,
            (clock_seq >> 8) as u8,
            clock_seq as u8,
            node,
        );
        Self(stamp(raw.0, Version::TimeBased))
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns the bytes with the first three fields byte-swapped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::Uuid;
    ///
    /// let x = "00112233-4455-6677-8899-aabbccddeeff".parse::<Uuid>()?;
    /// assert_eq!(
    ///     x.to_bytes_le(),
    ///     [0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
    /// );
    /// # Ok::<(), su_uuid::ParseError>(())
    /// ```
    pub const fn to_bytes_le(&self) -> [u8; 16] {
        swap_leading_fields(self.0)
    }

    /// Returns the 128-bit unsigned integer value.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Returns the six RFC 4122 field groups: `time_low`, `time_mid`, `time_hi_and_version`,
    /// `clock_seq_hi_and_reserved`, `clock_seq_low`, and `node`.
    ///
    /// The fields are extractable from any UUID; whether they carry time-based meaning depends on
    /// the version.
    pub const fn as_fields(&self) -> (u32, u16, u16, u8, u8, Node) {
        (
            self.time_low(),
            self.time_mid(),
            self.time_hi_and_version(),
            self.clock_seq_hi_and_reserved(),
            self.clock_seq_low(),
            self.node(),
        )
    }

    /// Returns the first 32 bits.
    pub const fn time_low(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Returns bits 32 through 47.
    pub const fn time_mid(&self) -> u16 {
        u16::from_be_bytes([self.0[4], self.0[5]])
    }

    /// Returns bits 48 through 63, including the version nibble.
    pub const fn time_hi_and_version(&self) -> u16 {
        u16::from_be_bytes([self.0[6], self.0[7]])
    }

    /// Returns byte 8, including the variant bits.
    pub const fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.0[8]
    }

    /// Returns byte 9.
    pub const fn clock_seq_low(&self) -> u8 {
        self.0[9]
    }

    /// Returns the 14-bit clock sequence.
    pub const fn clock_seq(&self) -> u16 {
        ((self.0[8] & 0x3f) as u16) << 8 | self.0[9] as u16
    }

    /// Returns the last 48 bits as a node identifier.
    pub const fn node(&self) -> Node {
        let b = &self.0;
        Node::from_bytes([b[10], b[11], b[12], b[13], b[14], b[15]])
    }

    /// Returns the 60-bit timestamp, counted in 100-nanosecond intervals since 1582-10-15.
    pub const fn timestamp(&self) -> u64 {
        ((self.time_hi_and_version() & 0x0fff) as u64) << 48
            | (self.time_mid() as u64) << 32
            | self.time_low() as u64
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc | 0xd => Variant::Var110,
            _ => Variant::Var111,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::Uuid;
    ///
    /// let x = "6FA459EA-EE8A-3CA4-894E-DB77E160355E".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6fa459ea-ee8a-3ca4-894e-db77e160355e");
    /// assert_eq!(format!("{}", y), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
    /// # Ok::<(), su_uuid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
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
        // SAFETY: the buffer consists of ASCII hex digits and hyphens only
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens.
    pub fn encode_simple(&self) -> FStr<32> {
        let mut buffer = [0u8; 32];
        for (i, e) in self.0.iter().enumerate() {
            buffer[i * 2] = DIGITS[(e >> 4) as usize];
            buffer[i * 2 + 1] = DIGITS[(e & 15) as usize];
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII hex digits only
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the URN representation (`urn:uuid:` followed by the 8-4-4-4-12 form).
    ///
    /// # Examples
    ///
    /// ```rust
    /// let urn = su_uuid::NAMESPACE_DNS.encode_urn();
    /// assert_eq!(&urn as &str, "urn:uuid:6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// ```
    pub fn encode_urn(&self) -> FStr<45> {
        let mut buffer = [0u8; 45];
        buffer[..9].copy_from_slice(URN_PREFIX);
        buffer[9..].copy_from_slice(self.encode().as_bytes());
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of an ASCII prefix and an ASCII canonical string
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Creates an object from a textual representation.
    ///
    /// Accepts the 8-4-4-4-12 hyphenated form and the 32-digit form without hyphens, each
    /// optionally surrounded by braces or preceded by the `urn:uuid:` prefix. Hexadecimal digits
    /// are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::Uuid;
    ///
    /// let x = Uuid::parse_str("886313e1-3b8a-5372-9b90-0c9aee199e5d")?;
    /// assert_eq!(Uuid::parse_str("886313E13B8A53729B900C9AEE199E5D")?, x);
    /// assert_eq!(Uuid::parse_str("{886313e1-3b8a-5372-9b90-0c9aee199e5d}")?, x);
    /// assert_eq!(Uuid::parse_str("urn:uuid:886313e1-3b8a-5372-9b90-0c9aee199e5d")?, x);
    /// # Ok::<(), su_uuid::ParseError>(())
    /// ```
    pub fn parse_str(src: &str) -> Result<Self, ParseError> {
        let (offset, body) = strip_decorations(src);

        let mut nibbles = [0u8; 32];
        let mut n_digits = 0;
        let mut has_hyphen = false;
        for (i, c) in body.char_indices() {
            if c == '-' {
                has_hyphen = true;
            } else if let Some(v) = c.to_digit(16) {
                if n_digits < nibbles.len() {
                    nibbles[n_digits] = v as u8;
                }
                n_digits += 1;
            } else {
                return Err(ParseError::new(ParseErrorKind::InvalidCharacter {
                    character: c,
                    index: offset + i,
                }));
            }
        }

        if n_digits != nibbles.len() {
            return Err(ParseError::new(ParseErrorKind::InvalidLength {
                digits: n_digits,
            }));
        }

        if has_hyphen {
            // body is pure ASCII at this point
            for (i, &b) in body.as_bytes().iter().enumerate() {
                let group_boundary = i == 8 || i == 13 || i == 18 || i == 23;
                if (b == b'-') != group_boundary {
                    return Err(ParseError::new(ParseErrorKind::InvalidGroups {
                        index: offset + i,
                    }));
                }
            }
        }

        let mut dst = [0u8; 16];
        for (e, pair) in dst.iter_mut().zip(nibbles.chunks_exact(2)) {
            *e = (pair[0] << 4) | pair[1];
        }
        Ok(Self(dst))
    }
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

const URN_PREFIX: &[u8; 9] = b"urn:uuid:";

const fn swap_leading_fields(b: [u8; 16]) -> [u8; 16] {
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

/// Removes matching braces or the URN prefix, returning the offset of the remaining body.
fn strip_decorations(src: &str) -> (usize, &str) {
    if let Some(inner) = src.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        (1, inner)
    } else if src.len() >= URN_PREFIX.len()
        && src.as_bytes()[..URN_PREFIX.len()].eq_ignore_ascii_case(URN_PREFIX)
    {
        (URN_PREFIX.len(), &src[URN_PREFIX.len()..])
    } else {
        (0, src)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::LowerHex for Uuid {
    /// Returns the 32-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_simple())
    }
}

impl fmt::UpperHex for Uuid {
    /// Returns the 32-digit uppercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in self.0 {
            write!(f, "{:02X}", e)?;
        }
        Ok(())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from a textual representation. See [`Uuid::parse_str`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
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

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
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

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// The reserved variants of UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// `0xx`, reserved for NCS backward compatibility.
    Var0,

    /// `10x`, the layout specified by RFC 4122 and produced by every generator in this crate.
    Var10,

    /// `110`, reserved for Microsoft Corporation backward compatibility.
    Var110,

    /// `111`, reserved for future definition.
    Var111,
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
}

/// The reason a string representation was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A character other than a hexadecimal digit or hyphen was found.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        index: usize,
    },

    /// The number of hexadecimal digits was not 32.
    InvalidLength {
        /// The number of hexadecimal digits found.
        digits: usize,
    },

    /// Hyphens were present but not at the 8-4-4-4-12 group boundaries.
    InvalidGroups {
        /// Byte offset of the first misplaced or missing hyphen in the input.
        index: usize,
    },
}

impl ParseError {
    const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the reason the input was rejected.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::InvalidCharacter { character, index } => write!(
                f,
                "invalid string representation: unexpected character {:?} at {}",
                character, index
            ),
            ParseErrorKind::InvalidLength { digits } => write!(
                f,
                "invalid string representation: expected 32 hex digits, found {}",
                digits
            ),
            ParseErrorKind::InvalidGroups { index } => write!(
                f,
                "invalid string representation: hyphen misplaced or missing at {}",
                index
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
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
                deserializer.deserialize_str(VisitorImpl)
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
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6fa459ea-ee8a-3ca4-894e-db77e160355e",
                    &[
                        111, 164, 89, 234, 238, 138, 60, 164, 137, 78, 219, 119, 225, 96, 53, 94,
                    ],
                ),
                (
                    "886313e1-3b8a-5372-9b90-0c9aee199e5d",
                    &[
                        136, 99, 19, 225, 59, 138, 83, 114, 155, 144, 12, 154, 238, 25, 158, 93,
                    ],
                ),
                (
                    "20616934-4ba2-11e7-8000-010203040506",
                    &[32, 97, 105, 52, 75, 162, 17, 231, 128, 0, 1, 2, 3, 4, 5, 6],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects short byte sequences
        #[test]
        fn rejects_short_byte_sequences() {
            assert_de_tokens_error::<serde_test::Compact<Uuid>>(
                &[Token::Bytes(&[0u8; 15])],
                "invalid length: expected 16 bytes, found 15",
            );
        }
    }
}
