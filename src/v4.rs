//! UUIDv4-related functionality

use crate::{generator::RandSource, stamp, Error, Uuid, Version};

impl Uuid {
    /// Creates a UUIDv4 object from 16 random bytes, overwriting the version and variant bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::Uuid;
    ///
    /// let uuid = Uuid::from_random_bytes([0xff; 16]);
    /// assert_eq!(uuid.to_string(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
    /// ```
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::from_bytes(stamp(bytes, Version::Random))
    }
}

/// Represents a UUIDv4 generator that draws every UUID from a random number generator.
///
/// The generator holds no state besides its random number generator, so a generator over a
/// stateless source such as `rand::rngs::OsRng` can be created per call at no cost.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V4Generator<R> {
    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RandSource> V4Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a new UUIDv4 object, or returns [`Error::EntropyUnavailable`] if the random
    /// number generator fails.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        let mut bytes = [0u8; 16];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(Uuid::from_random_bytes(bytes))
    }
}
