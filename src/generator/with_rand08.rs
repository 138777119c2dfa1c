//! Integration with `rand` (v0.8) crate.

use super::{RandSource, V1Generator};
use crate::{Error, V4Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|_| Error::EntropyUnavailable)
    }
}

impl V1Generator {
    /// Creates a generator object whose node identifier and clock sequence are seeded from a
    /// specified random number generator that implements [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::V1Generator;
    ///
    /// let mut g = V1Generator::with_rand08(rand::rngs::OsRng)?;
    /// println!("{}", g.generate());
    /// # Ok::<(), su_uuid::Error>(())
    /// ```
    pub fn with_rand08<T: RngCore>(mut rng: T) -> Result<Self, Error> {
        Self::from_rand_source(&mut Adapter(&mut rng))
    }
}

impl<T: RngCore> V4Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::V4Generator;
    ///
    /// let mut g = V4Generator::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.generate()?);
    /// # Ok::<(), su_uuid::Error>(())
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
