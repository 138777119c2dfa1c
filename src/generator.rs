//! UUIDv1 generator and related types.

use crate::{Error, Uuid};

pub mod with_rand08;


/// A trait that defines the random number generator interface used to seed generators.
pub trait RandSource {
    /// Fills `dest` with random bytes, or fails with [`Error::EntropyUnavailable`] if the source
    /// cannot produce them.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error>;
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        (**self).try_fill_bytes(dest)
    }
}

/// A trait that defines the system clock interface for [`V1Generator`].
pub trait TimeSource {
    /// Returns the current time as a count of 100-nanosecond intervals since the Gregorian epoch
    /// (1582-10-15T00:00:00Z).
    fn gregorian_ticks(&mut self) -> u64;
}

/// The number of 100-nanosecond intervals between the Gregorian epoch and the Unix epoch.
pub const GREGORIAN_UNIX_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// The default [`TimeSource`] that reads the system clock through [`std::time::SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn gregorian_ticks(&mut self) -> u64 {
        use std::time;
        let now = time::SystemTime::now();
        match now.duration_since(time::UNIX_EPOCH) {
            Ok(elapsed) => GREGORIAN_UNIX_OFFSET + duration_to_ticks(elapsed),
            // system clock set before 1970
            Err(err) => GREGORIAN_UNIX_OFFSET.saturating_sub(duration_to_ticks(err.duration())),
        }
    }
}

fn duration_to_ticks(d: std::time::Duration) -> u64 {
    d.as_secs() * 10_000_000 + u64::from(d.subsec_nanos() / 100)
}

/// A 48-bit node identifier placed in the last six bytes of a UUIDv1.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Node([u8; 6]);

impl Node {
    /// Creates a node identifier from six bytes, most significant first.
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Creates a random node identifier with the multicast bit set, which marks it as not being a
    /// real hardware address.
    pub fn random<R: RandSource>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; 6];
        rng.try_fill_bytes(&mut bytes)?;
        bytes[0] |= 0x01;
        Ok(Self(bytes))
    }

    /// Returns a reference to the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Returns the node identifier as an integer.
    pub const fn to_u64(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Returns true if the multicast bit (least significant bit of the first octet) is set.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl TryFrom<u64> for Node {
    type Error = Error;

    /// Creates a node identifier from an integer, failing if it does not fit in 48 bits.
    fn try_from(src: u64) -> Result<Self, Self::Error> {
        if src >= 1 << 48 {
            return Err(Error::InvalidNode { node: src });
        }
        let b = src.to_be_bytes();
        Ok(Self([b[2], b[3], b[4], b[5], b[6], b[7]]))
    }
}

impl From<[u8; 6]> for Node {
    fn from(src: [u8; 6]) -> Self {
        Self(src)
    }
}

impl From<Node> for u64 {
    fn from(src: Node) -> Self {
        src.to_u64()
    }
}

const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

const MAX_TIMESTAMP: u64 = (1 << 60) - 1;

/// Represents a UUIDv1 generator that encapsulates a node identifier, a clock sequence, and the
/// last timestamp used, and guarantees unique UUIDs even if the clock stalls or moves backward.
///
/// Whenever the clock reading does not advance past the last timestamp used, the generator
/// increments the clock sequence (modulo 2^14) and uses the last timestamp plus one, so that
/// timestamps in generated UUIDs never decrease and never repeat.
///
/// The generator state is mutated through `&mut self`. The following example shares one generator
/// across threads using a mutex, which serializes each read-check-update step.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use su_uuid::V1Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V1Generator::with_rand08(OsRng)?));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// # Ok::<(), su_uuid::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<T = StdSystemTime> {
    node: Node,
    clock_seq: u16,
    last_timestamp: u64,

    /// The system clock used by the generator.
    time_source: T,
}

impl V1Generator {
    /// Creates a generator with a given node identifier and initial clock sequence. Only the low
    /// 14 bits of `clock_seq` are used.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use su_uuid::{Node, V1Generator};
    ///
    /// let node = Node::try_from(0x0102_0304_0506u64)?;
    /// let mut g = V1Generator::new(node, 42);
    /// let uuid = g.generate();
    /// assert_eq!(uuid.node(), node);
    /// assert_eq!(uuid.clock_seq(), 42);
    /// # Ok::<(), su_uuid::Error>(())
    /// ```
    pub const fn new(node: Node, clock_seq: u16) -> Self {
        Self::with_time_source(node, clock_seq, StdSystemTime)
    }

    /// Creates a generator with a random multicast node identifier and a random clock sequence
    /// drawn from `rng`.
    pub fn from_rand_source<R: RandSource>(rng: &mut R) -> Result<Self, Error> {
        let node = Node::random(rng)?;
        let mut buffer = [0u8; 2];
        rng.try_fill_bytes(&mut buffer)?;
        Ok(Self::new(node, u16::from_be_bytes(buffer)))
    }
}

impl<T: TimeSource> V1Generator<T> {
    /// Creates a generator with a given node identifier, initial clock sequence, and system
    /// clock.
    pub const fn with_time_source(node: Node, clock_seq: u16, time_source: T) -> Self {
        Self {
            node,
            clock_seq: clock_seq & MAX_CLOCK_SEQ,
            last_timestamp: 0,
            time_source,
        }
    }

    /// Returns the node identifier embedded in every UUID this generator produces.
    pub const fn node(&self) -> Node {
        self.node
    }

    /// Returns the current clock sequence.
    pub const fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    pub fn generate(&mut self) -> Uuid {
        let ticks = self.time_source.gregorian_ticks();
        self.generate_core(ticks)
    }

    /// Generates a new UUIDv1 object from the Gregorian timestamp passed.
    ///
    /// Bits above the 60-bit timestamp field are ignored.
    pub fn generate_core(&mut self, gregorian_ticks: u64) -> Uuid {
        let ticks = gregorian_ticks & MAX_TIMESTAMP;
        if ticks > self.last_timestamp {
            self.last_timestamp = ticks;
        } else {
            // clock stalled or went backwards
            self.clock_seq = (self.clock_seq + 1) & MAX_CLOCK_SEQ;
            self.last_timestamp = (self.last_timestamp + 1) & MAX_TIMESTAMP;
            tracing::trace!(
                clock_seq = self.clock_seq,
                last_timestamp = self.last_timestamp,
                ticks,
                "clock did not advance; bumped clock sequence"
            );
        }

        Uuid::from_fields_v1(self.last_timestamp, self.clock_seq, self.node)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use su_uuid::{Node, V1Generator};
///
/// V1Generator::new(Node::from_bytes([1, 2, 3, 4, 5, 6]), 0)
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<T: TimeSource> Iterator for V1Generator<T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T: TimeSource> std::iter::FusedIterator for V1Generator<T> {}
