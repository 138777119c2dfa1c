//! Default generators and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use parking_lot::{const_mutex, Mutex};

use crate::{Error, Node, Uuid, V4Generator};
use inner::{GlobalGenInner, LocalRng};

static GLOBAL_GEN: Mutex<Option<GlobalGenInner>> = const_mutex(None);

thread_local! {
    static LOCAL_RNG: RefCell<Option<LocalRng>> = RefCell::new(None);
}

/// Generates a UUIDv1 object.
///
/// This function employs a process-wide generator whose node identifier is a random multicast
/// address and whose clock sequence is randomly seeded. Timestamps of UUIDs returned by this
/// function never decrease across the whole process. On Unix, this function resets the generator
/// when the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Panics
///
/// Panics if the operating system cannot provide entropy to seed the generator. Use
/// [`try_uuid1`] to handle that case.
///
/// # Examples
///
/// ```rust
/// let uuid = su_uuid::uuid1();
/// println!("{}", uuid); // e.g., "a8098c1a-f86e-11da-bd1a-00112444be1e"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = su_uuid::uuid1().to_string();
/// ```
pub fn uuid1() -> Uuid {
    try_uuid1().expect("su_uuid: could not initialize global generator")
}

/// Generates a UUIDv1 object, or returns [`Error::EntropyUnavailable`] if the process-wide
/// generator cannot be seeded.
pub fn try_uuid1() -> Result<Uuid, Error> {
    let mut guard = GLOBAL_GEN.lock();
    let inner = match guard.take() {
        Some(e) if !e.is_stale() => guard.insert(e),
        _ => guard.insert(GlobalGenInner::try_new()?),
    };
    Ok(inner.generator.generate())
}

/// Generates a UUIDv1 object, overriding the node identifier and/or clock sequence of the
/// process-wide generator.
///
/// The timestamp still comes from the process-wide generator. Only the low 14 bits of `clock_seq`
/// are used.
///
/// # Examples
///
/// ```rust
/// use su_uuid::{uuid1_with, Error};
///
/// let uuid = uuid1_with(Some(0x0102_0304_0506), Some(42))?;
/// assert!(uuid.to_string().ends_with("-802a-010203040506"));
///
/// assert_eq!(
///     uuid1_with(Some(1 << 48), None),
///     Err(Error::InvalidNode { node: 1 << 48 })
/// );
/// # Ok::<(), su_uuid::Error>(())
/// ```
pub fn uuid1_with(node: Option<u64>, clock_seq: Option<u16>) -> Result<Uuid, Error> {
    let node = node.map(Node::try_from).transpose()?;
    let base = try_uuid1()?;
    Ok(Uuid::from_fields_v1(
        base.timestamp(),
        clock_seq.map_or(base.clock_seq(), |e| e & 0x3fff),
        node.unwrap_or(base.node()),
    ))
}

/// Generates a UUIDv4 object.
///
/// This function draws random bytes from a thread-local cryptographically secure generator and
/// shares no state across threads.
///
/// # Panics
///
/// Panics if the operating system cannot provide entropy to seed the generator. Use
/// [`try_uuid4`] to handle that case.
///
/// # Examples
///
/// ```rust
/// let uuid = su_uuid::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    try_uuid4().expect("su_uuid: could not initialize thread-local generator")
}

/// Generates a UUIDv4 object, or returns [`Error::EntropyUnavailable`] if the thread-local
/// generator cannot be seeded.
pub fn try_uuid4() -> Result<Uuid, Error> {
    LOCAL_RNG.with(|cell| {
        let mut slot = cell.borrow_mut();
        let rng = match slot.take() {
            Some(e) if !e.is_stale() => slot.insert(e),
            _ => slot.insert(LocalRng::try_new()?),
        };
        let mut g = V4Generator::new(rng);
        g.generate()
    })
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::RandSource;
    use crate::{Error, V1Generator};

    /// Returns true if the process ID has changed since `pid` was recorded (i.e., upon Unix
    /// forks).
    fn pid_changed(pid: u32) -> bool {
        cfg!(unix) && pid != std::process::id()
    }

    /// The thread-local random number generator for UUIDv4.
    ///
    /// It employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`], but reports seeding failures instead of panicking.
    #[derive(Debug)]
    pub struct LocalRng {
        pid: u32,
        rng: ReseedingRng<ChaCha12Core, OsRng>,
    }

    impl LocalRng {
        pub fn try_new() -> Result<Self, Error> {
            let core = ChaCha12Core::from_rng(OsRng).map_err(|_| Error::EntropyUnavailable)?;
            tracing::trace!("seeded thread-local generator");
            Ok(Self {
                pid: std::process::id(),
                rng: ReseedingRng::new(core, 1024 * 64, OsRng),
            })
        }

        pub fn is_stale(&self) -> bool {
            pid_changed(self.pid)
        }
    }

    impl RandSource for LocalRng {
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            rand::RngCore::try_fill_bytes(&mut self.rng, dest)
                .map_err(|_| Error::EntropyUnavailable)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        pid: u32,
        pub generator: V1Generator,
    }

    impl GlobalGenInner {
        pub fn try_new() -> Result<Self, Error> {
            let generator = V1Generator::with_rand08(OsRng)?;
            tracing::debug!(
                node = ?generator.node(),
                clock_seq = generator.clock_seq(),
                "initialized process-wide UUIDv1 generator"
            );
            Ok(Self {
                pid: std::process::id(),
                generator,
            })
        }

        pub fn is_stale(&self) -> bool {
            pid_changed(self.pid)
        }
    }
}

#[cfg(test)]
mod tests_v1 {
    use super::{uuid1, uuid1_with};
    use crate::{Error, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid1().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes increasing timestamps in call order
    #[test]
    fn encodes_increasing_timestamps_in_call_order() {
        let mut prev = uuid1();
        for _ in 0..10_000 {
            let curr = uuid1();
            assert!(prev.timestamp() < curr.timestamp());
            prev = curr;
        }
    }

    /// Shares one random multicast node across the process
    #[test]
    fn shares_one_random_multicast_node_across_the_process() {
        let node = uuid1().node();
        assert!(node.is_multicast());
        for _ in 0..1_000 {
            assert_eq!(uuid1().node(), node);
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid1();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Applies caller-supplied node and clock sequence
    #[test]
    fn applies_caller_supplied_node_and_clock_sequence() {
        let e = uuid1_with(Some(0x0102_0304_0506), Some(0x2a)).unwrap();
        assert_eq!(e.node().to_u64(), 0x0102_0304_0506);
        assert_eq!(e.clock_seq(), 0x2a);
        assert_eq!(e.version(), Some(1));

        let f = uuid1_with(Some(0x0102_0304_0506), Some(0x2a)).unwrap();
        assert!(e.timestamp() < f.timestamp());

        let g = uuid1_with(None, Some(0xffff)).unwrap();
        assert_eq!(g.clock_seq(), 0x3fff);
        assert_eq!(g.node(), uuid1().node());

        assert_eq!(
            uuid1_with(Some(u64::MAX), Some(0)),
            Err(Error::InvalidNode { node: u64::MAX })
        );
    }

    /// Generates no IDs sharing same timestamp and clock sequence under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_clock_sequence_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(uuid1()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert((e.timestamp(), e.clock_seq()));
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}

#[cfg(test)]
mod tests_v4 {
    use super::{try_uuid4, uuid4};
    use crate::Variant;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid4().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = try_uuid4().unwrap();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
        }
    }

    /// Generates distinct identifiers across threads
    #[test]
    fn generates_distinct_identifiers_across_threads() {
        use std::{collections::HashSet, thread};

        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| (0..10_000).map(|_| uuid4()).collect::<Vec<_>>()))
            .collect();
        let mut s = HashSet::new();
        for h in handles {
            s.extend(h.join().unwrap());
        }
        assert_eq!(s.len(), 4 * 10_000);
    }
}
