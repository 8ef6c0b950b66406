use crate::{
    AnySource, DiscriminatorSource, EntropySource, Error, Generator, Identifier,
    MAX_DISCRIMINATOR, MinuteStamp, MonotonicCounter, RandomSource, ReadEntropy, Result,
    Strategy, TimeSource,
};
use core::{cell::Cell, time::Duration};
use std::{
    collections::HashSet,
    io,
    rc::Rc,
    sync::Arc,
    thread::scope,
    time::{SystemTime, UNIX_EPOCH},
};

// 2024-08-18T15:30:00Z
const BASE_SECS: u64 = 1_723_995_000;

struct MockTime {
    secs: u64,
}

impl TimeSource for MockTime {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.secs)
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

struct MockStepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

impl SharedMockStepTime {
    fn new(values: Vec<u64>) -> Self {
        Self {
            clock: Rc::new(MockStepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }

    fn advance(&self) {
        self.clock.index.set(self.clock.index.get() + 1);
    }
}

impl TimeSource for SharedMockStepTime {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.clock.values[self.clock.index.get()])
    }
}

struct FixedDiscriminator(u16);

impl DiscriminatorSource for FixedDiscriminator {
    fn next_discriminator(&self, _stamp: MinuteStamp) -> Result<u16> {
        Ok(self.0)
    }
}

struct BrokenEntropy;

impl EntropySource for BrokenEntropy {
    fn fill_bytes(&self, _dest: &mut [u8]) -> io::Result<()> {
        Err(io::Error::other("device unavailable"))
    }
}

fn run_ids_increase_within_same_minute<S: DiscriminatorSource>(generator: &Generator<S, MockTime>) {
    let id1 = generator.generate().unwrap();
    let id2 = generator.generate().unwrap();
    let id3 = generator.generate().unwrap();

    assert_eq!(id1.days(), 1691);
    assert_eq!(id1.minute_of_day(), 930);
    assert_eq!(id1.discriminator(), 0);
    assert_eq!(id2.discriminator(), 1);
    assert_eq!(id3.discriminator(), 2);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn counter_generator_increments_within_minute() {
    let generator = Generator::new(
        MockTime { secs: BASE_SECS },
        MonotonicCounter::new(),
    );
    run_ids_increase_within_same_minute(&generator);

    let shared = Generator::new(
        MockTime { secs: BASE_SECS },
        Arc::new(MonotonicCounter::new()),
    );
    run_ids_increase_within_same_minute(&shared);

    let any = Generator::new(MockTime { secs: BASE_SECS }, Strategy::Counter.build());
    run_ids_increase_within_same_minute(&any);
}

#[test]
fn counter_generator_fails_after_exhaustion_then_recovers() {
    let clock = SharedMockStepTime::new(vec![BASE_SECS, BASE_SECS + 59, BASE_SECS + 60]);
    let generator = Generator::new(clock.clone(), MonotonicCounter::new());

    let mut last = None;
    for expected in 0..=MAX_DISCRIMINATOR {
        let id = generator.generate().unwrap();
        assert_eq!(id.discriminator(), expected);
        if let Some(prev) = last {
            assert!(prev < id);
        }
        last = Some(id);
    }
    assert!(matches!(
        generator.generate(),
        Err(Error::DiscriminatorOverflow { value: 16_384 })
    ));

    // Still the same minute.
    clock.advance();
    assert!(generator.generate().is_err());

    clock.advance();
    let id = generator.generate().unwrap();
    assert_eq!(id.discriminator(), 0);
    assert_eq!(id.minute_of_day(), 931);
    assert!(last.is_some_and(|prev| prev < id));
}

#[test]
fn generator_rejects_clock_outside_range() {
    let past = Generator::new(
        MockTime {
            secs: 1_577_836_799,
        },
        MonotonicCounter::new(),
    );
    assert!(matches!(past.generate(), Err(Error::PastEpoch)));
    assert_eq!(past.source().last_issued().unwrap(), None);

    let future = Generator::new(
        MockTime {
            secs: 4_408_992_000,
        },
        RandomSource::new(BrokenEntropy),
    );
    assert!(matches!(
        future.generate(),
        Err(Error::FutureRange { days: 32_768 })
    ));
}

#[test]
fn random_generator_propagates_entropy_failure() {
    let generator = Generator::new(MockTime { secs: BASE_SECS }, RandomSource::new(BrokenEntropy));
    match generator.generate() {
        Err(Error::Entropy(cause)) => assert_eq!(cause.to_string(), "device unavailable"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn random_generator_uses_entropy_bytes() {
    let generator = Generator::new(
        MockTime { secs: BASE_SECS },
        RandomSource::new(ReadEntropy::new(&[0x04_u8, 0xD2, 0xFF, 0xFF][..])),
    );
    let id = generator.generate().unwrap();
    assert_eq!(id.to_text(), "1MVEH16J");
    let id = generator.generate().unwrap();
    assert_eq!(id.discriminator(), MAX_DISCRIMINATOR);
    assert!(matches!(generator.generate(), Err(Error::Entropy(_))));
}

#[test]
fn fixed_source_out_of_range_is_rejected() {
    let generator = Generator::new(MockTime { secs: BASE_SECS }, FixedDiscriminator(16_384));
    assert!(matches!(
        generator.generate(),
        Err(Error::DiscriminatorOverflow { value: 16_384 })
    ));

    let generator = Generator::new(MockTime { secs: BASE_SECS }, FixedDiscriminator(1234));
    assert_eq!(generator.must_generate().to_integer(), 56_755_782_866);
}

#[test]
#[should_panic(expected = "identifier generation failed")]
fn must_generate_panics_on_error() {
    let generator = Generator::new(MockTime { secs: 0 }, MonotonicCounter::new());
    let _ = generator.must_generate();
}

#[test]
fn generators_sharing_a_counter_never_collide() {
    let counter = Arc::new(MonotonicCounter::new());
    let a = Generator::new(MockTime { secs: BASE_SECS }, Arc::clone(&counter));
    let b = Generator::new(MockTime { secs: BASE_SECS + 30 }, Arc::clone(&counter));

    let mut seen = HashSet::new();
    for _ in 0..100 {
        assert!(seen.insert(a.generate().unwrap()));
        assert!(seen.insert(b.generate().unwrap()));
    }
    assert_eq!(seen.len(), 200);
}

#[test]
fn counter_is_unique_across_threads() {
    let threads = num_cpus::get().clamp(2, 8);
    let per_thread = usize::from(MAX_DISCRIMINATOR) / threads;
    let generator = Generator::new(MockTime { secs: BASE_SECS }, MonotonicCounter::new());

    let all: Vec<Vec<Identifier>> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    let mut ids = Vec::with_capacity(per_thread);
                    for _ in 0..per_thread {
                        ids.push(generator.generate().unwrap());
                    }
                    ids
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut seen = HashSet::new();
    for ids in &all {
        // Each thread observes a strictly increasing sequence.
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for id in ids {
            assert!(seen.insert(*id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), threads * per_thread);

    // The counter is gap-free: exactly 0..n were issued.
    let mut discriminators: Vec<u16> = seen.iter().map(Identifier::discriminator).collect();
    discriminators.sort_unstable();
    assert!(
        discriminators
            .iter()
            .enumerate()
            .all(|(i, &d)| usize::from(d) == i)
    );
}

#[test]
fn counter_exhaustion_across_threads_issues_each_value_once() {
    let threads = num_cpus::get().clamp(2, 8);
    let generator = Generator::new(MockTime { secs: BASE_SECS }, MonotonicCounter::new());

    let results: Vec<(usize, usize)> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    let (mut ok, mut overflow) = (0, 0);
                    for _ in 0..4096 {
                        match generator.generate() {
                            Ok(_) => ok += 1,
                            Err(Error::DiscriminatorOverflow { .. }) => overflow += 1,
                            Err(e) => panic!("unexpected error: {e}"),
                        }
                    }
                    (ok, overflow)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let ok: usize = results.iter().map(|r| r.0).sum();
    let overflow: usize = results.iter().map(|r| r.1).sum();
    let requested = threads * 4096;
    assert_eq!(ok, requested.min(usize::from(MAX_DISCRIMINATOR) + 1));
    assert_eq!(ok + overflow, requested);
}

#[test]
fn global_counter_generator_produces_ids() {
    let generator = Generator::global_counter();
    let id = generator.generate().unwrap();
    assert!(id.days() > 1461);
}

#[test]
fn from_strategy_selects_source() {
    let counter = Generator::from_strategy("counter".parse().unwrap());
    assert!(matches!(counter.source(), AnySource::Counter(_)));
    let a = counter.generate().unwrap();
    let b = counter.generate().unwrap();
    assert!(a < b);

    let random = Generator::from_strategy(Strategy::Random);
    assert!(matches!(random.source(), AnySource::Random(_)));
    assert!(random.generate().is_ok());

    assert!(Generator::random().generate().is_ok());
}
