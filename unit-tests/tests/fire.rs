//! Fire effect simulation.

use fastrand::Rng;
use fire_composer::{EffectImpl, FireConfig, FireEffect, Rgb};

const BLACK: Rgb = Rgb::new(0, 0, 0);

fn render<const N: usize>(effect: &mut FireEffect<N>) -> [Rgb; N] {
    let mut frame = [BLACK; N];
    effect.render(&mut frame);
    frame
}

/// Sparks always fire, land only in the last cell and nothing cools
fn single_spark(reversed: bool, mirrored: bool) -> FireConfig {
    FireConfig {
        cooling: 0,
        sparking: 255,
        sparks: 1,
        spark_height: 1,
        reversed,
        mirrored,
    }
}

// -----------------------------------------------------------------------------
// Geometry
// -----------------------------------------------------------------------------

#[test]
fn mirrored_fire_simulates_half_the_strip() {
    let config = FireConfig::default();
    assert_eq!(FireEffect::<20>::new(config, 1).size(), 10);
    assert_eq!(FireEffect::<21>::new(config, 1).size(), 10);
    assert_eq!(FireEffect::<20>::new(FireConfig { mirrored: false, ..config }, 1).size(), 20);
}

#[test]
fn heat_starts_cold() {
    let fire = FireEffect::<20>::new(FireConfig::default(), 1);
    assert!(fire.heat().iter().all(|&h| h == 0));
}

#[test]
fn reversed_mirrored_kernel_sits_at_both_ends() {
    let mut fire = FireEffect::<8>::new(single_spark(true, true), 7);
    let frame = render(&mut fire);

    assert_ne!(frame[0], BLACK);
    assert_ne!(frame[7], BLACK);
    assert!(frame[1..7].iter().all(|&p| p == BLACK));
}

#[test]
fn plain_kernel_sits_at_the_end() {
    let mut fire = FireEffect::<8>::new(single_spark(false, false), 7);
    let frame = render(&mut fire);

    assert_ne!(frame[7], BLACK);
    assert!(frame[..7].iter().all(|&p| p == BLACK));
}

#[test]
fn mirrored_frames_are_symmetric() {
    for reversed in [true, false] {
        let config = FireConfig {
            reversed,
            ..FireConfig::default()
        };
        let mut fire = FireEffect::<20>::new(config, 42);
        for _ in 0..100 {
            let frame = render(&mut fire);
            for i in 0..10 {
                assert_eq!(frame[i], frame[19 - i], "reversed={reversed} i={i}");
            }
        }
    }
}

#[test]
fn odd_strip_leaves_last_led_dark() {
    let mut fire = FireEffect::<21>::new(FireConfig::default(), 3);
    for _ in 0..50 {
        assert_eq!(render(&mut fire)[20], BLACK);
    }
}

#[test]
fn empty_simulation_renders_nothing() {
    let mut fire = FireEffect::<1>::new(FireConfig::default(), 3);
    assert_eq!(fire.size(), 0);
    assert_eq!(render(&mut fire), [BLACK]);
}

// -----------------------------------------------------------------------------
// Sparks
// -----------------------------------------------------------------------------

#[test]
fn spark_adds_at_least_160_heat_to_a_cold_kernel() {
    let mut fire = FireEffect::<10>::new(single_spark(true, false), 11);
    render(&mut fire);

    let heat = fire.heat();
    assert!(heat[9] >= 160);
    assert!(heat[..9].iter().all(|&h| h == 0));
}

#[test]
fn zero_spark_height_behaves_like_one() {
    let config = FireConfig {
        spark_height: 0,
        ..single_spark(true, false)
    };
    let mut fire = FireEffect::<10>::new(config, 11);
    render(&mut fire);

    assert!(fire.heat()[9] >= 160);
}

#[test]
fn spark_height_beyond_the_strip_stays_inside() {
    let config = FireConfig {
        spark_height: 255,
        sparks: 20,
        ..single_spark(true, false)
    };
    let mut fire = FireEffect::<4>::new(config, 5);
    for _ in 0..100 {
        render(&mut fire);
    }
}

#[test]
fn no_sparking_stays_dark() {
    let config = FireConfig {
        sparking: 0,
        ..FireConfig::default()
    };
    let mut fire = FireEffect::<20>::new(config, 9);
    for _ in 0..50 {
        assert_eq!(render(&mut fire), [BLACK; 20]);
    }
}

// -----------------------------------------------------------------------------
// Heat arithmetic
// -----------------------------------------------------------------------------

/// Straightforward model of one frame: cool, drift in place, ignite
struct ReferenceFire {
    config: FireConfig,
    heat: Vec<u8>,
    rng: Rng,
}

impl ReferenceFire {
    fn new(config: FireConfig, cells: usize, seed: u64) -> Self {
        Self {
            config,
            heat: vec![0; cells],
            rng: Rng::with_seed(seed),
        }
    }

    fn step(&mut self) {
        let size = self.heat.len();

        let bound = usize::from(self.config.cooling) * 10 / size + 2;
        for cell in &mut self.heat {
            let amount = self.rng.usize(0..bound).min(255) as u8;
            *cell = cell.saturating_sub(amount);
        }

        for i in 0..size {
            let h = |k: usize| u16::from(self.heat[(i + k) % size]);
            self.heat[i] = ((h(0) * 2 + h(1) * 3 + h(2) * 2 + h(3)) / 8) as u8;
        }

        let height = usize::from(self.config.spark_height).clamp(1, size);
        for _ in 0..self.config.sparks {
            if self.rng.u8(0..255) < self.config.sparking {
                let y = size - 1 - self.rng.usize(0..height);
                self.heat[y] = self.heat[y].wrapping_add(self.rng.u8(160..255));
            }
        }
    }
}

#[test]
fn drift_blends_in_place_and_wraps_around() {
    const SEED: u64 = 21;
    let mut fire = FireEffect::<4>::new(single_spark(false, false), SEED);

    // Replay the generator: four cooling draws below 0 * 10 / 4 + 2, then
    // the spark roll, its cell and its heat.
    let mut rng = Rng::with_seed(SEED);
    let frame = |rng: &mut Rng| {
        let cooling: Vec<u16> = (0..4).map(|_| rng.usize(0..2) as u16).collect();
        rng.u8(0..255);
        rng.usize(0..1);
        (cooling, rng.u8(160..255))
    };

    let (_, spark) = frame(&mut rng);
    render(&mut fire);
    assert_eq!(fire.heat(), [0, 0, 0, spark]);

    let (cooling, next_spark) = frame(&mut rng);
    render(&mut fire);

    let hot = u16::from(spark) - cooling[3];
    // Cell 0 reaches three cells ahead to the hot cell; every later cell
    // wraps onto cells already blended this frame.
    let c0 = hot / 8;
    let c1 = (hot * 2 + c0) / 8;
    let c2 = (hot * 3 + c0 * 2 + c1) / 8;
    let c3 = (hot * 2 + c0 * 3 + c1 * 2 + c2) / 8;
    assert_eq!(
        fire.heat(),
        [c0 as u8, c1 as u8, c2 as u8, (c3 as u8).wrapping_add(next_spark)]
    );
}

#[test]
fn frames_match_the_reference_arithmetic() {
    let configs = [
        (FireConfig::default(), 1),
        (
            FireConfig {
                cooling: 30,
                sparking: 100,
                sparks: 3,
                spark_height: 2,
                reversed: true,
                mirrored: true,
            },
            2,
        ),
        (
            FireConfig {
                cooling: 200,
                sparking: 220,
                sparks: 6,
                spark_height: 5,
                reversed: false,
                mirrored: false,
            },
            3,
        ),
    ];

    for (config, seed) in configs {
        let mut fire = FireEffect::<20>::new(config, seed);
        let mut reference = ReferenceFire::new(config, fire.size(), seed);
        for n in 0..500 {
            render(&mut fire);
            reference.step();
            assert_eq!(fire.heat(), reference.heat.as_slice(), "seed={seed} frame={n}");
        }
    }
}

#[test]
fn cooling_drop_stays_under_its_bound() {
    // A single cell blends only with itself, so between sparks its heat
    // changes by cooling alone: below 10 * 10 / 1 + 2 per frame.
    const SEED: u64 = 8;
    const BOUND: u8 = 102;
    let config = FireConfig {
        cooling: 10,
        sparking: 128,
        sparks: 1,
        spark_height: 1,
        reversed: false,
        mirrored: false,
    };
    let mut fire = FireEffect::<1>::new(config, SEED);
    let mut rng = Rng::with_seed(SEED);

    let mut largest = 0;
    let mut previous = 0u8;
    for _ in 0..2000 {
        rng.usize(0..usize::from(BOUND));
        let sparked = rng.u8(0..255) < config.sparking;
        if sparked {
            rng.usize(0..1);
            rng.u8(160..255);
        }

        render(&mut fire);
        let current = fire.heat()[0];
        if !sparked && previous >= BOUND {
            let drop = previous - current;
            assert!(drop < BOUND, "dropped {drop}");
            largest = largest.max(drop);
        }
        previous = current;
    }
    assert!(largest >= 90, "largest drop {largest}");
}

// -----------------------------------------------------------------------------
// Determinism
// -----------------------------------------------------------------------------

#[test]
fn same_seed_same_frames() {
    let mut a = FireEffect::<20>::new(FireConfig::default(), 1234);
    let mut b = FireEffect::<20>::new(FireConfig::default(), 1234);
    for _ in 0..200 {
        assert_eq!(render(&mut a), render(&mut b));
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = FireEffect::<20>::new(FireConfig::default(), 1);
    let mut b = FireEffect::<20>::new(FireConfig::default(), 2);
    let diverged = (0..200).any(|_| render(&mut a) != render(&mut b));
    assert!(diverged);
}

#[test]
fn reset_restarts_the_sequence() {
    let mut fire = FireEffect::<20>::new(FireConfig::default(), 77);
    let first: Vec<_> = (0..30).map(|_| render(&mut fire)).collect();

    fire.reset();
    assert!(fire.heat().iter().all(|&h| h == 0));
    let again: Vec<_> = (0..30).map(|_| render(&mut fire)).collect();

    assert_eq!(first, again);
}
