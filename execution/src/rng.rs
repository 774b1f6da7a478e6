//! Seeded 32-bit generators used by the draw engine.
//!
//! Each generator is a pure step function over a `u32` state wrapped in a small
//! stateful type. No generator reads external entropy: two instances built from the
//! same [`Seed`] produce identical sequences.

use ecos_types::Seed;
use rand::RngCore;

/// `2^32` as a float, the divisor mapping a `u32` output into `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

const MULBERRY32_INCREMENT: u32 = 0x6D2B_79F5;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// One mulberry32 step: returns `(next_state, output)`.
pub fn mulberry32_step(state: u32) -> (u32, u32) {
    let next = state.wrapping_add(MULBERRY32_INCREMENT);
    let mut t = next;
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    (next, t ^ (t >> 14))
}

/// One linear-congruential step: returns `(next_state, output)`.
///
/// The output is the new state itself.
pub fn lcg_step(state: u32) -> (u32, u32) {
    let next = state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
    (next, next)
}

/// Maps a raw 32-bit output into `[0, 1)`.
pub fn to_fraction(output: u32) -> f64 {
    f64::from(output) / TWO_POW_32
}

/// Fraction view over any [`RngCore`]. One draw step consumes one `next_u32`.
pub trait DrawRng: RngCore {
    /// Advances the state and returns a value in `[0, 1)`.
    fn next_fraction(&mut self) -> f64 {
        to_fraction(self.next_u32())
    }
}

impl<R: RngCore + ?Sized> DrawRng for R {}

/// mulberry32 generator. Preferred for new work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: Seed) -> Self {
        Self { state: seed.0 }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        let (next, output) = mulberry32_step(self.state);
        self.state = next;
        output
    }
}

/// Linear-congruential generator kept for legacy seeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: Seed) -> Self {
        Self { state: seed.0 }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        let (next, output) = lcg_step(self.state);
        self.state = next;
        output
    }
}

/// Generator family selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    #[default]
    Mulberry32,
    Lcg,
}

impl GeneratorKind {
    pub fn build(self, seed: Seed) -> Generator {
        match self {
            GeneratorKind::Mulberry32 => Generator::Mulberry32(Mulberry32::new(seed)),
            GeneratorKind::Lcg => Generator::Lcg(Lcg::new(seed)),
        }
    }
}

/// A generator chosen at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generator {
    Mulberry32(Mulberry32),
    Lcg(Lcg),
}

impl Generator {
    fn step(&mut self) -> u32 {
        match self {
            Generator::Mulberry32(rng) => rng.step(),
            Generator::Lcg(rng) => rng.step(),
        }
    }
}

// Wider outputs are built from successive 32-bit steps, high word first.
macro_rules! impl_rng_core {
    ($ty:ty) => {
        impl RngCore for $ty {
            fn next_u32(&mut self) -> u32 {
                self.step()
            }

            fn next_u64(&mut self) -> u64 {
                let high = u64::from(self.step());
                let low = u64::from(self.step());
                (high << 32) | low
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for chunk in dest.chunks_mut(4) {
                    let bytes = self.step().to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

impl_rng_core!(Mulberry32);
impl_rng_core!(Lcg);
impl_rng_core!(Generator);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn mulberry32_reference_outputs() {
        let mut rng = Mulberry32::new(Seed(0));
        let outputs: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(outputs, vec![1_144_304_738, 1_416_247, 958_946_056]);

        let mut rng = Mulberry32::new(Seed(42));
        let outputs: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(outputs, vec![2_581_720_956, 1_925_393_290, 3_661_312_704]);
    }

    #[test]
    fn mulberry32_state_advances_by_increment() {
        let (next, _) = mulberry32_step(u32::MAX);
        assert_eq!(next, MULBERRY32_INCREMENT.wrapping_sub(1));
        let mut rng = Mulberry32::new(Seed(5));
        rng.next_u32();
        assert_eq!(rng.state(), 5 + MULBERRY32_INCREMENT);
    }

    #[test]
    fn lcg_reference_outputs() {
        let mut rng = Lcg::new(Seed(0));
        let outputs: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(outputs, vec![1_013_904_223, 1_196_435_762, 3_519_870_697]);
        assert_eq!(rng.state(), 3_519_870_697);
    }

    #[test]
    fn step_functions_are_pure() {
        for state in [0, 1, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(mulberry32_step(state), mulberry32_step(state));
            assert_eq!(lcg_step(state), lcg_step(state));
        }
    }

    #[test]
    fn fraction_never_reaches_one() {
        assert_eq!(to_fraction(0), 0.0);
        assert!(to_fraction(u32::MAX) < 1.0);
    }

    #[test]
    fn generator_dispatch_matches_concrete_type() {
        let seed = Seed(0x0338_566B);
        let mut dynamic = GeneratorKind::Mulberry32.build(seed);
        let mut concrete = Mulberry32::new(seed);
        for _ in 0..16 {
            assert_eq!(dynamic.next_fraction(), concrete.next_fraction());
        }
        let mut dynamic = GeneratorKind::Lcg.build(seed);
        let mut concrete = Lcg::new(seed);
        for _ in 0..16 {
            assert_eq!(dynamic.next_u32(), concrete.next_u32());
        }
    }

    #[test]
    fn fraction_works_through_trait_object() {
        let mut boxed: Box<dyn RngCore> = Box::new(Mulberry32::new(Seed(0)));
        assert_eq!(boxed.next_fraction(), to_fraction(1_144_304_738));
    }

    #[test]
    fn rng_core_is_deterministic() {
        let mut a = Mulberry32::new(Seed(7));
        let mut b = Mulberry32::new(Seed(7));
        let mut bytes_a = [0u8; 10];
        let mut bytes_b = [0u8; 10];
        a.fill_bytes(&mut bytes_a);
        b.fill_bytes(&mut bytes_b);
        assert_eq!(bytes_a, bytes_b);
        assert_eq!(a.gen_range(1..=60u32), b.gen_range(1..=60u32));
    }
}
