//! Seeded pseudo-random source.
//!
//! [`Mulberry32`] is a 32-bit state generator whose mixing steps are simple
//! enough to port verbatim to other languages, which keeps fixtures
//! comparable byte-for-byte across reimplementations. It implements
//! [`rand::RngCore`] and [`rand::SeedableRng`] so it can be used wherever a
//! rand generator is expected.
//!
//! All synthesizer draws go through [`UnitSource::next_unit`], which maps
//! exactly one `u32` output to a float in `[0, 1)`. Do not use `rng.gen::<f64>()`
//! here: it consumes two outputs and would shift every later draw.

use rand::{Error, RngCore, SeedableRng};

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 pseudo-random generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits instead of expanding the seed, so a
    /// numeric seed maps to the same stream as `Mulberry32::new`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// A source of uniform floats in `[0, 1)`, one generator output per draw.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UnitSource for R {
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// Integer in `[min, max]` from one draw: `floor(draw * (max - min + 1)) + min`.
pub fn rand_int<S: UnitSource + ?Sized>(source: &mut S, min: u64, max: u64) -> u64 {
    let span = (max - min + 1) as f64;
    (source.next_unit() * span).floor() as u64 + min
}

/// Float in `[min, max)` from one draw: `draw * (max - min) + min`.
pub fn rand_float<S: UnitSource + ?Sized>(source: &mut S, min: f64, max: f64) -> f64 {
    source.next_unit() * (max - min) + min
}
