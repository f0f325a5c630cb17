//! Random sources feeding every randomized decision in a match.
//!
//! The engine never owns a generator. Callers create one stream per run and
//! pass it down as `&mut R` to every operation that draws, so there is no
//! hidden shared state and a seeded run replays exactly.

use std::time::{SystemTime, UNIX_EPOCH};

/// Stream of uniformly distributed random values.
///
/// Implementors only supply [`RandomSource::next_u32`]; the derived draws
/// are built on top of it.
pub trait RandomSource {
    /// Generate the next uniformly distributed u32.
    fn next_u32(&mut self) -> u32;

    /// Uniform real in `[0, 1)` with 53 bits of precision.
    fn next_unit(&mut self) -> f64 {
        let hi = u64::from(self.next_u32() >> 5);
        let lo = u64::from(self.next_u32() >> 6);
        ((hi << 26) | lo) as f64 / (1u64 << 53) as f64
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max.abs_diff(min)) + 1;
        // Multiply-high maps the draw onto the span without modulo bias toward low values.
        let offset = (u64::from(self.next_u32()) * span) >> 32;
        (i64::from(min) + offset as i64) as i32
    }

    /// Uniform real in `[min, max)`.
    fn range_unit(&mut self, min: f64, max: f64) -> f64 {
        let value = min + (max - min) * self.next_unit();
        // Rounding can land exactly on `max`; keep the interval half-open.
        if value >= max { below(max) } else { value }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Largest f64 strictly below a positive finite `value`.
fn below(value: f64) -> f64 {
    f64::from_bits(value.to_bits() - 1)
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same stream
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a reproducible stream from a seed.
    pub const fn seeded(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Create a stream seeded from the wall clock, so successive runs differ.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let seed = nanos ^ u64::from(std::process::id()).rotate_left(32);
        tracing::debug!(seed, "seeded generator from entropy");
        Self::seeded(seed)
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    const fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    const fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// SplitMix64 finaliser, so nearby seeds start far apart in the stream.
pub const fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}

/// Replays a fixed cycle of unit values.
///
/// Each draw consumes one entry: [`RandomSource::next_unit`] returns it as is
/// and [`RandomSource::next_u32`] scales it to the full u32 range. Useful for
/// forcing specific shot outcomes, ties, or stamina rolls.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a source cycling through `values`. Each value must lie in `[0, 1)`.
    ///
    /// An empty script behaves like a constant zero stream.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn advance(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, below(1.0))
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.advance() * 4_294_967_296.0) as u32
    }

    fn next_unit(&mut self) -> f64 {
        self.advance()
    }
}
