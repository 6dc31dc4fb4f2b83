//! Fill color sources for item cells.
//!
//! Item fills are re-rolled on every paint. The renderer pulls them from a
//! [`ColorSource`] so tests and reproducible output can swap in a
//! deterministic sequence.

use rand::rngs::ThreadRng;
use rand::Rng;
use visualcoin_core::Color;

/// Anything that can hand out fill colors one at a time.
pub trait ColorSource {
    /// Next fill color.
    fn next_color(&mut self) -> Color;
}

impl<F> ColorSource for F
where
    F: FnMut() -> Color,
{
    fn next_color(&mut self) -> Color {
        self()
    }
}

/// Uniformly random opaque 24-bit colors.
#[derive(Debug, Clone)]
pub struct RandomColors<R = ThreadRng> {
    rng: R,
}

impl RandomColors {
    /// Colors drawn from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomColors<R> {
    /// Colors drawn from a caller-supplied RNG.
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        Color::from_rgb24(self.rng.gen_range(0..=0x00FF_FFFF))
    }
}

/// Deterministic colors from a xorshift64 sequence.
///
/// ```
/// use visualcoin_render::{ColorSource, SeededColors};
///
/// let mut a = SeededColors::new(42);
/// let mut b = SeededColors::new(42);
/// assert_eq!(a.next_color(), b.next_color());
/// ```
#[derive(Debug, Clone)]
pub struct SeededColors {
    state: u64,
}

impl SeededColors {
    /// Default seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 42;

    /// Create a sequence from `seed`. A zero seed is replaced with 1.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl Default for SeededColors {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl ColorSource for SeededColors {
    fn next_color(&mut self) -> Color {
        // top 24 bits
        Color::from_rgb24((self.next_u64() >> 40) as u32)
    }
}

/// The same color every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedColor(pub Color);

impl ColorSource for FixedColor {
    fn next_color(&mut self) -> Color {
        self.0
    }
}
