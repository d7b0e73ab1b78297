//! Injected randomness for the decision layer.
//!
//! Every die the engine rolls goes through the [`Dice`] trait, so a battle
//! can be replayed exactly by replaying the dice. The trait is object-safe
//! and consumed as `&mut dyn Dice`; implementations draw from whatever
//! entropy the embedder wants (a seeded generator, a table, a human cup).

/// A sequential source of random numbers.
///
/// Implementations must be deterministic for a given starting state: the
/// same dice fed the same requests produce the same values.
pub trait Dice: Send {
    /// Roll a die with `sides` faces (1..=sides inclusive).
    fn roll(&mut self, sides: u32) -> u32;

    /// Uniform value in `[min, max]` inclusive. Degenerate ranges return
    /// `min`.
    fn random_int(&mut self, min: u32, max: u32) -> u32;
}

/// Fisher-Yates shuffle driven by injected dice.
pub fn shuffle<T>(dice: &mut dyn Dice, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = dice.random_int(0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// Picks one element uniformly at random. A lone element comes back without
/// touching the dice, so scripted sequences only pay for real choices.
pub fn choose<'a, T>(dice: &mut dyn Dice, items: &'a [T]) -> Option<&'a T> {
    match items.len() {
        0 => None,
        1 => items.first(),
        n => items.get(dice.random_int(0, n as u32 - 1) as usize),
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state permuted down to 32-bit output. Small, fast,
/// and statistically solid, which is all a dice cup needs.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        Self {
            state: Self::step(seed.wrapping_add(Self::INCREMENT)),
        }
    }

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then rotate by the top
    /// bits of the state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

impl Default for PcgDice {
    fn default() -> Self {
        // Canonical pcg32 demo seed.
        Self::seeded(0x853c49e6748fea9b)
    }
}

impl Dice for PcgDice {
    fn roll(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32() % span)
    }
}

/// Dice that replay a scripted sequence, then fall back to a seeded PCG.
///
/// Useful for steering branch-heavy decisions in tests: each scripted value
/// is clamped into the requested range so a script of raw die faces stays
/// valid wherever it is consumed.
#[derive(Clone, Debug)]
pub struct SequenceDice {
    scripted: std::collections::VecDeque<u32>,
    fallback: PcgDice,
}

impl SequenceDice {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            scripted: values.into_iter().collect(),
            fallback: PcgDice::seeded(0),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.scripted.len()
    }
}

impl Dice for SequenceDice {
    fn roll(&mut self, sides: u32) -> u32 {
        match self.scripted.pop_front() {
            Some(v) => v.clamp(1, sides.max(1)),
            None => self.fallback.roll(sides),
        }
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        match self.scripted.pop_front() {
            Some(v) => v.clamp(min, max.max(min)),
            None => self.fallback.random_int(min, max),
        }
    }
}
