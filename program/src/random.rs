// Live Draw Engine - Randomness
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use solana_program::{keccak, msg};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniformly distributed 32-bit words.
///
/// `next_int` reduces a word with a plain modulo. When `max_exclusive` does
/// not divide 2^32 the low values are very slightly favoured; for raffles
/// drawn at human scale this is accepted. Bounds above `u32::MAX` only ever
/// yield indices below 2^32.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random integer in `[0, max_exclusive)`, or 0 when `max_exclusive` is 0
    fn next_int(&mut self, max_exclusive: usize) -> usize {
        reduce(self.next_u32(), max_exclusive)
    }
}

/// Reduce a random word into `[0, max_exclusive)`
pub fn reduce(value: u32, max_exclusive: usize) -> usize {
    if max_exclusive == 0 {
        return 0;
    }
    value as usize % max_exclusive
}

/// Operating system CSPRNG, with a silent switch to a seeded
/// pseudo-random generator when the OS source cannot be read.
pub struct SystemRandom {
    fallback: Option<SmallRng>,
}

impl SystemRandom {
    pub fn new() -> Self {
        let mut probe = [0u8; 4];
        match OsRng.try_fill_bytes(&mut probe) {
            Ok(()) => Self { fallback: None },
            Err(e) => {
                msg!("Secure random source unavailable ({}), using fallback generator", e);
                Self::fallback()
            }
        }
    }

    /// Non-cryptographic mode, seeded from the wall clock
    pub fn fallback() -> Self {
        Self {
            fallback: Some(clock_seeded_rng()),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.fallback.is_none()
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_u32(&mut self) -> u32 {
        if let Some(rng) = self.fallback.as_mut() {
            return rng.next_u32();
        }

        let mut bytes = [0u8; 4];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => u32::from_le_bytes(bytes),
            Err(e) => {
                msg!("Secure random source failed ({}), switching to fallback generator", e);
                self.fallback.insert(clock_seeded_rng()).next_u32()
            }
        }
    }
}

fn clock_seeded_rng() -> SmallRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    SmallRng::seed_from_u64(nanos)
}

/// Deterministic source that expands a 32-byte seed with keccak in
/// counter mode. The same seed always replays the same draw.
pub struct SeededRandom {
    seed: [u8; 32],
    counter: u64,
    block: [u8; 32],
    offset: usize,
}

impl SeededRandom {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            counter: 0,
            block: [0u8; 32],
            offset: 32,
        }
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    fn refill(&mut self) {
        self.block = keccak::hashv(&[&self.seed[..], &self.counter.to_le_bytes()[..]]).to_bytes();
        self.counter = self.counter.wrapping_add(1);
        self.offset = 0;
    }
}

impl RandomSource for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        if self.offset + 4 > self.block.len() {
            self.refill();
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.block[self.offset..self.offset + 4]);
        self.offset += 4;
        u32::from_le_bytes(word)
    }
}

/// Always yields the same word. Test stub.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
}

/// Replays a list of words in a loop. Test stub; an empty script yields 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    words: Vec<u32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(words: Vec<u32>) -> Self {
        Self { words, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u32(&mut self) -> u32 {
        if self.words.is_empty() {
            return 0;
        }
        let word = self.words[self.cursor % self.words.len()];
        self.cursor += 1;
        word
    }
}
