// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Seeded pseudo-random numbers for design choices
//!
//! Posters are reproducible: the same seed and input produce the same image.
//! Layout itself never consumes randomness; only the choice of palette
//! colours, shapes, base font size and rotation does.

use easy_cast::Cast;

/// A xorshift64 generator
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Construct from a seed
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = match seed.wrapping_add(1) {
            0 => 0x9E37_79B9_7F4A_7C15,
            s => s,
        };
        Rng { state }
    }

    /// Next raw value
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform value in `lo..=hi`
    ///
    /// If `hi < lo`, returns `lo`.
    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = u64::from(hi - lo) + 1;
        // span ≤ 2^32, thus the remainder fits in u32
        let offset: u32 = (self.next_u64() % span).cast();
        lo + offset
    }

    /// Uniform value in `lo..=hi` for signed integers
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span: u64 = (i64::from(hi) - i64::from(lo) + 1).cast();
        let offset: i64 = (self.next_u64() % span).cast();
        (i64::from(lo) + offset).cast()
    }

    /// Choose an element of `items`
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last: u32 = (items.len() - 1).cast();
        let i: usize = self.range(0, last).cast();
        items.get(i)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        assert_ne!(Rng::new(7).next_u64(), Rng::new(8).next_u64());
    }

    #[test]
    fn max_seed_is_usable() {
        let mut rng = Rng::new(u64::MAX);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn ranges_are_inclusive() {
        let mut rng = Rng::new(1);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let v = rng.range(10, 13);
            assert!((10..=13).contains(&v));
            seen[(v - 10) as usize] = true;

            let s = rng.range_i32(-5, 5);
            assert!((-5..=5).contains(&s));
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(rng.range(9, 3), 9);
    }

    #[test]
    fn full_ranges() {
        let mut rng = Rng::new(11);
        for _ in 0..100 {
            let _ = rng.range(0, u32::MAX);
            let _ = rng.range_i32(i32::MIN, i32::MAX);
        }
        assert_eq!(rng.range_i32(i32::MAX, i32::MAX), i32::MAX);
    }

    #[test]
    fn choose() {
        let mut rng = Rng::new(3);
        assert_eq!(rng.choose::<u8>(&[]), None);
        assert_eq!(rng.choose(&[42]), Some(&42));
    }
}
