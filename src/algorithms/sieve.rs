//! Incremental sieve of Eratosthenes over the odd numbers.

use alloc::vec::Vec;
use num_integer::Roots;

/// Returns the primes `<= bound` in increasing order.
///
/// The sieve advances only as far as the caller consumes it. Clone the
/// iterator to restart from its current position.
pub fn primes_up_to(bound: u32) -> Primes {
    let odd_count = if bound < 3 { 0 } else { (bound as usize - 1) / 2 };
    Primes {
        bound,
        limit: bound.sqrt(),
        composite: vec![false; odd_count],
        pos: 0,
        two_done: bound < 2,
    }
}

/// Iterator returned by [`primes_up_to`].
#[derive(Debug, Clone)]
pub struct Primes {
    bound: u32,
    /// Largest prime whose multiples still need crossing out.
    limit: u32,
    /// `composite[i]` is set once `2 * i + 3` is known to be composite.
    composite: Vec<bool>,
    pos: usize,
    two_done: bool,
}

impl Primes {
    fn cross_off(&mut self, p: u32) {
        if p > self.limit {
            return;
        }
        let step = p as usize;
        let start = (step * step - 3) / 2;
        for i in (start..self.composite.len()).step_by(step) {
            self.composite[i] = true;
        }
    }
}

impl Iterator for Primes {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if !self.two_done {
            self.two_done = true;
            return Some(2);
        }

        while self.pos < self.composite.len() {
            let pos = self.pos;
            self.pos += 1;
            if !self.composite[pos] {
                let p = 2 * pos as u32 + 3;
                debug_assert!(p <= self.bound);
                self.cross_off(p);
                return Some(p);
            }
        }

        None
    }
}

impl core::iter::FusedIterator for Primes {}
