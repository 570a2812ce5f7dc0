//! Miller-Rabin probabilistic primality test

use crate::arith::fast_mod_exp;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::RngCore;

/// Primes used for trial division before any witness is drawn
pub const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Test `n` for primality with `witness_count` random Miller-Rabin bases.
///
/// Composites are rejected with probability at least
/// `1 - 4^(-witness_count)`; primes are always accepted. Any `n` divisible by
/// one of [`SMALL_PRIMES`] is decided exactly without consuming randomness.
pub fn is_probable_prime<R: RngCore + ?Sized>(
    n: &BigUint,
    witness_count: usize,
    rng: &mut R,
) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if (n % &p).is_zero() {
            return *n == p;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let two = BigUint::from(2u32);
    for _ in 0..witness_count {
        let a = rng.gen_biguint_range(&two, n);
        if !witness_passes(&a, &d, s, n, &n_minus_one) {
            return false;
        }
    }

    true
}

/// One Miller-Rabin round: true if `a` fails to prove `n` composite
fn witness_passes(a: &BigUint, d: &BigUint, s: u64, n: &BigUint, n_minus_one: &BigUint) -> bool {
    let mut x = fast_mod_exp(a, d, n);
    if x.is_one() || x == *n_minus_one {
        return true;
    }

    for _ in 1..s {
        x = (&x * &x) % n;
        if x == *n_minus_one {
            return true;
        }
    }

    false
}

/// Convenience for machine-word inputs
pub fn is_probable_prime_u64<R: RngCore + ?Sized>(
    n: u64,
    witness_count: usize,
    rng: &mut R,
) -> bool {
    is_probable_prime(&BigUint::from(n), witness_count, rng)
}
