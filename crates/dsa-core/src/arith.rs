//! Modular arithmetic primitives
//!
//! Extended Euclid, modular inverse and square-and-multiply exponentiation
//! over arbitrary-precision integers.

use crate::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Extended Euclidean algorithm.
///
/// Returns `(gcd, x, y)` with `a*x + b*y == gcd`. The coefficients are the
/// ones produced by the recursive formulation
/// `g(0, b) = (b, 0, 1)`, `g(a, b) = (g, y - (b / a) * x, x)` where
/// `(g, x, y) = g(b mod a, a)`, computed without recursion so large operands
/// cannot exhaust the stack.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let mut a = a.clone();
    let mut b = b.clone();

    // Descend, remembering each quotient for back-substitution
    let mut quotients = Vec::new();
    while !a.is_zero() {
        let (quotient, remainder) = b.div_rem(&a);
        quotients.push(BigInt::from(quotient));
        b = a;
        a = remainder;
    }

    let mut x = BigInt::zero();
    let mut y = BigInt::one();
    for quotient in quotients.iter().rev() {
        let next_x = &y - quotient * &x;
        y = x;
        x = next_x;
    }

    (b, x, y)
}

/// Modular multiplicative inverse of `a` modulo `n`.
///
/// The result lies in `[0, n)`, so `n == 1` yields 0. Fails with
/// [`Error::NoInverse`] when `gcd(a, n) != 1` or when `n == 0`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::NoInverse {
            value: a.clone(),
            modulus: n.clone(),
        });
    }

    let (gcd, x, _) = extended_gcd(a, n);
    if !gcd.is_one() {
        return Err(Error::NoInverse {
            value: a.clone(),
            modulus: n.clone(),
        });
    }

    let modulus = BigInt::from(n.clone());
    x.mod_floor(&modulus)
        .to_biguint()
        .ok_or_else(|| Error::InvalidArgument("negative residue after reduction".into()))
}

/// Binary modular exponentiation: `base^exponent mod modulus`.
///
/// Performs one squaring per exponent bit and reduces after every
/// multiplication, so operands never exceed `modulus^2`.
///
/// # Panics
/// Panics if `modulus` is zero. Use [`try_fast_mod_exp`] for untrusted input.
pub fn fast_mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let mut result = BigUint::one() % modulus;
    let mut square = base % modulus;

    let bits = exponent.bits();
    for i in 0..bits {
        if exponent.bit(i) {
            result = (&result * &square) % modulus;
        }
        if i + 1 < bits {
            square = (&square * &square) % modulus;
        }
    }

    result
}

/// Checked variant of [`fast_mod_exp`] rejecting a zero modulus
pub fn try_fast_mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidArgument("modulus must be non-zero".into()));
    }
    Ok(fast_mod_exp(base, exponent, modulus))
}
