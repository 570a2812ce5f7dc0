//! Random n-bit prime generation

use crate::primality::is_probable_prime;
use crate::{DsaConfig, Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::RngCore;
use tracing::{debug, instrument};

/// Sample a random integer of exactly `bits` bits.
///
/// Draws uniformly from `[2^(bits-1) + 1, 2^bits - 1)`, so neither the
/// smallest n-bit value nor the all-ones value is ever produced.
pub fn random_n_bit_integer<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> Result<BigUint> {
    if bits < 3 {
        return Err(Error::InvalidArgument(format!(
            "no {}-bit integers lie strictly between the endpoints",
            bits
        )));
    }

    let low = (BigUint::one() << (bits - 1)) + 1u32;
    let high = (BigUint::one() << bits) - 1u32;
    Ok(rng.gen_biguint_range(&low, &high))
}

/// Find a random `bits`-bit probable prime.
///
/// Keeps sampling until a candidate passes [`is_probable_prime`] with
/// `config.witness_count` witnesses, or until `config.max_attempts`
/// candidates have been rejected.
#[instrument(skip(config, rng))]
pub fn get_prime<R: RngCore + ?Sized>(
    bits: usize,
    config: &DsaConfig,
    rng: &mut R,
) -> Result<BigUint> {
    let mut budget = config.budget("prime search");

    loop {
        budget.spend()?;
        let candidate = random_n_bit_integer(bits, rng)?;
        if is_probable_prime(&candidate, config.witness_count, rng) {
            debug!(bits, attempts = budget.used(), "Found prime");
            return Ok(candidate);
        }
    }
}
