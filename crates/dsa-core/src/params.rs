//! Domain parameter generation
//!
//! Builds (P, Q, G) where Q is an N-bit prime, P = k*Q + 1 is an L-bit prime
//! and G generates the unique subgroup of order Q in (Z/PZ)*.

use crate::arith::fast_mod_exp;
use crate::primality::is_probable_prime;
use crate::prime::get_prime;
use crate::{DomainParameters, DsaConfig, Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use tracing::{debug, info, instrument};

/// Generate the prime pair (P, Q) with Q | P - 1.
///
/// Q is a random `n_bits`-bit prime. P is found by walking
/// `Q * 2^(L-N) + 1, + Q, + 2Q, ...` until a probable prime turns up.
#[instrument(skip(config, rng))]
pub fn generate_pq<R: RngCore + ?Sized>(
    l_bits: usize,
    n_bits: usize,
    config: &DsaConfig,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    if l_bits <= n_bits {
        return Err(Error::InvalidArgument(format!(
            "L ({}) must exceed N ({})",
            l_bits, n_bits
        )));
    }

    let q = get_prime(n_bits, config, rng)?;
    debug!(q_bits = q.bits(), "Q selected, searching for P");

    let mut budget = config.budget("P search");
    let mut p_minus_one = &q << (l_bits - n_bits);
    loop {
        budget.spend()?;
        let candidate = &p_minus_one + 1u32;
        if is_probable_prime(&candidate, config.witness_count, rng) {
            debug!(p_bits = candidate.bits(), attempts = budget.used(), "P selected");
            return Ok((candidate, q));
        }
        p_minus_one += &q;
    }
}

/// Find a generator of the order-Q subgroup mod P.
///
/// Samples h in [2, P-2] and returns the first h^((P-1)/Q) mod P that is
/// not 1.
#[instrument(skip_all)]
pub fn generate_g<R: RngCore + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    config: &DsaConfig,
    rng: &mut R,
) -> Result<BigUint> {
    if *p < BigUint::from(5u32) {
        return Err(Error::InvalidParameters("P must be at least 5".into()));
    }
    let p_minus_one = p - 1u32;
    if q.is_zero() || !p_minus_one.is_multiple_of(q) {
        return Err(Error::InvalidParameters("Q does not divide P - 1".into()));
    }

    let exponent = &p_minus_one / q;
    let low = BigUint::from(2u32);
    let mut budget = config.budget("G search");
    loop {
        budget.spend()?;
        let h = rng.gen_biguint_range(&low, &p_minus_one);
        let g = fast_mod_exp(&h, &exponent, p);
        if !g.is_one() {
            debug!(attempts = budget.used(), "G selected");
            return Ok(g);
        }
    }
}

/// Generate a full set of domain parameters for `config.l_bits` / `config.n_bits`
#[instrument(skip_all, fields(l_bits = config.l_bits, n_bits = config.n_bits))]
pub fn generate_domain_parameters<R: RngCore + ?Sized>(
    config: &DsaConfig,
    rng: &mut R,
) -> Result<DomainParameters> {
    config.validate()?;
    info!("Generating domain parameters");

    let (p, q) = generate_pq(config.l_bits, config.n_bits, config, rng)?;
    let g = generate_g(&p, &q, config, rng)?;

    info!(p_bits = p.bits(), q_bits = q.bits(), "Domain parameters generated");

    Ok(DomainParameters::new(p, q, g))
}
