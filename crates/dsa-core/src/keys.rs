//! Key pair generation

use crate::arith::fast_mod_exp;
use crate::{DomainParameters, Error, KeyPair, PrivateKey, PublicKey, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};

/// Sample a uniform integer in [1, upper - 1]
pub(crate) fn random_nonzero_below<R: RngCore + ?Sized>(
    upper: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    let one = BigUint::one();
    if *upper <= one {
        return Err(Error::InvalidArgument(format!("[1, {upper}) is empty")));
    }
    Ok(rng.gen_biguint_range(&one, upper))
}

/// Derive a key pair: x uniform in [1, Q-1], y = G^x mod P.
///
/// Fails with [`Error::InvalidParameters`] when P or Q is below 2.
#[instrument(skip_all)]
pub fn generate_key_pair<R: RngCore + CryptoRng + ?Sized>(
    params: &DomainParameters,
    rng: &mut R,
) -> Result<KeyPair> {
    params.ensure_usable_moduli()?;

    let x = random_nonzero_below(&params.q, rng)?;
    let y = fast_mod_exp(&params.g, &x, &params.p);

    debug!(y_bits = y.bits(), "Key pair generated");

    Ok(KeyPair {
        private: PrivateKey::new(x),
        public: PublicKey::new(y),
    })
}
