//! Signature generation
//!
//! Standard DSA signing: r = (G^k mod P) mod Q and
//! s = k^-1 (H(m) + x r) mod Q with a fresh ephemeral k per attempt.

use crate::arith::{fast_mod_exp, mod_inverse};
use crate::config::AttemptBudget;
use crate::hash::{message_to_integer, Sha1};
use crate::keys::random_nonzero_below;
use crate::{DomainParameters, PrivateKey, Result, Signature};
use digest::Digest;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};

/// Sign `message` with SHA-1, retrying until r and s are both non-zero
pub fn sign<R: RngCore + CryptoRng + ?Sized>(
    message: &[u8],
    params: &DomainParameters,
    private_key: &PrivateKey,
    rng: &mut R,
) -> Result<Signature> {
    sign_with_digest::<Sha1, R>(message, params, private_key, None, rng)
}

/// Sign `message` using digest `D`.
///
/// Every attempt draws an independent k from [1, Q-1]; attempts yielding
/// r = 0 or s = 0 are discarded. With `max_attempts` set, gives up with
/// [`crate::Error::SearchExhausted`] once that many k values were tried.
/// P or Q below 2 fails with [`crate::Error::InvalidParameters`].
#[instrument(skip_all, fields(message_len = message.len()))]
pub fn sign_with_digest<D: Digest, R: RngCore + CryptoRng + ?Sized>(
    message: &[u8],
    params: &DomainParameters,
    private_key: &PrivateKey,
    max_attempts: Option<u64>,
    rng: &mut R,
) -> Result<Signature> {
    params.ensure_usable_moduli()?;

    let DomainParameters { p, q, g } = params;
    let x = private_key.to_biguint();
    let m = message_to_integer::<D>(message);

    let mut budget = AttemptBudget::new("nonce search", max_attempts);
    loop {
        budget.spend()?;

        let k = random_nonzero_below(q, rng)?;
        let r = fast_mod_exp(g, &k, p) % q;
        let k_inv = mod_inverse(&k, q)?;
        let s = (k_inv * (&m + &x * &r)) % q;

        if r.is_zero() || s.is_zero() {
            debug!(attempt = budget.used(), "Degenerate signature, resampling k");
            continue;
        }

        debug!(attempts = budget.used(), "Message signed");
        return Ok(Signature::new(r, s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_key_pair;
    use crate::params::generate_domain_parameters;
    use crate::{DsaConfig, Error};
    use num_bigint::BigUint;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn toy_params() -> DomainParameters {
        DomainParameters::new(BigUint::from(23u32), BigUint::from(11u32), BigUint::from(4u32))
    }

    #[test]
    fn test_components_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(50);
        let params = toy_params();
        let pair = generate_key_pair(&params, &mut rng).unwrap();
        for i in 0..500 {
            let message = format!("message {i}");
            let sig = sign(message.as_bytes(), &params, &pair.private, &mut rng).unwrap();
            assert!(sig.is_nonzero());
            assert!(sig.r < params.q);
            assert!(sig.s < params.q);
        }
    }

    #[test]
    fn test_satisfies_signing_equation() {
        let mut rng = ChaCha20Rng::seed_from_u64(51);
        let config = DsaConfig::new(256, 64).unwrap();
        let params = generate_domain_parameters(&config, &mut rng).unwrap();
        let pair = generate_key_pair(&params, &mut rng).unwrap();
        let message = b"equation check";

        let sig = sign(message, &params, &pair.private, &mut rng).unwrap();

        // k = s^-1 (m + x r) mod Q must reproduce r
        let m = message_to_integer::<Sha1>(message);
        let x = pair.private.to_biguint();
        let k = (mod_inverse(&sig.s, &params.q).unwrap() * (&m + &x * &sig.r)) % &params.q;
        assert_eq!(fast_mod_exp(&params.g, &k, &params.p) % &params.q, sig.r);
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let mut rng = ChaCha20Rng::seed_from_u64(52);
        let config = DsaConfig::new(256, 80).unwrap();
        let params = generate_domain_parameters(&config, &mut rng).unwrap();
        let pair = generate_key_pair(&params, &mut rng).unwrap();

        let first = sign(b"same message", &params, &pair.private, &mut rng).unwrap();
        let second = sign(b"same message", &params, &pair.private, &mut rng).unwrap();
        assert_ne!(first, second);
        assert_ne!(first.r, second.r);
    }

    #[test]
    fn test_reproducible_with_seeded_rng() {
        let params = toy_params();
        let key = PrivateKey::new(BigUint::from(7u32));

        let mut a = ChaCha20Rng::seed_from_u64(53);
        let mut b = ChaCha20Rng::seed_from_u64(53);
        for _ in 0..20 {
            assert_eq!(
                sign(b"seeded", &params, &key, &mut a).unwrap(),
                sign(b"seeded", &params, &key, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_degenerate_key_exhausts_budget() {
        let mut rng = ChaCha20Rng::seed_from_u64(54);
        let params = toy_params();

        // x = Q acts as zero, so s = k^-1 m is zero whenever Q | m
        let message = (0u32..)
            .map(|i| format!("candidate {i}"))
            .find(|msg| (message_to_integer::<Sha1>(msg.as_bytes()) % &params.q).is_zero())
            .unwrap();
        let key = PrivateKey::new(params.q.clone());

        match sign_with_digest::<Sha1, _>(message.as_bytes(), &params, &key, Some(5), &mut rng) {
            Err(Error::SearchExhausted { search, attempts }) => {
                assert_eq!(search, "nonce search");
                assert_eq!(attempts, 5);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_unusable_moduli_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(55);
        let key = PrivateKey::new(BigUint::from(3u32));
        for json in [r#"{"p":"0","q":"b","g":"4"}"#, r#"{"p":"17","q":"1","g":"4"}"#] {
            let params: DomainParameters = serde_json::from_str(json).unwrap();
            assert!(matches!(
                sign(b"m", &params, &key, &mut rng),
                Err(Error::InvalidParameters(_))
            ));
        }
    }
}
