//! Signature verification

use crate::arith::{fast_mod_exp, mod_inverse};
use crate::hash::{message_to_integer, Sha1};
use crate::{DomainParameters, PublicKey, Signature};
use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Which half of a signature a status refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Component {
    R,
    S,
}

/// Outcome of checking a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verification {
    /// v == r
    Valid,
    /// P or Q below 2, so no arithmetic is possible
    InvalidParameters,
    /// r or s outside [1, Q-1]
    OutOfRange { component: Component },
    /// s has no inverse modulo Q (Q is not prime)
    NoInverse,
    /// v != r
    Mismatch,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Valid => f.write_str("VERIFIED"),
            Verification::InvalidParameters => {
                f.write_str("NOT VERIFIED: P and Q must both be at least 2")
            }
            Verification::OutOfRange { component } => {
                write!(f, "NOT VERIFIED: {:?} out of range", component)
            }
            Verification::NoInverse => f.write_str("NOT VERIFIED: s is not invertible mod Q"),
            Verification::Mismatch => f.write_str("NOT VERIFIED: v != r"),
        }
    }
}

/// Verify a SHA-1 signature over `message`
pub fn verify(
    message: &[u8],
    signature: &Signature,
    params: &DomainParameters,
    public_key: &PublicKey,
) -> bool {
    verify_with_digest::<Sha1>(message, signature, params, public_key).is_valid()
}

/// Verify a signature over `message` made with digest `D`.
///
/// Both components must lie in [1, Q-1]. Every rejection is reported as a
/// [`Verification`] value, never as an error.
#[instrument(skip_all, fields(message_len = message.len()))]
pub fn verify_with_digest<D: Digest>(
    message: &[u8],
    signature: &Signature,
    params: &DomainParameters,
    public_key: &PublicKey,
) -> Verification {
    let status = check(message, signature, params, public_key, message_to_integer::<D>);
    debug!(%status, "Signature checked");
    status
}

fn in_range(value: &BigUint, q: &BigUint) -> bool {
    !value.is_zero() && value < q
}

fn check(
    message: &[u8],
    signature: &Signature,
    params: &DomainParameters,
    public_key: &PublicKey,
    hash: fn(&[u8]) -> BigUint,
) -> Verification {
    let DomainParameters { p, q, g } = params;
    let Signature { r, s } = signature;

    if !params.has_usable_moduli() {
        return Verification::InvalidParameters;
    }
    if !in_range(r, q) {
        return Verification::OutOfRange {
            component: Component::R,
        };
    }
    if !in_range(s, q) {
        return Verification::OutOfRange {
            component: Component::S,
        };
    }

    let w = match mod_inverse(s, q) {
        Ok(w) => w,
        Err(_) => return Verification::NoInverse,
    };

    let m = hash(message);
    let u1 = (&m * &w) % q;
    let u2 = (r * &w) % q;
    let v = (fast_mod_exp(g, &u1, p) * fast_mod_exp(&public_key.y, &u2, p)) % p % q;

    if v == *r {
        Verification::Valid
    } else {
        Verification::Mismatch
    }
}
