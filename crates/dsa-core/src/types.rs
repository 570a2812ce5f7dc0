//! Core types for DSA

use crate::arith::fast_mod_exp;
use crate::primality::is_probable_prime;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Domain parameters (P, Q, G) shared by signer and verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParameters {
    /// Prime modulus
    #[serde(with = "biguint_hex")]
    pub p: BigUint,
    /// Prime order of the subgroup, divides P - 1
    #[serde(with = "biguint_hex")]
    pub q: BigUint,
    /// Generator of the order-Q subgroup mod P
    #[serde(with = "biguint_hex")]
    pub g: BigUint,
}

impl DomainParameters {
    /// Create parameters without checking them
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    /// Whether P and Q are usable as moduli at all (both at least 2)
    pub(crate) fn has_usable_moduli(&self) -> bool {
        self.p > BigUint::one() && self.q > BigUint::one()
    }

    /// Reject parameters on which modular arithmetic is undefined
    pub(crate) fn ensure_usable_moduli(&self) -> Result<()> {
        if !self.has_usable_moduli() {
            return Err(Error::InvalidParameters("P and Q must both be at least 2".into()));
        }
        Ok(())
    }

    /// Check every group constraint, reporting the first one violated
    pub fn validate<R: RngCore + ?Sized>(&self, witness_count: usize, rng: &mut R) -> Result<()> {
        self.ensure_usable_moduli()?;
        if !is_probable_prime(&self.p, witness_count, rng) {
            return Err(Error::InvalidParameters("P is not prime".into()));
        }
        if !is_probable_prime(&self.q, witness_count, rng) {
            return Err(Error::InvalidParameters("Q is not prime".into()));
        }
        if !(&self.p - 1u32).is_multiple_of(&self.q) {
            return Err(Error::InvalidParameters("Q does not divide P - 1".into()));
        }
        if self.g <= BigUint::one() || self.g >= &self.p - 1u32 {
            return Err(Error::InvalidParameters("G is outside (1, P - 1)".into()));
        }
        if !fast_mod_exp(&self.g, &self.q, &self.p).is_one() {
            return Err(Error::InvalidParameters("G^Q mod P != 1".into()));
        }
        Ok(())
    }

    /// Bit length of Q
    pub fn n_bits(&self) -> u64 {
        self.q.bits()
    }

    /// Bit length of P
    pub fn l_bits(&self) -> u64 {
        self.p.bits()
    }
}

/// Private key x in [1, Q-1].
///
/// Held as big-endian bytes so the buffer can be wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: Vec<u8>,
}

impl PrivateKey {
    /// Wrap a private exponent
    pub fn new(x: BigUint) -> Self {
        Self {
            bytes: x.to_bytes_be(),
        }
    }

    /// The secret exponent. Callers must not log or persist it.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Public key y = G^x mod P
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    #[serde(with = "biguint_hex")]
    pub y: BigUint,
}

impl PublicKey {
    pub fn new(y: BigUint) -> Self {
        Self { y }
    }
}

/// Key pair owned by the signing party
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Secret exponent x
    pub private: PrivateKey,
    /// Public value y
    pub public: PublicKey,
}

/// DSA signature (r, s)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// R component
    #[serde(with = "biguint_hex")]
    pub r: BigUint,
    /// S component
    #[serde(with = "biguint_hex")]
    pub s: BigUint,
}

impl Signature {
    /// Create a new signature
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// True if neither component is zero
    pub fn is_nonzero(&self) -> bool {
        !self.r.is_zero() && !self.s.is_zero()
    }

    /// Convert to bytes (r || s), each half left-padded to the byte width of Q
    pub fn to_bytes(&self, params: &DomainParameters) -> Vec<u8> {
        let width = ((params.q.bits() + 7) / 8) as usize;
        let mut bytes = Vec::with_capacity(2 * width);
        for component in [&self.r, &self.s] {
            let be = component.to_bytes_be();
            let pad = width.saturating_sub(be.len());
            bytes.extend(std::iter::repeat(0u8).take(pad));
            bytes.extend_from_slice(&be);
        }
        bytes
    }
}

mod biguint_hex {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(16))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        BigUint::parse_bytes(text.as_bytes(), 16)
            .ok_or_else(|| serde::de::Error::custom("Invalid hex integer"))
    }
}
