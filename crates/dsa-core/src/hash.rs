//! Message digest to integer conversion

use digest::Digest;
use num_bigint::BigUint;

/// Default digest; its 160-bit output matches the default width of Q
pub use sha1::Sha1;

/// Hash `message` with `D` and read the digest as a big-endian integer.
///
/// The value is not truncated to the width of Q; the signer and verifier
/// reduce it modulo Q as part of their arithmetic.
pub fn message_to_integer<D: Digest>(message: &[u8]) -> BigUint {
    let digest = D::digest(message);
    BigUint::from_bytes_be(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    #[test]
    fn test_sha1_digest_value() {
        // SHA-1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        let expected =
            BigUint::parse_bytes(b"a9993e364706816aba3e25717850c26c9cd0d89d", 16).unwrap();
        assert_eq!(message_to_integer::<Sha1>(b"abc"), expected);
    }

    #[test]
    fn test_sha256_digest_value() {
        let expected = BigUint::parse_bytes(
            b"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            16,
        )
        .unwrap();
        assert_eq!(message_to_integer::<Sha256>(b"abc"), expected);
    }

    #[test]
    fn test_digest_width() {
        assert!(message_to_integer::<Sha1>(b"Hello I am Soumya").bits() <= 160);
        assert!(message_to_integer::<Sha256>(b"").bits() <= 256);
    }
}
