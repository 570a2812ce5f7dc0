//! Error types for DSA operations

use num_bigint::BigUint;
use thiserror::Error;

/// Result type alias for DSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating parameters, keys or signatures
#[derive(Debug, Error)]
pub enum Error {
    /// No modular inverse exists because gcd(value, modulus) != 1
    #[error("GCD({value}, {modulus}) != 1: modular multiplicative inverse does not exist")]
    NoInverse { value: BigUint, modulus: BigUint },

    /// An argument outside the domain of the operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Domain parameters violating a group constraint
    #[error("Invalid domain parameters: {0}")]
    InvalidParameters(String),

    /// A retry loop ran out of its attempt budget
    #[error("Search exhausted: {search} gave up after {attempts} attempts")]
    SearchExhausted { search: &'static str, attempts: u64 },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
