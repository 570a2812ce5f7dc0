//! # DSA Core
//!
//! The Digital Signature Algorithm built from hand-rolled number theory.
//!
//! This crate provides:
//! - Modular arithmetic (extended GCD, inverses, square-and-multiply)
//! - Miller-Rabin primality testing and random prime generation
//! - Domain parameter (P, Q, G) generation
//! - Key generation, signing and verification
//!
//! Every operation takes its random source explicitly, so a seeded RNG
//! reproduces parameters, keys and signatures exactly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dsa_core::{generate_domain_parameters, generate_key_pair, sign, verify, DsaConfig};
//! use rand::rngs::OsRng;
//!
//! let params = generate_domain_parameters(&DsaConfig::default(), &mut OsRng)?;
//! let keys = generate_key_pair(&params, &mut OsRng)?;
//!
//! let signature = sign(b"Hello I am Soumya", &params, &keys.private, &mut OsRng)?;
//! assert!(verify(b"Hello I am Soumya", &signature, &params, &keys.public));
//! # Ok::<(), dsa_core::Error>(())
//! ```
//!
//! This is not a constant-time implementation and must not guard real secrets.

pub mod arith;
pub mod config;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;
pub mod primality;
pub mod prime;
pub mod sign;
pub mod types;
pub mod verify;

pub use config::DsaConfig;
pub use error::{Error, Result};
pub use keys::generate_key_pair;
pub use params::generate_domain_parameters;
pub use sign::{sign, sign_with_digest};
pub use types::{DomainParameters, KeyPair, PrivateKey, PublicKey, Signature};
pub use verify::{verify, verify_with_digest, Component, Verification};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default message signed by the demo driver
pub const DEFAULT_MESSAGE: &str = "Hello I am Soumya";
