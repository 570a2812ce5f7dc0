//! Tunables for parameter generation and signing

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default bit length of the modulus P
pub const DEFAULT_L_BITS: usize = 512;

/// Default bit length of the subgroup order Q
pub const DEFAULT_N_BITS: usize = 160;

/// Default number of Miller-Rabin witnesses
pub const DEFAULT_WITNESS_COUNT: usize = 5;

/// Configuration shared by the prime searches and the signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DsaConfig {
    /// Bit length of P
    pub l_bits: usize,

    /// Bit length of Q
    pub n_bits: usize,

    /// Miller-Rabin rounds per candidate
    pub witness_count: usize,

    /// Upper bound on candidates tried by any single search loop.
    /// `None` keeps the loops unbounded.
    pub max_attempts: Option<u64>,
}

impl Default for DsaConfig {
    fn default() -> Self {
        Self {
            l_bits: DEFAULT_L_BITS,
            n_bits: DEFAULT_N_BITS,
            witness_count: DEFAULT_WITNESS_COUNT,
            max_attempts: None,
        }
    }
}

impl DsaConfig {
    /// Create a validated configuration for an (L, N) pair
    pub fn new(l_bits: usize, n_bits: usize) -> Result<Self> {
        let config = Self {
            l_bits,
            n_bits,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the number of Miller-Rabin witnesses
    pub fn with_witness_count(mut self, witness_count: usize) -> Result<Self> {
        self.witness_count = witness_count;
        self.validate()?;
        Ok(self)
    }

    /// Cap every search loop at `max_attempts` candidates
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Result<Self> {
        self.max_attempts = max_attempts;
        self.validate()?;
        Ok(self)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.n_bits < 3 {
            return Err(Error::InvalidConfig(format!(
                "N must be at least 3 bits, got {}",
                self.n_bits
            )));
        }
        if self.l_bits <= self.n_bits {
            return Err(Error::InvalidConfig(format!(
                "L ({}) must exceed N ({})",
                self.l_bits, self.n_bits
            )));
        }
        if self.witness_count == 0 {
            return Err(Error::InvalidConfig(
                "Witness count must be at least 1".into(),
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::InvalidConfig(
                "Attempt cap must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn budget(&self, search: &'static str) -> AttemptBudget {
        AttemptBudget::new(search, self.max_attempts)
    }
}

/// Counts iterations of a retry loop against an optional cap
#[derive(Debug)]
pub(crate) struct AttemptBudget {
    search: &'static str,
    limit: Option<u64>,
    used: u64,
}

impl AttemptBudget {
    pub(crate) fn new(search: &'static str, limit: Option<u64>) -> Self {
        Self {
            search,
            limit,
            used: 0,
        }
    }

    /// Record one more attempt, failing once the cap has been spent
    pub(crate) fn spend(&mut self) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                warn!(search = self.search, attempts = self.used, "Search budget exhausted");
                return Err(Error::SearchExhausted {
                    search: self.search,
                    attempts: self.used,
                });
            }
        }
        self.used += 1;
        Ok(())
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DsaConfig::default();
        assert_eq!(config.l_bits, 512);
        assert_eq!(config.n_bits, 160);
        assert_eq!(config.witness_count, 5);
        assert!(config.max_attempts.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(matches!(DsaConfig::new(160, 160), Err(Error::InvalidConfig(_))));
        assert!(matches!(DsaConfig::new(64, 2), Err(Error::InvalidConfig(_))));
        assert!(DsaConfig::default().with_witness_count(0).is_err());
        assert!(DsaConfig::default().with_max_attempts(Some(0)).is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = DsaConfig::from_json(r#"{"l_bits": 256, "max_attempts": 1000}"#).unwrap();
        assert_eq!(config.l_bits, 256);
        assert_eq!(config.n_bits, 160);
        assert_eq!(config.max_attempts, Some(1000));

        assert!(matches!(
            DsaConfig::from_json(r#"{"l_bits": 100}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            DsaConfig::from_json("not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_budget_caps_attempts() {
        let mut budget = AttemptBudget::new("test", Some(2));
        assert!(budget.spend().is_ok());
        assert!(budget.spend().is_ok());
        match budget.spend() {
            Err(Error::SearchExhausted { search, attempts }) => {
                assert_eq!(search, "test");
                assert_eq!(attempts, 2);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(budget.used(), 2);
    }

    #[test]
    fn test_unbounded_budget() {
        let mut budget = AttemptBudget::new("test", None);
        for _ in 0..10_000 {
            budget.spend().unwrap();
        }
        assert_eq!(budget.used(), 10_000);
    }
}
