//! Engine-wide settings applied to newly initialized pools.

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, FeeTier};
use crate::error::AmmError;

/// How a deposit whose amounts do not match the pool's current ratio is
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// Accept both amounts in full.  Shares follow the scarcer side and the
    /// surplus on the other side stays in the pool.
    #[default]
    Absorb,
    /// Require `floor(amount_a * reserve_b / reserve_a) == amount_b`.
    Strict,
}

/// Settings for a [`PoolEngine`](crate::engine::PoolEngine).
///
/// Loadable from TOML; every key is optional.
///
/// # Examples
///
/// ```
/// use pair_amm::config::{EngineConfig, RatioPolicy};
///
/// let cfg = EngineConfig::from_toml_str("fee_bps = 30\nratio_policy = \"strict\"")
///     .expect("valid toml");
/// assert_eq!(cfg.fee_bps, 30);
/// assert_eq!(cfg.ratio_policy, RatioPolicy::Strict);
///
/// let defaults = EngineConfig::from_toml_str("").expect("empty is fine");
/// assert_eq!(defaults, EngineConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Swap fee for new pools, in basis points.
    pub fee_bps: u16,
    /// Deposit ratio handling.
    pub ratio_policy: RatioPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_bps: FeeTier::DEFAULT.basis_points().get(),
            ratio_policy: RatioPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the document does not parse.
    /// - [`AmmError::InvalidFee`] if `fee_bps` is 10 000 or more.
    pub fn from_toml_str(source: &str) -> Result<Self, AmmError> {
        let config: Self =
            toml::from_str(source).map_err(|e| AmmError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] if `fee_bps` is 10 000 or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier().map(|_| ())
    }

    /// The fee tier new pools receive.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] if `fee_bps` is 10 000 or more.
    pub fn fee_tier(&self) -> Result<FeeTier, AmmError> {
        FeeTier::new(BasisPoints::new(self.fee_bps))
    }
}
