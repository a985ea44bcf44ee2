use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::HintError;

/// Fixed-point scale shared by all debt, collateral, price, and ratio
/// values (10^18).
pub const DECIMAL_PRECISION: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Basis-point scale for the redemption softening factor (100_00).
pub const PERCENTAGE_PRECISION: U256 = U256::from_limbs([10_000, 0, 0, 0]);

/// Default redemption softening factor: 97% of the converted collateral lot
/// is released per unit of debt redeemed.
pub const DEFAULT_REDEMPTION_SOFTENING_BPS: u64 = 9_700;

/// One row of the externally-sorted vessel list.
///
/// The sorting service orders vessels by ascending risk (descending
/// collateralization); the walk trusts that order and never re-sorts.
/// Rows are immutable snapshots for the duration of one hint computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Vessel owner address, the position identifier on-chain.
    pub owner: Address,
    /// Loan-to-value ratio as reported by the sorting service. Must be
    /// non-zero; a zero value is malformed data, not a valid state.
    pub nltv: U256,
}

/// Protocol-wide parameter snapshot, read-only for one hint computation.
///
/// Assembled per call: the softening factor and precision scales are
/// explicit values here rather than process-wide state, so parallel
/// computations with different parameter sets stay independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Minimum collateralization ratio (MCR), 1e18-scaled.
    pub min_collateral_ratio: U256,
    /// Protocol debt floor: a vessel may not be left below this net debt.
    pub min_net_debt: U256,
    /// Latest oracle round price, rescaled to 1e18.
    pub asset_price: U256,
    /// Redemption softening factor in basis points out of 10_000.
    pub redemption_softening_bps: U256,
    pub decimal_precision: U256,
    pub percentage_precision: U256,
}

impl Parameters {
    pub fn new(
        min_collateral_ratio: U256,
        min_net_debt: U256,
        asset_price: U256,
        redemption_softening_bps: u64,
    ) -> Self {
        Self {
            min_collateral_ratio,
            min_net_debt,
            asset_price,
            redemption_softening_bps: U256::from(redemption_softening_bps),
            decimal_precision: DECIMAL_PRECISION,
            percentage_precision: PERCENTAGE_PRECISION,
        }
    }
}

/// A single redemption-hint query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRequest {
    /// Collateral asset the redemption targets.
    pub asset: Address,
    /// Debt token amount the caller wants to redeem, 1e18-scaled.
    pub debt_amount_requested: U256,
    /// Cap on positions processed after the first-hint scan; 0 means
    /// unbounded.
    pub max_iterations: u64,
}

impl RedemptionRequest {
    pub fn new(asset: Address, debt_amount_requested: U256, max_iterations: u64) -> Self {
        Self {
            asset,
            debt_amount_requested,
            max_iterations,
        }
    }

    /// Parse a request from untyped command-line arguments.
    ///
    /// Rejects negative or malformed amounts and iteration counts with
    /// `InvalidRequest` before any walk can start.
    pub fn from_args(
        asset: &str,
        debt_amount: &str,
        max_iterations: Option<&str>,
    ) -> Result<Self, HintError> {
        let asset: Address = asset.trim().parse().map_err(|_| {
            HintError::InvalidRequest(format!("malformed asset address: {asset}"))
        })?;

        let raw_amount = debt_amount.trim();
        if raw_amount.starts_with('-') {
            return Err(HintError::InvalidRequest(format!(
                "debt amount must not be negative: {raw_amount}"
            )));
        }
        let debt_amount_requested: U256 = raw_amount.parse().map_err(|_| {
            HintError::InvalidRequest(format!("malformed debt amount: {raw_amount}"))
        })?;

        let max_iterations = match max_iterations {
            Some(raw) => {
                let raw = raw.trim();
                if raw.starts_with('-') {
                    return Err(HintError::InvalidRequest(format!(
                        "iteration count must not be negative: {raw}"
                    )));
                }
                raw.parse::<u64>().map_err(|_| {
                    HintError::InvalidRequest(format!("malformed iteration count: {raw}"))
                })?
            }
            None => 0,
        };

        Ok(Self::new(asset, debt_amount_requested, max_iterations))
    }

    /// The iteration budget the walk actually uses: 0 is translated to the
    /// largest representable count, i.e. effectively unbounded.
    pub fn effective_iterations(&self) -> u64 {
        if self.max_iterations == 0 {
            u64::MAX
        } else {
            self.max_iterations
        }
    }
}

/// Outcome of one hint computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionHintResult {
    /// First vessel eligible for redemption, or the zero address when no
    /// vessel qualifies.
    pub first_redemption_hint: Address,
    /// Collateralization ratio the partially-redeemed vessel would end up
    /// with, 1e18-scaled; 0 when no partial redemption occurred.
    pub partial_redemption_hint_new_icr: U256,
    /// Portion of the requested amount actually redeemable given the
    /// position list and iteration cap.
    pub truncated_debt_token_amount: U256,
}

impl RedemptionHintResult {
    /// The "no vessel eligible" outcome: zero address, zero ICR, zero
    /// amount. A valid terminal result, not an error.
    pub fn none() -> Self {
        Self {
            first_redemption_hint: Address::ZERO,
            partial_redemption_hint_new_icr: U256::ZERO,
            truncated_debt_token_amount: U256::ZERO,
        }
    }

    /// True when no vessel was eligible for redemption.
    pub fn is_none(&self) -> bool {
        self.first_redemption_hint == Address::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_precision_is_1e18() {
        assert_eq!(
            DECIMAL_PRECISION,
            U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(PERCENTAGE_PRECISION, U256::from(10_000u64));
    }

    #[test]
    fn test_request_from_args() {
        let req = RedemptionRequest::from_args(
            "0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64",
            "1500",
            Some("50"),
        )
        .unwrap();
        assert_eq!(req.debt_amount_requested, U256::from(1500u64));
        assert_eq!(req.max_iterations, 50);
        assert_eq!(req.effective_iterations(), 50);
    }

    #[test]
    fn test_request_without_iterations_is_unbounded() {
        let req = RedemptionRequest::from_args(
            "0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64",
            "100",
            None,
        )
        .unwrap();
        assert_eq!(req.max_iterations, 0);
        assert_eq!(req.effective_iterations(), u64::MAX);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = RedemptionRequest::from_args(
            "0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64",
            "-100",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, HintError::InvalidRequest(_)));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_negative_iterations_rejected() {
        let err = RedemptionRequest::from_args(
            "0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64",
            "100",
            Some("-1"),
        )
        .unwrap_err();
        assert!(matches!(err, HintError::InvalidRequest(_)));
    }

    #[test]
    fn test_malformed_asset_rejected() {
        let err = RedemptionRequest::from_args("not-an-address", "100", None).unwrap_err();
        assert!(matches!(err, HintError::InvalidRequest(_)));
    }

    #[test]
    fn test_none_result_sentinel() {
        let result = RedemptionHintResult::none();
        assert!(result.is_none());
        assert_eq!(result.first_redemption_hint, Address::ZERO);
        assert_eq!(result.partial_redemption_hint_new_icr, U256::ZERO);
        assert_eq!(result.truncated_debt_token_amount, U256::ZERO);
    }

    #[test]
    fn test_result_serializes_with_stable_field_names() {
        let value = serde_json::to_value(RedemptionHintResult::none()).unwrap();
        assert_eq!(
            value["first_redemption_hint"],
            "0x0000000000000000000000000000000000000000"
        );
        assert!(value.get("partial_redemption_hint_new_icr").is_some());
        assert!(value.get("truncated_debt_token_amount").is_some());
    }
}
