//! Bounded greedy walk over the sorted vessel list.
//!
//! Given a position snapshot, a parameter snapshot, and a request, the
//! calculator:
//! 1. Scans for the first vessel with ICR >= MCR (`first_redemption_hint`)
//! 2. Walks forward, fully redeeming vessels while the remaining amount
//!    covers their net debt
//! 3. On the first vessel it cannot fully cover, computes the partial
//!    redemption (respecting the protocol debt floor) and stops
//! 4. Reports how much of the request was actually redeemable
//!
//! The walk is deterministic: identical snapshots always yield identical
//! results. Ledger lookups are the only suspension points.

use alloy::primitives::U256;

use pilot_common::error::HintError;
use pilot_common::types::{Parameters, Position, RedemptionHintResult, RedemptionRequest};

use crate::math;
use crate::sources::PositionLedger;

/// Stateless redemption-hint calculator.
pub struct RedemptionHintCalculator;

impl RedemptionHintCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the redemption hints for `request` against one consistent
    /// snapshot of positions and parameters.
    ///
    /// Inputs are never mutated. Ledger queries follow the walk exactly:
    /// one debt pair per vessel processed, one collateral pair only when a
    /// vessel is partially redeemed. Any ledger failure aborts the whole
    /// computation; no partial result is returned.
    pub async fn compute_hints(
        &self,
        positions: &[Position],
        params: &Parameters,
        request: &RedemptionRequest,
        ledger: &impl PositionLedger,
    ) -> Result<RedemptionHintResult, HintError> {
        let mut remaining_debt = request.debt_amount_requested;
        let mut remaining_iterations = request.effective_iterations();

        // First-hint scan: the earliest vessel at or above the MCR. A zero
        // nltv anywhere in the scanned prefix is malformed upstream data
        // and aborts; skipping it would make the first-match choice depend
        // on corrupt rows.
        let mut index = 0;
        let mut first_redemption_hint = None;
        while index < positions.len() {
            let icr = math::convert_ltv_to_icr(positions[index].nltv, params)?;
            if icr >= params.min_collateral_ratio {
                first_redemption_hint = Some(positions[index].owner);
                break;
            }
            index += 1;
        }

        let Some(first_redemption_hint) = first_redemption_hint else {
            tracing::debug!(
                asset = %request.asset,
                positions = positions.len(),
                "No vessel at or above MCR"
            );
            return Ok(RedemptionHintResult::none());
        };

        let mut partial_redemption_hint_new_icr = U256::ZERO;

        // Redemption walk, starting at the vessel found above.
        while index < positions.len()
            && remaining_debt > U256::ZERO
            && remaining_iterations > 0
        {
            let vessel = &positions[index];
            let debt = ledger.debt(request.asset, vessel.owner).await?;
            let pending_debt = ledger.pending_debt_reward(request.asset, vessel.owner).await?;
            let raw_debt = debt
                .checked_add(pending_debt)
                .ok_or(HintError::Overflow("vessel debt"))?;
            let net_debt = math::net_debt_of(raw_debt);

            if net_debt <= remaining_debt {
                // Fully redeemable: consume it and move on. Only full
                // redemptions spend iteration budget.
                remaining_debt -= net_debt;
                index += 1;
                remaining_iterations -= 1;
                continue;
            }

            // Partially redeemable at most; the walk ends at this vessel
            // either way. Redeeming below the debt floor is not allowed,
            // so such a vessel contributes nothing.
            if net_debt > params.min_net_debt {
                let max_redeemable_debt = remaining_debt.min(net_debt - params.min_net_debt);

                let coll = ledger.collateral(request.asset, vessel.owner).await?;
                let pending_coll = ledger
                    .pending_collateral_reward(request.asset, vessel.owner)
                    .await?;
                let current_coll = coll
                    .checked_add(pending_coll)
                    .ok_or(HintError::Overflow("vessel collateral"))?;

                let coll_lot = math::collateral_lot(max_redeemable_debt, params)?;
                let new_coll = current_coll
                    .checked_sub(coll_lot)
                    .ok_or(HintError::Overflow("collateral after redemption"))?;
                let new_debt = net_debt - max_redeemable_debt;
                let composite_debt = math::composite_debt_of(new_debt);

                partial_redemption_hint_new_icr =
                    math::compute_nominal_cr(new_coll, composite_debt, params)?;
                remaining_debt -= max_redeemable_debt;
            }
            break;
        }

        let truncated_debt_token_amount = request.debt_amount_requested - remaining_debt;

        tracing::debug!(
            asset = %request.asset,
            first_redemption_hint = %first_redemption_hint,
            truncated = %truncated_debt_token_amount,
            "Redemption walk complete"
        );

        Ok(RedemptionHintResult {
            first_redemption_hint,
            partial_redemption_hint_new_icr,
            truncated_debt_token_amount,
        })
    }
}

impl Default for RedemptionHintCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use pilot_common::types::DECIMAL_PRECISION;

    /// Ledger that fails every lookup. Used to prove that scan-only
    /// outcomes never touch the ledger.
    struct UnreachableLedger;

    impl PositionLedger for UnreachableLedger {
        async fn debt(&self, _asset: Address, _owner: Address) -> Result<U256, HintError> {
            Err(HintError::DataUnavailable("ledger should not be queried".into()))
        }

        async fn pending_debt_reward(
            &self,
            _asset: Address,
            _owner: Address,
        ) -> Result<U256, HintError> {
            Err(HintError::DataUnavailable("ledger should not be queried".into()))
        }

        async fn collateral(&self, _asset: Address, _owner: Address) -> Result<U256, HintError> {
            Err(HintError::DataUnavailable("ledger should not be queried".into()))
        }

        async fn pending_collateral_reward(
            &self,
            _asset: Address,
            _owner: Address,
        ) -> Result<U256, HintError> {
            Err(HintError::DataUnavailable("ledger should not be queried".into()))
        }
    }

    fn make_params() -> Parameters {
        Parameters::new(
            U256::from(1_100_000_000_000_000_000u64),
            U256::from(200u64) * DECIMAL_PRECISION,
            DECIMAL_PRECISION,
            9_700,
        )
    }

    fn make_request(debt: u64) -> RedemptionRequest {
        RedemptionRequest::new(
            Address::repeat_byte(0xaa),
            U256::from(debt) * DECIMAL_PRECISION,
            0,
        )
    }

    #[tokio::test]
    async fn test_empty_position_list_is_none() {
        let calculator = RedemptionHintCalculator::new();
        let result = calculator
            .compute_hints(&[], &make_params(), &make_request(1500), &UnreachableLedger)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_no_eligible_vessel_is_none() {
        // All vessels below the 110% MCR: 125% LTV -> 80% ICR.
        let positions = vec![
            Position {
                owner: Address::repeat_byte(1),
                nltv: U256::from(125u64),
            },
            Position {
                owner: Address::repeat_byte(2),
                nltv: U256::from(130u64),
            },
        ];
        let calculator = RedemptionHintCalculator::new();
        let result = calculator
            .compute_hints(
                &positions,
                &make_params(),
                &make_request(1500),
                &UnreachableLedger,
            )
            .await
            .unwrap();
        assert_eq!(result, RedemptionHintResult::none());
    }

    #[tokio::test]
    async fn test_zero_requested_amount_still_finds_hint() {
        // 80% LTV -> 125% ICR, eligible. The walk itself has nothing to do.
        let positions = vec![Position {
            owner: Address::repeat_byte(1),
            nltv: U256::from(80u64),
        }];
        let calculator = RedemptionHintCalculator::new();
        let result = calculator
            .compute_hints(
                &positions,
                &make_params(),
                &make_request(0),
                &UnreachableLedger,
            )
            .await
            .unwrap();
        assert_eq!(result.first_redemption_hint, Address::repeat_byte(1));
        assert_eq!(result.partial_redemption_hint_new_icr, U256::ZERO);
        assert_eq!(result.truncated_debt_token_amount, U256::ZERO);
    }

    #[tokio::test]
    async fn test_zero_ltv_in_scanned_prefix_aborts() {
        let positions = vec![
            Position {
                owner: Address::repeat_byte(1),
                nltv: U256::from(125u64),
            },
            Position {
                owner: Address::repeat_byte(2),
                nltv: U256::ZERO,
            },
        ];
        let calculator = RedemptionHintCalculator::new();
        let err = calculator
            .compute_hints(
                &positions,
                &make_params(),
                &make_request(1500),
                &UnreachableLedger,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HintError::DivisionByZero(_)));
    }
}
