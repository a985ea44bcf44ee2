//! Hint computation workflow.
//!
//! Wires the external collaborators to the calculator:
//! 1. Fetches the sorted vessel list and the three protocol parameters,
//!    all concurrently
//! 2. Assembles a single consistent `Parameters` snapshot (MCR, debt
//!    floor, price, softening factor)
//! 3. Runs the bounded redemption walk against that snapshot

use alloy::primitives::Address;

use pilot_common::error::HintError;
use pilot_common::types::{Parameters, RedemptionHintResult, RedemptionRequest};

use crate::calculator::RedemptionHintCalculator;
use crate::sources::{ParameterSource, PositionDataSource, PositionLedger};

/// Orchestrates one redemption-hint computation end to end.
pub struct HintService<P, S, L> {
    positions: P,
    parameters: S,
    ledger: L,
    calculator: RedemptionHintCalculator,
    redemption_softening_bps: u64,
}

impl<P, S, L> HintService<P, S, L>
where
    P: PositionDataSource,
    S: ParameterSource,
    L: PositionLedger,
{
    pub fn new(positions: P, parameters: S, ledger: L, redemption_softening_bps: u64) -> Self {
        Self {
            positions,
            parameters,
            ledger,
            calculator: RedemptionHintCalculator::new(),
            redemption_softening_bps,
        }
    }

    /// Compute the redemption hints for `request`.
    ///
    /// The position list and the parameter snapshot are fetched before the
    /// walk starts; the walk then observes exactly one consistent view of
    /// MCR, debt floor, and price. Any collaborator failure aborts the
    /// whole computation.
    pub async fn redemption_hints(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionHintResult, HintError> {
        let (positions, parameters) = tokio::try_join!(
            self.positions.fetch_sorted_positions(request.asset),
            self.snapshot_parameters(request.asset),
        )?;

        tracing::info!(
            asset = %request.asset,
            positions = positions.len(),
            mcr = %parameters.min_collateral_ratio,
            min_net_debt = %parameters.min_net_debt,
            price = %parameters.asset_price,
            debt_requested = %request.debt_amount_requested,
            "Fetched redemption inputs"
        );

        let result = self
            .calculator
            .compute_hints(&positions, &parameters, request, &self.ledger)
            .await?;

        tracing::info!(
            first_redemption_hint = %result.first_redemption_hint,
            partial_redemption_hint_new_icr = %result.partial_redemption_hint_new_icr,
            truncated_debt_token_amount = %result.truncated_debt_token_amount,
            "Redemption hints computed"
        );

        Ok(result)
    }

    /// Read the three protocol parameters concurrently and freeze them
    /// into one snapshot.
    async fn snapshot_parameters(&self, asset: Address) -> Result<Parameters, HintError> {
        let (min_collateral_ratio, min_net_debt, asset_price) = tokio::try_join!(
            self.parameters.min_collateral_ratio(asset),
            self.parameters.min_net_debt(asset),
            self.parameters.asset_price(asset),
        )?;

        Ok(Parameters::new(
            min_collateral_ratio,
            min_net_debt,
            asset_price,
            self.redemption_softening_bps,
        ))
    }
}
