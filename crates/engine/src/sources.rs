//! Boundary contracts for the engine's external collaborators.
//!
//! The calculator and service are generic over these traits. Live
//! implementations back them with HTTP and contract calls; tests use
//! in-memory fakes. Every method maps transport or malformed-payload
//! failures to `HintError::DataUnavailable`.

use alloy::primitives::{Address, U256};
use pilot_common::error::HintError;
use pilot_common::types::Position;

/// Supplies the ordered vessel list for one asset.
pub trait PositionDataSource: Send + Sync {
    /// Fetch all active vessels for `asset`, ordered by ascending risk
    /// (descending collateralization). The walk trusts this order and
    /// never re-sorts.
    async fn fetch_sorted_positions(&self, asset: Address) -> Result<Vec<Position>, HintError>;
}

/// Supplies protocol-wide risk and price parameters.
///
/// The three reads are independent; the service queries them concurrently
/// and assembles a single snapshot before the walk starts.
pub trait ParameterSource: Send + Sync {
    /// Minimum collateralization ratio for `asset`, 1e18-scaled.
    async fn min_collateral_ratio(&self, asset: Address) -> Result<U256, HintError>;

    /// Protocol debt floor for `asset`.
    async fn min_net_debt(&self, asset: Address) -> Result<U256, HintError>;

    /// Latest oracle round price for `asset`, rescaled to 1e18.
    async fn asset_price(&self, asset: Address) -> Result<U256, HintError>;
}

/// Per-vessel live values from the authoritative ledger.
///
/// Queried during the redemption walk: one pair of debt calls per vessel
/// processed, plus one pair of collateral calls only when a vessel is
/// partially redeemed.
pub trait PositionLedger: Send + Sync {
    /// Recorded debt of `owner`'s vessel.
    async fn debt(&self, asset: Address, owner: Address) -> Result<U256, HintError>;

    /// Debt reward accrued to `owner`'s vessel but not yet applied.
    async fn pending_debt_reward(&self, asset: Address, owner: Address)
        -> Result<U256, HintError>;

    /// Recorded collateral of `owner`'s vessel.
    async fn collateral(&self, asset: Address, owner: Address) -> Result<U256, HintError>;

    /// Collateral reward accrued to `owner`'s vessel but not yet applied.
    async fn pending_collateral_reward(
        &self,
        asset: Address,
        owner: Address,
    ) -> Result<U256, HintError>;
}
