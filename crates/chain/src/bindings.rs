//! Contract bindings for the Botanix deployment.
//!
//! Only the functions the hint pipeline calls are defined.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IVesselManager {
        /// Recorded debt of a borrower's vessel for the given asset.
        function getVesselDebt(address _asset, address _borrower) external view returns (uint256);

        /// Debt token reward accrued to the vessel but not yet applied.
        function getPendingDebtTokenReward(address _asset, address _borrower) external view returns (uint256);

        /// Recorded collateral of a borrower's vessel for the given asset.
        function getVesselColl(address _asset, address _borrower) external view returns (uint256);

        /// Collateral reward accrued to the vessel but not yet applied.
        function getPendingAssetReward(address _asset, address _borrower) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IAdminContract {
        /// Minimum collateralization ratio for the asset, 1e18-scaled.
        function getMcr(address _asset) external view returns (uint256);

        /// Minimum net debt a vessel may be left with, 1e18-scaled.
        function getMinNetDebt(address _asset) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IPriceOracle {
        /// Latest oracle round, Chainlink aggregator layout.
        function latestRoundData() external view returns (uint80 roundId, int256 answer, uint256 startedAt, uint256 updatedAt, uint80 answeredInRound);

        /// Number of decimals the feed's answer is scaled by.
        function decimals() external view returns (uint8);
    }
}
