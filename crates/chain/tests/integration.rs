//! Integration tests for the live collaborators.
//!
//! These hit the public Botanix RPC and the Palladium positions API, so
//! they are ignored by default. `PILOT_TEST_ASSET` selects the collateral
//! asset (defaults to the zero address). Run with:
//!
//! ```bash
//! cargo test -p pilot-chain --test integration -- --ignored --nocapture
//! ```

use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::ProviderBuilder;

use pilot_chain::ledger::VesselManagerLedger;
use pilot_chain::params::ContractParameterSource;
use pilot_chain::positions::SortedPositionsApi;
use pilot_chain::retry::RetryPolicy;
use pilot_common::config::AppConfig;
use pilot_common::types::RedemptionRequest;
use pilot_engine::service::HintService;
use pilot_engine::sources::{ParameterSource, PositionDataSource, PositionLedger};

// ============================================================
// Shared helpers
// ============================================================

fn test_asset() -> Address {
    std::env::var("PILOT_TEST_ASSET")
        .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string())
        .parse()
        .expect("PILOT_TEST_ASSET must be a valid EVM address")
}

fn retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(250))
}

// ============================================================
// SortedPositionsApi
// ============================================================

#[tokio::test]
#[ignore]
async fn test_fetch_sorted_positions_live() {
    let config = AppConfig::from_env().unwrap();
    let api = SortedPositionsApi::new(
        config.positions_api_url.clone(),
        Duration::from_secs(config.api_timeout_secs),
        retry(),
    )
    .unwrap();

    let positions = api.fetch_sorted_positions(test_asset()).await.unwrap();

    // Every served row must already be valid; zero nltv would poison the
    // first-hint scan.
    for position in &positions {
        assert!(position.nltv > U256::ZERO);
        assert_ne!(position.owner, Address::ZERO);
    }
    println!("fetched {} sorted vessels", positions.len());
}

// ============================================================
// ContractParameterSource
// ============================================================

#[tokio::test]
#[ignore]
async fn test_parameter_snapshot_live() {
    let config = AppConfig::from_env().unwrap();
    let provider = ProviderBuilder::new().connect_http(config.rpc_url.parse().unwrap());
    let params = ContractParameterSource::new(
        provider,
        config.admin_contract_address,
        config.price_oracle_address,
        config.oracle_max_age_secs,
        retry(),
    );

    let asset = test_asset();
    let mcr = params.min_collateral_ratio(asset).await.unwrap();
    let min_net_debt = params.min_net_debt(asset).await.unwrap();
    let price = params.asset_price(asset).await.unwrap();

    // The oracle answer is validated and rescaled to 1e18 before it is
    // returned, so a successful read is always positive.
    assert!(price > U256::ZERO);
    println!("mcr={mcr} min_net_debt={min_net_debt} price={price}");
}

// ============================================================
// VesselManagerLedger
// ============================================================

#[tokio::test]
#[ignore]
async fn test_vessel_ledger_live() {
    let config = AppConfig::from_env().unwrap();
    let provider = ProviderBuilder::new().connect_http(config.rpc_url.parse().unwrap());
    let ledger = VesselManagerLedger::new(provider, config.vessel_manager_address, retry());

    // An unopened vessel reads as zero debt, it does not revert.
    let debt = ledger.debt(test_asset(), Address::ZERO).await.unwrap();
    let pending = ledger
        .pending_debt_reward(test_asset(), Address::ZERO)
        .await
        .unwrap();
    println!("debt={debt} pending={pending}");
}

// ============================================================
// Full pipeline
// ============================================================

#[tokio::test]
#[ignore]
async fn test_redemption_hints_live() {
    let config = AppConfig::from_env().unwrap();
    let provider = ProviderBuilder::new().connect_http(config.rpc_url.parse().unwrap());

    let positions = SortedPositionsApi::new(
        config.positions_api_url.clone(),
        Duration::from_secs(config.api_timeout_secs),
        retry(),
    )
    .unwrap();
    let parameters = ContractParameterSource::new(
        provider.clone(),
        config.admin_contract_address,
        config.price_oracle_address,
        config.oracle_max_age_secs,
        retry(),
    );
    let ledger = VesselManagerLedger::new(provider, config.vessel_manager_address, retry());

    let service = HintService::new(positions, parameters, ledger, config.redemption_softening_bps);
    let request = RedemptionRequest::new(
        test_asset(),
        U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)),
        50,
    );

    let result = service.redemption_hints(&request).await.unwrap();

    assert!(result.truncated_debt_token_amount <= request.debt_amount_requested);
    println!(
        "first_hint={} new_icr={} truncated={}",
        result.first_redemption_hint,
        result.partial_redemption_hint_new_icr,
        result.truncated_debt_token_amount
    );
}
