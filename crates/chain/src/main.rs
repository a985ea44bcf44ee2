use std::time::Duration;

use alloy::providers::ProviderBuilder;

use pilot_chain::ledger::VesselManagerLedger;
use pilot_chain::params::ContractParameterSource;
use pilot_chain::positions::SortedPositionsApi;
use pilot_chain::retry::RetryPolicy;
use pilot_common::config::AppConfig;
use pilot_common::types::RedemptionRequest;
use pilot_engine::service::HintService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pilot=info,pilot_chain=info,pilot_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("PalladiumPilot starting...");

    let config = AppConfig::from_env()?;

    let mut args = std::env::args().skip(1);
    let (Some(asset), Some(debt_amount)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: pilot <asset-address> <debt-amount> [max-iterations]");
    };
    let max_iterations = args.next();

    let request = RedemptionRequest::from_args(&asset, &debt_amount, max_iterations.as_deref())?;
    tracing::info!(
        asset = %request.asset,
        debt_amount = %request.debt_amount_requested,
        max_iterations = request.max_iterations,
        "Redemption hint request"
    );

    let provider = ProviderBuilder::new().connect_http(config.rpc_url.parse()?);
    let retry = RetryPolicy::new(
        config.retry_max_attempts,
        Duration::from_millis(config.retry_base_delay_ms),
    );

    let positions = SortedPositionsApi::new(
        config.positions_api_url.clone(),
        Duration::from_secs(config.api_timeout_secs),
        retry,
    )?;
    let parameters = ContractParameterSource::new(
        provider.clone(),
        config.admin_contract_address,
        config.price_oracle_address,
        config.oracle_max_age_secs,
        retry,
    );
    let ledger = VesselManagerLedger::new(provider, config.vessel_manager_address, retry);

    let service = HintService::new(positions, parameters, ledger, config.redemption_softening_bps);
    let result = service.redemption_hints(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
