use alloy::primitives::Address;
use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Botanix RPC URL
    pub rpc_url: String,

    /// Sorted-positions API endpoint
    pub positions_api_url: String,

    /// VesselManager contract address
    pub vessel_manager_address: Address,

    /// AdminContract address (protocol parameters)
    pub admin_contract_address: Address,

    /// PriceOracle contract address
    pub price_oracle_address: Address,

    /// Redemption softening factor in basis points (default: 9700 = 97%)
    pub redemption_softening_bps: u64,

    /// Maximum accepted oracle round age in seconds; 0 disables the check
    pub oracle_max_age_secs: u64,

    /// HTTP timeout for the positions API in seconds (default: 10)
    pub api_timeout_secs: u64,

    /// Maximum attempts for retried external calls (default: 3)
    pub retry_max_attempts: u32,

    /// Base delay between retries in milliseconds, doubled per attempt
    pub retry_base_delay_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "https://node.botanixlabs.dev".to_string()),
            positions_api_url: std::env::var("POSITIONS_API_URL").unwrap_or_else(|_| {
                "https://api.palladiumlabs.org/admin/positionvalue".to_string()
            }),
            vessel_manager_address: std::env::var("VESSEL_MANAGER_ADDRESS")
                .unwrap_or_else(|_| "0x2Fef509fA966B614483B411f8cA3208C26da3c4b".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("VESSEL_MANAGER_ADDRESS must be a valid EVM address")
                })?,
            admin_contract_address: std::env::var("ADMIN_CONTRACT_ADDRESS")
                .unwrap_or_else(|_| "0x36F40faDe724ECd183b6E93F2448de65207b08A2".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("ADMIN_CONTRACT_ADDRESS must be a valid EVM address")
                })?,
            price_oracle_address: std::env::var("PRICE_ORACLE_ADDRESS")
                .unwrap_or_else(|_| "0xc014933c805825D335e23Ef12eB92d2471D41DA7".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("PRICE_ORACLE_ADDRESS must be a valid EVM address")
                })?,
            redemption_softening_bps: std::env::var("REDEMPTION_SOFTENING_BPS")
                .unwrap_or_else(|_| "9700".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REDEMPTION_SOFTENING_BPS must be a valid u64"))?,
            oracle_max_age_secs: std::env::var("ORACLE_MAX_AGE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("ORACLE_MAX_AGE_SECS must be a valid u64"))?,
            api_timeout_secs: std::env::var("API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_TIMEOUT_SECS must be a valid u64"))?,
            retry_max_attempts: std::env::var("RETRY_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_MAX_ATTEMPTS must be a valid u32"))?,
            retry_base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS")
                .unwrap_or_else(|_| "250".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_BASE_DELAY_MS must be a valid u64"))?,
        };

        if config.redemption_softening_bps > 10_000 {
            anyhow::bail!("REDEMPTION_SOFTENING_BPS must not exceed 10000");
        }

        Ok(config)
    }
}
