use alloy::primitives::Address;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "study-tui", about = "Terminal client for the on-chain Study learning tracker")]
pub struct Config {
    /// RPC endpoint URL; overrides the chain preset's endpoint
    #[arg(short, long, env = "STUDY_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Chain preset (base, base-sepolia, ethereum, sepolia, localhost)
    #[arg(long, default_value = "base")]
    pub chain: String,

    /// Address of the deployed Study contract
    #[arg(short, long, env = "STUDY_CONTRACT_ADDRESS", default_value_t = Address::ZERO)]
    pub contract: Address,

    /// Hex private key to connect at start-up (can also be entered with 'w')
    #[arg(long, env = "STUDY_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// How long a confirmed write stays on screen before the form resets
    #[arg(long, default_value = "2000")]
    pub refresh_delay_ms: u64,

    /// Log filter for the log file (e.g. "info", "study_tui=debug")
    #[arg(long, env = "STUDY_LOG", default_value = "info")]
    pub log_level: String,

    /// Print the contract's JSON ABI and exit
    #[arg(long)]
    pub print_abi: bool,
}
