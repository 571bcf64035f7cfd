use crate::data::types::ChainConfig;

/// Get a chain configuration preset by name.
pub fn get_chain_config(name: &str) -> Option<ChainConfig> {
    match name.to_lowercase().as_str() {
        "base" => Some(ChainConfig {
            name: "Base".to_string(),
            chain_id: 8453,
            rpc_url: "https://mainnet.base.org".to_string(),
            symbol: "ETH".to_string(),
            explorer_url: Some("https://basescan.org".to_string()),
        }),
        "base-sepolia" | "basesepolia" => Some(ChainConfig {
            name: "Base Sepolia".to_string(),
            chain_id: 84532,
            rpc_url: "https://sepolia.base.org".to_string(),
            symbol: "ETH".to_string(),
            explorer_url: Some("https://sepolia.basescan.org".to_string()),
        }),
        "ethereum" | "eth" | "mainnet" => Some(ChainConfig {
            name: "Ethereum".to_string(),
            chain_id: 1,
            rpc_url: "https://eth.merkle.io".to_string(),
            symbol: "ETH".to_string(),
            explorer_url: Some("https://etherscan.io".to_string()),
        }),
        "sepolia" => Some(ChainConfig {
            name: "Sepolia".to_string(),
            chain_id: 11155111,
            rpc_url: "https://rpc.sepolia.org".to_string(),
            symbol: "ETH".to_string(),
            explorer_url: Some("https://sepolia.etherscan.io".to_string()),
        }),
        "localhost" | "local" | "hardhat" => Some(ChainConfig {
            name: "Localhost".to_string(),
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            symbol: "ETH".to_string(),
            explorer_url: None,
        }),
        _ => None,
    }
}

/// Return a list of all supported chain names.
pub fn supported_chains() -> Vec<&'static str> {
    vec!["base", "base-sepolia", "ethereum", "sepolia", "localhost"]
}

impl ChainConfig {
    /// Explorer page for a transaction, when the chain has an explorer.
    pub fn tx_url(&self, hash: &alloy::primitives::B256) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{base}/tx/{hash}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn test_base_config() {
        let config = get_chain_config("base").unwrap();
        assert_eq!(config.chain_id, 8453);
        assert_eq!(config.rpc_url, "https://mainnet.base.org");
    }

    #[test]
    fn test_base_sepolia_aliases() {
        assert_eq!(get_chain_config("base-sepolia").unwrap().chain_id, 84532);
        assert!(get_chain_config("BaseSepolia").is_some());
    }

    #[test]
    fn test_localhost_has_no_explorer() {
        let config = get_chain_config("hardhat").unwrap();
        assert_eq!(config.chain_id, 31337);
        assert!(config.tx_url(&B256::ZERO).is_none());
    }

    #[test]
    fn test_tx_url() {
        let config = get_chain_config("base").unwrap();
        let url = config.tx_url(&B256::ZERO).unwrap();
        assert!(url.starts_with("https://basescan.org/tx/0x"));
        assert_eq!(url.len(), "https://basescan.org/tx/".len() + 66);
    }

    #[test]
    fn test_unknown_chain() {
        assert!(get_chain_config("polygon").is_none());
    }

    #[test]
    fn test_supported_chains_resolve() {
        for name in supported_chains() {
            assert!(get_chain_config(name).is_some(), "{name}");
        }
    }
}
