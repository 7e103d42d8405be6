//! Constants Module - Single Source of Truth
//!
//! Endpoints, environment variable names, HTTP defaults and chain metadata
//! used across the client. No other module hardcodes these values.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "GoPlusGuard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("GoPlusGuard/", env!("CARGO_PKG_VERSION"));

// ============================================
// API ENDPOINTS
// ============================================

/// Public v1 endpoint (token, address, NFT, dApp, ABI, access token)
pub const DEFAULT_API_V1_URL: &str = "https://api.gopluslabs.io/api/v1";

/// Public v2 endpoint (token / NFT approval scans)
pub const DEFAULT_API_V2_URL: &str = "https://api.gopluslabs.io/api/v2";

// ============================================
// ENVIRONMENT VARIABLES
// ============================================

/// Override for the v1 base URL
pub const ENV_API_V1_URL: &str = "GOPLUS_API_V1_URL";

/// Override for the v2 base URL
pub const ENV_API_V2_URL: &str = "GOPLUS_API_V2_URL";

/// Default access token (never logged)
pub const ENV_ACCESS_TOKEN: &str = "GOPLUS_ACCESS_TOKEN";

/// Transport timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "GOPLUS_TIMEOUT_SECS";

/// Token lookup policy: "strict" or "first"
pub const ENV_LOOKUP_POLICY: &str = "GOPLUS_LOOKUP_POLICY";

// ============================================
// ERROR TEXTS
// ============================================

/// Token lookup returned an array (strict policy)
pub const MSG_AUDITS_NOT_DETECTED: &str = "Contract audits not detected";

/// Token lookup returned an array (first-entry policy)
pub const MSG_NO_AUDITS_NOT_DETECTED: &str = "No contract audits not detected";

/// Token lookup map did not contain the requested contract
pub const MSG_INFORMATION_NOT_FOUND: &str = "Information not found";

// ============================================
// CHAIN IDS
// ============================================

/// Ethereum Mainnet
pub const CHAIN_ID_ETHEREUM: u64 = 1;
/// BNB Smart Chain
pub const CHAIN_ID_BSC: u64 = 56;
/// Polygon
pub const CHAIN_ID_POLYGON: u64 = 137;
/// Arbitrum One
pub const CHAIN_ID_ARBITRUM: u64 = 42161;
/// Optimism
pub const CHAIN_ID_OPTIMISM: u64 = 10;
/// Avalanche C-Chain
pub const CHAIN_ID_AVALANCHE: u64 = 43114;
/// Base
pub const CHAIN_ID_BASE: u64 = 8453;
/// zkSync Era
pub const CHAIN_ID_ZKSYNC_ERA: u64 = 324;
/// Linea
pub const CHAIN_ID_LINEA: u64 = 59144;

/// Get chain name for well-known numeric ids
pub fn get_chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        CHAIN_ID_ETHEREUM => "Ethereum",
        CHAIN_ID_BSC => "BNB Smart Chain",
        CHAIN_ID_POLYGON => "Polygon",
        CHAIN_ID_ARBITRUM => "Arbitrum One",
        CHAIN_ID_OPTIMISM => "Optimism",
        CHAIN_ID_AVALANCHE => "Avalanche C-Chain",
        CHAIN_ID_BASE => "Base",
        CHAIN_ID_ZKSYNC_ERA => "zkSync Era",
        CHAIN_ID_LINEA => "Linea",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_names() {
        assert_eq!(get_chain_name(CHAIN_ID_ETHEREUM), "Ethereum");
        assert_eq!(get_chain_name(CHAIN_ID_BSC), "BNB Smart Chain");
        assert_eq!(get_chain_name(999_999), "Unknown");
    }

    #[test]
    fn test_default_endpoints_share_host() {
        assert!(DEFAULT_API_V1_URL.ends_with("/api/v1"));
        assert!(DEFAULT_API_V2_URL.ends_with("/api/v2"));
        assert_eq!(
            DEFAULT_API_V1_URL.trim_end_matches("v1"),
            DEFAULT_API_V2_URL.trim_end_matches("v2")
        );
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("GoPlusGuard/"));
        assert!(USER_AGENT.ends_with(APP_VERSION));
    }
}
