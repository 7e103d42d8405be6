//! Response and request shapes of the GoPlus Security API
//!
//! Pure data-transfer records. Anything the service may omit is an `Option`
//! or defaults to an empty collection. Flags the service encodes as `"0"`/`"1"`
//! strings stay strings; helpers interpret them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// `"1"` means the flag is raised
fn flag_set(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim) == Some("1")
}

// ============================================
// Supported chains
// ============================================

/// Entry of `/supported_chains`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedChain {
    pub id: String,
    pub name: String,
}

// ============================================
// Token security
// ============================================

/// Token risk report for a single contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSecurity {
    /// Contract the report belongs to (the key of the result map)
    #[serde(default)]
    pub address: String,

    // Contract security
    pub is_open_source: Option<String>,
    pub is_proxy: Option<String>,
    pub is_mintable: Option<String>,
    pub owner_address: Option<String>,
    pub can_take_back_ownership: Option<String>,
    pub owner_change_balance: Option<String>,
    pub hidden_owner: Option<String>,
    pub selfdestruct: Option<String>,
    pub external_call: Option<String>,

    // Trading security
    pub buy_tax: Option<String>,
    pub sell_tax: Option<String>,
    pub cannot_buy: Option<String>,
    pub cannot_sell_all: Option<String>,
    pub slippage_modifiable: Option<String>,
    pub is_honeypot: Option<String>,
    pub transfer_pausable: Option<String>,
    pub is_blacklisted: Option<String>,
    pub is_whitelisted: Option<String>,
    pub is_in_dex: Option<String>,
    #[serde(default)]
    pub dex: Vec<DexInfo>,
    pub is_anti_whale: Option<String>,
    pub trading_cooldown: Option<String>,
    pub personal_slippage_modifiable: Option<String>,

    // Info security
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub holder_count: Option<String>,
    pub total_supply: Option<String>,
    #[serde(default)]
    pub holders: Vec<TokenHolder>,
    pub owner_balance: Option<String>,
    pub owner_percent: Option<String>,
    pub creator_address: Option<String>,
    pub creator_balance: Option<String>,
    pub creator_percent: Option<String>,
    pub lp_holder_count: Option<String>,
    pub lp_total_supply: Option<String>,
    #[serde(default)]
    pub lp_holders: Vec<TokenHolder>,
    pub is_true_token: Option<String>,
    pub is_airdrop_scam: Option<String>,
    pub trust_list: Option<String>,
    pub other_potential_risks: Option<String>,
    pub note: Option<String>,
}

impl TokenSecurity {
    pub fn is_honeypot(&self) -> bool {
        flag_set(&self.is_honeypot)
    }

    /// Buy tax in percent (`"0.05"` → `5.0`)
    pub fn buy_tax_pct(&self) -> Option<f64> {
        parse_ratio_pct(&self.buy_tax)
    }

    /// Sell tax in percent
    pub fn sell_tax_pct(&self) -> Option<f64> {
        parse_ratio_pct(&self.sell_tax)
    }

    /// Names of risk flags the service raised
    pub fn risk_flags(&self) -> Vec<&'static str> {
        let checks: [(&'static str, &Option<String>); 14] = [
            ("is_honeypot", &self.is_honeypot),
            ("is_mintable", &self.is_mintable),
            ("is_proxy", &self.is_proxy),
            ("can_take_back_ownership", &self.can_take_back_ownership),
            ("owner_change_balance", &self.owner_change_balance),
            ("hidden_owner", &self.hidden_owner),
            ("selfdestruct", &self.selfdestruct),
            ("external_call", &self.external_call),
            ("cannot_buy", &self.cannot_buy),
            ("cannot_sell_all", &self.cannot_sell_all),
            ("slippage_modifiable", &self.slippage_modifiable),
            ("transfer_pausable", &self.transfer_pausable),
            ("is_blacklisted", &self.is_blacklisted),
            ("is_airdrop_scam", &self.is_airdrop_scam),
        ];

        let mut flags: Vec<&'static str> = checks
            .iter()
            .filter(|(_, value)| flag_set(value))
            .map(|(name, _)| *name)
            .collect();

        // Open source is the safe value, so the risk is "0"
        if self.is_open_source.as_deref() == Some("0") {
            flags.push("closed_source");
        }
        flags
    }
}

fn parse_ratio_pct(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|ratio| ratio * 100.0)
}

/// DEX listing of a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexInfo {
    pub name: String,
    pub liquidity: String,
    pub pair: String,
}

/// Token or LP holder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHolder {
    pub address: String,
    pub is_locked: Option<serde_json::Value>,
    pub tag: Option<String>,
    pub is_contract: Option<serde_json::Value>,
    pub balance: String,
    pub percent: String,
    #[serde(default)]
    pub locked_detail: Vec<LockedDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedDetail {
    pub amount: String,
    pub end_time: String,
    pub opt_time: String,
}

// ============================================
// Address security
// ============================================

/// Malicious-address report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressSecurity {
    pub data_source: Option<String>,
    pub honeypot_related_address: Option<String>,
    pub phishing_activities: Option<String>,
    pub blackmail_activities: Option<String>,
    pub stealing_attack: Option<String>,
    pub fake_kyc: Option<String>,
    pub malicious_mining_activities: Option<String>,
    pub darkweb_transactions: Option<String>,
    pub cybercrime: Option<String>,
    pub money_laundering: Option<String>,
    pub financial_crime: Option<String>,
    pub blacklist_doubt: Option<String>,
    pub contract_address: Option<String>,
}

impl AddressSecurity {
    pub fn flagged_categories(&self) -> Vec<&'static str> {
        [
            ("honeypot_related_address", &self.honeypot_related_address),
            ("phishing_activities", &self.phishing_activities),
            ("blackmail_activities", &self.blackmail_activities),
            ("stealing_attack", &self.stealing_attack),
            ("fake_kyc", &self.fake_kyc),
            ("malicious_mining_activities", &self.malicious_mining_activities),
            ("darkweb_transactions", &self.darkweb_transactions),
            ("cybercrime", &self.cybercrime),
            ("money_laundering", &self.money_laundering),
            ("financial_crime", &self.financial_crime),
            ("blacklist_doubt", &self.blacklist_doubt),
        ]
        .iter()
        .filter(|(_, value)| flag_set(value))
        .map(|(name, _)| *name)
        .collect()
    }

    pub fn is_malicious(&self) -> bool {
        !self.flagged_categories().is_empty()
    }
}

// ============================================
// Approval security
// ============================================

/// v1 approval (spender contract) report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalSecurity {
    pub contract_name: Option<String>,
    pub tag: Option<String>,
    pub is_contract: Option<String>,
    pub creator_address: Option<String>,
    pub deployed_time: Option<i64>,
    pub is_open_source: Option<String>,
    pub is_proxy: Option<String>,
    pub trust_list: Option<String>,
    pub doubt_list: Option<String>,
    #[serde(default)]
    pub malicious_behavior: Vec<String>,
}

/// Spender details attached to every v2 approval record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedAddressInfo {
    pub contract_name: Option<String>,
    pub tag: Option<String>,
    pub creator_address: Option<String>,
    pub is_contract: Option<i64>,
    pub doubt_list: Option<i64>,
    #[serde(default)]
    pub malicious_behavior: Vec<String>,
    pub deployed_time: Option<i64>,
    pub trust_list: Option<i64>,
    pub is_open_source: Option<i64>,
}

impl ApprovedAddressInfo {
    pub fn is_suspicious(&self) -> bool {
        self.doubt_list == Some(1) || !self.malicious_behavior.is_empty()
    }
}

/// v2 ERC-20 approvals of one token held by the scanned address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc20ApprovalSecurity {
    pub token_address: String,
    pub chain_id: Option<String>,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub decimals: Option<u32>,
    pub balance: Option<String>,
    pub is_open_source: Option<i64>,
    pub malicious_address: Option<i64>,
    #[serde(default)]
    pub malicious_behavior: Vec<String>,
    #[serde(default)]
    pub approved_list: Vec<Erc20Approval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc20Approval {
    pub approved_contract: String,
    pub approved_amount: Option<String>,
    pub approved_time: Option<i64>,
    pub initial_approval_time: Option<serde_json::Value>,
    pub initial_approval_hash: Option<String>,
    pub hash: Option<String>,
    pub address_info: Option<ApprovedAddressInfo>,
}

/// v2 ERC-721 / ERC-1155 approvals of one collection held by the scanned address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftApprovalSecurity {
    pub nft_address: String,
    pub chain_id: Option<String>,
    pub nft_name: Option<String>,
    pub nft_symbol: Option<String>,
    pub is_open_source: Option<i64>,
    pub is_verified: Option<i64>,
    pub malicious_address: Option<i64>,
    #[serde(default)]
    pub malicious_behavior: Vec<String>,
    #[serde(default)]
    pub approved_list: Vec<NftApproval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftApproval {
    pub approved_contract: String,
    pub initial_approval_time: Option<i64>,
    pub initial_approval_hash: Option<String>,
    pub approved_time: Option<i64>,
    pub hash: Option<String>,
    pub approved_for_all: Option<i64>,
    pub approved_token_id: Option<String>,
    pub address_info: Option<ApprovedAddressInfo>,
}

// ============================================
// NFT security
// ============================================

/// NFT collection report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftSecurity {
    pub nft_name: Option<String>,
    pub nft_symbol: Option<String>,
    pub nft_description: Option<String>,
    pub nft_erc: Option<String>,
    pub creator_address: Option<String>,
    pub create_block_number: Option<u64>,
    pub website_url: Option<String>,
    pub discord_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub medium_url: Option<String>,
    pub telegram_url: Option<String>,
    pub nft_items: Option<u64>,
    pub nft_owner_number: Option<u64>,
    pub average_price_24h: Option<f64>,
    pub lowest_price_24h: Option<f64>,
    pub sales_24h: Option<f64>,
    pub traded_volume_24h: Option<f64>,
    pub total_volume: Option<f64>,
    pub highest_price: Option<f64>,
    pub nft_verified: Option<serde_json::Value>,
    #[serde(default)]
    pub same_nfts: Vec<SameNft>,
    pub trust_list: Option<i64>,
}

/// Look-alike collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SameNft {
    pub create_block_number: Option<u64>,
    pub nft_address: String,
    pub nft_name: Option<String>,
    pub nft_owner_number: Option<u64>,
    pub nft_symbol: Option<String>,
}

// ============================================
// dApp security
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DappSecurity {
    pub project_name: Option<String>,
    pub url: String,
    pub is_audit: Option<serde_json::Value>,
    #[serde(default)]
    pub audit_info: Vec<AuditInfo>,
    #[serde(default)]
    pub contracts_security: Vec<ChainContracts>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditInfo {
    pub audit_time: Option<String>,
    pub audit_link: Option<String>,
    pub audit_firm: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainContracts {
    pub chain_id: serde_json::Value,
    #[serde(default)]
    pub contracts: Vec<DappContract>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DappContract {
    pub contract_address: String,
    pub is_open_source: Option<serde_json::Value>,
    pub creator_address: Option<String>,
    pub malicious_contract: Option<i64>,
    pub deployment_time: Option<i64>,
    pub malicious_creator: Option<i64>,
}

// ============================================
// Phishing site
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingSite {
    pub phishing_site: u8,
}

impl PhishingSite {
    pub fn is_phishing(&self) -> bool {
        self.phishing_site == 1
    }
}

// ============================================
// ABI input decode
// ============================================

/// Body of `POST /abi/input_decode`
#[derive(Debug, Clone, Serialize)]
pub struct InputDecodeRequest {
    pub chain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDecode {
    pub method: String,
    #[serde(default)]
    pub params: Vec<DecodedParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedParam {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub input: serde_json::Value,
    pub address_info: Option<Vec<ParamAddressInfo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamAddressInfo {
    pub standard: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub contract_name: Option<String>,
    pub malicious_address: Option<i64>,
    pub is_contract: Option<i64>,
}

// ============================================
// Access token
// ============================================

/// Body of `POST /token`. `sign` is computed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessTokenRequest {
    pub app_key: String,
    pub time: i64,
    pub sign: String,
}

impl AccessTokenRequest {
    pub fn new(app_key: impl Into<String>, time: i64, sign: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            time,
            sign: sign.into(),
        }
    }

    /// Request stamped with the current unix time
    pub fn now(app_key: impl Into<String>, sign: impl Into<String>) -> Self {
        Self::new(app_key, Utc::now().timestamp(), sign)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl AccessToken {
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in)
    }
}
